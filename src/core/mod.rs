//! Core audit engine.
//!
//! - `parsers`: locale JSON loading/flattening and swc source parsing
//! - `extract`: translation key usages from UI source files
//! - `scan`: UI source file discovery
//! - `diff`: coverage reports and rankings
//! - `audit`: the pipeline tying them together
//! - `data`: types shared across stages

pub mod audit;
pub mod data;
pub mod diff;
pub mod extract;
pub mod parsers;
pub mod scan;
pub mod utils;

pub use data::*;
