//! locale-audit - translation coverage auditor
//!
//! Compares a source-language locale tree with a target-language one, and
//! checks the translation keys used by UI source files against both. Reports
//! missing keys in each direction, structural differences, per-file and
//! per-component coverage, unused keys, and call sites whose keys cannot be
//! known statically.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface (arguments, commands, console report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Audit engine (Load → Flatten/Extract → Diff)
//! - `logging`: stderr log output for recoverable problems

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
