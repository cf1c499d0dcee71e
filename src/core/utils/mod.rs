//! Utility functions shared by the audit pipeline.
//!
//! - `glob_matcher`: wildcard expansion for annotated key patterns

pub mod glob_matcher;

pub use glob_matcher::*;
