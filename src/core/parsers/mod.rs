//! File parsers for locale files and UI source files.
//!
//! - `json`: locale tree loading and key flattening
//! - `jsx`: JS/TS/JSX/TSX source parsing (uses swc for AST generation)

pub mod json;
pub mod jsx;
