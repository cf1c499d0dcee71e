//! Data types shared by every stage of an audit run.
//!
//! - `flat`: flattened translation trees (`FlatKeyMap`, `FlatValue`)
//! - `locale`: loaded locale trees and load failures
//! - `key_usage`: keys extracted from UI source files
//! - `report`: coverage reports, totals and the full audit report

pub mod flat;
pub mod key_usage;
pub mod locale;
pub mod report;

pub use flat::*;
pub use key_usage::*;
pub use locale::*;
pub use report::*;
