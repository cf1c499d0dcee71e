//! Coverage Differ: turns flattened locales and key usages into reports.
//!
//! - `trees`: locale-to-locale comparison (missing keys, structural differences)
//! - `usages`: component key usages against both locales, unused keys
//! - `ranking`: coverage percentages and report orderings

pub mod ranking;
pub mod trees;
pub mod usages;

pub use ranking::{almost_done, coverage_percentage, largest_gaps};
pub use trees::{compare_flat_maps, compare_locales, missing_leaf_keys, structural_differences};
pub use usages::{compare_usages, expand_usages, unused_keys};
