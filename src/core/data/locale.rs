use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::Serialize;
use serde_json::Value;

use super::flat::FlatKeyMap;

/// Namespace (relative file path without `.json`, e.g. `calc/health`) to
/// the parsed JSON of that file.
pub type LocaleTree = BTreeMap<String, Value>;

/// Which of the two audited locales something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocaleSide {
    Source,
    Target,
}

impl fmt::Display for LocaleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleSide::Source => write!(f, "source"),
            LocaleSide::Target => write!(f, "target"),
        }
    }
}

/// A file that could not be read or parsed. The run continues without it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailure {
    pub file_path: String,
    /// Namespace the file would have provided; `None` for UI source files.
    pub namespace: Option<String>,
    pub error: String,
}

/// Result of loading one locale directory.
#[derive(Debug, Default)]
pub struct LoadedLocale {
    pub tree: LocaleTree,
    pub failures: Vec<LoadFailure>,
}

impl LoadedLocale {
    /// Number of locale files that were parsed successfully.
    pub fn file_count(&self) -> usize {
        self.tree.len()
    }
}

/// A locale tree flattened per namespace, ready for diffing.
#[derive(Debug, Default)]
pub struct FlatLocale {
    pub namespaces: BTreeMap<String, FlatKeyMap>,
    /// Namespaces whose file exists but could not be loaded.
    pub failed: BTreeSet<String>,
}

impl FlatLocale {
    pub fn get(&self, namespace: &str) -> Option<&FlatKeyMap> {
        self.namespaces.get(namespace)
    }

    pub fn is_failed(&self, namespace: &str) -> bool {
        self.failed.contains(namespace)
    }
}
