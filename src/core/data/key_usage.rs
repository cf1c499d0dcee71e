//! Translation key usages extracted from UI source files.

use std::fmt;

use serde::Serialize;

/// A translation key referenced by a UI source file.
///
/// `namespace` comes from an explicit `ns:key` prefix or, failing that, from
/// the translation hook declared earlier in the same file. `None` means the
/// file never declared one; the configured default namespace applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUsage {
    pub key: String,
    pub namespace: Option<String>,
    /// Line of the first occurrence in the file (1-indexed).
    pub line: usize,
    /// Column of the first occurrence in the file (1-indexed).
    pub col: usize,
}

impl KeyUsage {
    pub fn new(key: impl Into<String>, namespace: Option<String>, line: usize, col: usize) -> Self {
        Self {
            key: key.into(),
            namespace,
            line,
            col,
        }
    }

    /// Namespace this usage resolves to, given the configured default.
    pub fn resolved_namespace<'a>(&'a self, default_namespace: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(default_namespace)
    }

    /// `namespace:key` form used in reports.
    pub fn qualified(&self, default_namespace: &str) -> String {
        qualified_key(self.resolved_namespace(default_namespace), &self.key)
    }
}

/// Join a namespace and a key the way reports print them.
pub fn qualified_key(namespace: &str, key: &str) -> String {
    format!("{}:{}", namespace, key)
}

/// Why a translation call was skipped during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DynamicKeyReason {
    /// Key is a variable or other expression: `t(keyName)`
    VariableKey,
    /// Key is a template with interpolation: `` t(`${prefix}.key`) ``
    TemplateWithExpr,
}

impl fmt::Display for DynamicKeyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicKeyReason::VariableKey => write!(f, "variable key"),
            DynamicKeyReason::TemplateWithExpr => write!(f, "template with expression"),
        }
    }
}

/// A translation call whose key cannot be known statically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicKey {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub reason: DynamicKeyReason,
    pub source_line: String,
}

/// Everything extracted from one UI source file.
#[derive(Debug, Clone, Default)]
pub struct FileUsages {
    pub file_path: String,
    /// Deduplicated on `(key, namespace)`, in order of first occurrence.
    pub usages: Vec<KeyUsage>,
    pub dynamic_keys: Vec<DynamicKey>,
}
