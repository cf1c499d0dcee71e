use std::{
    fs,
    path::{Component, Path},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::{FlatKeyMap, FlatLocale, FlatValue, LoadFailure, LoadedLocale, LocaleTree};

/// Flatten a JSON value into dotted paths.
///
/// Objects and arrays leave a marker at their own path (objects only when
/// the path is non-empty), properties are joined with `.` and array
/// elements with `[index]`.
///
/// ```
/// use locale_audit::core::parsers::json::flatten_value;
///
/// let value = serde_json::json!({"a": {"b": "x", "c": ["y", "z"]}});
/// let flat = flatten_value(&value, "");
/// let rendered: Vec<String> = flat.iter().map(|(k, v)| format!("{k}={v}")).collect();
/// assert_eq!(
///     rendered,
///     ["a=Object", "a.b=x", "a.c=Array:2", "a.c[0]=y", "a.c[1]=z"]
/// );
/// ```
pub fn flatten_value(value: &Value, prefix: &str) -> FlatKeyMap {
    let mut result = FlatKeyMap::new();
    flatten_into(value, prefix.to_string(), &mut result);
    result
}

fn flatten_into(value: &Value, path: String, result: &mut FlatKeyMap) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(val, child, result);
            }
            if !path.is_empty() {
                result.insert(path, FlatValue::Object);
            }
        }
        Value::Array(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_into(val, format!("{}[{}]", path, index), result);
            }
            if !path.is_empty() {
                result.insert(path, FlatValue::Array(items.len()));
            }
        }
        Value::Null => {
            result.insert(path, FlatValue::Null);
        }
        Value::Bool(b) => {
            result.insert(path, FlatValue::Bool(*b));
        }
        Value::Number(n) => {
            result.insert(path, FlatValue::Number(n.clone()));
        }
        Value::String(s) => {
            result.insert(path, FlatValue::String(s.clone()));
        }
    }
}

/// Derive the namespace of a locale file from its path relative to the
/// locale root: `calc/health.json` -> `calc/health`.
///
/// Segments are always joined with `/`, whatever the platform separator.
pub fn namespace_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

pub fn parse_json_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}

/// Load every `*.json` file under `root` into a namespace-keyed tree.
///
/// A file that cannot be read or parsed is logged, recorded in
/// `failures`, and skipped. A missing root yields an empty tree.
pub fn load_locale_tree(root: &Path) -> LoadedLocale {
    let mut result = LoadedLocale::default();

    if !root.is_dir() {
        debug!(root = %root.display(), "locale directory not found, treating as empty");
        return result;
    }

    let entries = WalkDir::new(root).sort_by_file_name();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "cannot access path under locale directory");
                result.failures.push(LoadFailure {
                    file_path: e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string()),
                    namespace: None,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json")
        {
            continue;
        }
        let Some(namespace) = namespace_for(root, path) else {
            continue;
        };

        match parse_json_file(path) {
            Ok(value) => {
                result.tree.insert(namespace, value);
            }
            Err(e) => {
                warn!(path = %path.display(), "skipping unreadable locale file: {:#}", e);
                result.failures.push(LoadFailure {
                    file_path: path.display().to_string(),
                    namespace: Some(namespace),
                    error: format!("{:#}", e),
                });
            }
        }
    }

    result
}

/// Flatten every namespace of a loaded locale.
pub fn flatten_locale(loaded: &LoadedLocale) -> FlatLocale {
    FlatLocale {
        namespaces: flatten_tree(&loaded.tree),
        failed: loaded
            .failures
            .iter()
            .filter_map(|f| f.namespace.clone())
            .collect(),
    }
}

fn flatten_tree(tree: &LocaleTree) -> std::collections::BTreeMap<String, FlatKeyMap> {
    tree.iter()
        .map(|(namespace, value)| (namespace.clone(), flatten_value(value, "")))
        .collect()
}
