//! Source Key Extractor: finds the translation keys a UI source file uses.
//!
//! The file is parsed with swc and walked once by [`KeyExtractor`]. Keys
//! declared in `i18n-keys` comments are added afterwards, with the namespace
//! that was in effect on the annotation's line.

pub mod annotations;
pub mod key_extractor;

use anyhow::Result;
use swc_ecma_visit::VisitWith;

pub use annotations::{KeyAnnotation, extract_key_annotations, has_empty_segment};
pub use key_extractor::{KeyExtractor, static_string};

use crate::core::FileUsages;
use crate::core::parsers::jsx::parse_source;

/// Which call sites count as translation hooks and translation calls.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Functions whose first argument is a key: `t("key")`.
    pub translation_functions: Vec<String>,
    /// Functions whose first argument declares the file's namespace.
    pub translation_hooks: Vec<String>,
    /// Separator between an explicit namespace and the key (`ns:key`).
    /// `None` disables namespace prefixes entirely.
    pub namespace_separator: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            translation_functions: vec!["t".to_string()],
            translation_hooks: [
                "useTranslation",
                "useTranslations",
                "getTranslations",
                "withTranslation",
            ]
            .map(String::from)
            .to_vec(),
            namespace_separator: Some(":".to_string()),
        }
    }
}

impl ExtractOptions {
    pub fn is_translation_function(&self, name: &str) -> bool {
        self.translation_functions.iter().any(|f| f == name)
    }

    pub fn is_translation_hook(&self, name: &str) -> bool {
        self.translation_hooks.iter().any(|h| h == name)
    }

    /// Split `ns:key` into `(ns, key)`.
    ///
    /// Splits at the first separator only, and only when the prefix is a
    /// plausible namespace (non-empty, no whitespace) and the key does not
    /// start with whitespace. `"Ratio: {{value}}"` stays a single key.
    pub fn split_namespace<'k>(&self, raw_key: &'k str) -> Option<(&'k str, &'k str)> {
        let separator = self.namespace_separator.as_deref()?;
        let (namespace, key) = raw_key.split_once(separator)?;
        if namespace.is_empty()
            || namespace.chars().any(char::is_whitespace)
            || key.starts_with(char::is_whitespace)
        {
            return None;
        }
        Some((namespace, key))
    }
}

/// Extract key usages from one source file.
///
/// Returns an error only when the file cannot be parsed; the caller skips it.
pub fn extract_key_usages(
    source: String,
    file_path: &str,
    options: &ExtractOptions,
) -> Result<FileUsages> {
    let annotations = extract_key_annotations(&source);
    let parsed = parse_source(source, file_path)?;

    let mut extractor = KeyExtractor::new(file_path, &parsed.source_map, options);
    parsed.module.visit_with(&mut extractor);

    for annotation in annotations {
        let namespace = extractor.namespace_at(annotation.line);
        for pattern in &annotation.patterns {
            let key = options
                .split_namespace(pattern)
                .map_or(pattern.as_str(), |(_, key)| key);
            if has_empty_segment(key) {
                continue;
            }
            extractor.add_usage(pattern, namespace.clone(), annotation.line, 1);
        }
    }

    Ok(FileUsages {
        file_path: file_path.to_string(),
        usages: extractor.usages,
        dynamic_keys: extractor.dynamic_keys,
    })
}
