use regex::Regex;
use std::sync::LazyLock;

/// An `i18n-keys` annotation found in source code.
///
/// Declares keys that a nearby dynamic call (`t(`${prefix}.title`)`) may use,
/// so they still count as referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAnnotation {
    /// Declared keys, optionally `namespace:`-prefixed, may contain `*`.
    pub patterns: Vec<String>,
    /// Line number where the annotation was found.
    pub line: usize,
}

// Matches both JS and JSX comment styles:
// - JS:  // i18n-keys "calc/health:bmi.low", "bmi.high"
// - JSX: {/* i18n-keys "bmi.low" */}
// The colon after the marker is optional.
static KEY_ANNOTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?://\s*i18n-keys|\{\s*/\*\s*i18n-keys):?\s*(.*?)(?:\s*\*/|\s*$)"#).unwrap()
});

static QUOTED_STRING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

/// Extract all `i18n-keys` annotations from source code.
///
/// Annotations without any quoted key are ignored. Patterns are returned
/// as written; the namespace prefix is split off by the caller.
pub fn extract_key_annotations(source: &str) -> Vec<KeyAnnotation> {
    let mut annotations = Vec::new();

    for (line_idx, line) in source.lines().enumerate() {
        let Some(captures) = KEY_ANNOTATION_REGEX.captures(line) else {
            continue;
        };
        let patterns_str = captures.get(1).map_or("", |m| m.as_str());

        let patterns: Vec<String> = QUOTED_STRING_REGEX
            .captures_iter(patterns_str)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect();

        if !patterns.is_empty() {
            annotations.push(KeyAnnotation {
                patterns,
                line: line_idx + 1,
            });
        }
    }

    annotations
}

/// `bmi..low` and `.bmi` can never name a key.
pub fn has_empty_segment(key: &str) -> bool {
    key.split('.').any(str::is_empty)
}
