use std::collections::{HashMap, HashSet};

use super::ranking::coverage_percentage;
use crate::core::{
    CoverageReport, FlatLocale, KeyUsage, ReportKind, leaf_paths, qualified_key,
    utils::{expand_key_pattern, is_key_pattern},
};

/// Replace wildcard usages (from `i18n-keys` annotations) with the
/// source-locale keys they match.
///
/// A pattern that matches nothing is kept as-is, so it is reported missing
/// rather than silently dropped. Usages are deduplicated on the namespace
/// they resolve to: `t("save")` under the default namespace and
/// `t("common:save")` are the same key.
pub fn expand_usages(usages: &[KeyUsage], source: &FlatLocale, default_namespace: &str) -> Vec<KeyUsage> {
    let mut seen = HashSet::new();
    let mut expanded = Vec::with_capacity(usages.len());

    for usage in usages {
        let namespace = usage.resolved_namespace(default_namespace);
        let matches = if is_key_pattern(&usage.key) {
            source
                .get(namespace)
                .map(|map| expand_key_pattern(&usage.key, map.keys().map(String::as_str)))
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        if matches.is_empty() {
            if seen.insert((usage.key.clone(), namespace)) {
                expanded.push(usage.clone());
            }
            continue;
        }
        for key in matches {
            if seen.insert((key.clone(), namespace)) {
                expanded.push(KeyUsage::new(
                    key,
                    usage.namespace.clone(),
                    usage.line,
                    usage.col,
                ));
            }
        }
    }

    expanded
}

/// `tips.0.title` written with array indices, as flattened: `tips[0].title`.
///
/// `None` when no segment after the first is numeric.
fn array_index_form(key: &str) -> Option<String> {
    let mut segments = key.split('.');
    let mut path = segments.next()?.to_string();
    let mut changed = false;
    for segment in segments {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            path.push('[');
            path.push_str(segment);
            path.push(']');
            changed = true;
        } else {
            path.push('.');
            path.push_str(segment);
        }
    }
    changed.then_some(path)
}

/// Whether `key` exists in the namespace, as written or with its numeric
/// segments read as array indices.
fn is_present(locale: &FlatLocale, namespace: &str, key: &str) -> bool {
    locale.get(namespace).is_some_and(|map| {
        map.contains_key(key) || array_index_form(key).is_some_and(|path| map.contains_key(&path))
    })
}

/// Check one component's key usages against both locales.
///
/// A key is present when its exact path exists in the namespace, whether as
/// a leaf or as a subtree (`returnObjects` lookups). Keys whose namespace
/// failed to load are listed as unverified instead of missing, and are left
/// out of the percentage.
pub fn compare_usages(
    component: &str,
    usages: &[KeyUsage],
    source: &FlatLocale,
    target: &FlatLocale,
    default_namespace: &str,
) -> CoverageReport {
    let mut report = CoverageReport::new(component, ReportKind::Component);
    report.total_keys = usages.len();
    let mut unverified_in_target = 0;

    for usage in usages {
        let namespace = usage.resolved_namespace(default_namespace);
        let qualified = usage.qualified(default_namespace);

        if source.is_failed(namespace) || target.is_failed(namespace) {
            report.unverified_keys.push(qualified.clone());
        }

        if target.is_failed(namespace) {
            unverified_in_target += 1;
        } else if !is_present(target, namespace, &usage.key) {
            report.missing_in_target_locale.push(qualified.clone());
        }

        if !source.is_failed(namespace) && !is_present(source, namespace, &usage.key) {
            report.missing_in_source_locale.push(qualified);
        }
    }

    report.missing_in_target_locale.sort();
    report.missing_in_source_locale.sort();
    report.unverified_keys.sort();
    report.coverage = coverage_percentage(
        report.total_keys - unverified_in_target,
        report.missing_count(),
    );
    report
}

/// Whether `path` or one of its ancestors (`a` and `a.b` for `a.b[0]`) is in
/// `keys`.
fn is_referenced(path: &str, keys: &HashSet<String>) -> bool {
    keys.contains(path)
        || path
            .char_indices()
            .filter(|(_, c)| *c == '.' || *c == '[')
            .any(|(i, _)| keys.contains(&path[..i]))
}

/// Source-locale leaf keys (`namespace:key`) that no usage references.
///
/// Using a subtree (`t("tips", { returnObjects: true })`) references every
/// key below it.
pub fn unused_keys<'a>(
    source: &FlatLocale,
    usages: impl IntoIterator<Item = &'a KeyUsage>,
    default_namespace: &str,
) -> Vec<String> {
    let mut referenced: HashMap<&str, HashSet<String>> = HashMap::new();
    for usage in usages {
        let keys = referenced
            .entry(usage.resolved_namespace(default_namespace))
            .or_default();
        keys.extend(array_index_form(&usage.key));
        keys.insert(usage.key.clone());
    }

    let empty = HashSet::new();
    source
        .namespaces
        .iter()
        .flat_map(|(namespace, map)| {
            let keys = referenced.get(namespace.as_str()).unwrap_or(&empty);
            leaf_paths(map)
                .filter(move |path| !is_referenced(path, keys))
                .map(move |path| qualified_key(namespace, path))
        })
        .collect()
}
