use std::collections::BTreeSet;

use super::ranking::coverage_percentage;
use crate::core::{
    CoverageReport, FlatKeyMap, FlatLocale, FlatValue, LocaleSide, ReportKind,
    StructuralDifference, leaf_paths,
};

/// Leaf paths of `from` that do not exist at all in `to`.
///
/// A path that exists in `to` with another shape is not missing; it shows up
/// as a structural difference instead.
pub fn missing_leaf_keys(from: &FlatKeyMap, to: &FlatKeyMap) -> Vec<String> {
    leaf_paths(from)
        .filter(|path| !to.contains_key(*path))
        .map(str::to_string)
        .collect()
}

/// Shape divergences at paths present in both maps.
///
/// Flags arrays of different lengths, and paths where one side is an object
/// or array and the other side is not the same kind of container. Two
/// primitives of different types are not a structural difference.
pub fn structural_differences(source: &FlatKeyMap, target: &FlatKeyMap) -> Vec<StructuralDifference> {
    source
        .iter()
        .filter_map(|(path, source_value)| {
            let target_value = target.get(path)?;
            match (source_value, target_value) {
                (FlatValue::Array(source_len), FlatValue::Array(target_len)) => {
                    (source_len != target_len).then(|| StructuralDifference::ArrayLength {
                        path: path.clone(),
                        source_len: *source_len,
                        target_len: *target_len,
                    })
                }
                (s, t) if (s.is_structural() || t.is_structural()) && s.kind() != t.kind() => {
                    Some(StructuralDifference::TypeMismatch {
                        path: path.clone(),
                        source_kind: s.kind(),
                        target_kind: t.kind(),
                    })
                }
                _ => None,
            }
        })
        .collect()
}

/// Compare one namespace between the source and target locale.
pub fn compare_flat_maps(name: &str, source: &FlatKeyMap, target: &FlatKeyMap) -> CoverageReport {
    let mut report = CoverageReport::new(name, ReportKind::LocaleFile);
    report.total_keys = leaf_paths(source).count();
    report.missing_in_target_locale = missing_leaf_keys(source, target);
    report.missing_in_source_locale = missing_leaf_keys(target, source);
    report.structural_differences = structural_differences(source, target);
    report.coverage = coverage_percentage(report.total_keys, report.missing_count());
    report
}

/// Compare every namespace present in either locale, sorted by namespace.
///
/// A namespace missing on one side is compared against an empty map, so all
/// its keys are reported missing. A namespace whose file failed to load is
/// reported as such, without key lists.
pub fn compare_locales(source: &FlatLocale, target: &FlatLocale) -> Vec<CoverageReport> {
    let namespaces: BTreeSet<&String> = source
        .namespaces
        .keys()
        .chain(target.namespaces.keys())
        .chain(&source.failed)
        .chain(&target.failed)
        .collect();

    let empty = FlatKeyMap::new();
    namespaces
        .into_iter()
        .map(|namespace| {
            let failed_side = if source.is_failed(namespace) {
                Some(LocaleSide::Source)
            } else if target.is_failed(namespace) {
                Some(LocaleSide::Target)
            } else {
                None
            };

            match failed_side {
                Some(side) => {
                    let mut report = CoverageReport::new(namespace.as_str(), ReportKind::LocaleFile);
                    report.load_failure = Some(side);
                    report
                }
                None => compare_flat_maps(
                    namespace,
                    source.get(namespace).unwrap_or(&empty),
                    target.get(namespace).unwrap_or(&empty),
                ),
            }
        })
        .collect()
}
