use std::{collections::BTreeSet, fmt};

use serde::Serialize;

use super::{
    key_usage::{DynamicKey, qualified_key},
    locale::{LoadFailure, LocaleSide},
};

/// What a `CoverageReport` was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportKind {
    /// One namespace compared between the two locale trees.
    LocaleFile,
    /// One UI source file's key usages checked against the locales.
    Component,
}

/// A shape divergence at a path present in both trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StructuralDifference {
    /// Both sides are arrays, with different lengths.
    #[serde(rename_all = "camelCase")]
    ArrayLength {
        path: String,
        source_len: usize,
        target_len: usize,
    },
    /// One side is a container (object or array) and the other is not the
    /// same kind of container.
    #[serde(rename_all = "camelCase")]
    TypeMismatch {
        path: String,
        source_kind: &'static str,
        target_kind: &'static str,
    },
}

impl StructuralDifference {
    pub fn path(&self) -> &str {
        match self {
            StructuralDifference::ArrayLength { path, .. }
            | StructuralDifference::TypeMismatch { path, .. } => path,
        }
    }
}

impl fmt::Display for StructuralDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralDifference::ArrayLength {
                path,
                source_len,
                target_len,
            } => write!(
                f,
                "{}: array length {} in source, {} in target",
                path, source_len, target_len
            ),
            StructuralDifference::TypeMismatch {
                path,
                source_kind,
                target_kind,
            } => write!(
                f,
                "{}: {} in source, {} in target",
                path, source_kind, target_kind
            ),
        }
    }
}

/// Coverage of one locale file or one UI component.
///
/// Built once by the differ and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Namespace for locale files, source path for components.
    pub name: String,
    pub kind: ReportKind,
    /// Keys the coverage percentage is computed over: source leaf keys for
    /// locale files, distinct key usages for components.
    pub total_keys: usize,
    pub missing_in_target_locale: Vec<String>,
    pub missing_in_source_locale: Vec<String>,
    pub structural_differences: Vec<StructuralDifference>,
    /// Keys that could not be checked because their locale file failed to load.
    pub unverified_keys: Vec<String>,
    /// Set when the namespace itself failed to load on one side.
    pub load_failure: Option<LocaleSide>,
    /// Rounded percentage of `total_keys` present in the target locale.
    /// `None` when there is nothing to measure.
    pub coverage: Option<u32>,
}

impl CoverageReport {
    pub fn new(name: impl Into<String>, kind: ReportKind) -> Self {
        Self {
            name: name.into(),
            kind,
            total_keys: 0,
            missing_in_target_locale: Vec::new(),
            missing_in_source_locale: Vec::new(),
            structural_differences: Vec::new(),
            unverified_keys: Vec::new(),
            load_failure: None,
            coverage: None,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.missing_in_target_locale.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.missing_in_target_locale.is_empty()
            || !self.missing_in_source_locale.is_empty()
            || !self.structural_differences.is_empty()
            || !self.unverified_keys.is_empty()
            || self.load_failure.is_some()
    }
}

/// Aggregate counts over a set of reports.
///
/// Produced by folding reports with [`AuditTotals::merge`]; never updated in
/// place while reports are being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTotals {
    pub files_analyzed: usize,
    pub files_with_issues: usize,
    pub missing_in_target_locale: usize,
    pub missing_in_source_locale: usize,
    pub structural_differences: usize,
    pub unverified_keys: usize,
}

impl AuditTotals {
    pub fn from_report(report: &CoverageReport) -> Self {
        Self {
            files_analyzed: 1,
            files_with_issues: usize::from(report.has_issues()),
            missing_in_target_locale: report.missing_in_target_locale.len(),
            missing_in_source_locale: report.missing_in_source_locale.len(),
            structural_differences: report.structural_differences.len(),
            unverified_keys: report.unverified_keys.len(),
        }
    }

    pub fn from_reports(reports: &[CoverageReport]) -> Self {
        reports
            .iter()
            .map(Self::from_report)
            .fold(Self::default(), Self::merge)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            files_analyzed: self.files_analyzed + other.files_analyzed,
            files_with_issues: self.files_with_issues + other.files_with_issues,
            missing_in_target_locale: self.missing_in_target_locale
                + other.missing_in_target_locale,
            missing_in_source_locale: self.missing_in_source_locale
                + other.missing_in_source_locale,
            structural_differences: self.structural_differences + other.structural_differences,
            unverified_keys: self.unverified_keys + other.unverified_keys,
        }
    }
}

/// The complete result of one audit run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub source_locale: String,
    pub target_locale: String,
    /// One report per namespace, sorted by namespace.
    pub locale_files: Vec<CoverageReport>,
    /// One report per UI source file that uses at least one key, sorted by path.
    pub components: Vec<CoverageReport>,
    /// Source-locale keys (`namespace:key`) no UI file references.
    pub unused_keys: Vec<String>,
    pub dynamic_keys: Vec<DynamicKey>,
    pub failures: Vec<LoadFailure>,
    pub ui_files_scanned: usize,
    pub locale_totals: AuditTotals,
    pub component_totals: AuditTotals,
}

impl AuditReport {
    /// Distinct `namespace:key` paths missing in the target locale.
    ///
    /// A key missing from a locale file and used by several components is
    /// one missing key, not one per report.
    pub fn missing_in_target_locale(&self) -> BTreeSet<String> {
        let from_locale_files = self.locale_files.iter().flat_map(|file| {
            file.missing_in_target_locale
                .iter()
                .map(|key| qualified_key(&file.name, key))
        });
        let from_components = self
            .components
            .iter()
            .flat_map(|component| component.missing_in_target_locale.iter().cloned());
        from_locale_files.chain(from_components).collect()
    }
}
