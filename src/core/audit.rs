//! The audit pipeline: Load → Flatten/Extract → Diff.
//!
//! Locale trees load in parallel, UI files are read and parsed in parallel,
//! and everything is joined before diffing. Rendering is left to the caller.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::{
    AuditReport, AuditTotals, FileUsages, LoadFailure,
    diff::{compare_locales, compare_usages, expand_usages, unused_keys},
    extract::{ExtractOptions, extract_key_usages},
    parsers::json::{flatten_locale, load_locale_tree},
    scan::{display_path, scan_ui_files},
};

/// Everything one audit run needs, already merged from config and CLI flags.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Project root. Relative directories and globs are resolved against it.
    pub root: PathBuf,
    pub source_locale: String,
    pub target_locale: String,
    pub source_locale_dir: PathBuf,
    pub target_locale_dir: PathBuf,
    pub ui_source_globs: Vec<String>,
    pub ignores: Vec<String>,
    pub ignore_test_files: bool,
    pub default_namespace: String,
    pub extract: ExtractOptions,
}

impl AuditOptions {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Run the whole audit.
///
/// Fails only when the source locale directory does not exist; every other
/// problem is logged, recorded in [`AuditReport::failures`], and skipped.
pub fn run_audit(options: &AuditOptions) -> Result<AuditReport> {
    let source_dir = options.resolve(&options.source_locale_dir);
    let target_dir = options.resolve(&options.target_locale_dir);

    if !source_dir.is_dir() {
        bail!(
            "Source locale directory not found: {}",
            source_dir.display()
        );
    }
    if !target_dir.is_dir() {
        warn!(
            path = %target_dir.display(),
            "target locale directory not found, every key will be reported missing"
        );
    }

    let ((source_loaded, target_loaded), extracted) = rayon::join(
        || rayon::join(|| load_locale_tree(&source_dir), || load_locale_tree(&target_dir)),
        || extract_ui_files(options),
    );
    debug!(
        source_files = source_loaded.file_count(),
        target_files = target_loaded.file_count(),
        "loaded locale trees"
    );

    let source = flatten_locale(&source_loaded);
    let target = flatten_locale(&target_loaded);
    let default_namespace = options.default_namespace.as_str();

    let locale_files = compare_locales(&source, &target);

    let mut components = Vec::new();
    let mut all_usages = Vec::new();
    let mut dynamic_keys = Vec::new();
    for file in extracted.files {
        let usages = expand_usages(&file.usages, &source, default_namespace);
        if !usages.is_empty() {
            components.push(compare_usages(
                &file.file_path,
                &usages,
                &source,
                &target,
                default_namespace,
            ));
        }
        dynamic_keys.extend(file.dynamic_keys);
        all_usages.extend(usages);
    }
    components.sort_by(|a, b| a.name.cmp(&b.name));

    // With no UI files there is nothing to be unused by.
    let unused = if extracted.scanned > 0 {
        unused_keys(&source, &all_usages, default_namespace)
    } else {
        Vec::new()
    };

    let mut failures: Vec<LoadFailure> = source_loaded
        .failures
        .into_iter()
        .chain(target_loaded.failures)
        .chain(extracted.failures)
        .collect();
    failures.sort();

    let locale_totals = AuditTotals::from_reports(&locale_files);
    let component_totals = AuditTotals::from_reports(&components);

    Ok(AuditReport {
        source_locale: options.source_locale.clone(),
        target_locale: options.target_locale.clone(),
        locale_files,
        components,
        unused_keys: unused,
        dynamic_keys,
        failures,
        ui_files_scanned: extracted.scanned,
        locale_totals,
        component_totals,
    })
}

struct ExtractedUi {
    files: Vec<FileUsages>,
    failures: Vec<LoadFailure>,
    scanned: usize,
}

fn extract_ui_files(options: &AuditOptions) -> ExtractedUi {
    let scan = scan_ui_files(
        &options.root,
        &options.ui_source_globs,
        &options.ignores,
        options.ignore_test_files,
    );
    debug!(
        files = scan.files.len(),
        skipped = scan.skipped_count,
        "scanned UI sources"
    );

    let paths: Vec<&PathBuf> = scan.files.iter().collect();
    let results: Vec<Result<FileUsages, LoadFailure>> = paths
        .par_iter()
        .map(|path| extract_file(&options.root, path, &options.extract))
        .collect();

    let mut extracted = ExtractedUi {
        files: Vec::with_capacity(results.len()),
        failures: Vec::new(),
        scanned: paths.len(),
    };
    for result in results {
        match result {
            Ok(file) => extracted.files.push(file),
            Err(failure) => extracted.failures.push(failure),
        }
    }
    extracted
}

fn extract_file(
    root: &Path,
    path: &Path,
    options: &ExtractOptions,
) -> Result<FileUsages, LoadFailure> {
    let name = display_path(root, path);
    let failure = |error: String| {
        warn!(path = %name, "skipping UI source file: {}", error);
        LoadFailure {
            file_path: name.clone(),
            namespace: None,
            error,
        }
    };

    let source = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
    extract_key_usages(source, &name, options).map_err(|e| failure(format!("{:#}", e)))
}
