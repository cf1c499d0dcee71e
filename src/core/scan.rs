use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern, glob_with};
use tracing::warn;
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths (file or directory).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for UI source files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matched files, sorted.
    pub files: BTreeSet<PathBuf>,
    /// Paths that could not be read while scanning.
    pub skipped_count: usize,
}

/// Find UI source files under `base_dir`.
///
/// Each entry of `sources` is either a glob (`src/**/*.tsx`), relative to
/// `base_dir` unless absolute, or a literal file or directory; directories
/// are walked recursively. Only JS/TS/JSX/TSX files are kept. Paths matching
/// `ignore_patterns` (or test file patterns, when enabled) are dropped.
pub fn scan_ui_files(
    base_dir: &Path,
    sources: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let mut result = ScanResult::default();

    let mut ignores: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => ignores.push(pattern),
            Err(e) => warn!(pattern = %p, "invalid ignore pattern: {}", e),
        }
    }
    if ignore_test_files {
        ignores.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let is_ignored = |path: &Path| {
        let relative = path.strip_prefix(base_dir).unwrap_or(path);
        ignores
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
    };

    let mut candidates: Vec<PathBuf> = Vec::new();
    for source in sources {
        if is_glob_pattern(source) {
            let full_pattern = if Path::new(source).is_absolute() {
                source.clone()
            } else {
                let escaped_base = Pattern::escape(&base_dir.to_string_lossy());
                format!("{}/{}", escaped_base.trim_end_matches('/'), source)
            };
            let options = MatchOptions {
                require_literal_leading_dot: true,
                ..MatchOptions::new()
            };
            match glob_with(&full_pattern, options) {
                Ok(entries) => {
                    for entry in entries {
                        match entry {
                            Ok(path) => candidates.push(path),
                            Err(e) => {
                                result.skipped_count += 1;
                                warn!("cannot access path: {}", e);
                            }
                        }
                    }
                }
                Err(e) => warn!(pattern = %source, "invalid source glob: {}", e),
            }
        } else {
            let path = base_dir.join(source);
            if !path.exists() {
                warn!(path = %path.display(), "source path does not exist");
                continue;
            }
            for entry in WalkDir::new(&path) {
                match entry {
                    Ok(e) => candidates.push(e.into_path()),
                    Err(e) => {
                        result.skipped_count += 1;
                        warn!("cannot access path: {}", e);
                    }
                }
            }
        }
    }

    result.files = candidates
        .into_iter()
        .filter(|path| path.is_file() && is_scannable_file(path) && !is_ignored(path))
        .collect();
    result
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js" | "mjs" | "cjs" | "mts" | "cts")
    )
}

/// Display name of a scanned file: its path relative to `base_dir`, with `/`
/// separators.
pub fn display_path(base_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
