use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::ExtractOptions;

pub const CONFIG_FILE_NAME: &str = ".localeauditrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_target_locale")]
    pub target_locale: String,
    #[serde(default = "default_source_locale_dir")]
    pub source_locale_dir: String,
    #[serde(default = "default_target_locale_dir")]
    pub target_locale_dir: String,
    #[serde(default = "default_ui_source_globs")]
    pub ui_source_globs: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_translation_functions")]
    pub translation_functions: Vec<String>,
    #[serde(default = "default_translation_hooks")]
    pub translation_hooks: Vec<String>,
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    /// `null` disables `namespace:key` prefixes.
    #[serde(default = "default_namespace_separator")]
    pub namespace_separator: Option<String>,
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_target_locale() -> String {
    "ar".to_string()
}

fn default_source_locale_dir() -> String {
    "./public/locales/en".to_string()
}

fn default_target_locale_dir() -> String {
    "./public/locales/ar".to_string()
}

fn default_ui_source_globs() -> Vec<String> {
    let root_dirs = ["src", ""];
    let sub_dirs = ["components", "pages", "app"];

    root_dirs
        .iter()
        .flat_map(|root| {
            sub_dirs.iter().map(move |sub| {
                if root.is_empty() {
                    sub.to_string()
                } else {
                    format!("{}/{}", root, sub)
                }
            })
        })
        .collect()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_translation_functions() -> Vec<String> {
    ExtractOptions::default().translation_functions
}

fn default_translation_hooks() -> Vec<String> {
    ExtractOptions::default().translation_hooks
}

fn default_namespace() -> String {
    "common".to_string()
}

fn default_namespace_separator() -> Option<String> {
    ExtractOptions::default().namespace_separator
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_locale: default_source_locale(),
            target_locale: default_target_locale(),
            source_locale_dir: default_source_locale_dir(),
            target_locale_dir: default_target_locale_dir(),
            ui_source_globs: default_ui_source_globs(),
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            translation_functions: default_translation_functions(),
            translation_hooks: default_translation_hooks(),
            default_namespace: default_namespace(),
            namespace_separator: default_namespace_separator(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, empty function lists, or
    /// an empty namespace separator.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Entries without wildcards are literal paths, so `app/[locale]`
        // is valid without escaping.
        for pattern in &self.ui_source_globs {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'uiSourceGlobs': \"{}\"", pattern)
                })?;
            }
        }

        if self.translation_functions.iter().all(|f| f.trim().is_empty()) {
            bail!("'translationFunctions' must name at least one function");
        }

        if self.namespace_separator.as_deref() == Some("") {
            bail!("'namespaceSeparator' must not be empty (use null to disable it)");
        }

        if self.default_namespace.trim().is_empty() {
            bail!("'defaultNamespace' must not be empty");
        }

        Ok(())
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            translation_functions: self.translation_functions.clone(),
            translation_hooks: self.translation_hooks.clone(),
            namespace_separator: self.namespace_separator.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Walk up from `start_dir` looking for the config file, stopping at the
/// repository root (a directory containing `.git`).
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
