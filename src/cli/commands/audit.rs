use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::{AuditOutcome, CommandResult};
use crate::{
    cli::args::{AuditArgs, AuditCommand},
    config::{Config, ConfigLoadResult, load_config},
    core::{
        AuditReport,
        audit::{AuditOptions, run_audit},
    },
};

pub fn audit(cmd: AuditCommand) -> Result<CommandResult> {
    let args = cmd.args;

    let root = match &args.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    if !root.is_dir() {
        bail!("Root directory not found: {}", root.display());
    }

    let ConfigLoadResult { mut config, path } = load_config(&root)?;
    match &path {
        Some(path) => debug!(config = %path.display(), "loaded config file"),
        None => debug!("no config file found, using defaults"),
    }
    apply_overrides(&mut config, &args);
    config.validate()?;

    let options = AuditOptions {
        root,
        source_locale_dir: PathBuf::from(&config.source_locale_dir),
        target_locale_dir: PathBuf::from(&config.target_locale_dir),
        extract: config.extract_options(),
        source_locale: config.source_locale,
        target_locale: config.target_locale,
        ui_source_globs: config.ui_source_globs,
        ignores: config.ignores,
        ignore_test_files: config.ignore_test_files,
        default_namespace: config.default_namespace,
    };

    let report = run_audit(&options)?;

    let json_written = match args.json_out {
        Some(path) => {
            write_json_report(&report, &path)?;
            Some(path)
        }
        None => None,
    };

    Ok(CommandResult::Audit(AuditOutcome {
        report,
        fail_on_missing: args.fail_on_missing,
        json_written,
    }))
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut Config, args: &AuditArgs) {
    if let Some(dir) = &args.source_locale_dir {
        config.source_locale_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(dir) = &args.target_locale_dir {
        config.target_locale_dir = dir.to_string_lossy().into_owned();
    }
    if !args.ui_source_globs.is_empty() {
        config.ui_source_globs = args.ui_source_globs.clone();
    }
    if let Some(locale) = &args.source_locale {
        config.source_locale = locale.clone();
    }
    if let Some(locale) = &args.target_locale {
        config.target_locale = locale.clone();
    }
}

fn write_json_report(report: &AuditReport, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    json.push('\n');
    fs::write(path, json)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))
}
