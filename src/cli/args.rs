//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `audit`: Compare the two locale trees and check UI key usages against them
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Audit(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Options of `audit`. Every value left unset falls back to the config file,
/// then to the built-in default.
#[derive(Debug, Clone, Default, Args)]
pub struct AuditArgs {
    /// Project root: where the config file lookup starts and what relative paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Locale directory of the reference language (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub source_locale_dir: Option<PathBuf>,

    /// Locale directory of the translated language (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub target_locale_dir: Option<PathBuf>,

    /// UI source glob or directory to scan for key usages; repeatable (overrides config file)
    #[arg(long = "ui-source-glob", value_name = "GLOB")]
    pub ui_source_globs: Vec<String>,

    /// Label of the source locale in the report (overrides config file)
    #[arg(long, value_name = "NAME")]
    pub source_locale: Option<String>,

    /// Label of the target locale in the report (overrides config file)
    #[arg(long, value_name = "NAME")]
    pub target_locale: Option<String>,

    /// Also write the full report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Exit with status 1 when keys are missing in the target locale
    #[arg(long)]
    pub fail_on_missing: bool,

    /// List every key and log debug details
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AuditCommand {
    #[command(flatten)]
    pub args: AuditArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report missing keys, structural differences and coverage between two locales
    Audit(AuditCommand),
    /// Initialize a new .localeauditrc.json configuration file
    Init,
}
