pub mod audit;
pub mod init;

use std::path::PathBuf;

use super::ExitStatus;
use crate::core::AuditReport;

/// Result of running a command, handed to the report printer.
#[derive(Debug)]
pub enum CommandResult {
    Audit(AuditOutcome),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub fail_on_missing: bool,
    /// Where the JSON report was written, if requested.
    pub json_written: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CommandResult::Audit(outcome) => ExitStatus::for_audit(
                outcome.fail_on_missing,
                outcome.report.missing_in_target_locale().len(),
            ),
            CommandResult::Init(_) => ExitStatus::Success,
        }
    }
}
