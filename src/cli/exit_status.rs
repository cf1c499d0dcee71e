use std::process::ExitCode;

/// How the process ends.
///
/// Mismatches alone never fail a run; `--fail-on-missing` opts in to
/// `Failure` for CI. `Error` is reserved for runs that could not complete.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// 0: the command ran to completion.
    Success,
    /// 1: keys are missing in the target locale and `--fail-on-missing` was given.
    Failure,
    /// 2: missing source locale directory, invalid config, I/O error.
    Error,
}

impl ExitStatus {
    pub fn for_audit(fail_on_missing: bool, missing_in_target: usize) -> Self {
        if fail_on_missing && missing_in_target > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
