use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, audit::audit, init::init},
};

/// Dispatch to the command handler.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Audit(cmd)) => audit(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
