//! Typed timer commands
//!
//! Text commands are parsed once at the boundary:
//!
//! ```text
//! CREATE <name> [rollback_ms]
//! UPDATE <name> [rollback_ms]
//! DELETE <name>
//! MODE <token>
//! ```
//!
//! Keywords are case-insensitive and names may be quoted. Unknown keywords
//! are not an error; they simply produce no command.

use crate::clock::Clock;

use super::{CommandError, TimerRegistry};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Create { name: String, rollback_ms: i64 },
    Update { name: String, rollback_ms: i64 },
    Delete { name: String },
    SetMode { token: String },
}

impl TimerCommand {
    /// Parse one command line. Returns `Ok(None)` for blank lines and
    /// keywords this component does not handle.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let args = shlex::split(line).ok_or(CommandError::InvalidQuoting)?;
        let mut args = args.into_iter();

        let Some(keyword) = args.next() else {
            return Ok(None);
        };

        let command = match keyword.to_ascii_uppercase().as_str() {
            "CREATE" => {
                let name = required(args.next(), "CREATE", "timer name")?;
                let rollback_ms = rollback(args.next(), "CREATE")?;
                TimerCommand::Create { name, rollback_ms }
            }
            "UPDATE" => {
                let name = required(args.next(), "UPDATE", "timer name")?;
                let rollback_ms = rollback(args.next(), "UPDATE")?;
                TimerCommand::Update { name, rollback_ms }
            }
            "DELETE" => TimerCommand::Delete {
                name: required(args.next(), "DELETE", "timer name")?,
            },
            "MODE" => TimerCommand::SetMode {
                token: required(args.next(), "MODE", "mode token")?,
            },
            _ => {
                tracing::debug!(keyword = %keyword, "Ignoring unknown timer command");
                return Ok(None);
            }
        };

        Ok(Some(command))
    }
}

fn required(
    arg: Option<String>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, argument })
}

fn rollback(arg: Option<String>, command: &'static str) -> Result<i64, CommandError> {
    match arg {
        None => Ok(0),
        Some(value) => value
            .parse()
            .map_err(|source| CommandError::InvalidRollback {
                command,
                value,
                source,
            }),
    }
}

impl<C: Clock> TimerRegistry<C> {
    /// Run a parsed command against the registry
    pub fn apply(&mut self, command: &TimerCommand) {
        match command {
            TimerCommand::Create { name, rollback_ms } => self.create_timer(name, *rollback_ms),
            TimerCommand::Update { name, rollback_ms } => self.update_timer(name, *rollback_ms),
            TimerCommand::Delete { name } => self.delete_timer(name),
            TimerCommand::SetMode { token } => {
                self.set_mode(token);
            }
        }
    }
}
