//! Error types for timer command parsing

use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while turning a command line into a [`TimerCommand`].
///
/// The registry never sees these; invalid input is rejected at the boundary.
///
/// [`TimerCommand`]: super::TimerCommand
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid quoting in command line")]
    InvalidQuoting,

    #[error("{command} requires a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid rollback '{value}' for {command}, expected whole milliseconds")]
    InvalidRollback {
        command: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
