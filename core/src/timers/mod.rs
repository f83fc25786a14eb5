//! Named timer system
//!
//! - **Registry**: named reference instants with pause-aware elapsed queries
//! - **Mode**: unit used to read query thresholds (ms / s / min)
//! - **Commands**: typed CREATE / UPDATE / DELETE / MODE adapter
//! - **Snapshot**: state captured into and restored from save payloads

mod command;
mod error;
mod mode;
mod registry;
mod snapshot;


pub use command::TimerCommand;
pub use error::CommandError;
pub use mode::TimeMode;
pub use registry::{TimerMap, TimerRegistry};
pub use snapshot::TimerSnapshot;
