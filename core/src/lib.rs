pub mod clock;
pub mod host;
pub mod timers;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use host::{GameVariables, LifecycleHook, SaveContents, VariableId, VariableStore};
pub use timers::{CommandError, TimeMode, TimerCommand, TimerMap, TimerRegistry, TimerSnapshot};
