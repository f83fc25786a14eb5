use serde::{Deserialize, Serialize};

use super::{TimeMode, TimerMap};

/// Timer state captured for a save payload.
///
/// `saved_at` is the registry's instant at capture time; on load the
/// difference between it and the new "now" is added to every timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Absent in payloads written before timers existed
    #[serde(default)]
    pub timers: Option<TimerMap>,

    #[serde(default)]
    pub mode: TimeMode,

    pub saved_at: i64,
}
