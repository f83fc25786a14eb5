//! Unit mode for elapsed-time thresholds

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Unit used to interpret the threshold passed to `is_over` / `is_over_var`.
///
/// Creation and update rollbacks are always raw milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
}

/// Accepted mode tokens, keyed lowercase
static MODE_TOKENS: phf::Map<&'static str, TimeMode> = phf_map! {
    "ms" => TimeMode::Milliseconds,
    "milliseconds" => TimeMode::Milliseconds,
    "msec" => TimeMode::Milliseconds,
    "msecs" => TimeMode::Milliseconds,
    "reset" => TimeMode::Milliseconds,
    "s" => TimeMode::Seconds,
    "sec" => TimeMode::Seconds,
    "seconds" => TimeMode::Seconds,
    "secs" => TimeMode::Seconds,
    "m" => TimeMode::Minutes,
    "min" => TimeMode::Minutes,
    "minutes" => TimeMode::Minutes,
    "mins" => TimeMode::Minutes,
};

impl TimeMode {
    /// Resolve a case-insensitive mode token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let key = token.trim().to_ascii_lowercase();
        MODE_TOKENS.get(key.as_str()).copied()
    }

    /// Milliseconds in one unit of this mode
    pub fn millis_per_unit(self) -> f64 {
        match self {
            TimeMode::Milliseconds => 1.0,
            TimeMode::Seconds => 1_000.0,
            TimeMode::Minutes => 60_000.0,
        }
    }

    /// Convert a threshold expressed in this mode to milliseconds
    pub fn to_millis(self, value: f64) -> f64 {
        value * self.millis_per_unit()
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self {
            TimeMode::Milliseconds => "ms",
            TimeMode::Seconds => "s",
            TimeMode::Minutes => "min",
        };
        f.write_str(suffix)
    }
}
