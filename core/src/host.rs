//! Host-facing extension points
//!
//! The host drives components through [`LifecycleHook`] instead of having
//! them wrap its update and save routines. It also owns the numeric variable
//! table that `is_over_var` reads thresholds from, and the save payload
//! layout.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::timers::TimerSnapshot;

/// Index into the host's variable table
pub type VariableId = u32;

/// Numeric variables owned by the host
pub trait VariableStore {
    fn value(&self, id: VariableId) -> f64;
}

/// Callbacks a component registers with the host.
///
/// All hooks default to doing nothing.
pub trait LifecycleHook {
    /// Called once per frame with whether the simulation is advancing
    fn on_tick(&mut self, _active: bool) {}

    /// Called while the host assembles a save payload
    fn on_before_save(&self, _contents: &mut SaveContents) {}

    /// Called after a save payload was read back
    fn on_after_load(&mut self, _contents: &SaveContents) {}

    /// Called when a new game replaces the current session
    fn on_new_game(&mut self) {}
}

/// Everything the host writes into one save slot.
///
/// Sections are optional so payloads from older versions still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveContents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<GameVariables>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timers: Option<TimerSnapshot>,
}

/// The host's variable table. Unset variables read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameVariables {
    values: HashMap<VariableId, f64>,
}

impl GameVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: VariableId, value: f64) {
        self.values.insert(id, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableStore for GameVariables {
    fn value(&self, id: VariableId) -> f64 {
        self.values.get(&id).copied().unwrap_or(0.0)
    }
}

impl LifecycleHook for GameVariables {
    fn on_before_save(&self, contents: &mut SaveContents) {
        contents.variables = Some(self.clone());
    }

    fn on_after_load(&mut self, contents: &SaveContents) {
        if let Some(variables) = &contents.variables {
            *self = variables.clone();
        }
    }

    fn on_new_game(&mut self) {
        self.values.clear();
    }
}
