//! Named timer bookkeeping
//!
//! A timer is a name mapped to a reference instant; elapsed time is always
//! `now - instant`. Pausing never touches the map. Resuming shifts every
//! instant forward by the paused duration, and loading a save does the same
//! with the time spent between save and load.

use hashbrown::HashMap;

use crate::clock::{Clock, SystemClock};
use crate::host::{LifecycleHook, SaveContents, VariableId, VariableStore};

use super::{TimeMode, TimerSnapshot};

/// Timer name → reference instant (milliseconds)
pub type TimerMap = HashMap<String, i64>;

#[derive(Debug, Clone)]
pub struct TimerRegistry<C: Clock = SystemClock> {
    clock: C,
    timers: TimerMap,
    /// Set while paused; holds the instant the pause began
    paused_at: Option<i64>,
    mode: TimeMode,
    /// Answer for queries against a timer that does not exist
    missing_timer_value: bool,
}

impl TimerRegistry<SystemClock> {
    pub fn new(missing_timer_value: bool) -> Self {
        Self::with_clock(SystemClock, missing_timer_value)
    }
}

impl Default for TimerRegistry<SystemClock> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<C: Clock> TimerRegistry<C> {
    pub fn with_clock(clock: C, missing_timer_value: bool) -> Self {
        Self {
            clock,
            timers: TimerMap::new(),
            paused_at: None,
            mode: TimeMode::default(),
            missing_timer_value,
        }
    }

    /// Registry time: the clock while running, frozen at the pause start
    /// while paused.
    fn now(&self) -> i64 {
        self.paused_at.unwrap_or_else(|| self.clock.now_millis())
    }

    // ─── Mutators ───────────────────────────────────────────────────────────

    /// Create `name` at `now - rollback_ms`. Existing timers are left alone.
    pub fn create_timer(&mut self, name: &str, rollback_ms: i64) {
        if self.timers.contains_key(name) {
            return;
        }
        let instant = self.now().saturating_sub(rollback_ms);
        self.timers.insert(name.to_string(), instant);
        tracing::debug!(timer = name, rollback_ms, "Timer created");
    }

    /// Set `name` to `now - rollback_ms`, creating it if absent.
    pub fn update_timer(&mut self, name: &str, rollback_ms: i64) {
        let instant = self.now().saturating_sub(rollback_ms);
        self.timers.insert(name.to_string(), instant);
        tracing::debug!(timer = name, rollback_ms, "Timer reset");
    }

    pub fn delete_timer(&mut self, name: &str) {
        if self.timers.remove(name).is_some() {
            tracing::debug!(timer = name, "Timer deleted");
        }
    }

    /// Switch the query unit. Unrecognized tokens leave the mode unchanged.
    pub fn set_mode(&mut self, token: &str) -> Option<TimeMode> {
        match TimeMode::from_token(token) {
            Some(mode) => {
                self.mode = mode;
                Some(mode)
            }
            None => {
                tracing::warn!(token, current = %self.mode, "Ignoring unknown timer mode");
                None
            }
        }
    }

    // ─── Pause / resume ─────────────────────────────────────────────────────

    /// Per-tick entry point: running hosts resume, inactive hosts pause.
    pub fn update(&mut self, active: bool) {
        if active {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            let now = self.clock.now_millis();
            self.paused_at = Some(now);
            tracing::debug!(at = now, "Timers paused");
        }
    }

    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            let delta = self.clock.now_millis().saturating_sub(paused_at);
            shift_timers(&mut self.timers, delta);
            tracing::debug!(paused_ms = delta, timers = self.timers.len(), "Timers resumed");
        }
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    /// True once at least `millis` have elapsed on `name`.
    /// Missing timers answer with the configured default.
    pub fn is_time_elapsed_over_than(&self, name: &str, millis: f64) -> bool {
        match self.elapsed_millis(name) {
            Some(elapsed) => elapsed as f64 >= millis,
            None => self.missing_timer_value,
        }
    }

    /// Like [`Self::is_time_elapsed_over_than`] with `time` in the current mode.
    pub fn is_over(&self, name: &str, time: f64) -> bool {
        self.is_time_elapsed_over_than(name, self.mode.to_millis(time))
    }

    /// Threshold read from a host variable, then scaled by the current mode.
    pub fn is_over_var(&self, name: &str, variable: VariableId, store: &impl VariableStore) -> bool {
        self.is_over(name, store.value(variable))
    }

    pub fn is_over_secs(&self, name: &str, secs: f64) -> bool {
        self.is_time_elapsed_over_than(name, TimeMode::Seconds.to_millis(secs))
    }

    pub fn is_over_mins(&self, name: &str, mins: f64) -> bool {
        self.is_time_elapsed_over_than(name, TimeMode::Minutes.to_millis(mins))
    }

    pub fn elapsed_millis(&self, name: &str) -> Option<i64> {
        let instant = *self.timers.get(name)?;
        Some(self.now().saturating_sub(instant))
    }

    pub fn timers(&self) -> &TimerMap {
        &self.timers
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn missing_timer_value(&self) -> bool {
        self.missing_timer_value
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    // ─── Save / load ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            timers: Some(self.timers.clone()),
            mode: self.mode,
            saved_at: self.now(),
        }
    }

    /// Install saved timers, shifted by the real time since `saved_at`.
    /// `None` leaves the live state untouched.
    pub fn restore(&mut self, timers: Option<TimerMap>, saved_at: i64, mode: TimeMode) {
        let Some(mut timers) = timers else {
            return;
        };
        let delta = self.now().saturating_sub(saved_at);
        shift_timers(&mut timers, delta);
        tracing::info!(timers = timers.len(), offline_ms = delta, %mode, "Timers restored");
        self.timers = timers;
        self.mode = mode;
    }

    pub fn restore_snapshot(&mut self, snapshot: &TimerSnapshot) {
        self.restore(snapshot.timers.clone(), snapshot.saved_at, snapshot.mode);
    }

    /// Fresh state for a new game. Clock and missing-timer policy are kept.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.paused_at = None;
        self.mode = TimeMode::default();
    }
}

/// Add `delta` to every instant
fn shift_timers(timers: &mut TimerMap, delta: i64) {
    for instant in timers.values_mut() {
        *instant = instant.saturating_add(delta);
    }
}

impl<C: Clock> LifecycleHook for TimerRegistry<C> {
    fn on_tick(&mut self, active: bool) {
        self.update(active);
    }

    fn on_before_save(&self, contents: &mut SaveContents) {
        contents.timers = Some(self.snapshot());
    }

    fn on_after_load(&mut self, contents: &SaveContents) {
        if let Some(snapshot) = &contents.timers {
            self.restore_snapshot(snapshot);
        }
    }

    fn on_new_game(&mut self) {
        self.reset();
    }
}
