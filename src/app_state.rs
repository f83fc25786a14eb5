use gametimers_core::{Clock, GameVariables, LifecycleHook, SaveContents, SystemClock, TimerRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Host session state. Shared as `Arc<RwLock<AppState>>`, which is the one
/// guard around the timer registry.
pub struct AppState<C: Clock = SystemClock> {
    pub config: AppConfig,
    pub timers: TimerRegistry<C>,
    pub variables: GameVariables,
    /// Whether the simulation is advancing; read by the ticker every frame
    pub active: bool,
    pub ticker_task: Option<tokio::task::JoinHandle<()>>,
    clock: C,
}

impl AppState<SystemClock> {
    pub fn new() -> Self {
        let config = confy::load("gametimers", None).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        });
        Self::with_clock(config, SystemClock)
    }
}

impl Default for AppState<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> AppState<C> {
    pub fn with_clock(config: AppConfig, clock: C) -> Self {
        let timers = TimerRegistry::with_clock(clock.clone(), config.missing_timer_value);
        Self {
            config,
            timers,
            variables: GameVariables::new(),
            active: true,
            ticker_task: None,
            clock,
        }
    }

    /// Registered lifecycle hooks, in dispatch order
    fn hooks(&mut self) -> [&mut dyn LifecycleHook; 2] {
        [&mut self.variables, &mut self.timers]
    }

    pub fn tick(&mut self) {
        let active = self.active;
        for hook in self.hooks() {
            hook.on_tick(active);
        }
    }

    pub fn make_save_contents(&mut self) -> SaveContents {
        let mut contents = SaveContents {
            saved_at: Some(self.clock.now_millis()),
            ..SaveContents::default()
        };
        for hook in self.hooks() {
            hook.on_before_save(&mut contents);
        }
        contents
    }

    pub fn extract_save_contents(&mut self, contents: &SaveContents) {
        for hook in self.hooks() {
            hook.on_after_load(contents);
        }
    }

    pub fn new_game(&mut self) {
        for hook in self.hooks() {
            hook.on_new_game();
        }
        self.active = true;
        tracing::info!("New game started");
    }

    pub fn save_directory(&self) -> PathBuf {
        PathBuf::from(&self.config.save_directory)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Answer for queries against timers that were never created
    #[serde(default = "default_true")]
    pub missing_timer_value: bool,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_save_directory")]
    pub save_directory: String,
}

fn default_true() -> bool {
    true
}

fn default_tick_interval_ms() -> u64 {
    16
}

fn default_save_directory() -> String {
    dirs::data_dir()
        .map(|p| p.join("gametimers").join("saves"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "saves".to_string())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            missing_timer_value: default_true(),
            tick_interval_ms: default_tick_interval_ms(),
            save_directory: default_save_directory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametimers_core::{ManualClock, TimeMode};

    fn state_at(start: i64) -> (ManualClock, AppState<ManualClock>) {
        let clock = ManualClock::new(start);
        let state = AppState::with_clock(AppConfig::default(), clock.clone());
        (clock, state)
    }

    #[test]
    fn test_inactive_ticks_pause_timers() {
        let (clock, mut state) = state_at(0);
        state.timers.create_timer("t", 0);

        state.tick();
        clock.advance_by(100);
        state.active = false;
        state.tick();
        clock.advance_by(10_000);
        state.active = true;
        state.tick();

        assert_eq!(state.timers.elapsed_millis("t"), Some(100));
    }

    #[test]
    fn test_save_then_load_in_new_session() {
        let (clock, mut state) = state_at(1_000);
        state.timers.create_timer("quest", 200);
        state.timers.set_mode("secs");
        state.variables.set(4, 9.0);

        let contents = state.make_save_contents();
        assert_eq!(contents.saved_at, Some(1_000));

        clock.advance_by(86_400_000);
        let mut fresh = AppState::with_clock(AppConfig::default(), clock.clone());
        fresh.extract_save_contents(&contents);

        assert_eq!(fresh.timers.elapsed_millis("quest"), Some(200));
        assert_eq!(fresh.timers.mode(), TimeMode::Seconds);
        assert!(!fresh.timers.is_over_var("quest", 4, &fresh.variables));
        clock.advance_by(8_800);
        assert!(fresh.timers.is_over_var("quest", 4, &fresh.variables));
    }

    #[test]
    fn test_new_game_clears_hooks() {
        let (_, mut state) = state_at(0);
        state.timers.create_timer("t", 0);
        state.variables.set(1, 1.0);
        state.active = false;

        state.new_game();

        assert!(state.timers.is_empty());
        assert!(state.variables.is_empty());
        assert!(state.active);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.missing_timer_value);
        assert_eq!(config.tick_interval_ms, 16);
        assert!(config.save_directory.ends_with("saves"));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: AppConfig = serde_json::from_str(r#"{"tick_interval_ms": 50}"#).unwrap();
        assert!(config.missing_timer_value);
        assert_eq!(config.tick_interval_ms, 50);
        assert!(!config.save_directory.is_empty());
    }
}
