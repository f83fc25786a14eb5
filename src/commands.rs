use crate::app_state::AppState;
use crate::save_file;
use gametimers_core::{TimerCommand, VariableId};
use std::io::Write;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tokio::sync::RwLock;

pub async fn create_timer(state: Arc<RwLock<AppState>>, name: &str, rollback_ms: i64) {
    state.write().await.timers.create_timer(name, rollback_ms);
}

pub async fn update_timer(state: Arc<RwLock<AppState>>, name: &str, rollback_ms: i64) {
    state.write().await.timers.update_timer(name, rollback_ms);
}

pub async fn delete_timer(state: Arc<RwLock<AppState>>, name: &str) {
    state.write().await.timers.delete_timer(name);
}

pub async fn set_mode(state: Arc<RwLock<AppState>>, token: &str) {
    let mut s = state.write().await;
    match s.timers.set_mode(token) {
        Some(mode) => println!("Mode set to {}", mode),
        None => println!("Unknown mode '{}', staying in {}", token, s.timers.mode()),
    }
}

pub async fn is_over(state: Arc<RwLock<AppState>>, name: &str, time: f64) {
    let s = state.read().await;
    println!("{}", s.timers.is_over(name, time));
}

pub async fn is_over_var(state: Arc<RwLock<AppState>>, name: &str, variable: VariableId) {
    let s = state.read().await;
    println!("{}", s.timers.is_over_var(name, variable, &s.variables));
}

pub async fn set_variable(state: Arc<RwLock<AppState>>, id: VariableId, value: f64) {
    state.write().await.variables.set(id, value);
}

/// Run a raw `CREATE/UPDATE/DELETE/MODE` line through the typed parser
pub async fn run_plugin_command(state: Arc<RwLock<AppState>>, line: &str) -> Result<(), String> {
    let command = TimerCommand::parse(line).map_err(|e| e.to_string())?;
    match command {
        Some(command) => state.write().await.timers.apply(&command),
        None => println!("Ignored: {}", line.trim()),
    }
    Ok(())
}

/// Stop the simulation; timers pause on the next tick
pub async fn pause(state: Arc<RwLock<AppState>>) {
    state.write().await.active = false;
    println!("Simulation paused");
}

pub async fn resume(state: Arc<RwLock<AppState>>) {
    state.write().await.active = true;
    println!("Simulation resumed");
}

pub async fn list_timers(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    if s.timers.is_empty() {
        println!("No timers");
        return;
    }

    let mode = s.timers.mode();
    let mut names: Vec<&String> = s.timers.timers().keys().collect();
    names.sort();

    println!("{:<32} Elapsed", "Timer");
    println!("{}", "-".repeat(48));
    for name in names {
        let elapsed = s.timers.elapsed_millis(name).unwrap_or_default();
        println!(
            "{:<32} {:.2}{}",
            name,
            elapsed as f64 / mode.millis_per_unit(),
            mode
        );
    }

    let status = if s.timers.is_paused() { " (paused)" } else { "" };
    println!("\nTotal: {} timers{}", s.timers.len(), status);
}

pub async fn save_game(state: Arc<RwLock<AppState>>, slot: &str) -> Result<(), String> {
    let (dir, contents) = {
        let mut s = state.write().await;
        (s.save_directory(), s.make_save_contents())
    };
    let path = save_file::write_save(&dir, slot, &contents).map_err(|e| e.to_string())?;
    println!("Saved to {}", path.display());
    Ok(())
}

pub async fn load_game(state: Arc<RwLock<AppState>>, slot: &str) -> Result<(), String> {
    let dir = state.read().await.save_directory();
    let contents = save_file::read_save(&dir, slot).map_err(|e| e.to_string())?;

    let mut s = state.write().await;
    s.extract_save_contents(&contents);

    match contents.saved_at.and_then(format_instant) {
        Some(saved_at) => println!("Loaded '{}' saved at {}", slot, saved_at),
        None => println!("Loaded '{}'", slot),
    }
    Ok(())
}

pub async fn list_saves(state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let dir = state.read().await.save_directory();
    let slots = save_file::list_saves(&dir).map_err(|e| e.to_string())?;
    if slots.is_empty() {
        println!("No saves in {}", dir.display());
    }
    for slot in slots {
        println!("{}", slot);
    }
    Ok(())
}

pub async fn new_game(state: Arc<RwLock<AppState>>) {
    state.write().await.new_game();
    println!("Started a new game");
}

pub async fn show_config(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    println!("missing_timer_value: {}", s.config.missing_timer_value);
    println!("tick_interval_ms:    {}", s.config.tick_interval_ms);
    println!("save_directory:      {}", s.config.save_directory);
    println!("mode:                {}", s.timers.mode());
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

/// Milliseconds since the Unix epoch as local RFC 3339
fn format_instant(millis: i64) -> Option<String> {
    let instant = OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000).ok()?;
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    instant.to_offset(offset).format(&Rfc3339).ok()
}
