pub mod app_state;
pub mod commands;
pub mod logging;
pub mod repl;
pub mod save_file;
pub mod ticker;

pub use app_state::{AppConfig, AppState};
pub use repl::readline;
