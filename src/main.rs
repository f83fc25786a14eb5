use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::RwLock;

use gametimers::app_state::AppState;
use gametimers::commands;
use gametimers::logging;
use gametimers::readline;
use gametimers::ticker::spawn_ticker;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();

    let state = Arc::new(RwLock::new(AppState::new()));
    let interval_ms = state.read().await.config.tick_interval_ms;
    let ticker = spawn_ticker(Arc::clone(&state), interval_ms);
    state.write().await.ticker_task = Some(ticker);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    if let Some(ticker) = state.write().await.ticker_task.take() {
        ticker.abort();
    }
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "named game timers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a timer unless it already exists
    Create {
        name: String,
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        rollback: i64,
    },
    /// Create or reset a timer
    Update {
        name: String,
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        rollback: i64,
    },
    Delete {
        name: String,
    },
    /// Set the query unit (ms, s, min and synonyms)
    Mode {
        token: String,
    },
    IsOver {
        name: String,
        #[arg(allow_negative_numbers = true)]
        time: f64,
    },
    IsOverVar {
        name: String,
        variable: u32,
    },
    SetVar {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Run a raw command line, e.g. plugin "CREATE door -500"
    Plugin {
        line: String,
    },
    Pause,
    Resume,
    List,
    Save {
        slot: String,
    },
    Load {
        slot: String,
    },
    Saves,
    NewGame,
    Config,
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "gametimers".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Create { name, rollback }) => {
            commands::create_timer(state, name, *rollback).await
        }
        Some(Commands::Update { name, rollback }) => {
            commands::update_timer(state, name, *rollback).await
        }
        Some(Commands::Delete { name }) => commands::delete_timer(state, name).await,
        Some(Commands::Mode { token }) => commands::set_mode(state, token).await,
        Some(Commands::IsOver { name, time }) => commands::is_over(state, name, *time).await,
        Some(Commands::IsOverVar { name, variable }) => {
            commands::is_over_var(state, name, *variable).await
        }
        Some(Commands::SetVar { id, value }) => commands::set_variable(state, *id, *value).await,
        Some(Commands::Plugin { line }) => commands::run_plugin_command(state, line).await?,
        Some(Commands::Pause) => commands::pause(state).await,
        Some(Commands::Resume) => commands::resume(state).await,
        Some(Commands::List) => commands::list_timers(state).await,
        Some(Commands::Save { slot }) => commands::save_game(state, slot).await?,
        Some(Commands::Load { slot }) => commands::load_game(state, slot).await?,
        Some(Commands::Saves) => commands::list_saves(state).await?,
        Some(Commands::NewGame) => commands::new_game(state).await,
        Some(Commands::Config) => commands::show_config(state).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
