//! Headless hullbreach runner: plays one encounter and logs the ship's status.
//!
//! Usage:
//!   cargo run -p hullbreach-app -- [config.json] [seconds]
//!   RUST_LOG=debug cargo run -p hullbreach-app

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hullbreach_app::control;
use hullbreach_app::state::AppState;
use hullbreach_core::commands::PlayerCommand;
use hullbreach_core::enums::GameState;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "hullbreach")]
#[command(about = "Run a hullbreach encounter headless and log the ship's status")]
struct Args {
    /// JSON game config. Omitted fields use the defaults.
    config: Option<PathBuf>,
    /// Stop after this many wall-clock seconds.
    #[arg(default_value_t = 120.0)]
    seconds: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        info!("loading config {}", path.display());
    }
    let config = control::load_config(args.config.as_deref())?;
    info!(
        "seed {}, {} spawn entries",
        config.seed,
        config.encounter.spawns.len()
    );

    let state = AppState::new();
    control::start_simulation(&state, config).map_err(|e| anyhow!(e))?;
    control::send_command(&state, PlayerCommand::StartGame).map_err(|e| anyhow!(e))?;

    let limit = Duration::from_secs_f64(args.seconds.max(0.0).min(1.0e9));
    let started = Instant::now();
    let mut last_state = GameState::Initializing;
    loop {
        std::thread::sleep(POLL_INTERVAL);

        if let Some(snapshot) = control::get_snapshot(&state).map_err(|e| anyhow!(e))? {
            info!("{}", control::status_line(&snapshot));
            last_state = snapshot.game_state;
            if matches!(last_state, GameState::Victory | GameState::GameOver) {
                break;
            }
        }
        if started.elapsed() >= limit {
            info!("time limit reached");
            break;
        }
    }

    if state.is_running() {
        control::stop_simulation(&state).map_err(|e| anyhow!(e))?;
    }
    info!("finished in {:?}", last_state);
    Ok(())
}
