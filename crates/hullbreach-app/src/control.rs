//! Control handlers: the runner's entry points into the game loop thread.
//!
//! Each handler takes the shared `AppState` and reports failures as plain
//! strings, so a front end can surface them directly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use hullbreach_core::commands::PlayerCommand;
use hullbreach_core::config::GameConfig;
use hullbreach_core::enums::HullState;
use hullbreach_core::state::GameStateSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Read and validate a JSON config. `None` gives the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: GameConfig) -> Result<(), String> {
    let mut running = state.running.lock().map_err(|e| e.to_string())?;

    if *running {
        return Err("Simulation already running".into());
    }

    let cmd_tx = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())
        .map_err(|e| format!("Failed to spawn game loop: {}", e))?;

    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    *tx_lock = Some(cmd_tx);
    *running = true;

    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), String> {
    let tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Player(command))
            .map_err(|e| format!("Failed to send command: {}", e)),
        None => Err("Simulation not started".into()),
    }
}

/// Get the latest snapshot (None before the first tick).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, String> {
    let lock = state.latest_snapshot.lock().map_err(|e| e.to_string())?;
    Ok(lock.clone())
}

/// Ask the game loop to stop. Stopping a loop that already exited is not an error.
pub fn stop_simulation(state: &AppState) -> Result<(), String> {
    let mut running = state.running.lock().map_err(|e| e.to_string())?;
    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    if let Some(tx) = tx_lock.take() {
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    *running = false;
    Ok(())
}

/// One-line summary of a snapshot for the runner's progress log.
pub fn status_line(snapshot: &GameStateSnapshot) -> String {
    let ship = &snapshot.ship;
    let intact = ship
        .hull
        .iter()
        .filter(|h| h.state == HullState::Armored)
        .count();
    format!(
        "t={:.1}s {:?} energy {}/{} ({:?}) shields {}/{} hull {}/{} enemies {} spawned {}/{}{}",
        snapshot.time.elapsed_secs,
        snapshot.game_state,
        ship.energy.usage,
        ship.energy.capacity,
        ship.energy.overload_state,
        ship.shields.charges,
        ship.shields.max_charges,
        intact,
        ship.hull.len(),
        snapshot.encounter.active_enemies,
        snapshot.encounter.spawned,
        snapshot.encounter.total,
        if ship.life_support.depleting {
            format!(" life support {:.1}s", ship.life_support.remaining_secs)
        } else {
            String::new()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hullbreach_sim::SimulationEngine;

    #[test]
    fn test_missing_config_names_the_path() {
        let path = std::env::temp_dir().join("hullbreach-no-such-config.json");
        let err = load_config(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("loading config"), "{message}");
        assert!(message.contains("hullbreach-no-such-config.json"), "{message}");
    }

    #[test]
    fn test_invalid_config_names_the_path_and_field() {
        let path = std::env::temp_dir().join(format!("hullbreach-bad-{}.json", std::process::id()));
        fs::write(&path, r#"{"combat": {"laser": {"hit_chance": 2.0, "shield_damage": 1, "hull_damage": 1}}}"#)
            .unwrap();
        let message = format!("{:#}", load_config(Some(&path)).unwrap_err());
        let _ = fs::remove_file(&path);
        assert!(message.contains("loading config"), "{message}");
        assert!(message.contains("hit_chance"), "{message}");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("hullbreach-seed-{}.json", std::process::id()));
        fs::write(&path, r#"{"seed": 9}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.seed, 9);
        assert_eq!(config.encounter.spawns.len(), 3);
        assert_eq!(load_config(None).unwrap().seed, 42);
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(send_command(&state, PlayerCommand::StartGame).is_err());
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_double_start_rejected() {
        let state = AppState::new();
        start_simulation(&state, GameConfig::default()).unwrap();
        assert!(start_simulation(&state, GameConfig::default()).is_err());
        assert!(send_command(&state, PlayerCommand::StartGame).is_ok());

        stop_simulation(&state).unwrap();
        assert!(!state.is_running());
        assert!(send_command(&state, PlayerCommand::TogglePause).is_err());
        // Idempotent.
        stop_simulation(&state).unwrap();
    }

    #[test]
    fn test_status_line_reports_ship() {
        let mut engine = SimulationEngine::new(GameConfig::default());
        engine.queue_command(PlayerCommand::StartGame);
        let snapshot = engine.tick();
        let line = status_line(&snapshot);
        assert!(line.contains("Active"), "{line}");
        assert!(line.contains("energy 8/10"), "{line}");
        assert!(line.contains("hull 6/6"), "{line}");
        assert!(!line.contains("life support"), "{line}");
    }
}
