//! Handles the runner keeps on its game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use hullbreach_core::commands::PlayerCommand;
use hullbreach_core::enums::GameState;
use hullbreach_core::state::GameStateSnapshot;

/// What the control layer can tell the loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Queued on the engine for the next tick boundary.
    Player(PlayerCommand),
    /// Leave the loop after the current drain.
    Shutdown,
}

/// The runner's view of its loop thread: where to send commands and where
/// the thread leaves the newest snapshot.
pub struct AppState {
    /// Set by `start_simulation`, taken by `stop_simulation`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Overwritten by the loop thread after every tick; the runner polls it.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a game loop has been started and not stopped since.
    pub fn is_running(&self) -> bool {
        self.running.lock().map(|running| *running).unwrap_or(false)
    }

    /// Game state of the newest snapshot, if the loop has ticked yet.
    pub fn latest_game_state(&self) -> Option<GameState> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.as_ref().map(|s| s.game_state))
    }
}
