//! Top-level game mode. Only `Active` drives the per-tick simulation.

use tracing::debug;

use hullbreach_core::enums::GameState;
use hullbreach_core::events::GameEvent;

#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    /// Move to `next`, emitting exited-then-entered. `Starting` advances
    /// straight on to `Active`.
    pub fn transition(&mut self, next: GameState, events: &mut Vec<GameEvent>) -> bool {
        if next == self.state {
            return false;
        }
        debug!("game state {:?} -> {:?}", self.state, next);
        events.push(GameEvent::GameStateExited { state: self.state });
        self.state = next;
        events.push(GameEvent::GameStateEntered { state: next });

        if next == GameState::Starting {
            self.transition(GameState::Active, events);
        }
        true
    }

    /// Active ⇄ Paused. Ignored in every other state.
    pub fn toggle_pause(&mut self, events: &mut Vec<GameEvent>) -> bool {
        match self.state {
            GameState::Active => self.transition(GameState::Paused, events),
            GameState::Paused => self.transition(GameState::Active, events),
            _ => false,
        }
    }

    /// Terminal outcomes only apply to a running game.
    pub fn finish(&mut self, outcome: GameState, events: &mut Vec<GameEvent>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.transition(outcome, events)
    }
}
