//! Power/health state machine for one ship subsystem.

use tracing::{debug, warn};

use hullbreach_core::config::SystemConfig;
use hullbreach_core::enums::{SystemKind, SystemState};
use hullbreach_core::events::GameEvent;

#[derive(Debug, Clone)]
pub struct SystemRecord {
    kind: SystemKind,
    state: SystemState,
    normal_draw: u32,
    overclock_draw: u32,
    overclock_duration: f64,
    /// Seconds since entering Overclocked. Only meaningful while Overclocked.
    overclock_elapsed: f64,
}

impl SystemRecord {
    pub fn new(kind: SystemKind, config: &SystemConfig) -> Self {
        Self {
            kind,
            state: config.initial_state,
            normal_draw: config.normal_draw,
            overclock_draw: config.overclock_draw,
            overclock_duration: config.overclock_duration,
            overclock_elapsed: 0.0,
        }
    }

    pub fn kind(&self) -> SystemKind {
        self.kind
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Energy drawn in the current state.
    pub fn current_draw(&self) -> u32 {
        self.draw_in(self.state)
    }

    fn draw_in(&self, state: SystemState) -> u32 {
        match state {
            SystemState::Powered | SystemState::Damaged => self.normal_draw,
            SystemState::Overclocked => self.overclock_draw,
            SystemState::Disabled | SystemState::Destroyed => 0,
        }
    }

    pub fn overclock_elapsed(&self) -> f64 {
        self.overclock_elapsed
    }

    /// Seconds left before an overclocked system damages itself. 0 otherwise.
    pub fn overclock_remaining_secs(&self) -> f64 {
        if self.state == SystemState::Overclocked {
            (self.overclock_duration - self.overclock_elapsed).max(0.0)
        } else {
            0.0
        }
    }

    /// Advance the overclock timer. Returns true if the system degraded this tick.
    pub fn tick(&mut self, dt: f64, events: &mut Vec<GameEvent>) -> bool {
        if self.state != SystemState::Overclocked {
            return false;
        }
        self.overclock_elapsed = (self.overclock_elapsed + dt).min(self.overclock_duration);
        if self.overclock_elapsed >= self.overclock_duration {
            debug!("{:?} overclock expired", self.kind);
            return self.set_state(SystemState::Damaged, events);
        }
        false
    }

    /// Disabled ⇄ Powered. Any other state is a no-op.
    pub fn toggle_power(&mut self, events: &mut Vec<GameEvent>) -> bool {
        match self.state {
            SystemState::Powered => self.set_state(SystemState::Disabled, events),
            SystemState::Disabled => self.set_state(SystemState::Powered, events),
            other => {
                warn!("cannot toggle power on {:?} while {:?}", self.kind, other);
                false
            }
        }
    }

    pub fn overclock(&mut self, events: &mut Vec<GameEvent>) -> bool {
        match self.state {
            SystemState::Powered | SystemState::Disabled => {
                self.overclock_elapsed = 0.0;
                self.set_state(SystemState::Overclocked, events)
            }
            other => {
                warn!("cannot overclock {:?} while {:?}", self.kind, other);
                false
            }
        }
    }

    pub fn destroy(&mut self, events: &mut Vec<GameEvent>) -> bool {
        match self.state {
            SystemState::Destroyed => false,
            SystemState::Disabled => {
                warn!("cannot destroy {:?} while Disabled", self.kind);
                false
            }
            _ => self.set_state(SystemState::Destroyed, events),
        }
    }

    /// Damaged → Powered, Destroyed → Disabled.
    pub fn repair(&mut self, events: &mut Vec<GameEvent>) -> bool {
        match self.state {
            SystemState::Damaged => self.set_state(SystemState::Powered, events),
            SystemState::Destroyed => self.set_state(SystemState::Disabled, events),
            other => {
                warn!("{:?} does not need repair ({:?})", self.kind, other);
                false
            }
        }
    }

    /// Damaged → Destroyed, anything else short of Destroyed → Damaged.
    pub fn damage(&mut self, events: &mut Vec<GameEvent>) -> bool {
        match self.state {
            SystemState::Destroyed => false,
            SystemState::Damaged => self.set_state(SystemState::Destroyed, events),
            _ => self.set_state(SystemState::Damaged, events),
        }
    }

    /// State-changed first, then energy-changed if the draw moved.
    fn set_state(&mut self, next: SystemState, events: &mut Vec<GameEvent>) -> bool {
        if next == self.state {
            return false;
        }
        let old_draw = self.current_draw();
        debug!("{:?}: {:?} -> {:?}", self.kind, self.state, next);
        self.state = next;
        events.push(GameEvent::SystemStateChanged {
            system: self.kind,
            state: next,
        });

        let new_draw = self.current_draw();
        if new_draw != old_draw {
            events.push(GameEvent::SystemEnergyChanged {
                system: self.kind,
                draw: new_draw,
            });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: SystemState) -> SystemRecord {
        SystemRecord::new(
            SystemKind::Sensors,
            &SystemConfig {
                initial_state: state,
                normal_draw: 2,
                overclock_draw: 4,
                overclock_duration: 5.0,
            },
        )
    }

    #[test]
    fn test_draw_per_state() {
        assert_eq!(record(SystemState::Disabled).current_draw(), 0);
        assert_eq!(record(SystemState::Destroyed).current_draw(), 0);
        assert_eq!(record(SystemState::Powered).current_draw(), 2);
        assert_eq!(record(SystemState::Damaged).current_draw(), 2);
        assert_eq!(record(SystemState::Overclocked).current_draw(), 4);
    }

    #[test]
    fn test_toggle_emits_state_then_energy() {
        let mut system = record(SystemState::Powered);
        let mut events = Vec::new();
        assert!(system.toggle_power(&mut events));
        assert_eq!(
            events,
            vec![
                GameEvent::SystemStateChanged {
                    system: SystemKind::Sensors,
                    state: SystemState::Disabled
                },
                GameEvent::SystemEnergyChanged {
                    system: SystemKind::Sensors,
                    draw: 0
                },
            ]
        );
    }

    #[test]
    fn test_damage_keeps_draw_so_no_energy_event() {
        let mut system = record(SystemState::Powered);
        let mut events = Vec::new();
        system.damage(&mut events);
        assert_eq!(system.state(), SystemState::Damaged);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_invalid_operations_are_silent() {
        let mut events = Vec::new();
        let mut overclocked = record(SystemState::Overclocked);
        assert!(!overclocked.toggle_power(&mut events));
        let mut powered = record(SystemState::Powered);
        assert!(!powered.repair(&mut events));
        let mut destroyed = record(SystemState::Destroyed);
        assert!(!destroyed.destroy(&mut events));
        assert!(!destroyed.overclock(&mut events));
        assert!(events.is_empty());
        assert_eq!(overclocked.state(), SystemState::Overclocked);
    }

    #[test]
    fn test_repair_paths() {
        let mut events = Vec::new();
        let mut damaged = record(SystemState::Damaged);
        damaged.repair(&mut events);
        assert_eq!(damaged.state(), SystemState::Powered);

        let mut destroyed = record(SystemState::Destroyed);
        destroyed.repair(&mut events);
        assert_eq!(destroyed.state(), SystemState::Disabled);
    }

    #[test]
    fn test_damage_escalates_to_destroyed() {
        let mut events = Vec::new();
        let mut system = record(SystemState::Overclocked);
        system.damage(&mut events);
        assert_eq!(system.state(), SystemState::Damaged);
        system.damage(&mut events);
        assert_eq!(system.state(), SystemState::Destroyed);
        assert!(!system.damage(&mut events));
    }

    #[test]
    fn test_overclock_degrades_once() {
        let mut system = record(SystemState::Powered);
        let mut events = Vec::new();
        system.overclock(&mut events);
        events.clear();

        let mut degraded = 0;
        for _ in 0..20 {
            if system.tick(1.0, &mut events) {
                degraded += 1;
            }
        }
        assert_eq!(degraded, 1);
        assert_eq!(system.state(), SystemState::Damaged);
        assert_eq!(system.current_draw(), 2);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_overclock_resets_timer() {
        let mut system = record(SystemState::Powered);
        let mut events = Vec::new();
        system.overclock(&mut events);
        system.tick(3.0, &mut events);
        assert!((system.overclock_remaining_secs() - 2.0).abs() < 1e-9);

        system.damage(&mut events);
        system.repair(&mut events);
        assert_eq!(system.overclock_remaining_secs(), 0.0);
        system.overclock(&mut events);
        assert!((system.overclock_remaining_secs() - 5.0).abs() < 1e-9);
    }
}
