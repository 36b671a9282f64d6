//! Shield charge counter bounded by a capacity derived from the Shields system state.

use tracing::debug;

use hullbreach_core::config::ShieldConfig;
use hullbreach_core::enums::SystemState;
use hullbreach_core::events::GameEvent;

#[derive(Debug, Clone)]
pub struct ShieldTracker {
    charges: u32,
    max_charges: u32,
    base_charges: u32,
    overclock_bonus_charges: u32,
    recharge_rate: f64,
    overclock_recharge_rate: f64,
    accumulator: f64,
    overclocked: bool,
}

impl ShieldTracker {
    pub fn new(config: &ShieldConfig, shield_system: SystemState) -> Self {
        let overclocked = shield_system == SystemState::Overclocked;
        let max_charges = config.base_charges
            + if overclocked {
                config.overclock_bonus_charges
            } else {
                0
            };
        Self {
            charges: config.initial_charges.unwrap_or(max_charges).min(max_charges),
            max_charges,
            base_charges: config.base_charges,
            overclock_bonus_charges: config.overclock_bonus_charges,
            recharge_rate: config.recharge_rate,
            overclock_recharge_rate: config.overclock_recharge_rate,
            accumulator: 0.0,
            overclocked,
        }
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    pub fn max_charges(&self) -> u32 {
        self.max_charges
    }

    /// React to a Shields system transition. Entering Overclocked grants the
    /// bonus charges immediately; leaving it clamps down to the base capacity.
    pub fn on_system_state_changed(&mut self, state: SystemState, events: &mut Vec<GameEvent>) {
        let overclocked = state == SystemState::Overclocked;
        let was_empty = self.charges == 0;

        if overclocked {
            self.max_charges = self.base_charges + self.overclock_bonus_charges;
            if !self.overclocked {
                self.charges = (self.charges + self.overclock_bonus_charges).min(self.max_charges);
            }
        } else {
            self.max_charges = self.base_charges;
        }
        self.charges = self.charges.min(self.max_charges);
        self.overclocked = overclocked;

        if self.charges == self.max_charges {
            self.accumulator = 0.0;
        }
        self.push_changed(events);
        if was_empty && self.charges > 0 {
            events.push(GameEvent::ShieldRestored);
        }
    }

    /// Recharge toward the maximum at the normal rate, or the overclock rate
    /// while the shield system is overclocked.
    pub fn tick(&mut self, dt: f64, state: SystemState, events: &mut Vec<GameEvent>) {
        if self.charges >= self.max_charges {
            self.accumulator = 0.0;
            return;
        }
        let rate = match state {
            SystemState::Overclocked => self.overclock_recharge_rate,
            _ => self.recharge_rate,
        };

        self.accumulator += rate * dt;
        while self.accumulator >= 1.0 && self.charges < self.max_charges {
            self.accumulator -= 1.0;
            self.charges += 1;
            self.push_changed(events);
            if self.charges == 1 {
                debug!("shields restored");
                events.push(GameEvent::ShieldRestored);
            }
        }
        if self.charges == self.max_charges {
            self.accumulator = 0.0;
        }
    }

    /// Absorb a hit. Charges floor at 0.
    pub fn apply_damage(&mut self, amount: u32, events: &mut Vec<GameEvent>) {
        let before = self.charges;
        self.charges = self.charges.saturating_sub(amount);
        if self.charges == before {
            return;
        }
        self.push_changed(events);
        if self.charges == 0 {
            debug!("shields broken");
            events.push(GameEvent::ShieldBroken);
        }
    }

    fn push_changed(&self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::ShieldChargesChanged {
            charges: self.charges,
            max: self.max_charges,
        });
    }
}
