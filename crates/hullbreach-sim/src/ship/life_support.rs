//! Life-support countdown gated by hull breaches and shield overclock.

use tracing::{debug, info};

use hullbreach_core::config::LifeSupportConfig;
use hullbreach_core::events::GameEvent;

#[derive(Debug, Clone)]
pub struct LifeSupport {
    depleting: bool,
    elapsed: f64,
    max_duration: f64,
    /// `LifeSupportDepleted` already sent for this episode.
    depleted: bool,
    simulate_breach: bool,
    suspended: bool,
}

impl LifeSupport {
    pub fn new(config: &LifeSupportConfig) -> Self {
        Self {
            depleting: false,
            elapsed: 0.0,
            max_duration: config.max_duration,
            depleted: false,
            simulate_breach: false,
            suspended: false,
        }
    }

    pub fn is_depleting(&self) -> bool {
        self.depleting
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    pub fn remaining_secs(&self) -> f64 {
        (self.max_duration - self.elapsed).max(0.0)
    }

    pub fn set_simulate_breach(&mut self, enabled: bool) {
        self.simulate_breach = enabled;
    }

    /// While suspended life support cannot deplete.
    pub fn set_suspended(&mut self, enabled: bool, events: &mut Vec<GameEvent>) {
        self.suspended = enabled;
        if enabled && self.depleting {
            self.restore(events);
        }
    }

    /// Advance one tick. Returns true on the tick life support runs out.
    pub fn tick(
        &mut self,
        hull_breached: bool,
        shields_overclocked: bool,
        dt: f64,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.suspended {
            return false;
        }

        let condition = (hull_breached && !shields_overclocked) || self.simulate_breach;
        if condition && !self.depleting {
            debug!("life support depleting");
            self.depleting = true;
            events.push(GameEvent::LifeSupportDepleting);
        } else if !condition && self.depleting {
            self.restore(events);
        }

        if !self.depleting || self.depleted {
            return false;
        }

        self.elapsed = (self.elapsed + dt).min(self.max_duration);
        if self.elapsed >= self.max_duration {
            info!("life support ran out");
            self.depleted = true;
            events.push(GameEvent::LifeSupportDepleted);
            return true;
        }
        false
    }

    fn restore(&mut self, events: &mut Vec<GameEvent>) {
        debug!("life support restored");
        self.depleting = false;
        self.elapsed = 0.0;
        self.depleted = false;
        events.push(GameEvent::LifeSupportRestored);
    }
}
