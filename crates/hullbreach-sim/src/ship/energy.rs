//! Ship-wide energy accounting: usage vs capacity, overload window, regen.
//!
//! The accountant never touches systems itself. The owning `Ship` recomputes
//! usage after every system change and drives the shedding pass during an
//! overload; the accountant tracks the numbers and emits the notifications.

use tracing::{debug, info};

use hullbreach_core::config::EnergyConfig;
use hullbreach_core::enums::OverloadState;
use hullbreach_core::events::GameEvent;

use super::system::SystemRecord;

#[derive(Debug, Clone)]
pub struct EnergyAccountant {
    capacity: u32,
    maximum_capacity: u32,
    /// Cached sum of system draws, kept for change detection.
    usage: u32,
    overload_state: OverloadState,
    overload_timer: f64,
    time_till_overload: f64,
    regen_counter: f64,
    regen_duration: f64,
    regen_per_player_rate: f64,
    regen_max_player_rate: f64,
    /// Players generating energy this tick. Cleared every regen step.
    contributing_players: u32,
}

impl EnergyAccountant {
    pub fn new(config: &EnergyConfig, systems: &[SystemRecord]) -> Self {
        Self {
            capacity: config.initial_capacity.min(config.maximum_capacity),
            maximum_capacity: config.maximum_capacity,
            usage: total_draw(systems),
            overload_state: OverloadState::NotOverloaded,
            overload_timer: 0.0,
            time_till_overload: config.time_till_overload,
            regen_counter: 0.0,
            regen_duration: config.regen_duration,
            regen_per_player_rate: config.regen_per_player_rate,
            regen_max_player_rate: config.regen_max_player_rate,
            contributing_players: 0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn maximum_capacity(&self) -> u32 {
        self.maximum_capacity
    }

    pub fn usage(&self) -> u32 {
        self.usage
    }

    pub fn overload_state(&self) -> OverloadState {
        self.overload_state
    }

    pub fn is_over_capacity(&self) -> bool {
        self.usage > self.capacity
    }

    pub fn time_till_overload_secs(&self) -> f64 {
        (self.time_till_overload - self.overload_timer).max(0.0)
    }

    pub fn overload_percent(&self) -> f64 {
        (self.overload_timer / self.time_till_overload).clamp(0.0, 1.0)
    }

    pub fn regen_percent(&self) -> f64 {
        (self.regen_counter / self.regen_duration).clamp(0.0, 1.0)
    }

    /// Regen counter units gained per second. 0 at maximum capacity or
    /// outside NotOverloaded.
    pub fn regen_rate(&self) -> f64 {
        if self.capacity >= self.maximum_capacity
            || self.overload_state != OverloadState::NotOverloaded
        {
            return 0.0;
        }
        let bonus = (self.regen_per_player_rate * self.contributing_players as f64)
            .min(self.regen_max_player_rate);
        1.0 + bonus
    }

    /// One player is generating energy this tick.
    pub fn add_contributor(&mut self) {
        self.contributing_players += 1;
    }

    /// Re-sum system draws. Returns whether the cached usage changed.
    pub fn recompute_usage(&mut self, systems: &[SystemRecord], events: &mut Vec<GameEvent>) -> bool {
        let usage = total_draw(systems);
        if usage == self.usage {
            return false;
        }
        self.usage = usage;
        events.push(GameEvent::EnergyUsageChanged { usage });
        true
    }

    /// Apply the overload entry and exit rules against the current numbers.
    pub fn check_overload(&mut self, events: &mut Vec<GameEvent>) {
        match self.overload_state {
            OverloadState::NotOverloaded if self.usage > self.capacity => {
                info!(
                    "energy overloading: usage {} > capacity {} ({}s)",
                    self.usage, self.capacity, self.time_till_overload
                );
                self.overload_state = OverloadState::Overloading;
                self.overload_timer = 0.0;
                events.push(GameEvent::Overloading);
            }
            OverloadState::Overloading if self.usage <= self.capacity => {
                debug!("energy back within capacity");
                self.overload_state = OverloadState::NotOverloaded;
                self.overload_timer = 0.0;
                events.push(GameEvent::EnergyNormalized);
            }
            _ => {}
        }
    }

    /// Advance the overload timer. Returns true when the overload event is due.
    pub fn tick_overload(&mut self, dt: f64) -> bool {
        if self.overload_state != OverloadState::Overloading {
            return false;
        }
        self.overload_timer += dt;
        self.overload_timer >= self.time_till_overload
    }

    pub(crate) fn begin_overload(&mut self, events: &mut Vec<GameEvent>) {
        info!(
            "ship overloaded: usage {} > capacity {}",
            self.usage, self.capacity
        );
        self.overload_state = OverloadState::Overloaded;
        self.overload_timer = 0.0;
        events.push(GameEvent::OverloadStarted);
    }

    /// Capacity penalty and return to NotOverloaded once shedding is done.
    pub(crate) fn finish_overload(&mut self, events: &mut Vec<GameEvent>) {
        let capacity = self.capacity.saturating_sub(1);
        if capacity != self.capacity {
            self.capacity = capacity;
            events.push(GameEvent::EnergyCapacityChanged { capacity });
        }
        self.overload_state = OverloadState::NotOverloaded;
        events.push(GameEvent::OverloadCompleted);
        events.push(GameEvent::EnergyNormalized);
        info!(
            "overload resolved: usage {}, capacity {}",
            self.usage, self.capacity
        );
    }

    /// Accumulate regen. Returns true if capacity went up.
    pub fn tick_regen(&mut self, dt: f64, events: &mut Vec<GameEvent>) -> bool {
        let rate = self.regen_rate();
        self.contributing_players = 0;
        if rate <= 0.0 {
            return false;
        }

        self.regen_counter += rate * dt;
        if self.regen_counter < self.regen_duration {
            return false;
        }

        self.regen_counter = 0.0;
        self.capacity = (self.capacity + 1).min(self.maximum_capacity);
        debug!("energy capacity regenerated to {}", self.capacity);
        events.push(GameEvent::EnergyCapacityChanged {
            capacity: self.capacity,
        });
        true
    }
}

fn total_draw(systems: &[SystemRecord]) -> u32 {
    systems.iter().map(SystemRecord::current_draw).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hullbreach_core::config::SystemConfig;
    use hullbreach_core::enums::{SystemKind, SystemState};

    fn systems(draw: u32) -> Vec<SystemRecord> {
        SystemKind::ALL
            .iter()
            .map(|&kind| {
                SystemRecord::new(
                    kind,
                    &SystemConfig {
                        initial_state: SystemState::Powered,
                        normal_draw: draw,
                        overclock_draw: draw * 2,
                        overclock_duration: 30.0,
                    },
                )
            })
            .collect()
    }

    fn config(capacity: u32, maximum: u32) -> EnergyConfig {
        EnergyConfig {
            initial_capacity: capacity,
            maximum_capacity: maximum,
            time_till_overload: 3.0,
            regen_duration: 10.0,
            regen_per_player_rate: 1.0,
            regen_max_player_rate: 2.0,
        }
    }

    #[test]
    fn test_usage_computed_at_construction() {
        let energy = EnergyAccountant::new(&config(10, 10), &systems(2));
        assert_eq!(energy.usage(), 8);
        assert_eq!(energy.overload_state(), OverloadState::NotOverloaded);
    }

    #[test]
    fn test_overload_entry_and_exit() {
        let mut energy = EnergyAccountant::new(&config(5, 10), &systems(2));
        let mut events = Vec::new();
        energy.check_overload(&mut events);
        assert_eq!(energy.overload_state(), OverloadState::Overloading);
        assert_eq!(events, vec![GameEvent::Overloading]);

        // Entry fires once.
        energy.check_overload(&mut events);
        assert_eq!(events.len(), 1);

        assert!(!energy.tick_overload(1.0));
        assert!((energy.time_till_overload_secs() - 2.0).abs() < 1e-9);

        let mut shed = systems(2);
        let mut scratch = Vec::new();
        shed[0].toggle_power(&mut scratch);
        shed[1].toggle_power(&mut scratch);
        assert!(energy.recompute_usage(&shed, &mut events));
        energy.check_overload(&mut events);
        assert_eq!(energy.overload_state(), OverloadState::NotOverloaded);
        assert_eq!(events.last(), Some(&GameEvent::EnergyNormalized));
        assert_eq!(energy.overload_percent(), 0.0);
    }

    #[test]
    fn test_overload_due_after_delay() {
        let mut energy = EnergyAccountant::new(&config(5, 10), &systems(2));
        let mut events = Vec::new();
        energy.check_overload(&mut events);
        assert!(!energy.tick_overload(1.0));
        assert!(!energy.tick_overload(1.0));
        assert!(energy.tick_overload(1.0));
    }

    #[test]
    fn test_finish_overload_floors_capacity_at_zero() {
        let mut energy = EnergyAccountant::new(&config(0, 10), &systems(0));
        let mut events = Vec::new();
        energy.begin_overload(&mut events);
        energy.finish_overload(&mut events);
        assert_eq!(energy.capacity(), 0);
        assert_eq!(
            events,
            vec![
                GameEvent::OverloadStarted,
                GameEvent::OverloadCompleted,
                GameEvent::EnergyNormalized
            ]
        );
    }

    #[test]
    fn test_regen_rate_bonus_is_capped() {
        let mut energy = EnergyAccountant::new(&config(5, 10), &systems(0));
        assert_eq!(energy.regen_rate(), 1.0);
        energy.add_contributor();
        assert_eq!(energy.regen_rate(), 2.0);
        for _ in 0..5 {
            energy.add_contributor();
        }
        assert_eq!(energy.regen_rate(), 3.0);

        let mut events = Vec::new();
        energy.tick_regen(1.0, &mut events);
        // Contributions last one tick.
        assert_eq!(energy.regen_rate(), 1.0);
    }

    #[test]
    fn test_regen_restores_one_point_per_duration() {
        let mut energy = EnergyAccountant::new(&config(8, 10), &systems(0));
        let mut events = Vec::new();
        for _ in 0..9 {
            assert!(!energy.tick_regen(1.0, &mut events));
        }
        assert!(energy.tick_regen(1.0, &mut events));
        assert_eq!(energy.capacity(), 9);
        assert_eq!(events, vec![GameEvent::EnergyCapacityChanged { capacity: 9 }]);
        assert_eq!(energy.regen_percent(), 0.0);
    }

    #[test]
    fn test_no_regen_at_maximum() {
        let mut energy = EnergyAccountant::new(&config(10, 10), &systems(0));
        let mut events = Vec::new();
        for _ in 0..100 {
            energy.tick_regen(1.0, &mut events);
        }
        assert_eq!(energy.capacity(), 10);
        assert!(events.is_empty());
        assert_eq!(energy.regen_rate(), 0.0);
    }

    #[test]
    fn test_no_regen_while_overloading() {
        let mut energy = EnergyAccountant::new(&config(5, 10), &systems(2));
        let mut events = Vec::new();
        energy.check_overload(&mut events);
        events.clear();
        for _ in 0..20 {
            energy.tick_regen(1.0, &mut events);
        }
        assert_eq!(energy.capacity(), 5);
        assert!(events.is_empty());
    }
}
