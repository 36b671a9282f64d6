//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The four ship subsystems. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemKind {
    Engines,
    Weapons,
    Shields,
    Sensors,
}

impl SystemKind {
    /// Every system kind, in storage order.
    pub const ALL: [SystemKind; 4] = [
        SystemKind::Engines,
        SystemKind::Weapons,
        SystemKind::Shields,
        SystemKind::Sensors,
    ];

    /// Index of this kind inside a `[_; 4]` system table.
    pub fn index(self) -> usize {
        match self {
            SystemKind::Engines => 0,
            SystemKind::Weapons => 1,
            SystemKind::Shields => 2,
            SystemKind::Sensors => 3,
        }
    }
}

/// Power/health state of a single ship system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemState {
    /// Powered off. Draws nothing, not functioning.
    Disabled,
    /// Powered on at normal capacity.
    #[default]
    Powered,
    /// Powered on at increased capacity. Self-damages after the overclock duration.
    Overclocked,
    /// Still powered and drawing normal energy, but must be repaired.
    Damaged,
    /// Powered off. Must be repaired before it can be powered again.
    Destroyed,
}

impl SystemState {
    /// Whether the system is online (consuming energy and functioning).
    pub fn is_online(self) -> bool {
        matches!(
            self,
            SystemState::Powered | SystemState::Overclocked | SystemState::Damaged
        )
    }
}

/// Ship-wide energy overload state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverloadState {
    #[default]
    NotOverloaded,
    /// Usage exceeds capacity, overload timer is running.
    Overloading,
    /// Transient: overload punishment in progress. Never persists across ticks.
    Overloaded,
}

/// Damage state of one exterior hull segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HullState {
    #[default]
    Armored,
    Damaged,
    Breached,
}

/// Damage/shield category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AmmoType {
    Kinetic,
    Missile,
    Laser,
}

impl AmmoType {
    pub const ALL: [AmmoType; 3] = [AmmoType::Kinetic, AmmoType::Missile, AmmoType::Laser];
}

/// Outcome of one incoming hit against the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageResult {
    Missed,
    ShieldDamage,
    HullDamage,
}

/// Enemy weapon-timer phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponPhase {
    #[default]
    SelectingWeapon,
    Firing,
    WaitingForImpact,
}

/// Player weapon station state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationState {
    #[default]
    Idle,
    /// Ammo placed, arming.
    Loading,
    /// Armed and ready to fire.
    Ready,
    /// Fired, resetting before it can be loaded again.
    Unlocking,
}

/// Items that move between hull, cargo and stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Item {
    Scrap,
    HullPlate,
    Ammo(AmmoType),
}

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Initializing,
    Starting,
    Active,
    Paused,
    Victory,
    GameOver,
    Exiting,
    Restarting,
}

impl GameState {
    /// States that wait on the fade-out collaborator before finishing.
    pub fn is_transition(self) -> bool {
        matches!(self, GameState::Exiting | GameState::Restarting)
    }
}
