//! ECS components for hecs enemy entities.
//!
//! Components are plain data structs with no behaviour.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::config::{EnemyTemplate, ShieldCounts};
use crate::enums::*;

/// Marks an entity as a live enemy ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// The template the enemy was spawned from (name, weapons, starting shields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyLoadout {
    pub template: EnemyTemplate,
}

/// Remaining enemy shields by ammo type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShields {
    pub current: ShieldCounts,
    /// Shield counts at spawn, for display.
    pub max: ShieldCounts,
    /// Whether `EnemyDestroyed` has already been emitted for this enemy.
    pub destroyed_reported: bool,
}

/// Enemy weapon-timer state (select, charge, impact).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponTimer {
    pub phase: WeaponPhase,
    /// Weapon chosen in the current cycle.
    pub active_weapon: Option<AmmoType>,
    /// Seconds spent charging the active weapon.
    pub fire_elapsed: f64,
    /// Seconds since the active weapon fired.
    pub impact_elapsed: f64,
}
