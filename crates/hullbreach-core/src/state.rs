//! Game state snapshot: the complete read-only state handed to presentation after each tick.

use serde::{Deserialize, Serialize};

use crate::config::ShieldCounts;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{ConverterId, EnemyId, SegmentId, SimTime, StationId};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub game_state: GameState,
    pub ship: ShipView,
    pub enemies: Vec<EnemyView>,
    pub encounter: EncounterView,
    /// Events emitted since the previous snapshot, in emission order.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub systems: Vec<SystemView>,
    pub energy: EnergyView,
    pub shields: ShieldView,
    pub life_support: LifeSupportView,
    pub hull: Vec<HullView>,
    pub weapons: Vec<WeaponStationView>,
    pub converters: Vec<ConverterView>,
    pub cargo: Vec<CargoView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemView {
    pub kind: SystemKind,
    pub state: SystemState,
    pub draw: u32,
    /// Seconds until an overclocked system is damaged (0 when not overclocked).
    pub overclock_remaining_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyView {
    pub capacity: u32,
    pub maximum_capacity: u32,
    pub usage: u32,
    pub overload_state: OverloadState,
    pub time_till_overload_secs: f64,
    /// Overload timer progress (0.0 - 1.0).
    pub overload_percent: f64,
    /// Progress toward the next point of capacity (0.0 - 1.0).
    pub regen_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShieldView {
    pub charges: u32,
    pub max_charges: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifeSupportView {
    pub depleting: bool,
    pub remaining_secs: f64,
    pub max_duration_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullView {
    pub segment: SegmentId,
    pub state: HullState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponStationView {
    pub station: StationId,
    pub ammo_type: AmmoType,
    pub state: StationState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterView {
    pub converter: ConverterId,
    pub input: Item,
    pub output: Item,
    pub processing: bool,
    /// Conversion progress (0.0 - 1.0).
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoView {
    pub item: Item,
    pub count: u32,
}

/// One live enemy, with weapon progress fractions for progress bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy: EnemyId,
    pub name: String,
    pub shields: ShieldCounts,
    pub max_shields: ShieldCounts,
    pub equipped: Vec<AmmoType>,
    pub phase: WeaponPhase,
    pub active_weapon: Option<AmmoType>,
    /// Charge progress (0.0 - 1.0) while Firing.
    pub fire_progress: f64,
    /// Flight progress (0.0 - 1.0) while WaitingForImpact.
    pub impact_progress: f64,
    /// Seconds left in the current phase (0 while selecting).
    pub phase_remaining_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterView {
    pub spawned: u32,
    pub total: u32,
    pub active_enemies: u32,
    /// A spawn is counting down.
    pub spawn_pending: bool,
    /// Seconds until the pending spawn appears.
    pub pending_remaining_secs: f64,
}
