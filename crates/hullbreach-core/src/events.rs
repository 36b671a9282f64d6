//! Change notifications emitted by the simulation for UI, audio and effects.
//!
//! Components push events onto one outbound queue in emission order. The
//! engine drains the queue into each snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ConverterId, EnemyId, SegmentId, StationId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Ship systems ---
    /// A system changed state. Always precedes the matching `SystemEnergyChanged`.
    SystemStateChanged { system: SystemKind, state: SystemState },
    /// A system's draw changed as a result of a state change.
    SystemEnergyChanged { system: SystemKind, draw: u32 },

    // --- Energy ---
    EnergyUsageChanged { usage: u32 },
    EnergyCapacityChanged { capacity: u32 },
    /// Usage exceeded capacity; the overload timer started.
    Overloading,
    /// The overload timer ran out; punishment begins.
    OverloadStarted,
    /// Punishment finished.
    OverloadCompleted,
    /// Usage is back within capacity.
    EnergyNormalized,

    // --- Shields ---
    ShieldChargesChanged { charges: u32, max: u32 },
    ShieldBroken,
    ShieldRestored,

    // --- Life support ---
    LifeSupportDepleting,
    LifeSupportRestored,
    LifeSupportDepleted,

    // --- Hull ---
    HullDamaged { segment: SegmentId, state: HullState },
    HullBreached { segment: SegmentId },
    BreachContained { segment: SegmentId },
    HullRepaired { segment: SegmentId, state: HullState },
    /// Result of one incoming enemy hit.
    ShipHit { ammo: AmmoType, result: DamageResult },

    // --- Enemies ---
    EnemySpawned { enemy: EnemyId },
    EnemyWeaponSelected { enemy: EnemyId, ammo: AmmoType },
    EnemyFired { enemy: EnemyId, ammo: AmmoType },
    EnemyShieldsChanged { enemy: EnemyId },
    EnemyDestroyed { enemy: EnemyId },

    // --- Stations and cargo ---
    WeaponLoading { station: StationId },
    WeaponArmed { station: StationId },
    WeaponDisarmed { station: StationId },
    WeaponFired { station: StationId, enemy: EnemyId },
    ItemProduced { converter: ConverterId, item: Item },
    CargoChanged { item: Item, count: u32 },

    // --- Game flow ---
    /// Every spawn entry was consumed and every enemy destroyed.
    Victory,
    GameStateExited { state: GameState },
    GameStateEntered { state: GameState },
}
