//! Player commands sent from interaction collaborators to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! system runs.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ConverterId, EnemyId, SegmentId, StationId};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game flow ---
    /// Leave Initializing and start the encounter.
    StartGame,
    /// Toggle between Active and Paused.
    TogglePause,
    /// Leave the game (back to menu once the fade completes).
    Exit,
    /// Reload the encounter once the fade completes.
    Restart,
    /// The fade-out collaborator finished its animation.
    FadeCompleted,

    // --- Ship systems ---
    TogglePower { system: SystemKind },
    Overclock { system: SystemKind },
    Repair { system: SystemKind },
    /// One player is actively generating energy this tick (treadmill).
    GenerateEnergy,

    // --- Hull ---
    ScrapHull { segment: SegmentId },
    RepairHull { segment: SegmentId, item: Item },

    // --- Stations ---
    LoadWeapon { station: StationId },
    UnloadWeapon { station: StationId },
    FireWeapon { station: StationId, target: EnemyId },
    StartConversion { converter: ConverterId },

    // --- Debug ---
    /// Resolve an incoming hit of the given ammo type immediately.
    DebugDamage { ammo: AmmoType },
    /// Force the life-support depletion condition on or off.
    DebugSimulateBreach { enabled: bool },
    /// Stop life support from depleting at all.
    DebugSuspendLifeSupport { enabled: bool },
}

impl PlayerCommand {
    /// Commands that mutate the ship and are only honoured while Active.
    pub fn is_ship_command(&self) -> bool {
        !matches!(
            self,
            PlayerCommand::StartGame
                | PlayerCommand::TogglePause
                | PlayerCommand::Exit
                | PlayerCommand::Restart
                | PlayerCommand::FadeCompleted
        )
    }
}
