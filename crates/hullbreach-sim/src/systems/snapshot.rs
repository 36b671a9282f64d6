//! Snapshot system: reads the ship and the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use hullbreach_core::components::*;
use hullbreach_core::enums::*;
use hullbreach_core::events::GameEvent;
use hullbreach_core::state::*;
use hullbreach_core::types::{EnemyId, SimTime};

use hullbreach_enemy_ai::fsm;

use crate::ship::Ship;
use crate::systems::wave_spawner::EncounterSchedule;
use crate::world_setup;

/// Build a complete GameStateSnapshot from the current sim state.
pub fn build_snapshot(
    world: &World,
    ship: &Ship,
    schedule: &EncounterSchedule,
    time: &SimTime,
    game_state: GameState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        game_state,
        ship: build_ship(ship),
        enemies: build_enemies(world),
        encounter: build_encounter(world, schedule),
        events,
    }
}

fn build_ship(ship: &Ship) -> ShipView {
    let energy = ship.energy();
    let life_support = ship.life_support();

    ShipView {
        systems: ship
            .systems()
            .iter()
            .map(|system| SystemView {
                kind: system.kind(),
                state: system.state(),
                draw: system.current_draw(),
                overclock_remaining_secs: system.overclock_remaining_secs(),
            })
            .collect(),
        energy: EnergyView {
            capacity: energy.capacity(),
            maximum_capacity: energy.maximum_capacity(),
            usage: energy.usage(),
            overload_state: energy.overload_state(),
            time_till_overload_secs: energy.time_till_overload_secs(),
            overload_percent: energy.overload_percent(),
            regen_percent: energy.regen_percent(),
        },
        shields: ShieldView {
            charges: ship.shields().charges(),
            max_charges: ship.shields().max_charges(),
        },
        life_support: LifeSupportView {
            depleting: life_support.is_depleting(),
            remaining_secs: life_support.remaining_secs(),
            max_duration_secs: life_support.max_duration(),
        },
        hull: ship
            .hull()
            .iter()
            .map(|segment| HullView {
                segment: segment.id(),
                state: segment.state(),
            })
            .collect(),
        weapons: ship
            .weapons()
            .iter()
            .map(|station| WeaponStationView {
                station: station.id(),
                ammo_type: station.ammo_type(),
                state: station.state(),
            })
            .collect(),
        converters: ship
            .converters()
            .iter()
            .map(|converter| ConverterView {
                converter: converter.id(),
                input: converter.input(),
                output: converter.output(),
                processing: converter.is_processing(),
                progress: converter.progress(),
            })
            .collect(),
        cargo: ship
            .cargo()
            .iter()
            .map(|(item, count)| CargoView { item, count })
            .collect(),
    }
}

/// Build EnemyView list from all live enemy entities.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &EnemyId, &EnemyLoadout, &EnemyShields, &WeaponTimer)>()
        .iter()
        .map(|(_, (_, id, loadout, shields, timer))| {
            let weapons = &loadout.template.weapons;
            EnemyView {
                enemy: *id,
                name: loadout.template.name.clone(),
                shields: shields.current,
                max_shields: shields.max,
                equipped: weapons.equipped(),
                phase: timer.phase,
                active_weapon: timer.active_weapon,
                fire_progress: fsm::fire_progress(timer, weapons),
                impact_progress: fsm::impact_progress(timer, weapons),
                phase_remaining_secs: fsm::phase_remaining_secs(timer, weapons),
            }
        })
        .collect();

    enemies.sort_by_key(|e| e.enemy);
    enemies
}

fn build_encounter(world: &World, schedule: &EncounterSchedule) -> EncounterView {
    EncounterView {
        spawned: schedule.spawned(),
        total: schedule.total(),
        active_enemies: world_setup::active_enemy_count(world),
        spawn_pending: schedule.is_pending(),
        pending_remaining_secs: schedule.pending_remaining_secs(),
    }
}
