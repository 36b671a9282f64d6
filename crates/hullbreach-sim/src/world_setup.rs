//! Enemy entity factories and helpers for the hecs world.

use hecs::{Entity, World};
use tracing::{debug, error, info};

use hullbreach_core::components::*;
use hullbreach_core::config::EnemyTemplate;
use hullbreach_core::enums::AmmoType;
use hullbreach_core::events::GameEvent;
use hullbreach_core::types::EnemyId;

/// Spawn an enemy from its template with a fresh weapon timer.
pub fn spawn_enemy(
    world: &mut World,
    template: &EnemyTemplate,
    next_enemy_id: &mut u32,
    events: &mut Vec<GameEvent>,
) -> EnemyId {
    if template.weapons.equipped().is_empty() {
        error!("enemy '{}' has no weapons equipped", template.name);
    }

    let id = EnemyId(*next_enemy_id);
    *next_enemy_id += 1;

    world.spawn((
        Enemy,
        id,
        EnemyLoadout {
            template: template.clone(),
        },
        EnemyShields {
            current: template.shields,
            max: template.shields,
            destroyed_reported: false,
        },
        WeaponTimer::default(),
    ));

    info!("enemy {} '{}' spawned", id.0, template.name);
    events.push(GameEvent::EnemySpawned { enemy: id });
    id
}

/// Number of live enemies. Destroyed enemies awaiting cleanup are not counted.
pub fn active_enemy_count(world: &World) -> u32 {
    world
        .query::<(&Enemy, &EnemyShields)>()
        .iter()
        .filter(|(_, (_, shields))| !shields.current.is_empty())
        .count() as u32
}

/// Entity of a live enemy (present and not yet destroyed).
pub fn find_live_enemy(world: &World, target: EnemyId) -> Option<Entity> {
    world
        .query::<(&Enemy, &EnemyId, &EnemyShields)>()
        .iter()
        .find(|(_, (_, id, shields))| **id == target && !shields.current.is_empty())
        .map(|(entity, _)| entity)
}

/// Knock one `ammo` shield off an enemy. Emits destroyed once when the last
/// shield goes.
pub fn damage_enemy(
    world: &mut World,
    entity: Entity,
    ammo: AmmoType,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Ok((id, shields)) = world.query_one_mut::<(&EnemyId, &mut EnemyShields)>(entity) else {
        return false;
    };

    let counter = shields.current.get_mut(ammo);
    if *counter == 0 {
        debug!("enemy {} has no {:?} shields left", id.0, ammo);
        return false;
    }
    *counter -= 1;
    events.push(GameEvent::EnemyShieldsChanged { enemy: *id });

    if shields.current.is_empty() && !shields.destroyed_reported {
        shields.destroyed_reported = true;
        info!("enemy {} destroyed", id.0);
        events.push(GameEvent::EnemyDestroyed { enemy: *id });
    }
    true
}
