//! Cleanup system: removes enemies whose shields are all gone.

use hecs::{Entity, World};
use tracing::info;

use hullbreach_core::components::{Enemy, EnemyShields};
use hullbreach_core::events::GameEvent;
use hullbreach_core::types::EnemyId;

/// Despawn destroyed enemies. An enemy that reached zero shields without
/// going through `damage_enemy` (e.g. spawned empty) still gets exactly one
/// `EnemyDestroyed`. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<GameEvent>) {
    despawn_buffer.clear();

    for (entity, (_enemy, id, shields)) in
        world.query_mut::<(&Enemy, &EnemyId, &mut EnemyShields)>()
    {
        if !shields.current.is_empty() {
            continue;
        }
        if !shields.destroyed_reported {
            shields.destroyed_reported = true;
            info!("enemy {} destroyed", id.0);
            events.push(GameEvent::EnemyDestroyed { enemy: *id });
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
