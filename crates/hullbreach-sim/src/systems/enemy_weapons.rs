//! Enemy weapon system. Advances every enemy's weapon timer each tick.
//!
//! Calls the weapon FSM from hullbreach-enemy-ai, writes the new timer back
//! and collects the shots that land this tick.

use hecs::World;
use rand::Rng;

use hullbreach_core::components::{Enemy, EnemyLoadout, EnemyShields, WeaponTimer};
use hullbreach_core::enums::AmmoType;
use hullbreach_core::events::GameEvent;
use hullbreach_core::types::EnemyId;

use hullbreach_enemy_ai::fsm::{evaluate, WeaponTransition};

/// Advance all live enemies. Returns the impacts, in query order, for the
/// caller to resolve against the ship.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    dt: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Vec<(EnemyId, AmmoType)> {
    let mut impacts = Vec::new();

    for (_entity, (_enemy, id, loadout, shields, timer)) in world.query_mut::<(
        &Enemy,
        &EnemyId,
        &EnemyLoadout,
        &EnemyShields,
        &mut WeaponTimer,
    )>() {
        // Destroyed enemies stop firing; cleanup removes them this tick.
        if shields.current.is_empty() {
            continue;
        }

        let update = evaluate(timer, &loadout.template.weapons, dt, rng);
        *timer = update.timer;

        match update.transition {
            Some(WeaponTransition::Selected(ammo)) => {
                events.push(GameEvent::EnemyWeaponSelected { enemy: *id, ammo });
            }
            Some(WeaponTransition::Fired(ammo)) => {
                events.push(GameEvent::EnemyFired { enemy: *id, ammo });
            }
            Some(WeaponTransition::Impact(ammo)) => impacts.push((*id, ammo)),
            None => {}
        }
    }

    impacts
}
