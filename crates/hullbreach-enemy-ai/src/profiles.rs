//! Random enemy templates for endless or generated encounters.

use rand::seq::SliceRandom;
use rand::Rng;

use hullbreach_core::config::{EnemyTemplate, EnemyWeapons, ShieldCounts, WeaponProfile};
use hullbreach_core::constants::*;
use hullbreach_core::enums::AmmoType;

/// Display names handed to generated enemies.
pub const ENEMY_NAMES: [&str; 10] = [
    "Fighter",
    "Interceptor",
    "Bomber",
    "Advanced",
    "Defender",
    "Phantom",
    "Reaper",
    "Striker",
    "Shuttle",
    "Boarding Craft",
];

/// Impact delay range (seconds) per ammo type for generated weapons.
fn impact_delay_range(ammo: AmmoType) -> (f64, f64) {
    match ammo {
        AmmoType::Laser => (0.0, 2.0),
        AmmoType::Kinetic => (2.0, 5.0),
        AmmoType::Missile => (5.0, 10.0),
    }
}

/// Generate a random enemy: 0..=3 shields of each type, each weapon
/// equipped with even odds, fire rate 5-15s.
pub fn random_template<R: Rng + ?Sized>(rng: &mut R) -> EnemyTemplate {
    let name = ENEMY_NAMES
        .choose(rng)
        .copied()
        .unwrap_or(ENEMY_NAMES[0])
        .to_string();

    let shields = ShieldCounts::new(
        rng.gen_range(0..=RANDOM_ENEMY_MAX_SHIELDS),
        rng.gen_range(0..=RANDOM_ENEMY_MAX_SHIELDS),
        rng.gen_range(0..=RANDOM_ENEMY_MAX_SHIELDS),
    );

    let mut weapons = EnemyWeapons::default();
    for ammo in AmmoType::ALL {
        if rng.gen_bool(0.5) {
            let (min_delay, max_delay) = impact_delay_range(ammo);
            weapons.set(
                ammo,
                Some(WeaponProfile {
                    fire_rate: rng.gen_range(RANDOM_FIRE_RATE_MIN..RANDOM_FIRE_RATE_MAX),
                    impact_delay: rng.gen_range(min_delay..max_delay),
                }),
            );
        }
    }

    EnemyTemplate {
        name,
        shields,
        weapons,
    }
}
