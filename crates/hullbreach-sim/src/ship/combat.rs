//! Incoming-fire resolution: hit roll, then shields, then hull.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error};

use hullbreach_core::config::AmmoProfile;
use hullbreach_core::enums::DamageResult;
use hullbreach_core::events::GameEvent;

use super::hull::HullSegment;
use super::shields::ShieldTracker;

/// Resolve one hit. Shields absorb the whole hit while any charge remains;
/// otherwise up to `hull_damage` distinct segments are damaged once each.
pub fn resolve_damage<R: Rng + ?Sized>(
    profile: &AmmoProfile,
    shields: &mut ShieldTracker,
    hull: &mut [HullSegment],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> DamageResult {
    if !rng.gen_bool(profile.hit_chance.clamp(0.0, 1.0)) {
        debug!("shot missed the ship");
        return DamageResult::Missed;
    }

    if shields.charges() > 0 {
        debug!("taking {} shield damage", profile.shield_damage);
        shields.apply_damage(profile.shield_damage, events);
        return DamageResult::ShieldDamage;
    }

    if hull.is_empty() {
        error!("no hull segments assigned to the ship");
        return DamageResult::Missed;
    }

    let mut targets: Vec<usize> = hull
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.can_be_damaged())
        .map(|(i, _)| i)
        .collect();
    if targets.is_empty() {
        debug!("every hull segment is already breached");
        return DamageResult::Missed;
    }

    targets.shuffle(rng);
    debug!("taking {} hull damage", profile.hull_damage);
    for &i in targets.iter().take(profile.hull_damage as usize) {
        hull[i].damage(events);
    }
    DamageResult::HullDamage
}
