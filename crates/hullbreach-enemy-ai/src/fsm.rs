//! Enemy weapon-timer finite state machine.
//!
//! Pure functions that compute phase transitions for one enemy's weapon
//! cycle (select, charge, impact) from its loadout and elapsed time.
//! No ECS dependency; operates on plain data.

use rand::seq::SliceRandom;
use rand::Rng;

use hullbreach_core::components::WeaponTimer;
use hullbreach_core::config::EnemyWeapons;
use hullbreach_core::enums::{AmmoType, WeaponPhase};

/// A phase change produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponTransition {
    /// SelectingWeapon → Firing with this weapon.
    Selected(AmmoType),
    /// Firing → WaitingForImpact; the shot is in flight.
    Fired(AmmoType),
    /// WaitingForImpact → SelectingWeapon; the shot strikes the target now.
    Impact(AmmoType),
}

/// Output from the weapon FSM.
#[derive(Debug, Clone)]
pub struct WeaponUpdate {
    pub timer: WeaponTimer,
    pub transition: Option<WeaponTransition>,
}

/// Advance one enemy's weapon timer by `dt`. At most one transition per call.
pub fn evaluate<R: Rng + ?Sized>(
    timer: &WeaponTimer,
    weapons: &EnemyWeapons,
    dt: f64,
    rng: &mut R,
) -> WeaponUpdate {
    match timer.phase {
        WeaponPhase::SelectingWeapon => evaluate_selecting(timer, weapons, rng),
        WeaponPhase::Firing => evaluate_firing(timer, weapons, dt),
        WeaponPhase::WaitingForImpact => evaluate_waiting(timer, weapons, dt),
    }
}

fn evaluate_selecting<R: Rng + ?Sized>(
    timer: &WeaponTimer,
    weapons: &EnemyWeapons,
    rng: &mut R,
) -> WeaponUpdate {
    // Uniform over the equipped subset only. Unarmed enemies stay here.
    let equipped = weapons.equipped();
    let Some(&ammo) = equipped.choose(rng) else {
        return no_change(timer);
    };

    WeaponUpdate {
        timer: WeaponTimer {
            phase: WeaponPhase::Firing,
            active_weapon: Some(ammo),
            fire_elapsed: 0.0,
            impact_elapsed: 0.0,
        },
        transition: Some(WeaponTransition::Selected(ammo)),
    }
}

fn evaluate_firing(timer: &WeaponTimer, weapons: &EnemyWeapons, dt: f64) -> WeaponUpdate {
    let Some((ammo, profile)) = active_profile(timer, weapons) else {
        return reset(timer);
    };

    let fire_elapsed = timer.fire_elapsed + dt;
    if fire_elapsed >= profile.fire_rate {
        return WeaponUpdate {
            timer: WeaponTimer {
                phase: WeaponPhase::WaitingForImpact,
                active_weapon: Some(ammo),
                fire_elapsed,
                impact_elapsed: 0.0,
            },
            transition: Some(WeaponTransition::Fired(ammo)),
        };
    }

    WeaponUpdate {
        timer: WeaponTimer {
            fire_elapsed,
            ..timer.clone()
        },
        transition: None,
    }
}

fn evaluate_waiting(timer: &WeaponTimer, weapons: &EnemyWeapons, dt: f64) -> WeaponUpdate {
    let Some((ammo, profile)) = active_profile(timer, weapons) else {
        return reset(timer);
    };

    let impact_elapsed = timer.impact_elapsed + dt;
    if impact_elapsed >= profile.impact_delay {
        return WeaponUpdate {
            timer: WeaponTimer::default(),
            transition: Some(WeaponTransition::Impact(ammo)),
        };
    }

    WeaponUpdate {
        timer: WeaponTimer {
            impact_elapsed,
            ..timer.clone()
        },
        transition: None,
    }
}

fn active_profile(
    timer: &WeaponTimer,
    weapons: &EnemyWeapons,
) -> Option<(AmmoType, hullbreach_core::config::WeaponProfile)> {
    let ammo = timer.active_weapon?;
    weapons.get(ammo).map(|profile| (ammo, *profile))
}

fn no_change(timer: &WeaponTimer) -> WeaponUpdate {
    WeaponUpdate {
        timer: timer.clone(),
        transition: None,
    }
}

/// The active weapon vanished from the loadout; start a fresh cycle.
fn reset(timer: &WeaponTimer) -> WeaponUpdate {
    tracing::warn!(
        "enemy weapon {:?} is not equipped, reselecting",
        timer.active_weapon
    );
    WeaponUpdate {
        timer: WeaponTimer::default(),
        transition: None,
    }
}

/// Charge progress (0.0 - 1.0) of the active weapon. 0 outside Firing.
pub fn fire_progress(timer: &WeaponTimer, weapons: &EnemyWeapons) -> f64 {
    if timer.phase != WeaponPhase::Firing {
        return 0.0;
    }
    match active_profile(timer, weapons) {
        Some((_, profile)) => fraction(timer.fire_elapsed, profile.fire_rate),
        None => 0.0,
    }
}

/// Flight progress (0.0 - 1.0) of the shot in flight. 0 outside WaitingForImpact.
pub fn impact_progress(timer: &WeaponTimer, weapons: &EnemyWeapons) -> f64 {
    if timer.phase != WeaponPhase::WaitingForImpact {
        return 0.0;
    }
    match active_profile(timer, weapons) {
        Some((_, profile)) => fraction(timer.impact_elapsed, profile.impact_delay),
        None => 0.0,
    }
}

/// Seconds left in the current phase. 0 while selecting.
pub fn phase_remaining_secs(timer: &WeaponTimer, weapons: &EnemyWeapons) -> f64 {
    let Some((_, profile)) = active_profile(timer, weapons) else {
        return 0.0;
    };
    match timer.phase {
        WeaponPhase::SelectingWeapon => 0.0,
        WeaponPhase::Firing => (profile.fire_rate - timer.fire_elapsed).max(0.0),
        WeaponPhase::WaitingForImpact => (profile.impact_delay - timer.impact_elapsed).max(0.0),
    }
}

fn fraction(elapsed: f64, total: f64) -> f64 {
    if total <= 0.0 {
        1.0
    } else {
        (elapsed / total).clamp(0.0, 1.0)
    }
}
