#[cfg(test)]
mod tests {
    use hullbreach_core::components::WeaponTimer;
    use hullbreach_core::config::{EnemyWeapons, WeaponProfile};
    use hullbreach_core::constants::*;
    use hullbreach_core::enums::{AmmoType, WeaponPhase};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::fsm::{evaluate, fire_progress, impact_progress, phase_remaining_secs, WeaponTransition};
    use crate::profiles::{random_template, ENEMY_NAMES};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn single_weapon(ammo: AmmoType, fire_rate: f64, impact_delay: f64) -> EnemyWeapons {
        let mut weapons = EnemyWeapons::default();
        weapons.set(
            ammo,
            Some(WeaponProfile {
                fire_rate,
                impact_delay,
            }),
        );
        weapons
    }

    /// Run the FSM until `secs` of sim time have passed, collecting transitions.
    fn run(
        timer: &mut WeaponTimer,
        weapons: &EnemyWeapons,
        secs: f64,
        rng: &mut ChaCha8Rng,
    ) -> Vec<WeaponTransition> {
        let ticks = (secs / DT).round() as usize;
        let mut transitions = Vec::new();
        for _ in 0..ticks {
            let update = evaluate(timer, weapons, DT, rng);
            *timer = update.timer;
            transitions.extend(update.transition);
        }
        transitions
    }

    #[test]
    fn test_selecting_picks_only_equipped_weapon() {
        let weapons = single_weapon(AmmoType::Missile, 5.0, 2.0);
        let mut rng = rng();
        for _ in 0..20 {
            let update = evaluate(&WeaponTimer::default(), &weapons, DT, &mut rng);
            assert_eq!(update.timer.phase, WeaponPhase::Firing);
            assert_eq!(update.timer.active_weapon, Some(AmmoType::Missile));
            assert_eq!(
                update.transition,
                Some(WeaponTransition::Selected(AmmoType::Missile))
            );
        }
    }

    #[test]
    fn test_selection_covers_equipped_subset() {
        let profile = WeaponProfile {
            fire_rate: 5.0,
            impact_delay: 1.0,
        };
        let weapons = EnemyWeapons {
            kinetic: Some(profile),
            missile: None,
            laser: Some(profile),
        };
        let mut rng = rng();
        let mut seen_kinetic = false;
        let mut seen_laser = false;
        for _ in 0..200 {
            let update = evaluate(&WeaponTimer::default(), &weapons, DT, &mut rng);
            match update.timer.active_weapon {
                Some(AmmoType::Kinetic) => seen_kinetic = true,
                Some(AmmoType::Laser) => seen_laser = true,
                other => panic!("unexpected selection {other:?}"),
            }
        }
        assert!(seen_kinetic && seen_laser);
    }

    #[test]
    fn test_unarmed_enemy_stays_selecting() {
        let weapons = EnemyWeapons::default();
        let mut timer = WeaponTimer::default();
        let transitions = run(&mut timer, &weapons, 30.0, &mut rng());
        assert!(transitions.is_empty());
        assert_eq!(timer.phase, WeaponPhase::SelectingWeapon);
        assert_eq!(timer.active_weapon, None);
    }

    #[test]
    fn test_full_cycle_timing() {
        // fire 5s, impact 2s: selected on tick 1, fired at ~5s, impact ~2s later.
        let weapons = single_weapon(AmmoType::Kinetic, 5.0, 2.0);
        let mut timer = WeaponTimer::default();
        let mut rng = rng();

        let transitions = run(&mut timer, &weapons, 4.9, &mut rng);
        assert_eq!(
            transitions,
            vec![WeaponTransition::Selected(AmmoType::Kinetic)]
        );
        assert_eq!(timer.phase, WeaponPhase::Firing);

        let transitions = run(&mut timer, &weapons, 0.3, &mut rng);
        assert_eq!(transitions, vec![WeaponTransition::Fired(AmmoType::Kinetic)]);
        assert_eq!(timer.phase, WeaponPhase::WaitingForImpact);

        let transitions = run(&mut timer, &weapons, 2.1, &mut rng);
        assert_eq!(transitions[0], WeaponTransition::Impact(AmmoType::Kinetic));
        // Impact returns to selecting; the following tick picks again.
        assert_eq!(
            &transitions[1..],
            &[WeaponTransition::Selected(AmmoType::Kinetic)]
        );
        assert_eq!(timer.phase, WeaponPhase::Firing);
    }

    #[test]
    fn test_one_transition_per_tick() {
        // Zero delays still take one tick per phase.
        let weapons = single_weapon(AmmoType::Laser, 0.0, 0.0);
        let mut timer = WeaponTimer::default();
        let mut rng = rng();
        let mut transitions = Vec::new();
        for _ in 0..3 {
            let update = evaluate(&timer, &weapons, DT, &mut rng);
            timer = update.timer;
            transitions.push(update.transition);
        }
        assert_eq!(
            transitions,
            vec![
                Some(WeaponTransition::Selected(AmmoType::Laser)),
                Some(WeaponTransition::Fired(AmmoType::Laser)),
                Some(WeaponTransition::Impact(AmmoType::Laser)),
            ]
        );
        assert_eq!(timer.phase, WeaponPhase::SelectingWeapon);
    }

    #[test]
    fn test_missing_active_weapon_resets() {
        let weapons = single_weapon(AmmoType::Kinetic, 5.0, 2.0);
        let timer = WeaponTimer {
            phase: WeaponPhase::Firing,
            active_weapon: Some(AmmoType::Missile),
            fire_elapsed: 1.0,
            impact_elapsed: 0.0,
        };
        let update = evaluate(&timer, &weapons, DT, &mut rng());
        assert_eq!(update.transition, None);
        assert_eq!(update.timer.phase, WeaponPhase::SelectingWeapon);
        assert_eq!(update.timer.active_weapon, None);
    }

    #[test]
    fn test_progress_helpers() {
        let weapons = single_weapon(AmmoType::Kinetic, 4.0, 2.0);
        let charging = WeaponTimer {
            phase: WeaponPhase::Firing,
            active_weapon: Some(AmmoType::Kinetic),
            fire_elapsed: 1.0,
            impact_elapsed: 0.0,
        };
        assert!((fire_progress(&charging, &weapons) - 0.25).abs() < 1e-9);
        assert_eq!(impact_progress(&charging, &weapons), 0.0);
        assert!((phase_remaining_secs(&charging, &weapons) - 3.0).abs() < 1e-9);

        let in_flight = WeaponTimer {
            phase: WeaponPhase::WaitingForImpact,
            active_weapon: Some(AmmoType::Kinetic),
            fire_elapsed: 4.0,
            impact_elapsed: 1.5,
        };
        assert_eq!(fire_progress(&in_flight, &weapons), 0.0);
        assert!((impact_progress(&in_flight, &weapons) - 0.75).abs() < 1e-9);
        assert!((phase_remaining_secs(&in_flight, &weapons) - 0.5).abs() < 1e-9);

        assert_eq!(phase_remaining_secs(&WeaponTimer::default(), &weapons), 0.0);
    }

    #[test]
    fn test_random_template_ranges() {
        let mut rng = rng();
        for _ in 0..100 {
            let template = random_template(&mut rng);
            assert!(ENEMY_NAMES.contains(&template.name.as_str()));
            for ammo in AmmoType::ALL {
                assert!(template.shields.get(ammo) <= RANDOM_ENEMY_MAX_SHIELDS);
                if let Some(weapon) = template.weapons.get(ammo) {
                    assert!(weapon.fire_rate >= RANDOM_FIRE_RATE_MIN);
                    assert!(weapon.fire_rate < RANDOM_FIRE_RATE_MAX);
                    let (lo, hi) = match ammo {
                        AmmoType::Laser => (0.0, 2.0),
                        AmmoType::Kinetic => (2.0, 5.0),
                        AmmoType::Missile => (5.0, 10.0),
                    };
                    assert!(weapon.impact_delay >= lo && weapon.impact_delay < hi);
                }
            }
        }
    }

    #[test]
    fn test_random_template_deterministic_with_seed() {
        let a = random_template(&mut ChaCha8Rng::seed_from_u64(99));
        let b = random_template(&mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
