#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::*;
    use crate::constants::DT;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{EnemyId, SegmentId, SimTime, StationId};

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartGame,
            PlayerCommand::TogglePower {
                system: SystemKind::Shields,
            },
            PlayerCommand::RepairHull {
                segment: SegmentId(3),
                item: Item::HullPlate,
            },
            PlayerCommand::FireWeapon {
                station: StationId(1),
                target: EnemyId(7),
            },
            PlayerCommand::DebugDamage {
                ammo: AmmoType::Laser,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since PlayerCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_player_command_tagged_format() {
        let json = r#"{"type":"Overclock","system":"Weapons"}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::Overclock {
                system: SystemKind::Weapons
            }
        ));
    }

    #[test]
    fn test_ship_command_classification() {
        assert!(!PlayerCommand::StartGame.is_ship_command());
        assert!(!PlayerCommand::FadeCompleted.is_ship_command());
        assert!(PlayerCommand::GenerateEnergy.is_ship_command());
        assert!(PlayerCommand::Repair {
            system: SystemKind::Engines
        }
        .is_ship_command());
    }

    #[test]
    fn test_game_event_serde() {
        let event = GameEvent::ShieldChargesChanged { charges: 2, max: 5 };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_system_kind_index_matches_all() {
        for (i, kind) in SystemKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_system_state_online() {
        assert!(SystemState::Powered.is_online());
        assert!(SystemState::Overclocked.is_online());
        assert!(SystemState::Damaged.is_online());
        assert!(!SystemState::Disabled.is_online());
        assert!(!SystemState::Destroyed.is_online());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ship.hull.len(), 6);
        assert_eq!(config.ship.weapons.len(), 3);
        assert_eq!(config.combat.get(AmmoType::Missile).hull_damage, 3);
    }

    #[test]
    fn test_partial_json_config_uses_defaults() {
        let json = r#"{
            "seed": 7,
            "ship": { "energy": { "initial_capacity": 6 } },
            "combat": { "kinetic": { "hit_chance": 1.0, "shield_damage": 1, "hull_damage": 1 } }
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.ship.energy.initial_capacity, 6);
        assert_eq!(config.ship.energy.maximum_capacity, 10);
        assert_eq!(config.combat.kinetic.hit_chance, 1.0);
        assert_eq!(config.combat.laser.hit_chance, 0.9);
    }

    #[test]
    fn test_config_rejects_capacity_above_maximum() {
        let mut config = GameConfig::default();
        config.ship.energy.initial_capacity = 12;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "ship.energy.initial_capacity"));
    }

    #[test]
    fn test_config_rejects_bad_hit_chance() {
        let mut config = GameConfig::default();
        config.combat.laser.hit_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_nan_hit_chance() {
        let mut config = GameConfig::default();
        config.combat.laser.hit_chance = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "combat.Laser.hit_chance"));
    }

    #[test]
    fn test_random_spawns_default_off() {
        let config = GameConfig::from_json(r#"{"encounter": {"random_spawns": 4}}"#).unwrap();
        assert_eq!(config.encounter.random_spawns, 4);
        assert_eq!(config.encounter.random_spawn_delay, 8.0);
        assert_eq!(config.encounter.spawns.len(), 3);
        assert_eq!(GameConfig::default().encounter.random_spawns, 0);

        let mut config = GameConfig::default();
        config.encounter.random_spawn_delay = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_overload_delay() {
        let mut config = GameConfig::default();
        config.ship.energy.time_till_overload = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_spawn_entry_item_format() {
        let json = r#"{
            "encounter": {
                "spawns": [
                    { "spawn_delay": 1.0, "enemy": { "name": "Drone", "shields": { "laser": 2 } } }
                ],
                "initial_items": ["Scrap", { "Ammo": "Missile" }]
            }
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        let spawn = &config.encounter.spawns[0];
        assert!(!spawn.wait_for_clear);
        assert_eq!(spawn.enemy.shields, ShieldCounts::new(0, 0, 2));
        assert!(spawn.enemy.weapons.equipped().is_empty());
        assert_eq!(
            config.encounter.initial_items,
            vec![Item::Scrap, Item::Ammo(AmmoType::Missile)]
        );
    }

    #[test]
    fn test_enemy_weapons_equipped_order() {
        let profile = WeaponProfile {
            fire_rate: 5.0,
            impact_delay: 1.0,
        };
        let weapons = EnemyWeapons {
            kinetic: None,
            missile: Some(profile),
            laser: Some(profile),
        };
        assert_eq!(weapons.equipped(), vec![AmmoType::Missile, AmmoType::Laser]);
    }

    #[test]
    fn test_shield_counts_empty() {
        let mut counts = ShieldCounts::new(0, 1, 0);
        assert!(!counts.is_empty());
        *counts.get_mut(AmmoType::Missile) = 0;
        assert!(counts.is_empty());
    }

    /// Verify GameStateSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.game_state, back.game_state);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance(DT);
        }
        assert_eq!(time.tick, 30);
        // 30 ticks at 30Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }
}
