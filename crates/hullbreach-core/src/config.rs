//! Configuration inputs supplied at ship/enemy setup.
//!
//! Every struct has a `Default` carrying the game's tuning values and is
//! `#[serde(default)]`, so a config file only needs the fields it overrides.
//! Nothing here changes after the engine is built from it.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;

/// Complete configuration for one playthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. Same seed and same commands = same playthrough.
    pub seed: u64,
    pub ship: ShipConfig,
    pub combat: CombatTable,
    pub encounter: EncounterConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ship: ShipConfig::default(),
            combat: CombatTable::default(),
            encounter: EncounterConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let energy = &self.ship.energy;
        if energy.initial_capacity > energy.maximum_capacity {
            return Err(ConfigError::invalid(
                "ship.energy.initial_capacity",
                format!(
                    "{} exceeds maximum_capacity {}",
                    energy.initial_capacity, energy.maximum_capacity
                ),
            ));
        }
        positive("ship.energy.time_till_overload", energy.time_till_overload)?;
        positive("ship.energy.regen_duration", energy.regen_duration)?;
        non_negative("ship.energy.regen_per_player_rate", energy.regen_per_player_rate)?;
        non_negative("ship.energy.regen_max_player_rate", energy.regen_max_player_rate)?;

        for kind in SystemKind::ALL {
            let system = self.ship.systems.get(kind);
            non_negative(
                &format!("ship.systems.{kind:?}.overclock_duration"),
                system.overclock_duration,
            )?;
        }

        let shields = &self.ship.shields;
        non_negative("ship.shields.recharge_rate", shields.recharge_rate)?;
        non_negative("ship.shields.overclock_recharge_rate", shields.overclock_recharge_rate)?;

        positive("ship.life_support.max_duration", self.ship.life_support.max_duration)?;

        for (i, weapon) in self.ship.weapons.iter().enumerate() {
            non_negative(&format!("ship.weapons[{i}].load_duration"), weapon.load_duration)?;
            non_negative(&format!("ship.weapons[{i}].reset_duration"), weapon.reset_duration)?;
        }
        for (i, converter) in self.ship.converters.iter().enumerate() {
            non_negative(&format!("ship.converters[{i}].process_time"), converter.process_time)?;
        }

        for ammo in AmmoType::ALL {
            let chance = self.combat.get(ammo).hit_chance;
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::invalid(
                    format!("combat.{ammo:?}.hit_chance"),
                    format!("{chance} is outside [0, 1]"),
                ));
            }
        }

        non_negative("encounter.random_spawn_delay", self.encounter.random_spawn_delay)?;
        for (i, spawn) in self.encounter.spawns.iter().enumerate() {
            non_negative(&format!("encounter.spawns[{i}].spawn_delay"), spawn.spawn_delay)?;
            for ammo in AmmoType::ALL {
                if let Some(weapon) = spawn.enemy.weapons.get(ammo) {
                    non_negative(
                        &format!("encounter.spawns[{i}].enemy.weapons.{ammo:?}.fire_rate"),
                        weapon.fire_rate,
                    )?;
                    non_negative(
                        &format!("encounter.spawns[{i}].enemy.weapons.{ammo:?}.impact_delay"),
                        weapon.impact_delay,
                    )?;
                }
            }
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and >= 0")))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and > 0")))
    }
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub energy: EnergyConfig,
    pub systems: SystemsConfig,
    pub shields: ShieldConfig,
    pub life_support: LifeSupportConfig,
    pub hull: Vec<HullSegmentConfig>,
    pub weapons: Vec<WeaponStationConfig>,
    pub converters: Vec<ConverterConfig>,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            energy: EnergyConfig::default(),
            systems: SystemsConfig::default(),
            shields: ShieldConfig::default(),
            life_support: LifeSupportConfig::default(),
            hull: vec![HullSegmentConfig::default(); 6],
            weapons: AmmoType::ALL
                .iter()
                .map(|&ammo_type| WeaponStationConfig {
                    ammo_type,
                    ..Default::default()
                })
                .collect(),
            converters: vec![
                ConverterConfig::default(),
                ConverterConfig {
                    input: Item::Scrap,
                    output: Item::HullPlate,
                    process_time: CONVERTER_PROCESS_TIME,
                },
            ],
        }
    }
}

/// Ship-wide energy budget tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub initial_capacity: u32,
    pub maximum_capacity: u32,
    /// Seconds of sustained overuse before the overload event.
    pub time_till_overload: f64,
    /// Regen counter units per point of capacity.
    pub regen_duration: f64,
    pub regen_per_player_rate: f64,
    pub regen_max_player_rate: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_ENERGY_CAPACITY,
            maximum_capacity: MAXIMUM_ENERGY_CAPACITY,
            time_till_overload: TIME_TILL_OVERLOAD,
            regen_duration: ENERGY_REGEN_DURATION,
            regen_per_player_rate: ENERGY_REGEN_PER_PLAYER_RATE,
            regen_max_player_rate: ENERGY_REGEN_MAX_PLAYER_RATE,
        }
    }
}

/// One subsystem's draws and overclock limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub initial_state: SystemState,
    pub normal_draw: u32,
    pub overclock_draw: u32,
    pub overclock_duration: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            initial_state: SystemState::Powered,
            normal_draw: SYSTEM_NORMAL_DRAW,
            overclock_draw: SYSTEM_OVERCLOCK_DRAW,
            overclock_duration: SYSTEM_OVERCLOCK_DURATION,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemsConfig {
    pub engines: SystemConfig,
    pub weapons: SystemConfig,
    pub shields: SystemConfig,
    pub sensors: SystemConfig,
}

impl SystemsConfig {
    pub fn get(&self, kind: SystemKind) -> &SystemConfig {
        match kind {
            SystemKind::Engines => &self.engines,
            SystemKind::Weapons => &self.weapons,
            SystemKind::Shields => &self.shields,
            SystemKind::Sensors => &self.sensors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldConfig {
    pub base_charges: u32,
    pub overclock_bonus_charges: u32,
    /// Charges per second at normal power.
    pub recharge_rate: f64,
    /// Charges per second while the shield system is overclocked.
    pub overclock_recharge_rate: f64,
    /// Starting charges. `None` starts full.
    pub initial_charges: Option<u32>,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            base_charges: SHIELD_BASE_CHARGES,
            overclock_bonus_charges: SHIELD_OVERCLOCK_BONUS_CHARGES,
            recharge_rate: SHIELD_RECHARGE_RATE,
            overclock_recharge_rate: SHIELD_OVERCLOCK_RECHARGE_RATE,
            initial_charges: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeSupportConfig {
    pub max_duration: f64,
}

impl Default for LifeSupportConfig {
    fn default() -> Self {
        Self {
            max_duration: LIFE_SUPPORT_DURATION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HullSegmentConfig {
    pub initial_state: HullState,
    /// Item handed to the crew when the segment is scrapped.
    pub scrap_yield: Item,
    /// Item consumed to repair the segment one step.
    pub repair_item: Item,
}

impl Default for HullSegmentConfig {
    fn default() -> Self {
        Self {
            initial_state: HullState::Armored,
            scrap_yield: Item::Scrap,
            repair_item: Item::HullPlate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStationConfig {
    pub ammo_type: AmmoType,
    pub load_duration: f64,
    pub reset_duration: f64,
}

impl Default for WeaponStationConfig {
    fn default() -> Self {
        Self {
            ammo_type: AmmoType::Kinetic,
            load_duration: WEAPON_LOAD_DURATION,
            reset_duration: WEAPON_RESET_DURATION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub input: Item,
    pub output: Item,
    pub process_time: f64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input: Item::Scrap,
            output: Item::Ammo(AmmoType::Kinetic),
            process_time: CONVERTER_PROCESS_TIME,
        }
    }
}

// ---------------------------------------------------------------------------
// Combat
// ---------------------------------------------------------------------------

/// Hit chance and damage amounts for one ammo type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmmoProfile {
    pub hit_chance: f64,
    pub shield_damage: u32,
    /// Number of distinct hull segments damaged by one hit.
    pub hull_damage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTable {
    pub kinetic: AmmoProfile,
    pub missile: AmmoProfile,
    pub laser: AmmoProfile,
}

impl Default for CombatTable {
    fn default() -> Self {
        Self {
            kinetic: AmmoProfile {
                hit_chance: 0.8,
                shield_damage: 1,
                hull_damage: 2,
            },
            missile: AmmoProfile {
                hit_chance: 0.7,
                shield_damage: 2,
                hull_damage: 3,
            },
            laser: AmmoProfile {
                hit_chance: 0.9,
                shield_damage: 3,
                hull_damage: 1,
            },
        }
    }
}

impl CombatTable {
    pub fn get(&self, ammo: AmmoType) -> &AmmoProfile {
        match ammo {
            AmmoType::Kinetic => &self.kinetic,
            AmmoType::Missile => &self.missile,
            AmmoType::Laser => &self.laser,
        }
    }
}

// ---------------------------------------------------------------------------
// Enemies and encounter
// ---------------------------------------------------------------------------

/// Per-ammo-type shield counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldCounts {
    pub kinetic: u32,
    pub missile: u32,
    pub laser: u32,
}

impl ShieldCounts {
    pub fn new(kinetic: u32, missile: u32, laser: u32) -> Self {
        Self {
            kinetic,
            missile,
            laser,
        }
    }

    pub fn get(&self, ammo: AmmoType) -> u32 {
        match ammo {
            AmmoType::Kinetic => self.kinetic,
            AmmoType::Missile => self.missile,
            AmmoType::Laser => self.laser,
        }
    }

    pub fn get_mut(&mut self, ammo: AmmoType) -> &mut u32 {
        match ammo {
            AmmoType::Kinetic => &mut self.kinetic,
            AmmoType::Missile => &mut self.missile,
            AmmoType::Laser => &mut self.laser,
        }
    }

    /// All three counters are zero.
    pub fn is_empty(&self) -> bool {
        self.kinetic == 0 && self.missile == 0 && self.laser == 0
    }
}

/// Timing of one enemy weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Seconds spent charging before the shot leaves.
    pub fire_rate: f64,
    /// Seconds between the shot leaving and it striking the ship.
    pub impact_delay: f64,
}

/// Which weapons an enemy carries. `None` means not equipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyWeapons {
    pub kinetic: Option<WeaponProfile>,
    pub missile: Option<WeaponProfile>,
    pub laser: Option<WeaponProfile>,
}

impl EnemyWeapons {
    pub fn get(&self, ammo: AmmoType) -> Option<&WeaponProfile> {
        match ammo {
            AmmoType::Kinetic => self.kinetic.as_ref(),
            AmmoType::Missile => self.missile.as_ref(),
            AmmoType::Laser => self.laser.as_ref(),
        }
    }

    pub fn set(&mut self, ammo: AmmoType, profile: Option<WeaponProfile>) {
        match ammo {
            AmmoType::Kinetic => self.kinetic = profile,
            AmmoType::Missile => self.missile = profile,
            AmmoType::Laser => self.laser = profile,
        }
    }

    /// Ammo types this enemy is equipped to fire, in `AmmoType::ALL` order.
    pub fn equipped(&self) -> Vec<AmmoType> {
        AmmoType::ALL
            .into_iter()
            .filter(|&ammo| self.get(ammo).is_some())
            .collect()
    }
}

/// Blueprint a spawned enemy is instantiated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTemplate {
    pub name: String,
    pub shields: ShieldCounts,
    pub weapons: EnemyWeapons,
}

/// One entry of the encounter's spawn list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Seconds between this entry being dequeued and the enemy appearing.
    #[serde(default)]
    pub spawn_delay: f64,
    /// Do not dequeue this entry while any enemy is still alive.
    #[serde(default)]
    pub wait_for_clear: bool,
    pub enemy: EnemyTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub spawns: Vec<SpawnEntry>,
    /// Generated enemies queued after the scripted spawns, rolled from the seed.
    pub random_spawns: u32,
    /// Spawn delay of each generated enemy.
    pub random_spawn_delay: f64,
    /// Cargo the crew starts with.
    pub initial_items: Vec<Item>,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        let kinetic = WeaponProfile {
            fire_rate: 10.0,
            impact_delay: 3.0,
        };
        let missile = WeaponProfile {
            fire_rate: 14.0,
            impact_delay: 7.0,
        };
        let laser = WeaponProfile {
            fire_rate: 8.0,
            impact_delay: 1.0,
        };

        Self {
            spawns: vec![
                SpawnEntry {
                    spawn_delay: 3.0,
                    wait_for_clear: false,
                    enemy: EnemyTemplate {
                        name: "Fighter".into(),
                        shields: ShieldCounts::new(2, 0, 0),
                        weapons: EnemyWeapons {
                            kinetic: Some(kinetic),
                            ..Default::default()
                        },
                    },
                },
                SpawnEntry {
                    spawn_delay: 10.0,
                    wait_for_clear: false,
                    enemy: EnemyTemplate {
                        name: "Interceptor".into(),
                        shields: ShieldCounts::new(1, 1, 0),
                        weapons: EnemyWeapons {
                            laser: Some(laser),
                            ..Default::default()
                        },
                    },
                },
                SpawnEntry {
                    spawn_delay: 5.0,
                    wait_for_clear: true,
                    enemy: EnemyTemplate {
                        name: "Bomber".into(),
                        shields: ShieldCounts::new(2, 2, 1),
                        weapons: EnemyWeapons {
                            kinetic: Some(kinetic),
                            missile: Some(missile),
                            laser: None,
                        },
                    },
                },
            ],
            random_spawns: 0,
            random_spawn_delay: 8.0,
            initial_items: vec![
                Item::Ammo(AmmoType::Kinetic),
                Item::Ammo(AmmoType::Kinetic),
                Item::Ammo(AmmoType::Missile),
                Item::Ammo(AmmoType::Laser),
                Item::HullPlate,
            ],
        }
    }
}
