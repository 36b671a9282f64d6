//! The player ship aggregate.
//!
//! `Ship` owns the four system records and every ship-wide tracker. All
//! mutations go through its methods so that each system change is followed
//! by the same aftermath: shield capacity update, usage recompute and the
//! overload entry/exit check.

pub mod cargo;
pub mod combat;
pub mod energy;
pub mod hull;
pub mod life_support;
pub mod shields;
pub mod stations;
pub mod system;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, warn};

use hullbreach_core::config::{CombatTable, ShipConfig};
use hullbreach_core::enums::{AmmoType, DamageResult, Item, SystemKind, SystemState};
use hullbreach_core::events::GameEvent;
use hullbreach_core::types::{ConverterId, EnemyId, SegmentId, StationId};

use cargo::Cargo;
use energy::EnergyAccountant;
use hull::HullSegment;
use life_support::LifeSupport;
use shields::ShieldTracker;
use stations::{Converter, WeaponStation};
use system::SystemRecord;

/// What a ship tick reports back to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipTickOutcome {
    pub life_support_depleted: bool,
    pub overloaded: bool,
}

#[derive(Debug, Clone)]
pub struct Ship {
    systems: [SystemRecord; 4],
    energy: EnergyAccountant,
    shields: ShieldTracker,
    life_support: LifeSupport,
    hull: Vec<HullSegment>,
    weapons: Vec<WeaponStation>,
    converters: Vec<Converter>,
    cargo: Cargo,
    combat: CombatTable,
}

impl Ship {
    pub fn new(config: &ShipConfig, combat: &CombatTable, initial_items: &[Item]) -> Self {
        let systems = SystemKind::ALL.map(|kind| SystemRecord::new(kind, config.systems.get(kind)));
        let energy = EnergyAccountant::new(&config.energy, &systems);
        let shields = ShieldTracker::new(
            &config.shields,
            systems[SystemKind::Shields.index()].state(),
        );

        if config.hull.is_empty() {
            error!("ship configured without hull segments");
        }
        let hull = config
            .hull
            .iter()
            .enumerate()
            .map(|(i, segment)| HullSegment::new(SegmentId(i), segment))
            .collect();
        let weapons = config
            .weapons
            .iter()
            .enumerate()
            .map(|(i, station)| WeaponStation::new(StationId(i), station))
            .collect();
        let converters = config
            .converters
            .iter()
            .enumerate()
            .map(|(i, converter)| Converter::new(ConverterId(i), converter))
            .collect();

        Self {
            systems,
            energy,
            shields,
            life_support: LifeSupport::new(&config.life_support),
            hull,
            weapons,
            converters,
            cargo: Cargo::with_items(initial_items),
            combat: combat.clone(),
        }
    }

    // --- Read-only queries ---

    pub fn system(&self, kind: SystemKind) -> &SystemRecord {
        &self.systems[kind.index()]
    }

    pub fn systems(&self) -> &[SystemRecord] {
        &self.systems
    }

    pub fn energy(&self) -> &EnergyAccountant {
        &self.energy
    }

    pub fn shields(&self) -> &ShieldTracker {
        &self.shields
    }

    pub fn life_support(&self) -> &LifeSupport {
        &self.life_support
    }

    pub fn hull(&self) -> &[HullSegment] {
        &self.hull
    }

    pub fn weapons(&self) -> &[WeaponStation] {
        &self.weapons
    }

    pub fn converters(&self) -> &[Converter] {
        &self.converters
    }

    pub fn cargo(&self) -> &Cargo {
        &self.cargo
    }

    pub fn any_hull_breached(&self) -> bool {
        self.hull.iter().any(HullSegment::is_breached)
    }

    // --- System operations ---

    pub fn toggle_power(&mut self, kind: SystemKind, events: &mut Vec<GameEvent>) -> bool {
        self.with_system(kind, events, SystemRecord::toggle_power)
    }

    pub fn overclock(&mut self, kind: SystemKind, events: &mut Vec<GameEvent>) -> bool {
        self.with_system(kind, events, SystemRecord::overclock)
    }

    pub fn repair_system(&mut self, kind: SystemKind, events: &mut Vec<GameEvent>) -> bool {
        self.with_system(kind, events, SystemRecord::repair)
    }

    pub fn damage_system(&mut self, kind: SystemKind, events: &mut Vec<GameEvent>) -> bool {
        self.with_system(kind, events, SystemRecord::damage)
    }

    pub fn destroy_system(&mut self, kind: SystemKind, events: &mut Vec<GameEvent>) -> bool {
        self.with_system(kind, events, SystemRecord::destroy)
    }

    /// A crew member is generating energy this tick.
    pub fn generate_energy(&mut self) {
        self.energy.add_contributor();
    }

    /// Run one operation on a system, then propagate the change.
    fn with_system<F>(&mut self, kind: SystemKind, events: &mut Vec<GameEvent>, op: F) -> bool
    where
        F: FnOnce(&mut SystemRecord, &mut Vec<GameEvent>) -> bool,
    {
        let changed = op(&mut self.systems[kind.index()], events);
        if changed {
            if kind == SystemKind::Shields {
                self.shields
                    .on_system_state_changed(self.systems[kind.index()].state(), events);
            }
            self.energy.recompute_usage(&self.systems, events);
            self.energy.check_overload(events);
        }
        changed
    }

    // --- Tick ---

    /// Advance every ship-side timer by `dt`, in dependency order:
    /// systems, energy, shields, life support, stations.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> ShipTickOutcome {
        let mut outcome = ShipTickOutcome::default();

        for kind in SystemKind::ALL {
            self.with_system(kind, events, |system, events| system.tick(dt, events));
        }

        self.energy.check_overload(events);
        if self.energy.tick_overload(dt) {
            self.resolve_overload(rng, events);
            outcome.overloaded = true;
        }
        if self.energy.tick_regen(dt, events) {
            self.energy.check_overload(events);
        }

        let shield_state = self.system(SystemKind::Shields).state();
        self.shields.tick(dt, shield_state, events);

        outcome.life_support_depleted = self.life_support.tick(
            self.any_hull_breached(),
            shield_state == SystemState::Overclocked,
            dt,
            events,
        );

        for station in &mut self.weapons {
            station.tick(dt, events);
        }
        for converter in &mut self.converters {
            converter.tick(dt, &mut self.cargo, events);
        }

        outcome
    }

    /// Overload punishment: destroy overclocked systems, shed the rest in
    /// random order until usage fits, then lose one point of capacity.
    ///
    /// Powered systems are switched off first. Damaged systems are only
    /// destroyed if switching off every powered system was not enough.
    /// Each system is acted on at most once.
    pub fn resolve_overload<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        self.energy.begin_overload(events);

        for kind in SystemKind::ALL {
            if self.system(kind).state() == SystemState::Overclocked {
                self.destroy_system(kind, events);
            }
        }

        if self.energy.is_over_capacity() {
            let mut order = SystemKind::ALL;
            order.shuffle(rng);

            let mut deferred = Vec::new();
            for kind in order {
                if !self.energy.is_over_capacity() {
                    break;
                }
                match self.system(kind).state() {
                    SystemState::Powered => {
                        self.toggle_power(kind, events);
                    }
                    SystemState::Damaged => deferred.push(kind),
                    _ => {}
                }
            }
            for kind in deferred {
                if !self.energy.is_over_capacity() {
                    break;
                }
                self.destroy_system(kind, events);
            }
        }

        self.energy.finish_overload(events);
        self.energy.check_overload(events);
    }

    // --- Combat ---

    /// Resolve an incoming hit of `ammo` against this ship.
    pub fn resolve_damage<R: Rng + ?Sized>(
        &mut self,
        ammo: AmmoType,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> DamageResult {
        let profile = *self.combat.get(ammo);
        let result =
            combat::resolve_damage(&profile, &mut self.shields, &mut self.hull, rng, events);
        debug!("{:?} hit resolved: {:?}", ammo, result);
        events.push(GameEvent::ShipHit { ammo, result });
        result
    }

    // --- Hull ---

    pub fn scrap_hull(&mut self, segment: SegmentId, events: &mut Vec<GameEvent>) -> bool {
        let Some(hull) = self.hull.get_mut(segment.0) else {
            warn!("no hull segment {}", segment.0);
            return false;
        };
        if !hull.can_be_scrapped() {
            warn!("hull segment {} cannot be scrapped while {:?}", segment.0, hull.state());
            return false;
        }
        hull.damage(events);
        let scrap = hull.scrap_yield();
        self.cargo.add(scrap, events);
        true
    }

    pub fn repair_hull(&mut self, segment: SegmentId, item: Item, events: &mut Vec<GameEvent>) -> bool {
        let Some(hull) = self.hull.get_mut(segment.0) else {
            warn!("no hull segment {}", segment.0);
            return false;
        };
        if !hull.can_be_repaired() {
            warn!("hull segment {} does not need repair", segment.0);
            return false;
        }
        if item != hull.repair_item() {
            warn!(
                "hull segment {} needs {:?}, not {:?}",
                segment.0,
                hull.repair_item(),
                item
            );
            return false;
        }
        if !self.cargo.take(item, events) {
            warn!("no {:?} in cargo to repair hull segment {}", item, segment.0);
            return false;
        }
        hull.repair(events)
    }

    // --- Stations ---

    pub fn load_weapon(&mut self, station: StationId, events: &mut Vec<GameEvent>) -> bool {
        match self.weapons.get_mut(station.0) {
            Some(weapon) => weapon.load(&mut self.cargo, events),
            None => {
                warn!("no weapon station {}", station.0);
                false
            }
        }
    }

    pub fn unload_weapon(&mut self, station: StationId, events: &mut Vec<GameEvent>) -> bool {
        match self.weapons.get_mut(station.0) {
            Some(weapon) => weapon.unload(&mut self.cargo, events),
            None => {
                warn!("no weapon station {}", station.0);
                false
            }
        }
    }

    /// Fire a ready station at `target`. The caller has already checked the
    /// target is alive and applies the returned ammo to it.
    pub fn fire_weapon(
        &mut self,
        station: StationId,
        target: EnemyId,
        events: &mut Vec<GameEvent>,
    ) -> Option<AmmoType> {
        let weapons_state = self.system(SystemKind::Weapons).state();
        if !weapons_state.is_online() {
            warn!("weapons system is {:?}, cannot fire", weapons_state);
            return None;
        }
        match self.weapons.get_mut(station.0) {
            Some(weapon) => weapon.fire(target, events),
            None => {
                warn!("no weapon station {}", station.0);
                None
            }
        }
    }

    pub fn start_conversion(&mut self, converter: ConverterId, events: &mut Vec<GameEvent>) -> bool {
        match self.converters.get_mut(converter.0) {
            Some(c) => c.start(&mut self.cargo, events),
            None => {
                warn!("no converter {}", converter.0);
                false
            }
        }
    }

    // --- Debug overrides ---

    pub fn set_simulate_breach(&mut self, enabled: bool) {
        self.life_support.set_simulate_breach(enabled);
    }

    pub fn set_life_support_suspended(&mut self, enabled: bool, events: &mut Vec<GameEvent>) {
        self.life_support.set_suspended(enabled, events);
    }
}
