//! Crew-operated stations: weapon stations and item converters.

use tracing::{debug, warn};

use hullbreach_core::config::{ConverterConfig, WeaponStationConfig};
use hullbreach_core::enums::{AmmoType, Item, StationState};
use hullbreach_core::events::GameEvent;
use hullbreach_core::types::{ConverterId, EnemyId, StationId};

use super::cargo::Cargo;

/// A player weapon that is loaded from cargo, armed, fired and reset.
#[derive(Debug, Clone)]
pub struct WeaponStation {
    id: StationId,
    ammo_type: AmmoType,
    load_duration: f64,
    reset_duration: f64,
    state: StationState,
    /// Seconds spent in the current timed state (Loading/Unlocking).
    elapsed: f64,
}

impl WeaponStation {
    pub fn new(id: StationId, config: &WeaponStationConfig) -> Self {
        Self {
            id,
            ammo_type: config.ammo_type,
            load_duration: config.load_duration,
            reset_duration: config.reset_duration,
            state: StationState::Idle,
            elapsed: 0.0,
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn ammo_type(&self) -> AmmoType {
        self.ammo_type
    }

    pub fn state(&self) -> StationState {
        self.state
    }

    fn ammo(&self) -> Item {
        Item::Ammo(self.ammo_type)
    }

    pub fn load(&mut self, cargo: &mut Cargo, events: &mut Vec<GameEvent>) -> bool {
        if self.state != StationState::Idle {
            warn!("station {} cannot load while {:?}", self.id.0, self.state);
            return false;
        }
        if !cargo.take(self.ammo(), events) {
            warn!("station {} has no {:?} ammo to load", self.id.0, self.ammo_type);
            return false;
        }
        self.state = StationState::Loading;
        self.elapsed = 0.0;
        events.push(GameEvent::WeaponLoading { station: self.id });
        true
    }

    pub fn unload(&mut self, cargo: &mut Cargo, events: &mut Vec<GameEvent>) -> bool {
        if self.state != StationState::Ready {
            warn!("station {} cannot unload while {:?}", self.id.0, self.state);
            return false;
        }
        self.state = StationState::Idle;
        cargo.add(self.ammo(), events);
        events.push(GameEvent::WeaponDisarmed { station: self.id });
        true
    }

    /// Ready → Unlocking. Returns the ammo type that left the station.
    pub fn fire(&mut self, target: EnemyId, events: &mut Vec<GameEvent>) -> Option<AmmoType> {
        if self.state != StationState::Ready {
            warn!("station {} cannot fire while {:?}", self.id.0, self.state);
            return None;
        }
        self.state = StationState::Unlocking;
        self.elapsed = 0.0;
        events.push(GameEvent::WeaponFired {
            station: self.id,
            enemy: target,
        });
        Some(self.ammo_type)
    }

    pub fn tick(&mut self, dt: f64, events: &mut Vec<GameEvent>) {
        match self.state {
            StationState::Loading => {
                self.elapsed += dt;
                if self.elapsed >= self.load_duration {
                    self.state = StationState::Ready;
                    self.elapsed = 0.0;
                    debug!("station {} armed", self.id.0);
                    events.push(GameEvent::WeaponArmed { station: self.id });
                }
            }
            StationState::Unlocking => {
                self.elapsed += dt;
                if self.elapsed >= self.reset_duration {
                    self.state = StationState::Idle;
                    self.elapsed = 0.0;
                }
            }
            StationState::Idle | StationState::Ready => {}
        }
    }
}

/// Turns one input item into one output item over `process_time`.
#[derive(Debug, Clone)]
pub struct Converter {
    id: ConverterId,
    input: Item,
    output: Item,
    process_time: f64,
    processing: bool,
    elapsed: f64,
}

impl Converter {
    pub fn new(id: ConverterId, config: &ConverterConfig) -> Self {
        Self {
            id,
            input: config.input,
            output: config.output,
            process_time: config.process_time,
            processing: false,
            elapsed: 0.0,
        }
    }

    pub fn id(&self) -> ConverterId {
        self.id
    }

    pub fn input(&self) -> Item {
        self.input
    }

    pub fn output(&self) -> Item {
        self.output
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn progress(&self) -> f64 {
        if !self.processing {
            return 0.0;
        }
        if self.process_time <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.process_time).clamp(0.0, 1.0)
    }

    pub fn start(&mut self, cargo: &mut Cargo, events: &mut Vec<GameEvent>) -> bool {
        if self.processing {
            warn!("converter {} is already processing", self.id.0);
            return false;
        }
        if !cargo.take(self.input, events) {
            warn!("converter {} has no {:?} to process", self.id.0, self.input);
            return false;
        }
        self.processing = true;
        self.elapsed = 0.0;
        true
    }

    pub fn tick(&mut self, dt: f64, cargo: &mut Cargo, events: &mut Vec<GameEvent>) {
        if !self.processing {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.process_time {
            self.processing = false;
            self.elapsed = 0.0;
            events.push(GameEvent::ItemProduced {
                converter: self.id,
                item: self.output,
            });
            cargo.add(self.output, events);
        }
    }
}
