//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the ship, the hecs world of live enemies, the
//! encounter schedule and the game state machine. It processes queued player
//! commands at the tick boundary, runs all systems while the game is Active,
//! and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use hullbreach_core::commands::PlayerCommand;
use hullbreach_core::config::{GameConfig, SpawnEntry};
use hullbreach_enemy_ai::profiles::random_template;
use hullbreach_core::constants::DT;
use hullbreach_core::enums::GameState;
use hullbreach_core::events::GameEvent;
use hullbreach_core::state::GameStateSnapshot;
use hullbreach_core::types::SimTime;

use crate::game_state::GameStateMachine;
use crate::ship::Ship;
use crate::systems;
use crate::systems::wave_spawner::EncounterSchedule;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    world: World,
    ship: Ship,
    schedule: EncounterSchedule,
    game_state: GameStateMachine,
    time: SimTime,
    rng: ChaCha8Rng,
    next_enemy_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    /// Outbound notifications in emission order, drained into each snapshot.
    events: Vec<GameEvent>,
    exit_requested: bool,
}

impl SimulationEngine {
    /// Create a new engine in `Initializing`. The game starts on `StartGame`.
    ///
    /// A config that fails validation is logged and replaced by the defaults.
    pub fn new(config: GameConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                error!("{err}, running with the default config");
                GameConfig::default()
            }
        };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ship = build_ship(&config);
        let schedule = build_schedule(&config, &mut rng);
        Self {
            rng,
            config,
            world: World::new(),
            ship,
            schedule,
            game_state: GameStateMachine::default(),
            time: SimTime::default(),
            next_enemy_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            exit_requested: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(DT)
    }

    /// Advance by `dt` seconds and return the resulting snapshot.
    pub fn advance(&mut self, dt: f64) -> GameStateSnapshot {
        self.step(dt);
        self.snapshot()
    }

    /// Apply queued commands, then run the systems if Active. Events stay
    /// queued until the next snapshot or `drain_events`.
    pub fn step(&mut self, dt: f64) {
        self.process_commands();

        if self.game_state.is_active() {
            self.run_systems(dt);
            self.time.advance(dt);
        }
    }

    /// Build a snapshot of the current state, draining pending events into it.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.ship,
            &self.schedule,
            &self.time,
            self.game_state.state(),
            events,
        )
    }

    /// Take every event emitted since the last snapshot.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn game_state(&self) -> GameState {
        self.game_state.state()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn schedule(&self) -> &EncounterSchedule {
        &self.schedule
    }

    /// Exiting finished its fade; the host should shut down.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Mutable ship access for tests that set up a scenario directly.
    #[cfg(test)]
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    /// Knock one shield off an enemy (for tests).
    #[cfg(test)]
    pub fn damage_enemy(
        &mut self,
        enemy: hullbreach_core::types::EnemyId,
        ammo: hullbreach_core::enums::AmmoType,
    ) -> bool {
        match world_setup::find_live_enemy(&self.world, enemy) {
            Some(entity) => {
                world_setup::damage_enemy(&mut self.world, entity, ammo, &mut self.events)
            }
            None => false,
        }
    }

    /// Rebuild ship, enemies and schedule from config.
    fn reset_world(&mut self) {
        self.world.clear();
        self.ship = build_ship(&self.config);
        self.schedule = build_schedule(&self.config, &mut self.rng);
        self.next_enemy_id = 0;
        self.time = SimTime::default();
        info!(
            "new game: {} hull segments, {} spawn entries",
            self.ship.hull().len(),
            self.schedule.total()
        );
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if command.is_ship_command() && !self.game_state.is_active() {
                debug!(
                    "dropping {:?} while {:?}",
                    command,
                    self.game_state.state()
                );
                continue;
            }
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let events = &mut self.events;
        match command {
            PlayerCommand::StartGame => {
                if self.game_state.state() == GameState::Initializing {
                    self.reset_world();
                    self.game_state
                        .transition(GameState::Starting, &mut self.events);
                } else {
                    warn!("StartGame ignored while {:?}", self.game_state.state());
                }
            }
            PlayerCommand::TogglePause => {
                self.game_state.toggle_pause(events);
            }
            PlayerCommand::Exit => {
                if !self.game_state.state().is_transition() {
                    self.game_state.transition(GameState::Exiting, events);
                }
            }
            PlayerCommand::Restart => {
                if !self.game_state.state().is_transition() {
                    self.game_state.transition(GameState::Restarting, events);
                }
            }
            PlayerCommand::FadeCompleted => match self.game_state.state() {
                GameState::Restarting => {
                    self.reset_world();
                    self.game_state
                        .transition(GameState::Starting, &mut self.events);
                }
                GameState::Exiting => {
                    info!("exit fade complete");
                    self.exit_requested = true;
                }
                other => debug!("FadeCompleted ignored while {:?}", other),
            },

            PlayerCommand::TogglePower { system } => {
                self.ship.toggle_power(system, events);
            }
            PlayerCommand::Overclock { system } => {
                self.ship.overclock(system, events);
            }
            PlayerCommand::Repair { system } => {
                self.ship.repair_system(system, events);
            }
            PlayerCommand::GenerateEnergy => self.ship.generate_energy(),

            PlayerCommand::ScrapHull { segment } => {
                self.ship.scrap_hull(segment, events);
            }
            PlayerCommand::RepairHull { segment, item } => {
                self.ship.repair_hull(segment, item, events);
            }

            PlayerCommand::LoadWeapon { station } => {
                self.ship.load_weapon(station, events);
            }
            PlayerCommand::UnloadWeapon { station } => {
                self.ship.unload_weapon(station, events);
            }
            PlayerCommand::FireWeapon { station, target } => {
                let Some(entity) = world_setup::find_live_enemy(&self.world, target) else {
                    warn!("no live enemy {} to fire at", target.0);
                    return;
                };
                if let Some(ammo) = self.ship.fire_weapon(station, target, events) {
                    world_setup::damage_enemy(&mut self.world, entity, ammo, events);
                }
            }
            PlayerCommand::StartConversion { converter } => {
                self.ship.start_conversion(converter, events);
            }

            PlayerCommand::DebugDamage { ammo } => {
                self.ship.resolve_damage(ammo, &mut self.rng, events);
            }
            PlayerCommand::DebugSimulateBreach { enabled } => {
                self.ship.set_simulate_breach(enabled);
            }
            PlayerCommand::DebugSuspendLifeSupport { enabled } => {
                self.ship.set_life_support_suspended(enabled, events);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Ship: systems, energy, shields, life support, stations
        let outcome = self.ship.tick(dt, &mut self.rng, &mut self.events);
        // 2. Encounter scheduling
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.schedule,
            &mut self.next_enemy_id,
            dt,
            &mut self.events,
        );
        // 3. Enemy weapon timers
        let impacts =
            systems::enemy_weapons::run(&mut self.world, dt, &mut self.rng, &mut self.events);
        // 4. Incoming fire
        for (enemy, ammo) in impacts {
            debug!("enemy {} {:?} shot lands", enemy.0, ammo);
            self.ship.resolve_damage(ammo, &mut self.rng, &mut self.events);
        }
        // 5. Cleanup (destroyed enemies)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);

        // 6. Outcomes
        if outcome.life_support_depleted {
            info!("crew lost: game over");
            self.game_state
                .finish(GameState::GameOver, &mut self.events);
        }
        if self.game_state.is_active()
            && systems::wave_spawner::check_victory(&self.world, &mut self.schedule)
        {
            info!("encounter cleared");
            self.events.push(GameEvent::Victory);
            self.game_state.finish(GameState::Victory, &mut self.events);
        }
    }
}

/// Scripted spawns followed by `random_spawns` generated enemies.
fn build_schedule(config: &GameConfig, rng: &mut ChaCha8Rng) -> EncounterSchedule {
    let encounter = &config.encounter;
    let mut spawns = encounter.spawns.clone();
    spawns.extend((0..encounter.random_spawns).map(|_| SpawnEntry {
        spawn_delay: encounter.random_spawn_delay,
        wait_for_clear: false,
        enemy: random_template(rng),
    }));
    EncounterSchedule::new(spawns)
}

fn build_ship(config: &GameConfig) -> Ship {
    Ship::new(
        &config.ship,
        &config.combat,
        &config.encounter.initial_items,
    )
}
