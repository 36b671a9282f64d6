//! Simulation engine for hullbreach.
//!
//! Owns the player ship aggregate and the hecs world of enemies, runs
//! systems at a fixed tick rate, and produces GameStateSnapshots for the
//! presentation layer.

pub mod engine;
pub mod game_state;
pub mod ship;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use hullbreach_core as core;
