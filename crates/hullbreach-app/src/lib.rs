//! hullbreach headless runner.
//!
//! Wires the simulation engine to a fixed-rate game loop thread and exposes
//! control handlers for starting it, sending commands and polling snapshots.

pub mod control;
pub mod game_loop;
pub mod state;

pub use hullbreach_core as core;
