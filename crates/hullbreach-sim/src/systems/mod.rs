//! ECS systems that operate on the enemy world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! Per-enemy state lives in components; the encounter schedule is passed in.

pub mod cleanup;
pub mod enemy_weapons;
pub mod snapshot;
pub mod wave_spawner;
