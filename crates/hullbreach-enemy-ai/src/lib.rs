//! Enemy AI for hullbreach.
//!
//! Implements the enemy weapon-timer state machine and random
//! enemy generation.

pub mod fsm;
pub mod profiles;

pub use hullbreach_core as core;

#[cfg(test)]
mod tests;
