//! Simulation constants and default tuning parameters.

/// Simulation tick rate (Hz) used by the game loop.
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Ship energy ---

/// Starting usable energy capacity.
pub const INITIAL_ENERGY_CAPACITY: u32 = 10;

/// Ceiling the capacity regenerates back to.
pub const MAXIMUM_ENERGY_CAPACITY: u32 = 10;

/// Seconds usage may exceed capacity before the overload event fires.
pub const TIME_TILL_OVERLOAD: f64 = 15.0;

/// Regen counter units needed to restore one point of capacity.
pub const ENERGY_REGEN_DURATION: f64 = 30.0;

/// Extra regen rate contributed by each active player.
pub const ENERGY_REGEN_PER_PLAYER_RATE: f64 = 1.0;

/// Cap on the total player contribution to regen rate.
pub const ENERGY_REGEN_MAX_PLAYER_RATE: f64 = 2.0;

// --- Ship systems ---

/// Draw of a Powered or Damaged system.
pub const SYSTEM_NORMAL_DRAW: u32 = 2;

/// Draw of an Overclocked system.
pub const SYSTEM_OVERCLOCK_DRAW: u32 = 4;

/// Seconds a system can stay overclocked before it is damaged.
pub const SYSTEM_OVERCLOCK_DURATION: f64 = 30.0;

// --- Shields ---

/// Base shield charge capacity.
pub const SHIELD_BASE_CHARGES: u32 = 3;

/// Extra charge capacity while the shield system is overclocked.
pub const SHIELD_OVERCLOCK_BONUS_CHARGES: u32 = 2;

/// Charges regained per second at normal power.
pub const SHIELD_RECHARGE_RATE: f64 = 0.5;

/// Charges regained per second while overclocked.
pub const SHIELD_OVERCLOCK_RECHARGE_RATE: f64 = 1.0;

// --- Life support ---

/// Seconds of breached life support before the crew is lost.
pub const LIFE_SUPPORT_DURATION: f64 = 20.0;

// --- Stations ---

/// Seconds a weapon station takes to arm after loading.
pub const WEAPON_LOAD_DURATION: f64 = 2.0;

/// Seconds a weapon station takes to reset after firing.
pub const WEAPON_RESET_DURATION: f64 = 1.5;

/// Seconds a converter takes to process one item.
pub const CONVERTER_PROCESS_TIME: f64 = 5.0;

// --- Enemy generation ---

/// Maximum shields of each type on a randomly generated enemy.
pub const RANDOM_ENEMY_MAX_SHIELDS: u32 = 3;

/// Fire-rate range (seconds) for randomly generated enemy weapons.
pub const RANDOM_FIRE_RATE_MIN: f64 = 5.0;
pub const RANDOM_FIRE_RATE_MAX: f64 = 15.0;
