//! Core game constants
//!
//! Defaults for the tunables in [`crate::GameOptions`] plus the fixed rule limits.

/// Dungeon size
pub const DEFAULT_ROOMS: usize = 14;
pub const DEFAULT_EXTRA_TUNNELS: usize = 5;

/// The player always enters at room 0
pub const START_ROOM: usize = 0;

/// Attempt caps for random edge picking
pub const EXTRA_TUNNEL_ATTEMPTS: usize = 200;
pub const OPEN_TUNNEL_ATTEMPTS: usize = 20;

/// Room event quotas, filled in this order
pub const LOOT_ROOMS: usize = 4;
pub const RITUAL_ROOMS: usize = 4;
pub const FIGHT_ROOMS: usize = 3;

/// Player defaults
pub const MAX_HEALTH: i32 = 100;
pub const START_GOLD: u32 = 50;
pub const START_PACK_CAPACITY: u32 = 5;
pub const SIGILS_REQUIRED: u32 = 3;

/// Ritual pile range for the initial draw
pub const PILE_MIN: u32 = 7;
pub const PILE_MAX: u32 = 13;

/// Largest pile an options file may ask for
pub const PILE_LIMIT: u32 = 99;

/// Chance (percent) that a ritual starts in the defender's favour
pub const PARITY_FAIR_PERCENT: u32 = 60;
pub const MOD_FOUR_FAIR_PERCENT: u32 = 50;

/// Most stones a rule B turn may take
pub const MOD_FOUR_MAX_TAKE: u32 = 3;

/// Damage ranges
pub const RITUAL_BACKLASH_MIN: u32 = 8;
pub const RITUAL_BACKLASH_MAX: u32 = 18;
pub const GREED_DAMAGE_MIN: u32 = 3;
pub const GREED_DAMAGE_MAX: u32 = 10;

/// Items offered in one loot room
pub const LOOT_OFFER_SIZE: usize = 6;
