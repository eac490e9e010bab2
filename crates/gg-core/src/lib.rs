//! gg-core: Core game logic for the Goblin Graph dungeon
//!
//! A room graph that shifts under the player, stone-duel rituals, weight-limited
//! loot caches, guessing fights and a village shop. This crate has no terminal or file I/O besides
//! the options file helpers; every random choice goes through [`GameRng`].

pub mod combat;
pub mod dungeon;
pub mod loot;
pub mod options;
pub mod player;
pub mod ritual;
pub mod session;
pub mod shop;

mod consts;
mod rng;

pub use consts::*;
pub use options::{GameOptions, LootOptions, OptionsError, RitualOptions};
pub use player::PlayerRecord;
pub use rng::GameRng;
pub use session::{Decider, RoomOutcome, Session, SessionError, SessionEvent};
