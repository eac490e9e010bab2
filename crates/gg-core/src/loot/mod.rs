//! Loot caches
//!
//! A cache offers a handful of catalog items; whatever the player grabs has to fit
//! in the pack.

mod catalog;
mod resolve;

pub use catalog::{ITEM_POOL, LootItem, offer, total_value, total_weight};
pub use resolve::{LootResolution, parse_selection, resolve};
