//! Pack capacity resolution
//!
//! When the picked items weigh more than the pack holds, items are shed at random
//! (not by value) until the rest fits.

use serde::Serialize;
use tracing::debug;

use crate::rng::GameRng;

use super::catalog::{LootItem, total_value, total_weight};

/// What the player kept and what fell out while running
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LootResolution {
    pub accepted: Vec<LootItem>,
    /// In the order they were dropped
    pub dropped: Vec<LootItem>,
}

impl LootResolution {
    pub fn accepted_value(&self) -> u32 {
        total_value(&self.accepted)
    }

    pub fn accepted_weight(&self) -> u32 {
        total_weight(&self.accepted)
    }

    /// Whether anything had to be dropped
    pub fn overflowed(&self) -> bool {
        !self.dropped.is_empty()
    }
}

/// Fit `candidates` into a pack of `capacity` weight
pub fn resolve(capacity: u32, candidates: Vec<LootItem>, rng: &mut GameRng) -> LootResolution {
    let mut accepted = candidates;
    let mut dropped = Vec::new();
    let mut weight = total_weight(&accepted);

    while weight > capacity && !accepted.is_empty() {
        let item = accepted.remove(rng.index(accepted.len()));
        weight -= item.weight;
        dropped.push(item);
    }

    if !dropped.is_empty() {
        debug!(capacity, dropped = dropped.len(), "pack overflowed");
    }
    LootResolution { accepted, dropped }
}

/// Parse "1 3 5" or "1,3" into unique 1-based picks in the order given
///
/// Tokens that are not numbers in `1..=max` are ignored.
pub fn parse_selection(input: &str, max: usize) -> Vec<usize> {
    let mut picks = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if let Ok(index) = token.parse::<usize>()
            && (1..=max).contains(&index)
            && !picks.contains(&index)
        {
            picks.push(index);
        }
    }
    picks
}
