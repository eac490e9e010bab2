//! Loot item definitions

use serde::Serialize;

use crate::rng::GameRng;

/// Something that can be stuffed into a pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LootItem {
    pub name: &'static str,
    /// Pack weight, always at least 1
    pub weight: u32,
    /// Gold value
    pub value: u32,
}

impl LootItem {
    pub const fn new(name: &'static str, weight: u32, value: u32) -> Self {
        Self {
            name,
            weight,
            value,
        }
    }
}

/// Every item a loot cache can hold
pub static ITEM_POOL: &[LootItem] = &[
    LootItem::new("Rusty Coins", 1, 5),
    LootItem::new("Silver Ring", 1, 12),
    LootItem::new("Small Gem", 1, 18),
    LootItem::new("Gold Idol", 4, 60),
    LootItem::new("Ancient Tome", 2, 25),
    LootItem::new("Iron Dagger", 2, 20),
    LootItem::new("Jeweled Crown", 3, 45),
    LootItem::new("Bone Charm", 1, 10),
    LootItem::new("Knight Helm", 3, 35),
    LootItem::new("Cursed Mirror", 2, 30),
];

/// `count` distinct catalog items for one loot room
pub fn offer(count: usize, rng: &mut GameRng) -> Vec<LootItem> {
    rng.sample(ITEM_POOL, count)
}

pub fn total_weight(items: &[LootItem]) -> u32 {
    items.iter().map(|item| item.weight).sum()
}

pub fn total_value(items: &[LootItem]) -> u32 {
    items.iter().map(|item| item.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        assert_eq!(ITEM_POOL.len(), 10);
        assert!(ITEM_POOL.iter().all(|item| item.weight >= 1));
        assert_eq!(total_weight(ITEM_POOL), 20);
        assert_eq!(total_value(ITEM_POOL), 260);
    }

    #[test]
    fn test_offer_is_distinct() {
        let mut rng = GameRng::new(11);
        for _ in 0..50 {
            let items = offer(6, &mut rng);
            assert_eq!(items.len(), 6);
            for (i, a) in items.iter().enumerate() {
                assert!(ITEM_POOL.contains(a));
                assert!(items[i + 1..].iter().all(|b| b.name != a.name));
            }
        }
    }

    #[test]
    fn test_offer_caps_at_pool_size() {
        let mut rng = GameRng::new(12);
        assert_eq!(offer(25, &mut rng).len(), ITEM_POOL.len());
        assert!(offer(0, &mut rng).is_empty());
    }
}
