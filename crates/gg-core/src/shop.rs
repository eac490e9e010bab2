//! Village shop
//!
//! A fixed price list. Consumables go into the pack; a reinforcement raises the
//! pack capacity for good.

use std::fmt;

use crate::player::{Consumable, PlayerRecord};

/// What a purchase turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ware {
    Item(Consumable),
    PackReinforcement,
}

impl fmt::Display for Ware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => write!(f, "{item}"),
            Self::PackReinforcement => write!(f, "Pack Reinforcement"),
        }
    }
}

/// One line of the price list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub ware: Ware,
    pub price: u32,
    pub desc: &'static str,
}

impl ShopItem {
    const fn new(ware: Ware, price: u32, desc: &'static str) -> Self {
        Self { ware, price, desc }
    }
}

/// Everything the shop sells, in menu order
pub static SHOP_STOCK: &[ShopItem] = &[
    ShopItem::new(
        Ware::Item(Consumable::HealingPotion),
        30,
        "Restores 30 HP when used.",
    ),
    ShopItem::new(
        Ware::Item(Consumable::MinorElixir),
        60,
        "Restores 70 HP when used.",
    ),
    ShopItem::new(
        Ware::PackReinforcement,
        40,
        "+1 pack capacity (permanent).",
    ),
    ShopItem::new(
        Ware::Item(Consumable::RareSigil),
        200,
        "A mysterious item rumored to affect destiny.",
    ),
];

/// Purchase result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseResult {
    /// Paid for and packed
    Bought(Consumable),
    /// Paid for; capacity after the upgrade
    PackReinforced { capacity: u32 },
    /// Nothing changed hands
    CannotAfford { price: u32, gold: u32 },
    NoSuchItem,
}

/// Buy the `slot`-th item (0-based) of [`SHOP_STOCK`]
pub fn buy(player: &mut PlayerRecord, slot: usize) -> PurchaseResult {
    let Some(item) = SHOP_STOCK.get(slot) else {
        return PurchaseResult::NoSuchItem;
    };
    if player.gold < item.price {
        return PurchaseResult::CannotAfford {
            price: item.price,
            gold: player.gold,
        };
    }

    player.gold -= item.price;
    match item.ware {
        Ware::Item(consumable) => {
            player.inventory.push(consumable.to_string());
            PurchaseResult::Bought(consumable)
        }
        Ware::PackReinforcement => {
            player.pack_capacity = player.pack_capacity.saturating_add(1);
            PurchaseResult::PackReinforced {
                capacity: player.pack_capacity,
            }
        }
    }
}
