//! The adventurer

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::consts::MAX_HEALTH;
use crate::options::GameOptions;

/// Pack items that do something when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Consumable {
    #[strum(serialize = "Healing Potion")]
    HealingPotion,
    #[strum(serialize = "Minor Elixir")]
    MinorElixir,
    #[strum(serialize = "Rare Sigil")]
    RareSigil,
}

impl Consumable {
    /// Health restored, before the max health cap
    pub fn heal_amount(self) -> i32 {
        match self {
            Self::HealingPotion => 30,
            Self::MinorElixir => 70,
            Self::RareSigil => 0,
        }
    }
}

/// What using a pack item did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Healed(i32),
    /// The sigil hums and goes back in the pack
    Hums,
    Nothing,
}

/// Persistent player state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub health: i32,
    pub gold: u32,
    #[serde(default)]
    pub inventory: Vec<String>,
    pub pack_capacity: u32,
    #[serde(default)]
    pub sigils: u32,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self::new("Nameless")
    }
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_options(name, &GameOptions::default())
    }

    /// Fresh adventurer using the configured starting stats
    pub fn from_options(name: impl Into<String>, options: &GameOptions) -> Self {
        Self {
            name: name.into(),
            health: options.health,
            gold: options.gold,
            inventory: Vec::new(),
            pack_capacity: options.pack_capacity,
            sigils: 0,
        }
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.health = self
            .health
            .saturating_sub(i32::try_from(damage).unwrap_or(i32::MAX));
    }

    /// Heal up to max health, returning the amount restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(MAX_HEALTH.saturating_sub(self.health)).max(0);
        self.health = self.health.saturating_add(healed);
        healed
    }

    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn award_sigil(&mut self) {
        self.sigils = self.sigils.saturating_add(1);
    }

    /// Enough sigils to open the exit gate
    pub fn has_escaped(&self, required: u32) -> bool {
        self.sigils >= required
    }

    /// Use the item at `index`; `None` if there is no such item
    pub fn use_item(&mut self, index: usize) -> Option<(String, ItemEffect)> {
        if index >= self.inventory.len() {
            return None;
        }
        let item = self.inventory.remove(index);
        let effect = match item.parse::<Consumable>() {
            Ok(Consumable::RareSigil) => {
                self.inventory.push(item.clone());
                ItemEffect::Hums
            }
            Ok(potion) => ItemEffect::Healed(self.heal(potion.heal_amount())),
            Err(_) => ItemEffect::Nothing,
        };
        Some((item, effect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let player = PlayerRecord::new("Grub");
        assert_eq!(player.health, 100);
        assert_eq!(player.gold, 50);
        assert_eq!(player.pack_capacity, 5);
        assert_eq!(player.sigils, 0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_damage_and_death() {
        let mut player = PlayerRecord::new("Grub");
        player.take_damage(60);
        assert_eq!(player.health, 40);
        assert!(!player.is_dead());
        player.take_damage(40);
        assert!(player.is_dead());
    }

    #[test]
    fn test_sigils() {
        let mut player = PlayerRecord::new("Grub");
        for _ in 0..2 {
            player.award_sigil();
        }
        assert!(!player.has_escaped(3));
        player.award_sigil();
        assert!(player.has_escaped(3));
    }

    #[test]
    fn test_extreme_loaded_values() {
        let mut player = PlayerRecord::new("Grub");
        player.sigils = u32::MAX;
        player.health = i32::MIN;
        player.award_sigil();
        assert_eq!(player.sigils, u32::MAX);
        assert_eq!(player.heal(30), 30);
        player.take_damage(u32::MAX);
        assert!(player.is_dead());
    }

    #[test]
    fn test_potions_cap_at_max() {
        let mut player = PlayerRecord::new("Grub");
        player.health = 85;
        player.inventory = vec!["Healing Potion".into(), "Minor Elixir".into()];

        assert_eq!(
            player.use_item(0),
            Some(("Healing Potion".to_string(), ItemEffect::Healed(15)))
        );
        assert_eq!(player.health, 100);

        player.health = 20;
        assert_eq!(
            player.use_item(0),
            Some(("Minor Elixir".to_string(), ItemEffect::Healed(70)))
        );
        assert_eq!(player.health, 90);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_sigil_and_junk_items() {
        let mut player = PlayerRecord::new("Grub");
        player.inventory = vec!["Rare Sigil".into(), "Bone Charm".into()];

        assert_eq!(player.use_item(0).map(|(_, e)| e), Some(ItemEffect::Hums));
        assert_eq!(player.inventory, vec!["Bone Charm", "Rare Sigil"]);

        assert_eq!(player.use_item(0).map(|(_, e)| e), Some(ItemEffect::Nothing));
        assert_eq!(player.inventory, vec!["Rare Sigil"]);
        assert_eq!(player.use_item(5), None);
    }

    #[test]
    fn test_serde_field_names() {
        let player = PlayerRecord::new("Grub");
        let json = serde_json::to_value(&player).unwrap();
        for key in ["name", "health", "gold", "inventory", "pack_capacity", "sigils"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
