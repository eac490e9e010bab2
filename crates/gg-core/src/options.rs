//! Game options and configuration
//!
//! Tunables for generation, rituals, loot and the starting player, loadable from an
//! rc-style file:
//!
//! ```text
//! # goblinrc
//! OPTIONS=rooms:14,extra_tunnels:5
//! OPTIONS=ritual_damage:8-18,!hints
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Ritual tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RitualOptions {
    pub pile_min: u32,
    pub pile_max: u32,
    /// Chance (percent) a rule A ritual starts on two even piles
    pub parity_fair_percent: u32,
    /// Chance (percent) a rule B ritual starts on a multiple of four
    pub mod_four_fair_percent: u32,
    pub backlash_min: u32,
    pub backlash_max: u32,
}

impl Default for RitualOptions {
    fn default() -> Self {
        Self {
            pile_min: PILE_MIN,
            pile_max: PILE_MAX,
            parity_fair_percent: PARITY_FAIR_PERCENT,
            mod_four_fair_percent: MOD_FOUR_FAIR_PERCENT,
            backlash_min: RITUAL_BACKLASH_MIN,
            backlash_max: RITUAL_BACKLASH_MAX,
        }
    }
}

/// Loot room tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootOptions {
    pub offer_size: usize,
    pub greed_damage_min: u32,
    pub greed_damage_max: u32,
}

impl Default for LootOptions {
    fn default() -> Self {
        Self {
            offer_size: LOOT_OFFER_SIZE,
            greed_damage_min: GREED_DAMAGE_MIN,
            greed_damage_max: GREED_DAMAGE_MAX,
        }
    }
}

/// User-configurable game options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    // Character options
    pub name: String,
    pub health: i32,
    pub gold: u32,
    pub pack_capacity: u32,
    pub sigils_required: u32,

    // Dungeon options
    pub rooms: usize,
    pub extra_tunnels: usize,

    // Encounter options
    pub ritual: RitualOptions,
    pub loot: LootOptions,

    // Display options
    pub hints: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            health: MAX_HEALTH,
            gold: START_GOLD,
            pack_capacity: START_PACK_CAPACITY,
            sigils_required: SIGILS_REQUIRED,
            rooms: DEFAULT_ROOMS,
            extra_tunnels: DEFAULT_EXTRA_TUNNELS,
            ritual: RitualOptions::default(),
            loot: LootOptions::default(),
            hints: true,
        }
    }
}

/// Options parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidValue { option: String, value: String },

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

impl GameOptions {
    /// Load options from a config file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "hints" => self.hints = value,
            "fair_rituals" => {
                let defaults = RitualOptions::default();
                self.ritual.parity_fair_percent = if value { defaults.parity_fair_percent } else { 0 };
                self.ritual.mod_four_fair_percent =
                    if value { defaults.mod_four_fair_percent } else { 0 };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "name" => self.name = value.to_string(),
            "health" | "hp" => self.health = parse_number(name, value)?,
            "gold" => self.gold = parse_number(name, value)?,
            "pack_capacity" | "capacity" => self.pack_capacity = parse_number(name, value)?,
            "sigils" | "sigils_required" => self.sigils_required = parse_number(name, value)?,
            "rooms" => {
                let rooms: usize = parse_number(name, value)?;
                if rooms < 2 {
                    return Err(invalid(name, value));
                }
                self.rooms = rooms;
            }
            "extra_tunnels" => self.extra_tunnels = parse_number(name, value)?,
            "piles" => {
                let (lo, hi) = parse_range(name, value)?;
                if lo == 0 || hi > PILE_LIMIT {
                    return Err(invalid(name, value));
                }
                (self.ritual.pile_min, self.ritual.pile_max) = (lo, hi);
            }
            "parity_fair" => self.ritual.parity_fair_percent = parse_percent(name, value)?,
            "mod_four_fair" => self.ritual.mod_four_fair_percent = parse_percent(name, value)?,
            "ritual_damage" => {
                (self.ritual.backlash_min, self.ritual.backlash_max) = parse_range(name, value)?;
            }
            "loot_offer" => self.loot.offer_size = parse_number(name, value)?,
            "greed_damage" => {
                (self.loot.greed_damage_min, self.loot.greed_damage_max) =
                    parse_range(name, value)?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| OptionsError::Io(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# Goblin Graph configuration file".to_string());
        lines.push(String::new());

        lines.push("# Character options".to_string());
        if !self.name.is_empty() {
            lines.push(format!("OPTIONS=name:{}", self.name));
        }
        lines.push(format!(
            "OPTIONS=health:{},gold:{},pack_capacity:{},sigils:{}",
            self.health, self.gold, self.pack_capacity, self.sigils_required
        ));

        lines.push(String::new());
        lines.push("# Dungeon options".to_string());
        lines.push(format!(
            "OPTIONS=rooms:{},extra_tunnels:{}",
            self.rooms, self.extra_tunnels
        ));

        lines.push(String::new());
        lines.push("# Encounter options".to_string());
        lines.push(format!(
            "OPTIONS=piles:{}-{},parity_fair:{},mod_four_fair:{},ritual_damage:{}-{}",
            self.ritual.pile_min,
            self.ritual.pile_max,
            self.ritual.parity_fair_percent,
            self.ritual.mod_four_fair_percent,
            self.ritual.backlash_min,
            self.ritual.backlash_max
        ));
        lines.push(format!(
            "OPTIONS=loot_offer:{},greed_damage:{}-{}",
            self.loot.offer_size, self.loot.greed_damage_min, self.loot.greed_damage_max
        ));

        lines.push(String::new());
        lines.push("# Display options".to_string());
        lines.push(format!(
            "OPTIONS={}",
            if self.hints { "hints" } else { "!hints" }
        ));

        lines.join("\n")
    }
}

fn invalid(option: &str, value: &str) -> OptionsError {
    OptionsError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, OptionsError> {
    value.parse().map_err(|_| invalid(option, value))
}

fn parse_percent(option: &str, value: &str) -> Result<u32, OptionsError> {
    let percent: u32 = parse_number(option, value.trim_end_matches('%'))?;
    if percent > 100 {
        return Err(invalid(option, value));
    }
    Ok(percent)
}

/// `lo-hi` with `lo <= hi`
fn parse_range(option: &str, value: &str) -> Result<(u32, u32), OptionsError> {
    let (lo, hi) = value.split_once('-').ok_or_else(|| invalid(option, value))?;
    let lo: u32 = parse_number(option, lo.trim())?;
    let hi: u32 = parse_number(option, hi.trim())?;
    if lo > hi {
        return Err(invalid(option, value));
    }
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = GameOptions::default();
        assert_eq!(opts.rooms, 14);
        assert_eq!(opts.extra_tunnels, 5);
        assert_eq!(opts.pack_capacity, 5);
        assert_eq!(opts.ritual.pile_min, 7);
        assert_eq!(opts.ritual.pile_max, 13);
        assert!(opts.hints);
    }

    #[test]
    fn test_parse_value_options() {
        let config = "# comment\nOPTIONS=name:Grub,rooms:20,extra_tunnels=2\nOPTIONS=ritual_damage:1-4";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.name, "Grub");
        assert_eq!(opts.rooms, 20);
        assert_eq!(opts.extra_tunnels, 2);
        assert_eq!(opts.ritual.backlash_min, 1);
        assert_eq!(opts.ritual.backlash_max, 4);
    }

    #[test]
    fn test_parse_bool_options() {
        let opts = GameOptions::parse_config("OPTIONS=!hints,!fair_rituals").unwrap();
        assert!(!opts.hints);
        assert_eq!(opts.ritual.parity_fair_percent, 0);
        assert_eq!(opts.ritual.mod_four_fair_percent, 0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            GameOptions::parse_config("OPTIONS=colour"),
            Err(OptionsError::UnknownOption("colour".to_string()))
        );
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=rooms:1"),
            Err(OptionsError::InvalidValue { .. })
        ));
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=piles:13-7"),
            Err(OptionsError::InvalidValue { .. })
        ));
        for piles in ["piles:0-0", "piles:0-5", "piles:7-100", "piles:1-4294967295"] {
            assert!(
                matches!(
                    GameOptions::parse_config(&format!("OPTIONS={piles}")),
                    Err(OptionsError::InvalidValue { .. })
                ),
                "{piles} accepted"
            );
        }
        let opts = GameOptions::parse_config("OPTIONS=piles:1-99").unwrap();
        assert_eq!((opts.ritual.pile_min, opts.ritual.pile_max), (1, 99));
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=parity_fair:150"),
            Err(OptionsError::InvalidValue { .. })
        ));
        assert_eq!(
            GameOptions::parse_config("OPTIONS=gold:"),
            Err(OptionsError::MissingValue("gold".to_string()))
        );
    }

    #[test]
    fn test_roundtrip() {
        let mut opts = GameOptions::default();
        opts.name = "Grub".to_string();
        opts.rooms = 9;
        opts.hints = false;
        opts.ritual.mod_four_fair_percent = 70;
        opts.loot.greed_damage_max = 12;

        let config_str = opts.to_config_string();
        let parsed = GameOptions::parse_config(&config_str).unwrap();

        assert_eq!(parsed, opts);
    }
}
