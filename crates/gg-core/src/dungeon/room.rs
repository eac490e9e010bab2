//! Room kinds and room records

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// What happens when the player enters a room
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomKind {
    /// Entry archway
    Start,
    /// Gate that opens with enough sigils
    Exit,
    /// Loot cache (weight-limited pickup)
    Loot,
    /// Goblin ritual (stone duel)
    Ritual,
    /// Ambush (number battle)
    Fight,
    #[default]
    Empty,
}

impl RoomKind {
    /// Whether entering the room fires a one-shot event
    pub fn has_event(self) -> bool {
        matches!(self, Self::Loot | Self::Ritual | Self::Fight)
    }
}

/// A room in the dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    #[serde(default)]
    pub cleared: bool,
}

impl Room {
    /// Plain room named after its index
    pub fn empty(id: usize) -> Self {
        Self {
            name: format!("Room {id}"),
            desc: "Cold stone. A draft whispers through cracks.".to_string(),
            kind: RoomKind::Empty,
            cleared: false,
        }
    }

    pub fn start() -> Self {
        Self {
            name: "Cracked Archway".to_string(),
            desc: "You descend into the Goblin King's maze. The air tastes like old coins."
                .to_string(),
            kind: RoomKind::Start,
            cleared: false,
        }
    }

    pub fn exit() -> Self {
        Self {
            name: "Exit Gate".to_string(),
            desc: "A gate of bone and iron. Three sockets wait for Sigils.".to_string(),
            kind: RoomKind::Exit,
            cleared: false,
        }
    }

    /// Event room with its fixed flavour text; other kinds fall back to [`Room::empty`]
    pub fn event(id: usize, kind: RoomKind) -> Self {
        let (name, desc) = match kind {
            RoomKind::Loot => ("Loot Cache", "Broken crates and glittering scraps."),
            RoomKind::Ritual => ("Goblin Ritual", "Ash, bones, and a smug little laugh."),
            RoomKind::Fight => ("Ambush", "Something moves in the dark."),
            RoomKind::Start => return Self::start(),
            RoomKind::Exit => return Self::exit(),
            RoomKind::Empty => return Self::empty(id),
        };
        Self {
            name: name.to_string(),
            desc: desc.to_string(),
            kind,
            cleared: false,
        }
    }

    /// Whether entering now should run the room's event
    pub fn event_pending(&self) -> bool {
        self.kind != RoomKind::Exit && !self.cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_strings() {
        assert_eq!(RoomKind::Ritual.to_string(), "ritual");
        assert_eq!(RoomKind::from_str("fight").unwrap(), RoomKind::Fight);
        assert_eq!(
            serde_json::to_string(&RoomKind::Loot).unwrap(),
            "\"loot\""
        );
    }

    #[test]
    fn test_event_rooms() {
        assert_eq!(Room::event(3, RoomKind::Loot).name, "Loot Cache");
        assert_eq!(Room::event(3, RoomKind::Empty).name, "Room 3");
        assert!(RoomKind::Fight.has_event());
        assert!(!RoomKind::Exit.has_event());
    }

    #[test]
    fn test_exit_never_clears() {
        let mut gate = Room::exit();
        assert!(!gate.event_pending());
        gate.cleared = true;
        assert!(!gate.event_pending());

        let mut cache = Room::event(1, RoomKind::Loot);
        assert!(cache.event_pending());
        cache.cleared = true;
        assert!(!cache.event_pending());
    }

    #[test]
    fn test_room_json_uses_type_key() {
        let json = serde_json::to_value(Room::event(2, RoomKind::Ritual)).unwrap();
        assert_eq!(json["type"], "ritual");
        let parsed: Room = serde_json::from_str(
            r#"{"name":"Room 4","desc":"x","type":"empty"}"#,
        )
        .unwrap();
        assert!(!parsed.cleared);
    }
}
