//! On-disk dungeon layout
//!
//! ```json
//! {
//!   "rooms": { "0": { "name": "...", "desc": "...", "type": "start", "cleared": false } },
//!   "adj": [[1, 4], [0]],
//!   "start": 0, "exit": 7, "current": 0
//! }
//! ```
//!
//! Room indices are read as integers or numeric strings and normalised to
//! [`RoomId`] here, so the rest of the game never sees string keys.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use gg_core::dungeon::{Dungeon, DungeonError, Graph, Room, RoomId};

/// Why a stored dungeon could not be restored
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed dungeon record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("room keys are not exactly 0..{rooms}")]
    RoomKeys { rooms: usize },

    #[error("adjacency covers {lists} rooms but there are {rooms}")]
    AdjacencyShape { rooms: usize, lists: usize },

    #[error("the exit cannot be reached from the current room")]
    ExitUnreachable,

    #[error(transparent)]
    Dungeon(#[from] DungeonError),
}

struct IndexVisitor;

impl Visitor<'_> for IndexVisitor {
    type Value = RoomId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a room index as an integer or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RoomId, E> {
        RoomId::try_from(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RoomId, E> {
        RoomId::try_from(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RoomId, E> {
        v.trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid room key: {v}")))
    }
}

/// Room index used as a map key; written as a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoomKey(pub RoomId);

impl Serialize for RoomKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoomKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IndexVisitor).map(RoomKey)
    }
}

/// Room index used as a value; written as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoomIndex(pub RoomId);

impl Serialize for RoomIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0 as u64)
    }
}

impl<'de> Deserialize<'de> for RoomIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IndexVisitor).map(RoomIndex)
    }
}

/// Neighbour lists, stored positionally or keyed by room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Adjacency {
    List(Vec<Vec<RoomIndex>>),
    Map(BTreeMap<RoomKey, Vec<RoomIndex>>),
}

impl Adjacency {
    fn into_lists(self, rooms: usize) -> Result<Vec<Vec<RoomId>>, SnapshotError> {
        let lists: Vec<Vec<RoomIndex>> = match self {
            Self::List(lists) => lists,
            Self::Map(map) => {
                if !keys_are_dense(map.keys()) {
                    return Err(SnapshotError::RoomKeys { rooms });
                }
                map.into_values().collect()
            }
        };
        if lists.len() != rooms {
            return Err(SnapshotError::AdjacencyShape {
                rooms,
                lists: lists.len(),
            });
        }
        Ok(lists
            .into_iter()
            .map(|list| list.into_iter().map(|RoomIndex(id)| id).collect())
            .collect())
    }
}

fn keys_are_dense<'a>(keys: impl Iterator<Item = &'a RoomKey>) -> bool {
    keys.enumerate().all(|(i, key)| key.0 == i)
}

/// Serializable form of a [`Dungeon`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonSnapshot {
    pub rooms: BTreeMap<RoomKey, Room>,
    pub adj: Adjacency,
    pub start: RoomIndex,
    pub exit: RoomIndex,
    pub current: RoomIndex,
}

impl DungeonSnapshot {
    pub fn from_dungeon(dungeon: &Dungeon) -> Self {
        let rooms = dungeon
            .rooms
            .iter()
            .enumerate()
            .map(|(id, room)| (RoomKey(id), room.clone()))
            .collect();
        let adj = dungeon
            .graph
            .neighbor_lists()
            .into_iter()
            .map(|list| list.into_iter().map(RoomIndex).collect())
            .collect();
        Self {
            rooms,
            adj: Adjacency::List(adj),
            start: RoomIndex(dungeon.start),
            exit: RoomIndex(dungeon.exit),
            current: RoomIndex(dungeon.current),
        }
    }

    /// Parse a raw JSON dungeon record
    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Validate every index and rebuild the dungeon
    pub fn into_dungeon(self) -> Result<Dungeon, SnapshotError> {
        let count = self.rooms.len();
        if !keys_are_dense(self.rooms.keys()) {
            return Err(SnapshotError::RoomKeys { rooms: count });
        }
        let lists = self.adj.into_lists(count)?;
        let graph = Graph::from_neighbor_lists(&lists)?;
        let rooms: Vec<Room> = self.rooms.into_values().collect();

        let dungeon = Dungeon::from_parts(
            graph,
            rooms,
            self.start.0,
            self.exit.0,
            self.current.0,
        )?;
        if !dungeon.exit_reachable() {
            return Err(SnapshotError::ExitUnreachable);
        }
        Ok(dungeon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_core::GameRng;
    use gg_core::dungeon::{RoomKind, generate_dungeon};
    use serde_json::json;

    fn room(kind: &str) -> serde_json::Value {
        json!({ "name": "R", "desc": "d", "type": kind, "cleared": false })
    }

    #[test]
    fn test_roundtrip_keeps_identities() {
        let mut rng = GameRng::new(21);
        let mut dungeon = generate_dungeon(14, 5, &mut rng).unwrap();
        dungeon.rooms[3].cleared = true;
        dungeon.current = dungeon.exits()[0];

        let json = serde_json::to_value(DungeonSnapshot::from_dungeon(&dungeon)).unwrap();
        assert!(json["rooms"].get("13").is_some());
        assert!(json["adj"].is_array());
        assert!(json["start"].is_u64());

        let restored = DungeonSnapshot::from_value(json)
            .unwrap()
            .into_dungeon()
            .unwrap();
        assert_eq!(restored, dungeon);
    }

    #[test]
    fn test_key_forms() {
        assert_eq!(serde_json::from_str::<RoomKey>("3").unwrap(), RoomKey(3));
        assert_eq!(serde_json::from_str::<RoomKey>("\"3\"").unwrap(), RoomKey(3));
        assert!(serde_json::from_str::<RoomKey>("\"three\"").is_err());
        assert!(serde_json::from_str::<RoomIndex>("-1").is_err());
        assert_eq!(serde_json::to_string(&RoomKey(4)).unwrap(), "\"4\"");
        assert_eq!(serde_json::to_string(&RoomIndex(4)).unwrap(), "4");
    }

    #[test]
    fn test_string_indices_and_keyed_adjacency() {
        let value = json!({
            "rooms": { "0": room("start"), "1": room("loot"), "2": room("exit") },
            "adj": { "0": ["1"], "1": [0, 2], "2": [1] },
            "start": "0",
            "exit": 2,
            "current": "1"
        });
        let dungeon = DungeonSnapshot::from_value(value)
            .unwrap()
            .into_dungeon()
            .unwrap();
        assert_eq!(dungeon.current, 1);
        assert_eq!(dungeon.rooms[1].kind, RoomKind::Loot);
        assert!(dungeon.graph.has_tunnel(1, 2));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        for field in ["start", "exit", "current"] {
            let mut value = json!({
                "rooms": { "0": room("start"), "1": room("exit") },
                "adj": [[1], [0]],
                "start": 0, "exit": 1, "current": 0
            });
            value[field] = json!(9);
            let err = DungeonSnapshot::from_value(value)
                .unwrap()
                .into_dungeon()
                .unwrap_err();
            assert!(matches!(
                err,
                SnapshotError::Dungeon(DungeonError::RoomOutOfRange { room: 9, rooms: 2 })
            ));
        }
    }

    #[test]
    fn test_bad_shapes_rejected() {
        let gap = json!({
            "rooms": { "0": room("start"), "2": room("exit") },
            "adj": [[1], [0]],
            "start": 0, "exit": 1, "current": 0
        });
        assert!(matches!(
            DungeonSnapshot::from_value(gap).unwrap().into_dungeon(),
            Err(SnapshotError::RoomKeys { rooms: 2 })
        ));

        let short_adj = json!({
            "rooms": { "0": room("start"), "1": room("exit") },
            "adj": [[1]],
            "start": 0, "exit": 1, "current": 0
        });
        assert!(matches!(
            DungeonSnapshot::from_value(short_adj).unwrap().into_dungeon(),
            Err(SnapshotError::AdjacencyShape { rooms: 2, lists: 1 })
        ));

        let stray_neighbour = json!({
            "rooms": { "0": room("start"), "1": room("exit") },
            "adj": [[1, 5], [0]],
            "start": 0, "exit": 1, "current": 0
        });
        assert!(matches!(
            DungeonSnapshot::from_value(stray_neighbour).unwrap().into_dungeon(),
            Err(SnapshotError::Dungeon(DungeonError::RoomOutOfRange { .. }))
        ));

        let cut_off = json!({
            "rooms": { "0": room("start"), "1": room("exit") },
            "adj": [[], []],
            "start": 0, "exit": 1, "current": 0
        });
        assert!(matches!(
            DungeonSnapshot::from_value(cut_off).unwrap().into_dungeon(),
            Err(SnapshotError::ExitUnreachable)
        ));

        assert!(matches!(
            DungeonSnapshot::from_value(json!({ "rooms": 3 })),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
