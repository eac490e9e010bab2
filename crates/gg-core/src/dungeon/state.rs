//! The live dungeon: rooms, tunnels and where the player stands

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Graph, Room, RoomId, RoomKind};

/// Dungeon construction and navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DungeonError {
    #[error("a dungeon needs at least 2 rooms, got {requested}")]
    TooFewRooms { requested: usize },

    #[error("room {room} out of range (dungeon has {rooms} rooms)")]
    RoomOutOfRange { room: RoomId, rooms: usize },

    #[error("room {0} cannot tunnel to itself")]
    SelfLoop(RoomId),

    #[error("{rooms} rooms but the tunnel graph has {graph} nodes")]
    RoomCountMismatch { rooms: usize, graph: usize },

    #[error("no tunnel from room {from} to room {to}")]
    NotAdjacent { from: RoomId, to: RoomId },

    #[error("exit {slot} does not exist here")]
    NoSuchExit { slot: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub graph: Graph,
    pub rooms: Vec<Room>,
    pub start: RoomId,
    pub exit: RoomId,
    /// Player position
    pub current: RoomId,
}

impl Dungeon {
    /// Assemble a dungeon from parts, checking every index
    pub fn from_parts(
        graph: Graph,
        rooms: Vec<Room>,
        start: RoomId,
        exit: RoomId,
        current: RoomId,
    ) -> Result<Self, DungeonError> {
        let dungeon = Self {
            graph,
            rooms,
            start,
            exit,
            current,
        };
        dungeon.validate()?;
        Ok(dungeon)
    }

    /// Check that the room list, graph and the three indices agree
    pub fn validate(&self) -> Result<(), DungeonError> {
        let rooms = self.rooms.len();
        if self.graph.room_count() != rooms {
            return Err(DungeonError::RoomCountMismatch {
                rooms,
                graph: self.graph.room_count(),
            });
        }
        for room in [self.start, self.exit, self.current] {
            if room >= rooms {
                return Err(DungeonError::RoomOutOfRange { room, rooms });
            }
        }
        Ok(())
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    /// Rooms adjacent to the player, in menu order
    pub fn exits(&self) -> Vec<RoomId> {
        self.graph.neighbors(self.current).collect()
    }

    /// Walk through the `slot`-th exit (0-based) of the current room
    pub fn travel(&mut self, slot: usize) -> Result<RoomId, DungeonError> {
        let target = self
            .exits()
            .get(slot)
            .copied()
            .ok_or(DungeonError::NoSuchExit { slot })?;
        self.move_to(target)?;
        Ok(target)
    }

    /// Move to an adjacent room by id
    pub fn move_to(&mut self, room: RoomId) -> Result<(), DungeonError> {
        if !self.graph.contains(room) {
            return Err(DungeonError::RoomOutOfRange {
                room,
                rooms: self.rooms.len(),
            });
        }
        if !self.graph.has_tunnel(self.current, room) {
            return Err(DungeonError::NotAdjacent {
                from: self.current,
                to: room,
            });
        }
        self.current = room;
        Ok(())
    }

    /// The player can still walk to the exit gate
    pub fn exit_reachable(&self) -> bool {
        self.graph.is_reachable(self.current, self.exit)
    }

    pub fn count_kind(&self, kind: RoomKind) -> usize {
        self.rooms.iter().filter(|room| room.kind == kind).count()
    }

    /// Rooms whose one-shot event has already run
    pub fn cleared_count(&self) -> usize {
        self.rooms.iter().filter(|room| room.cleared).count()
    }
}
