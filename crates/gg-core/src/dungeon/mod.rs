//! Dungeon system
//!
//! Contains the room graph, generation, and the reachability-safe shift events.

mod generation;
mod graph;
mod room;
mod shift;
mod state;

pub use generation::{add_extra_tunnels, farthest_room, generate_dungeon, spanning_tree};
pub use graph::{Graph, RoomId, Tunnel};
pub use room::{Room, RoomKind};
pub use shift::{ShiftOutcome, apply_shift, collapse_tunnel, open_tunnel};
pub use state::{Dungeon, DungeonError};
