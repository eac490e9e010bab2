//! Dungeon shifts after a ritual
//!
//! A shift either opens a new tunnel or collapses an existing one. A collapse is
//! only committed when the exit is still reachable from the player's room.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::OPEN_TUNNEL_ATTEMPTS;
use crate::rng::GameRng;

use super::{Dungeon, Graph, RoomId};

/// Result of one shift, displayed as the narration line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftOutcome {
    /// A new tunnel now joins the two rooms
    Opened { a: RoomId, b: RoomId },
    /// No free room pair was found within the attempt budget
    OpenFailed,
    /// The tunnel between the two rooms is gone
    Collapsed { a: RoomId, b: RoomId },
    /// Every tunnel was load-bearing for the player's route out
    CollapseRefused,
}

impl ShiftOutcome {
    /// Whether the graph changed
    pub fn changed(self) -> bool {
        matches!(self, Self::Opened { .. } | Self::Collapsed { .. })
    }
}

impl fmt::Display for ShiftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened { a, b } => write!(f, "A hidden tunnel opens between {a} and {b}."),
            Self::OpenFailed => write!(f, "You hear stone shift, but nothing new is revealed."),
            Self::Collapsed { a, b } => {
                write!(f, "The ground collapses! A passage between {a} and {b} is gone.")
            }
            Self::CollapseRefused => write!(
                f,
                "The dungeon groans, as if it wanted to change... but hesitates."
            ),
        }
    }
}

/// Open or collapse a tunnel with equal odds
pub fn apply_shift(dungeon: &mut Dungeon, rng: &mut GameRng) -> ShiftOutcome {
    let outcome = if rng.coin() {
        open_tunnel(&mut dungeon.graph, rng)
    } else {
        collapse_tunnel(&mut dungeon.graph, dungeon.current, dungeon.exit, rng)
    };
    if outcome.changed() {
        info!(%outcome, "dungeon shifted");
    } else {
        debug!(%outcome, "dungeon held still");
    }
    outcome
}

/// Dig a tunnel between two random unconnected rooms
pub fn open_tunnel(graph: &mut Graph, rng: &mut GameRng) -> ShiftOutcome {
    for _ in 0..OPEN_TUNNEL_ATTEMPTS {
        let Some((a, b)) = rng.distinct_pair(graph.room_count()) else {
            break;
        };
        if graph.add_tunnel(a, b) {
            return ShiftOutcome::Opened { a, b };
        }
    }
    ShiftOutcome::OpenFailed
}

/// Collapse a random tunnel whose loss still leaves `exit` reachable from `current`
///
/// Candidates are tried in shuffled order against a copy of the graph; an unsafe
/// candidate is simply discarded.
pub fn collapse_tunnel(
    graph: &mut Graph,
    current: RoomId,
    exit: RoomId,
    rng: &mut GameRng,
) -> ShiftOutcome {
    let mut candidates = graph.tunnels();
    rng.shuffle(&mut candidates);

    for (a, b) in candidates {
        let trial = graph.without_tunnel(a, b);
        if trial.is_reachable(current, exit) {
            *graph = trial;
            return ShiftOutcome::Collapsed { a, b };
        }
    }
    ShiftOutcome::CollapseRefused
}
