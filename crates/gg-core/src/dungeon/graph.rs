//! Room adjacency graph
//!
//! Undirected and simple: no self-loops, no parallel tunnels. Neighbour sets are
//! ordered so iteration (and therefore every seeded run) is deterministic.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::DungeonError;

/// Room identifier, an index into the dungeon's room list
pub type RoomId = usize;

/// Tunnel between two rooms, stored with the lower id first
pub type Tunnel = (RoomId, RoomId);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<BTreeSet<RoomId>>,
}

impl Graph {
    /// Graph with `rooms` nodes and no tunnels
    pub fn with_rooms(rooms: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); rooms],
        }
    }

    /// Build from per-room neighbour lists, mirroring every tunnel
    ///
    /// Rejects neighbours outside the room range and self-loops. A tunnel listed
    /// on only one side is still accepted.
    pub fn from_neighbor_lists(lists: &[Vec<RoomId>]) -> Result<Self, DungeonError> {
        let rooms = lists.len();
        let mut graph = Self::with_rooms(rooms);
        for (room, neighbors) in lists.iter().enumerate() {
            for &neighbor in neighbors {
                if neighbor >= rooms {
                    return Err(DungeonError::RoomOutOfRange {
                        room: neighbor,
                        rooms,
                    });
                }
                if neighbor == room {
                    return Err(DungeonError::SelfLoop(room));
                }
                graph.add_tunnel(room, neighbor);
            }
        }
        Ok(graph)
    }

    pub fn room_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains(&self, room: RoomId) -> bool {
        room < self.adjacency.len()
    }

    /// Neighbours of a room in ascending order (empty for unknown rooms)
    pub fn neighbors(&self, room: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.adjacency.get(room).into_iter().flatten().copied()
    }

    pub fn has_tunnel(&self, a: RoomId, b: RoomId) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(&b))
    }

    /// Add a tunnel. Returns false for self-loops, unknown rooms or an existing tunnel.
    pub fn add_tunnel(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        let inserted = self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
        inserted
    }

    /// Remove a tunnel. Returns false if it did not exist.
    pub fn remove_tunnel(&mut self, a: RoomId, b: RoomId) -> bool {
        if !self.has_tunnel(a, b) {
            return false;
        }
        self.adjacency[a].remove(&b);
        self.adjacency[b].remove(&a);
        true
    }

    /// Copy of this graph without the given tunnel
    pub fn without_tunnel(&self, a: RoomId, b: RoomId) -> Self {
        let mut trial = self.clone();
        trial.remove_tunnel(a, b);
        trial
    }

    /// Every tunnel once, lower id first, in ascending order
    pub fn tunnels(&self) -> Vec<Tunnel> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, set)| set.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
            .collect()
    }

    pub fn tunnel_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Breadth-first hop counts from `start`; `None` marks unreachable rooms
    pub fn distances_from(&self, start: RoomId) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.adjacency.len()];
        if !self.contains(start) {
            return dist;
        }
        dist[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(room) = queue.pop_front() {
            let next = dist[room].map_or(0, |d| d + 1);
            for neighbor in self.neighbors(room) {
                if dist[neighbor].is_none() {
                    dist[neighbor] = Some(next);
                    queue.push_back(neighbor);
                }
            }
        }
        dist
    }

    /// Whether a path of tunnels leads from `from` to `to`
    pub fn is_reachable(&self, from: RoomId, to: RoomId) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if from == to {
            return true;
        }
        let mut visited = vec![false; self.adjacency.len()];
        visited[from] = true;
        let mut queue = VecDeque::from([from]);
        while let Some(room) = queue.pop_front() {
            for neighbor in self.neighbors(room) {
                if neighbor == to {
                    return true;
                }
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        false
    }

    /// Every room reachable from room 0 (vacuously true when empty)
    pub fn is_connected(&self) -> bool {
        self.adjacency.is_empty() || self.distances_from(0).iter().all(Option::is_some)
    }

    /// Per-room neighbour lists, the inverse of [`Graph::from_neighbor_lists`]
    pub fn neighbor_lists(&self) -> Vec<Vec<RoomId>> {
        self.adjacency
            .iter()
            .map(|set| set.iter().copied().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Graph {
        let mut graph = Graph::with_rooms(n);
        for i in 1..n {
            graph.add_tunnel(i - 1, i);
        }
        graph
    }

    #[test]
    fn test_add_rejects_loops_and_duplicates() {
        let mut graph = Graph::with_rooms(3);
        assert!(graph.add_tunnel(0, 1));
        assert!(!graph.add_tunnel(1, 0));
        assert!(!graph.add_tunnel(2, 2));
        assert!(!graph.add_tunnel(0, 9));
        assert_eq!(graph.tunnel_count(), 1);
        assert!(graph.has_tunnel(1, 0));
    }

    #[test]
    fn test_remove_tunnel() {
        let mut graph = path(3);
        assert!(graph.remove_tunnel(2, 1));
        assert!(!graph.remove_tunnel(1, 2));
        assert_eq!(graph.tunnels(), vec![(0, 1)]);
    }

    #[test]
    fn test_without_tunnel_is_a_copy() {
        let graph = path(3);
        let trial = graph.without_tunnel(0, 1);
        assert!(graph.has_tunnel(0, 1));
        assert!(!trial.has_tunnel(0, 1));
    }

    #[test]
    fn test_distances() {
        let graph = path(4);
        assert_eq!(
            graph.distances_from(0),
            vec![Some(0), Some(1), Some(2), Some(3)]
        );

        let mut split = Graph::with_rooms(3);
        split.add_tunnel(0, 1);
        assert_eq!(split.distances_from(0)[2], None);
        assert!(!split.is_connected());
    }

    #[test]
    fn test_reachability() {
        let mut graph = path(4);
        assert!(graph.is_reachable(0, 3));
        assert!(graph.is_reachable(2, 2));
        graph.remove_tunnel(1, 2);
        assert!(!graph.is_reachable(0, 3));
        assert!(graph.is_reachable(3, 2));
        assert!(!graph.is_reachable(0, 17));
    }

    #[test]
    fn test_from_neighbor_lists() {
        let graph = Graph::from_neighbor_lists(&[vec![1], vec![], vec![1]]).unwrap();
        assert!(graph.has_tunnel(1, 0));
        assert!(graph.has_tunnel(1, 2));
        assert_eq!(graph.neighbor_lists(), vec![vec![1], vec![0, 2], vec![1]]);

        assert!(matches!(
            Graph::from_neighbor_lists(&[vec![3], vec![]]),
            Err(DungeonError::RoomOutOfRange { room: 3, rooms: 2 })
        ));
        assert!(matches!(
            Graph::from_neighbor_lists(&[vec![0]]),
            Err(DungeonError::SelfLoop(0))
        ));
    }
}
