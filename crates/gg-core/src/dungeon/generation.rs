//! Dungeon generation
//!
//! Random spanning tree for connectivity, a few extra tunnels for loops, the exit on
//! the room farthest from the start, then fixed event quotas over the rest.

use tracing::debug;

use crate::consts::{EXTRA_TUNNEL_ATTEMPTS, FIGHT_ROOMS, LOOT_ROOMS, RITUAL_ROOMS, START_ROOM};
use crate::rng::GameRng;

use super::{Dungeon, DungeonError, Graph, Room, RoomId, RoomKind};

/// Generate a fresh dungeon with the player standing on the start room
pub fn generate_dungeon(
    room_count: usize,
    extra_tunnels: usize,
    rng: &mut GameRng,
) -> Result<Dungeon, DungeonError> {
    if room_count < 2 {
        return Err(DungeonError::TooFewRooms {
            requested: room_count,
        });
    }

    let mut graph = spanning_tree(room_count, rng);
    let added = add_extra_tunnels(&mut graph, extra_tunnels, rng);

    let start = START_ROOM;
    let exit = farthest_room(&graph, start);
    let rooms = furnish_rooms(room_count, start, exit, rng);

    let dungeon = Dungeon::from_parts(graph, rooms, start, exit, start)?;
    debug_assert!(dungeon.graph.is_connected());
    debug!(
        rooms = room_count,
        tunnels = dungeon.graph.tunnel_count(),
        extra = added,
        exit,
        events = dungeon.rooms.iter().filter(|room| room.kind.has_event()).count(),
        rituals = dungeon.count_kind(RoomKind::Ritual),
        "generated dungeon"
    );
    Ok(dungeon)
}

/// Random spanning tree: each newly visited room hangs off an earlier one
pub fn spanning_tree(room_count: usize, rng: &mut GameRng) -> Graph {
    let mut order: Vec<RoomId> = (0..room_count).collect();
    rng.shuffle(&mut order);

    let mut graph = Graph::with_rooms(room_count);
    for i in 1..order.len() {
        let parent = order[rng.index(i)];
        graph.add_tunnel(order[i], parent);
    }
    graph
}

/// Add up to `count` random tunnels; returns how many were actually dug
///
/// Self-loops and existing tunnels are rejected and retried until the attempt
/// budget runs out, so a dense graph may get fewer than requested.
pub fn add_extra_tunnels(graph: &mut Graph, count: usize, rng: &mut GameRng) -> usize {
    let rooms = graph.room_count();
    let mut added = 0;
    let mut attempts = 0;
    while added < count && attempts < EXTRA_TUNNEL_ATTEMPTS {
        attempts += 1;
        let a = rng.index(rooms);
        let b = rng.index(rooms);
        if graph.add_tunnel(a, b) {
            added += 1;
        }
    }
    added
}

/// Room with the greatest hop distance from `start`
///
/// Ties go to the lowest room id. Unreachable rooms are ignored.
pub fn farthest_room(graph: &Graph, start: RoomId) -> RoomId {
    let mut best = start;
    let mut best_dist = 0;
    for (room, dist) in graph.distances_from(start).into_iter().enumerate() {
        if let Some(dist) = dist
            && dist > best_dist
        {
            best = room;
            best_dist = dist;
        }
    }
    best
}

/// Name every room and hand out the event quotas
fn furnish_rooms(room_count: usize, start: RoomId, exit: RoomId, rng: &mut GameRng) -> Vec<Room> {
    let mut rooms: Vec<Room> = (0..room_count).map(Room::empty).collect();
    rooms[start] = Room::start();
    rooms[exit] = Room::exit();

    let mut candidates: Vec<RoomId> = (0..room_count)
        .filter(|&id| id != start && id != exit)
        .collect();
    rng.shuffle(&mut candidates);

    let quotas = [
        (RoomKind::Loot, LOOT_ROOMS),
        (RoomKind::Ritual, RITUAL_ROOMS),
        (RoomKind::Fight, FIGHT_ROOMS),
    ];
    let mut slots = candidates.into_iter();
    for (kind, quota) in quotas {
        for id in slots.by_ref().take(quota) {
            rooms[id] = Room::event(id, kind);
        }
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_tiny_dungeons() {
        let mut rng = GameRng::new(1);
        assert_eq!(
            generate_dungeon(1, 5, &mut rng),
            Err(DungeonError::TooFewRooms { requested: 1 })
        );
    }

    #[test]
    fn test_default_quotas() {
        let mut rng = GameRng::new(42);
        let dungeon = generate_dungeon(14, 5, &mut rng).unwrap();

        assert_eq!(dungeon.count_kind(RoomKind::Start), 1);
        assert_eq!(dungeon.count_kind(RoomKind::Exit), 1);
        assert_eq!(dungeon.count_kind(RoomKind::Loot), 4);
        assert_eq!(dungeon.count_kind(RoomKind::Ritual), 4);
        assert_eq!(dungeon.count_kind(RoomKind::Fight), 3);
        assert_eq!(dungeon.count_kind(RoomKind::Empty), 1);
        assert_eq!(dungeon.start, 0);
        assert_eq!(dungeon.current, 0);
        assert_eq!(dungeon.rooms[dungeon.exit].kind, RoomKind::Exit);
    }

    #[test]
    fn test_quotas_truncate_in_priority_order() {
        let mut rng = GameRng::new(9);
        let dungeon = generate_dungeon(7, 0, &mut rng).unwrap();
        assert_eq!(dungeon.count_kind(RoomKind::Loot), 4);
        assert_eq!(dungeon.count_kind(RoomKind::Ritual), 1);
        assert_eq!(dungeon.count_kind(RoomKind::Fight), 0);
        assert_eq!(dungeon.count_kind(RoomKind::Empty), 0);
    }

    #[test]
    fn test_two_rooms() {
        let mut rng = GameRng::new(5);
        let dungeon = generate_dungeon(2, 5, &mut rng).unwrap();
        assert_eq!(dungeon.graph.tunnels(), vec![(0, 1)]);
        assert_eq!(dungeon.exit, 1);
    }

    #[test]
    fn test_spanning_tree_edge_count() {
        let mut rng = GameRng::new(11);
        let graph = spanning_tree(20, &mut rng);
        assert_eq!(graph.tunnel_count(), 19);
        assert!(graph.is_connected());
    }

    #[test]
    fn test_extra_tunnels_capped_on_complete_graph() {
        let mut rng = GameRng::new(3);
        let mut graph = spanning_tree(3, &mut rng);
        let added = add_extra_tunnels(&mut graph, 10, &mut rng);
        assert!(added <= 1);
        assert!(graph.tunnel_count() <= 3);
    }

    #[test]
    fn test_farthest_tie_goes_to_lowest_id() {
        // 0 - 1, 0 - 2, 0 - 3: all at distance 1
        let mut graph = Graph::with_rooms(4);
        graph.add_tunnel(0, 3);
        graph.add_tunnel(0, 2);
        graph.add_tunnel(0, 1);
        assert_eq!(farthest_room(&graph, 0), 1);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = generate_dungeon(14, 5, &mut GameRng::new(77)).unwrap();
        let b = generate_dungeon(14, 5, &mut GameRng::new(77)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_generated_dungeon_is_well_formed(
            seed in any::<u64>(),
            rooms in 2usize..40,
            extra in 0usize..12,
        ) {
            let mut rng = GameRng::new(seed);
            let dungeon = generate_dungeon(rooms, extra, &mut rng).unwrap();

            prop_assert!(dungeon.graph.is_connected());
            prop_assert!(dungeon.graph.tunnel_count() >= rooms - 1);
            prop_assert!(dungeon.graph.tunnel_count() <= rooms - 1 + extra);
            prop_assert_eq!(dungeon.count_kind(RoomKind::Start), 1);
            prop_assert_eq!(dungeon.count_kind(RoomKind::Exit), 1);

            let dist = dungeon.graph.distances_from(dungeon.start);
            let max = dist.iter().flatten().copied().max().unwrap_or(0);
            prop_assert_eq!(dist[dungeon.exit], Some(max));
            prop_assert!(dungeon.exit != dungeon.start);
        }
    }
}
