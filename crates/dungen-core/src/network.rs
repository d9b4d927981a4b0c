//! Room network construction.
//!
//! Every unordered room pair carries a small state machine:
//! `Unattempted -> Reserved -> {Connected | Failed}`. The table doubles as
//! the connection matrix (Connected entries) and the attempted matrix
//! (Failed entries), kept symmetric, so no pair is ever retried within a
//! pass. Reachability over already-built edges uses an explicit-stack DFS
//! bounded by the room capacity; it suppresses redundant corridors by
//! marking indirectly linked pairs Connected without carving.
//!
//! The builder walks all pairs in increasing center-distance order and
//! stops as soon as every room sits in one component.

use crate::config::GenConfig;
use crate::consts::{MAX_PAIRS, MAX_ROOMS};
use crate::corridor::draw_corridor;
use crate::distance::DistanceCache;
use crate::door::place_doors;
use crate::level::Level;
use crate::rng::GameRng;
use crate::room::Link;

/// Connection state of one room pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairState {
    #[default]
    Unattempted,
    /// Optimistically held while a carve is in flight; rolled back to
    /// `Failed` when the carve fails.
    Reserved,
    Connected,
    Failed,
}

/// Symmetric pair-state matrix sized to room capacity.
#[derive(Debug, Clone)]
pub struct LinkTable {
    state: [PairState; MAX_ROOMS * MAX_ROOMS],
}

impl Default for LinkTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkTable {
    pub fn new() -> Self {
        Self {
            state: [PairState::Unattempted; MAX_ROOMS * MAX_ROOMS],
        }
    }

    /// Reset every pair for a new pass.
    pub fn clear(&mut self) {
        self.state.fill(PairState::Unattempted);
    }

    pub fn get(&self, a: usize, b: usize) -> PairState {
        if a >= MAX_ROOMS || b >= MAX_ROOMS {
            return PairState::Failed;
        }
        self.state[a * MAX_ROOMS + b]
    }

    fn set(&mut self, a: usize, b: usize, state: PairState) {
        if a >= MAX_ROOMS || b >= MAX_ROOMS {
            return;
        }
        self.state[a * MAX_ROOMS + b] = state;
        self.state[b * MAX_ROOMS + a] = state;
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.get(a, b) == PairState::Connected
    }

    /// True if a chain of built corridors links `a` and `b`. Explicit
    /// stack, bounded by room capacity; no recursion.
    pub fn is_reachable(&self, a: usize, b: usize, room_count: usize) -> bool {
        if a == b {
            return true;
        }
        let count = room_count.min(MAX_ROOMS);
        if a >= count || b >= count {
            return false;
        }
        let mut visited = [false; MAX_ROOMS];
        let mut stack = [0usize; MAX_ROOMS];
        let mut top = 0;
        stack[top] = a;
        top += 1;
        visited[a] = true;

        while top > 0 {
            top -= 1;
            let cur = stack[top];
            for next in 0..count {
                if visited[next] || !self.is_connected(cur, next) {
                    continue;
                }
                if next == b {
                    return true;
                }
                visited[next] = true;
                if top < MAX_ROOMS {
                    stack[top] = next;
                    top += 1;
                }
            }
        }
        false
    }

    /// True once every room is reachable from room 0.
    pub fn all_connected(&self, room_count: usize) -> bool {
        let count = room_count.min(MAX_ROOMS);
        (1..count).all(|i| self.is_reachable(0, i, count))
    }
}

/// Attempt to connect one pair. Returns true when the pair ends up
/// connected (directly or through existing edges); false means the pair
/// is unconnectable this pass and is never retried.
pub fn connect(
    level: &mut Level,
    links: &mut LinkTable,
    cache: &mut DistanceCache,
    cfg: &GenConfig,
    rng: &mut GameRng,
    a: usize,
    b: usize,
) -> bool {
    connect_pair(level, links, cache, cfg, rng, a, b, false)
}

fn connect_pair(
    level: &mut Level,
    links: &mut LinkTable,
    cache: &mut DistanceCache,
    cfg: &GenConfig,
    rng: &mut GameRng,
    a: usize,
    b: usize,
    force_carve: bool,
) -> bool {
    if a == b || a >= level.rooms.len() || b >= level.rooms.len() {
        return false;
    }

    // Idempotence: never redo a known-good or known-bad pair.
    match links.get(a, b) {
        PairState::Connected => return true,
        PairState::Failed | PairState::Reserved => return false,
        PairState::Unattempted => {}
    }

    // Safety predicate: distance cap and disjoint buffer zones.
    if cache.distance(a, b, &level.rooms) > cfg.max_link_distance {
        links.set(a, b, PairState::Failed);
        return false;
    }
    let (ra, rb) = match (level.rooms.get(a), level.rooms.get(b)) {
        (Some(ra), Some(rb)) => (*ra, *rb),
        _ => return false,
    };
    if ra.overlaps(&rb, cfg.room_buffer) {
        links.set(a, b, PairState::Failed);
        return false;
    }

    // An indirect path already exists: mark the edge without carving a
    // second corridor.
    if !force_carve && links.is_reachable(a, b, level.rooms.len()) {
        links.set(a, b, PairState::Connected);
        return true;
    }

    links.set(a, b, PairState::Reserved);
    match draw_corridor(level, a, b, cfg, rng) {
        Some(corridor) => {
            place_doors(level, a, b, &corridor, cfg, rng);
            if let Some(room) = level.rooms.get_mut(a) {
                room.add_link(Link {
                    peer: b,
                    kind: corridor.kind,
                });
            }
            if let Some(room) = level.rooms.get_mut(b) {
                room.add_link(Link {
                    peer: a,
                    kind: corridor.kind,
                });
            }
            links.set(a, b, PairState::Connected);
            true
        }
        None => {
            // Roll the optimistic reservation back and remember the
            // failure permanently for this pass.
            links.set(a, b, PairState::Failed);
            false
        }
    }
}

/// Connect all rooms into one component: every unordered pair is tried at
/// most once, in increasing cached-distance order, until the network is
/// whole. Returns true when a single component covers every room.
pub fn build_room_network(
    level: &mut Level,
    links: &mut LinkTable,
    cache: &mut DistanceCache,
    cfg: &GenConfig,
    rng: &mut GameRng,
) -> bool {
    let count = level.rooms.len();
    if count < 2 {
        return true;
    }

    let mut pairs = [(0u16, 0u8, 0u8); MAX_PAIRS];
    let mut n = 0;
    for a in 0..count {
        for b in (a + 1)..count {
            pairs[n] = (cache.distance(a, b, &level.rooms), a as u8, b as u8);
            n += 1;
        }
    }
    // Index tie-break keeps the pass deterministic for a given seed.
    pairs[..n].sort_unstable();

    for &(_, a, b) in pairs[..n].iter() {
        if links.all_connected(count) {
            break;
        }
        connect(level, links, cache, cfg, rng, a as usize, b as usize);
    }
    links.all_connected(count)
}

/// Optional post-pass: spend a few attempts turning unattempted pairs
/// into extra non-tree edges so the network has loops. Carves go through
/// the same safety and idempotence machinery as tree edges.
pub fn add_extra_links(
    level: &mut Level,
    links: &mut LinkTable,
    cache: &mut DistanceCache,
    cfg: &GenConfig,
    rng: &mut GameRng,
) {
    let count = level.rooms.len();
    if count < 3 || cfg.extra_link_percent == 0 {
        return;
    }
    let attempts = rng.rn2(count as u32) as usize + 1;
    for _ in 0..attempts {
        if !rng.percent(cfg.extra_link_percent) {
            continue;
        }
        let a = rng.rn2(count as u32) as usize;
        let b = rng.rn2(count as u32) as usize;
        if a != b && links.get(a, b) == PairState::Unattempted {
            connect_pair(level, links, cache, cfg, rng, a, b, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;

    fn level_with(rooms: &[Room]) -> Level {
        let cfg = test_cfg();
        let mut level = Level::new(&cfg);
        for room in rooms {
            level.rooms.push(*room).unwrap();
            level.carve_room(room);
        }
        level
    }

    fn test_cfg() -> GenConfig {
        GenConfig {
            width: 60,
            height: 24,
            ..Default::default()
        }
    }

    #[test]
    fn test_pair_states_symmetric() {
        let mut table = LinkTable::new();
        table.set(2, 5, PairState::Connected);
        assert_eq!(table.get(5, 2), PairState::Connected);
        table.set(2, 5, PairState::Failed);
        assert_eq!(table.get(5, 2), PairState::Failed);
    }

    #[test]
    fn test_reachability_chain() {
        let mut table = LinkTable::new();
        table.set(0, 1, PairState::Connected);
        table.set(1, 2, PairState::Connected);
        table.set(3, 4, PairState::Connected);

        assert!(table.is_reachable(0, 2, 5));
        assert!(table.is_reachable(2, 0, 5));
        assert!(table.is_reachable(3, 4, 5));
        assert!(!table.is_reachable(0, 3, 5));
        assert!(!table.all_connected(5));

        table.set(2, 3, PairState::Connected);
        assert!(table.all_connected(5));
    }

    #[test]
    fn test_connect_marks_reachable_without_carving() {
        let a = Room::new(2, 3, 4, 4);
        let b = Room::new(14, 3, 4, 4);
        let c = Room::new(26, 3, 4, 4);
        let mut level = level_with(&[a, b, c]);
        let cfg = test_cfg();
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(11);

        assert!(connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 1));
        assert!(connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 1, 2));
        let tiles_before = level.tiles.clone();

        // 0 and 2 are already linked through 1: the edge is recorded but
        // no new corridor is carved.
        assert!(connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 2));
        assert!(links.is_connected(0, 2));
        assert_eq!(level.tiles, tiles_before);
    }

    #[test]
    fn test_connect_idempotent() {
        let a = Room::new(2, 3, 4, 4);
        let b = Room::new(14, 3, 4, 4);
        let mut level = level_with(&[a, b]);
        let cfg = test_cfg();
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(11);

        assert!(connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 1));
        let links_after = level.rooms.get(0).unwrap().links().count();
        let tiles_after = level.tiles.clone();

        // Second call is success-without-work.
        assert!(connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 1));
        assert_eq!(level.rooms.get(0).unwrap().links().count(), links_after);
        assert_eq!(level.tiles, tiles_after);
    }

    #[test]
    fn test_overlapping_buffer_zones_never_connect() {
        // Scenario: buffer zones overlap, the pair must fail without
        // touching the connection state of anything else.
        let a = Room::new(2, 3, 4, 4);
        let b = Room::new(8, 3, 4, 4); // gap of 2 < twice the buffer
        let mut level = level_with(&[a, b]);
        let cfg = test_cfg();
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(11);

        assert!(!connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 1));
        assert!(!links.is_connected(0, 1));
        assert_eq!(links.get(0, 1), PairState::Failed);

        // And it is never retried.
        assert!(!connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 1));
    }

    #[test]
    fn test_distance_cap_rejects() {
        let a = Room::new(2, 3, 4, 4);
        let b = Room::new(50, 16, 4, 4);
        let mut level = level_with(&[a, b]);
        let cfg = GenConfig {
            max_link_distance: 20,
            ..test_cfg()
        };
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(11);

        assert!(!connect(&mut level, &mut links, &mut cache, &cfg, &mut rng, 0, 1));
        assert_eq!(links.get(0, 1), PairState::Failed);
    }

    #[test]
    fn test_build_network_connects_all() {
        let rooms = [
            Room::new(2, 2, 4, 4),
            Room::new(14, 2, 5, 4),
            Room::new(28, 3, 4, 4),
            Room::new(3, 14, 4, 4),
            Room::new(16, 15, 5, 4),
        ];
        let mut level = level_with(&rooms);
        let cfg = test_cfg();
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(42);

        let whole = build_room_network(&mut level, &mut links, &mut cache, &cfg, &mut rng);
        assert!(whole, "network did not reach one component");

        // Flood fill agrees with the matrix.
        let start = level.rooms.get(0).unwrap().center();
        for room in rooms.iter().skip(1) {
            assert!(
                level.reaches(start, room.center()),
                "room at {:?} unreachable on the tile grid",
                room.center()
            );
        }
    }

    #[test]
    fn test_no_duplicate_carves() {
        // Once a pair is Connected or Failed, draw_corridor can never run
        // for it again; count carved floor to prove the second build pass
        // does nothing.
        let rooms = [
            Room::new(2, 2, 4, 4),
            Room::new(14, 2, 5, 4),
            Room::new(28, 3, 4, 4),
        ];
        let mut level = level_with(&rooms);
        let cfg = test_cfg();
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(9);

        build_room_network(&mut level, &mut links, &mut cache, &cfg, &mut rng);
        let tiles = level.tiles.clone();
        build_room_network(&mut level, &mut links, &mut cache, &cfg, &mut rng);
        assert_eq!(level.tiles, tiles);
    }

    #[test]
    fn test_single_room_is_trivially_connected() {
        let mut level = level_with(&[Room::new(2, 2, 4, 4)]);
        let cfg = test_cfg();
        let mut links = LinkTable::new();
        let mut cache = DistanceCache::new();
        let mut rng = GameRng::new(1);
        assert!(build_room_network(&mut level, &mut links, &mut cache, &cfg, &mut rng));
    }
}
