//! Stair placement.
//!
//! Stairs prefer high-priority rooms (larger rooms rank higher, with a
//! random tiebreak baked into the priority at placement time) and land on
//! the most distant pair among them so the walk between up and down
//! staircases crosses the level.

use crate::distance::DistanceCache;
use crate::level::Level;
use crate::tile::Tile;

/// Place the up and down staircases at room centers. Returns the handles
/// of the (up, down) rooms, or `None` for an empty level. A single-room
/// level holds both staircases.
pub fn place_stairs(level: &mut Level, cache: &mut DistanceCache) -> Option<(usize, usize)> {
    let count = level.rooms.len();
    if count == 0 {
        return None;
    }
    if count == 1 {
        let (cx, cy) = level.rooms.get(0)?.center();
        level.tiles.set(cx, cy, Tile::StairsUp);
        level.tiles.set(cx + 1, cy, Tile::StairsDown);
        return Some((0, 0));
    }

    let top = level
        .rooms
        .iter()
        .map(|r| r.priority)
        .max()
        .unwrap_or_default();
    let (up, down) = farthest_pair(level, cache, top)
        .or_else(|| farthest_pair(level, cache, 0))?;

    let (ux, uy) = level.rooms.get(up)?.center();
    let (dx, dy) = level.rooms.get(down)?.center();
    level.tiles.set(ux, uy, Tile::StairsUp);
    level.tiles.set(dx, dy, Tile::StairsDown);
    Some((up, down))
}

/// Most distant room pair with both priorities at or above the threshold.
/// Falls back to `None` when fewer than two rooms qualify.
fn farthest_pair(
    level: &Level,
    cache: &mut DistanceCache,
    min_priority: u8,
) -> Option<(usize, usize)> {
    let count = level.rooms.len();
    let qualifies =
        |id: usize| level.rooms.get(id).is_some_and(|r| r.priority >= min_priority);

    let mut best: Option<(u16, usize, usize)> = None;
    for a in 0..count {
        if !qualifies(a) {
            continue;
        }
        for b in (a + 1)..count {
            if !qualifies(b) {
                continue;
            }
            let d = cache.distance(a, b, &level.rooms);
            if best.map_or(true, |(bd, _, _)| d > bd) {
                best = Some((d, a, b));
            }
        }
    }
    best.map(|(_, a, b)| (a, b))
}
