//! Corridor routing and carving.
//!
//! Decides and carves a straight, L-shaped, or Z-shaped corridor between
//! two rooms. Exits sit exactly two tiles outside a room's bounding box on
//! the approach axis; corridors connect exit to exit and doors are derived
//! from the exits afterwards.
//!
//! Shape selection: rooms whose interior row or column ranges overlap get
//! one straight segment between the midpoints of the shared range. For
//! diagonal pairs the Manhattan distance between exits classifies the
//! shape: short hops prefer an L, long hauls a Z, and the middle band
//! takes whichever is unobstructed (random pick when both are). A blocked
//! preferred shape is retried once with the alternate before the pair is
//! given up for the pass.
//!
//! The whole candidate path is validated before a single tile is written,
//! so a failed carve never leaves a partial corridor behind.

use crate::config::GenConfig;
use crate::consts::MAX_PATH_LEN;
use crate::level::Level;
use crate::rng::GameRng;
use crate::room::{CorridorKind, Room, WallSide};
use crate::tile::Tile;

/// Transient ordered tile path, capped at [`MAX_PATH_LEN`].
#[derive(Debug, Clone)]
pub(crate) struct CorridorPath {
    pts: [(i32, i32); MAX_PATH_LEN],
    len: usize,
}

impl CorridorPath {
    fn new() -> Self {
        Self {
            pts: [(0, 0); MAX_PATH_LEN],
            len: 0,
        }
    }

    /// Append a point; false once the cap is reached.
    fn push(&mut self, pt: (i32, i32)) -> bool {
        if self.len >= MAX_PATH_LEN {
            return false;
        }
        self.pts[self.len] = pt;
        self.len += 1;
        true
    }

    fn points(&self) -> &[(i32, i32)] {
        &self.pts[..self.len]
    }

    #[cfg(test)]
    pub(crate) fn new_for_tests(pts: &[(i32, i32)]) -> Self {
        let mut path = Self::new();
        for &p in pts {
            let _ = path.push(p);
        }
        path
    }
}

/// A corridor candidate or finished carve: shape, path, and the two exit
/// tiles with the wall sides they protrude from.
#[derive(Debug, Clone)]
pub struct Corridor {
    pub kind: CorridorKind,
    pub exit_a: (i32, i32),
    pub side_a: WallSide,
    pub exit_b: (i32, i32),
    pub side_b: WallSide,
    pub(crate) path: CorridorPath,
}

/// Exit tile for a room wall side: two tiles outside the bounding box,
/// at `along` on the wall-parallel axis. When the side already holds a
/// door the existing door's exit is reused, keeping one door per side.
fn exit_on(room: &Room, side: WallSide, along: i32) -> (i32, i32) {
    if let Some(door) = room.door_on(side) {
        let (ox, oy) = side.outward();
        return (door.x + ox, door.y + oy);
    }
    match side {
        WallSide::Top => (along, room.y - 2),
        WallSide::Bottom => (along, room.y + room.height + 1),
        WallSide::Left => (room.x - 2, along),
        WallSide::Right => (room.x + room.width + 1, along),
    }
}

/// Wall of `from` facing the center of `to`, constrained to an axis.
fn facing_side(from: &Room, to: &Room, horizontal: bool) -> WallSide {
    let (fx, fy) = from.center();
    let (tx, ty) = to.center();
    if horizontal {
        if tx >= fx {
            WallSide::Right
        } else {
            WallSide::Left
        }
    } else if ty >= fy {
        WallSide::Bottom
    } else {
        WallSide::Top
    }
}

/// Push the straight run from `from` to `to` (sharing one axis),
/// optionally skipping `from` when it was pushed by the previous leg.
fn push_line(path: &mut CorridorPath, from: (i32, i32), to: (i32, i32), skip_first: bool) -> bool {
    let (dx, dy) = ((to.0 - from.0).signum(), (to.1 - from.1).signum());
    let mut cur = from;
    if skip_first {
        if cur == to {
            return true;
        }
        cur = (cur.0 + dx, cur.1 + dy);
    }
    loop {
        if !path.push(cur) {
            return false;
        }
        if cur == to {
            return true;
        }
        cur = (cur.0 + dx, cur.1 + dy);
    }
}

fn straight_candidate(
    kind: CorridorKind,
    ea: (i32, i32),
    sa: WallSide,
    eb: (i32, i32),
    sb: WallSide,
) -> Option<Corridor> {
    let mut path = CorridorPath::new();
    push_line(&mut path, ea, eb, false).then_some(Corridor {
        kind,
        exit_a: ea,
        side_a: sa,
        exit_b: eb,
        side_b: sb,
        path,
    })
}

/// Two-segment corridor: first leg continues out of room A along its exit
/// axis, second leg turns once and arrives at room B along B's exit axis.
fn elbow_candidate(
    ea: (i32, i32),
    sa: WallSide,
    eb: (i32, i32),
    sb: WallSide,
) -> Option<Corridor> {
    let corner = if sa.is_vertical_wall() {
        (eb.0, ea.1)
    } else {
        (ea.0, eb.1)
    };
    let mut path = CorridorPath::new();
    let ok = push_line(&mut path, ea, corner, false) && push_line(&mut path, corner, eb, true);
    ok.then_some(Corridor {
        kind: CorridorKind::Elbow,
        exit_a: ea,
        side_a: sa,
        exit_b: eb,
        side_b: sb,
        path,
    })
}

/// Middle-jog coordinate for a Z corridor: midpoint of the span plus one
/// tile of random jitter, kept strictly between the endpoints.
fn jog_coord(a: i32, b: i32, rng: &mut GameRng) -> i32 {
    let mid = (a + b) / 2;
    let (lo, hi) = (a.min(b), a.max(b));
    if hi - lo < 4 {
        return mid;
    }
    (mid + rng.rn2(3) as i32 - 1).clamp(lo + 1, hi - 1)
}

/// Three-segment corridor. The first leg leaves room A perpendicular to
/// its exiting wall, jogs across at the jitter point, and the last leg
/// arrives at room B perpendicular to B's wall.
fn zigzag_candidate(
    ea: (i32, i32),
    sa: WallSide,
    eb: (i32, i32),
    sb: WallSide,
    rng: &mut GameRng,
) -> Option<Corridor> {
    let (j1, j2) = if sa.is_vertical_wall() {
        let jog_x = jog_coord(ea.0, eb.0, rng);
        ((jog_x, ea.1), (jog_x, eb.1))
    } else {
        let jog_y = jog_coord(ea.1, eb.1, rng);
        ((ea.0, jog_y), (eb.0, jog_y))
    };
    let mut path = CorridorPath::new();
    let ok = push_line(&mut path, ea, j1, false)
        && push_line(&mut path, j1, j2, true)
        && push_line(&mut path, j2, eb, true);
    ok.then_some(Corridor {
        kind: CorridorKind::Zigzag,
        exit_a: ea,
        side_a: sa,
        exit_b: eb,
        side_b: sb,
        path,
    })
}

/// Placement predicate over a whole candidate path.
///
/// Every tile must be strictly inside the map, outside every room but the
/// two endpoints (walls included), and adjacent to fewer than 3 room
/// cells. The two exit tiles are exempt from the adjacency rule so they
/// may sit against their own room's perimeter.
fn path_clear(level: &Level, corridor: &Corridor, a: usize, b: usize) -> bool {
    let own: [Option<&Room>; 2] = [level.rooms.get(a), level.rooms.get(b)];
    for &(x, y) in corridor.path.points() {
        if x < 1 || y < 1 || x >= level.width - 1 || y >= level.height - 1 {
            return false;
        }
        if level.inside_foreign_room(x, y, a, b) {
            return false;
        }
        if own
            .iter()
            .flatten()
            .any(|room| room.contains_with_walls(x, y))
        {
            return false;
        }
        let is_exit = (x, y) == corridor.exit_a || (x, y) == corridor.exit_b;
        if !is_exit && level.room_neighbor_count(x, y) >= 3 {
            return false;
        }
    }
    true
}

/// Write a validated path into the tile buffer. Already-carved floor,
/// doors, and markers are left alone so crossing corridors merge.
fn carve(level: &mut Level, corridor: &Corridor, cfg: &GenConfig, rng: &mut GameRng) {
    for &(x, y) in corridor.path.points() {
        if level.tiles.get(x, y) == Tile::Empty {
            let tile = if rng.percent(cfg.secret_percent) {
                Tile::SecretMarker
            } else {
                Tile::Floor
            };
            level.tiles.set(x, y, tile);
        }
    }
}

/// Route and carve a corridor between rooms `a` and `b`. Returns the
/// carved corridor on success; `None` means both viable shapes were
/// obstructed and the pair should be treated as unconnectable this pass.
pub fn draw_corridor(
    level: &mut Level,
    a: usize,
    b: usize,
    cfg: &GenConfig,
    rng: &mut GameRng,
) -> Option<Corridor> {
    if a == b {
        return None;
    }
    let ra = *level.rooms.get(a)?;
    let rb = *level.rooms.get(b)?;

    // Aligned rooms: one straight segment across the shared range.
    if let Some((lo, hi)) = ra.y_overlap(&rb) {
        let my = (lo + hi) / 2;
        let (sa, sb) = if ra.center().0 <= rb.center().0 {
            (WallSide::Right, WallSide::Left)
        } else {
            (WallSide::Left, WallSide::Right)
        };
        let ea = exit_on(&ra, sa, my);
        let eb = exit_on(&rb, sb, my);
        if ea.1 == eb.1 {
            if let Some(c) = straight_candidate(CorridorKind::Straight, ea, sa, eb, sb) {
                if path_clear(level, &c, a, b) {
                    carve(level, &c, cfg, rng);
                    return Some(c);
                }
            }
        }
        // Blocked by a third room: fall through to the bent shapes.
    } else if let Some((lo, hi)) = ra.x_overlap(&rb) {
        let mx = (lo + hi) / 2;
        let (sa, sb) = if ra.center().1 <= rb.center().1 {
            (WallSide::Bottom, WallSide::Top)
        } else {
            (WallSide::Top, WallSide::Bottom)
        };
        let ea = exit_on(&ra, sa, mx);
        let eb = exit_on(&rb, sb, mx);
        if ea.0 == eb.0 {
            if let Some(c) = straight_candidate(CorridorKind::Straight, ea, sa, eb, sb) {
                if path_clear(level, &c, a, b) {
                    carve(level, &c, cfg, rng);
                    return Some(c);
                }
            }
        }
    }

    // Diagonal pair. Both rooms exit on the dominant axis for the Z; the
    // L keeps room A's exit and swings room B's onto the other axis so
    // both corridor ends run along their exit axes.
    let (ax, ay) = ra.center();
    let (bx, by) = rb.center();
    let horizontal = (bx - ax).abs() >= (by - ay).abs();

    let sa = facing_side(&ra, &rb, horizontal);
    let sb = facing_side(&rb, &ra, horizontal);
    let ea = exit_on(&ra, sa, if horizontal { ay } else { ax });
    let eb = exit_on(&rb, sb, if horizontal { by } else { bx });

    let sb_l = facing_side(&rb, &ra, !horizontal);
    let eb_l = exit_on(&rb, sb_l, if horizontal { bx } else { by });

    let elbow = elbow_candidate(ea, sa, eb_l, sb_l);
    let zigzag = zigzag_candidate(ea, sa, eb, sb, rng);

    let dist = (ea.0 - eb.0).abs() + (ea.1 - eb.1).abs();
    let elbow_first = if dist <= 4 {
        true
    } else if dist > 8 {
        false
    } else {
        // Middle band: L when only it is clear, Z when only it is,
        // random tie-break when both are.
        let l_ok = elbow
            .as_ref()
            .is_some_and(|c| path_clear(level, c, a, b));
        let z_ok = zigzag
            .as_ref()
            .is_some_and(|c| path_clear(level, c, a, b));
        match (l_ok, z_ok) {
            (true, true) => rng.one_in(2),
            (true, false) => true,
            _ => false,
        }
    };

    let (first, second) = if elbow_first {
        (elbow, zigzag)
    } else {
        (zigzag, elbow)
    };
    for candidate in [first, second].into_iter().flatten() {
        if path_clear(level, &candidate, a, b) {
            carve(level, &candidate, cfg, rng);
            return Some(candidate);
        }
    }
    None
}
