//! Memoized room-center distances.

use crate::consts::{DIST_UNCACHED, MAX_ROOMS};
use crate::room::RoomArena;

/// Symmetric Manhattan distances between room centers, computed lazily.
/// Sized to arena capacity regardless of the actual room count; must be
/// cleared whenever the room set changes.
#[derive(Debug, Clone)]
pub struct DistanceCache {
    dist: [u16; MAX_ROOMS * MAX_ROOMS],
}

impl Default for DistanceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceCache {
    pub fn new() -> Self {
        Self {
            dist: [DIST_UNCACHED; MAX_ROOMS * MAX_ROOMS],
        }
    }

    /// Invalidate every cached entry.
    pub fn clear(&mut self) {
        self.dist.fill(DIST_UNCACHED);
    }

    /// Manhattan distance between the centers of rooms `a` and `b`,
    /// cached symmetrically on first use. Out-of-range handles yield the
    /// uncached sentinel, which no distance cap accepts.
    pub fn distance(&mut self, a: usize, b: usize, rooms: &RoomArena) -> u16 {
        if a == b {
            return 0;
        }
        if a >= MAX_ROOMS || b >= MAX_ROOMS {
            return DIST_UNCACHED;
        }
        let cached = self.dist[a * MAX_ROOMS + b];
        if cached != DIST_UNCACHED {
            return cached;
        }
        let (Some(ra), Some(rb)) = (rooms.get(a), rooms.get(b)) else {
            return DIST_UNCACHED;
        };
        let (ax, ay) = ra.center();
        let (bx, by) = rb.center();
        let d = ((ax - bx).abs() + (ay - by).abs()).min(u16::MAX as i32 - 1) as u16;
        self.dist[a * MAX_ROOMS + b] = d;
        self.dist[b * MAX_ROOMS + a] = d;
        d
    }
}
