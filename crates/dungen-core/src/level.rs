//! The generated level: packed tile buffer plus room arena.
//!
//! Downstream collaborators (renderer, stairs metadata, item layer) only
//! read this after generation finishes.

use serde::{Deserialize, Serialize};

use crate::config::GenConfig;
use crate::room::{Room, RoomArena};
use crate::tile::{Tile, TileGrid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: i32,
    pub height: i32,
    pub tiles: TileGrid,
    pub rooms: RoomArena,
}

impl Level {
    /// Create an empty level sized for one generation pass.
    pub fn new(cfg: &GenConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            tiles: TileGrid::new(cfg.width, cfg.height),
            rooms: RoomArena::new(),
        }
    }

    /// Write a room into the tile buffer: wall ring first, floor interior
    /// on top. Existing non-empty tiles on the ring are left alone so two
    /// nearby rings can share cells.
    pub fn carve_room(&mut self, room: &Room) {
        for y in (room.y - 1)..=(room.y + room.height) {
            for x in (room.x - 1)..=(room.x + room.width) {
                if room.contains(x, y) {
                    self.tiles.set(x, y, Tile::Floor);
                } else if self.tiles.get(x, y) == Tile::Empty {
                    self.tiles.set(x, y, Tile::Wall);
                }
            }
        }
    }

    /// Check if (x, y) is inside any room (interior or wall ring) other
    /// than the two given endpoint rooms.
    pub fn inside_foreign_room(&self, x: i32, y: i32, a: usize, b: usize) -> bool {
        self.rooms
            .iter()
            .enumerate()
            .any(|(i, room)| i != a && i != b && room.contains_with_walls(x, y))
    }

    /// Count how many of the 8 neighbors of (x, y) belong to a room,
    /// walls included. Corridor placement rejects cells with 3 or more.
    pub fn room_neighbor_count(&self, x: i32, y: i32) -> u32 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if self.rooms.iter().any(|r| r.contains_with_walls(nx, ny)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Flood fill over passable tiles from (x, y); returns true if the
    /// target is reached. Query helper for tests and consumers, not part
    /// of the generation pass.
    pub fn reaches(&self, from: (i32, i32), to: (i32, i32)) -> bool {
        if !self.tiles.get(from.0, from.1).is_passable() {
            return false;
        }
        let w = self.width.max(0) as usize;
        let h = self.height.max(0) as usize;
        let mut visited = vec![false; w * h];
        let mut stack = vec![from];
        while let Some((x, y)) = stack.pop() {
            if (x, y) == to {
                return true;
            }
            let idx = y as usize * w + x as usize;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (x + dx, y + dy);
                if self.tiles.get(nx, ny).is_passable() {
                    stack.push((nx, ny));
                }
            }
        }
        false
    }

    /// Render the tile buffer as ASCII, one row per line.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.tiles.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }
}
