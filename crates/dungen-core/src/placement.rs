//! Room placement on a shuffled grid.
//!
//! The map is partitioned into an N x N grid with one room slot per cell.
//! Cells are visited in shuffled order; each gets one candidate rectangle
//! with randomized size and offset. Candidates that leave the map, clip
//! another room, or land inside another room's buffer zone are skipped
//! silently, so a pass may end with fewer rooms than requested.

use crate::config::GenConfig;
use crate::consts::MAX_GRID_CELLS;
use crate::level::Level;
use crate::rng::GameRng;
use crate::room::Room;

/// Place up to the configured ceiling of rooms, carving each accepted one
/// into the tile buffer. Returns the number of rooms placed.
pub fn place_rooms(level: &mut Level, cfg: &GenConfig, rng: &mut GameRng) -> usize {
    let target = cfg.room_ceiling();
    let n = cfg.grid_dim();
    let cells = ((n * n) as usize).min(MAX_GRID_CELLS);

    let cell_w = (cfg.width - 2) / n;
    let cell_h = (cfg.height - 2) / n;

    let mut order = [0usize; MAX_GRID_CELLS];
    for (i, slot) in order.iter_mut().enumerate().take(cells) {
        *slot = i;
    }
    rng.shuffle(&mut order[..cells]);

    for &cell in order[..cells].iter() {
        if level.rooms.len() >= target {
            break;
        }
        let gx = (cell as i32) % n;
        let gy = (cell as i32) / n;

        // One tile of the cell is reserved so neighboring slots never abut.
        let avail_w = cell_w - 1;
        let avail_h = cell_h - 1;
        if avail_w < cfg.min_room_size || avail_h < cfg.min_room_size {
            continue;
        }

        let w = random_span(rng, cfg.min_room_size, cfg.max_room_size.min(avail_w));
        let h = random_span(rng, cfg.min_room_size, cfg.max_room_size.min(avail_h));
        let ox = rng.rn2((avail_w - w + 1) as u32) as i32;
        let oy = rng.rn2((avail_h - h + 1) as u32) as i32;

        let room_x = 1 + gx * cell_w + ox;
        let room_y = 1 + gy * cell_h + oy;
        let mut candidate = Room::new(room_x, room_y, w, h);

        // Wall ring must stay inside the map.
        if room_x < 1 || room_y < 1 || room_x + w >= cfg.width || room_y + h >= cfg.height {
            continue;
        }
        if level
            .rooms
            .iter()
            .any(|r| candidate.overlaps(r, cfg.room_buffer))
        {
            continue;
        }

        candidate.priority = room_priority(&candidate, rng);
        if level.rooms.push(candidate).is_none() {
            break;
        }
        level.carve_room(&candidate);
    }

    level.rooms.len()
}

fn random_span(rng: &mut GameRng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    min + rng.rn2((max - min + 1) as u32) as i32
}

/// Stairs-selection weight: larger rooms rank higher, with a small random
/// bonus so equal-sized rooms do not always tie.
fn room_priority(room: &Room, rng: &mut GameRng) -> u8 {
    let tier = (room.area() / 12).clamp(0, 3) as u8;
    tier * 2 + rng.rn2(2) as u8
}
