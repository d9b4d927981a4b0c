//! Door placement.
//!
//! Doors are derived purely from corridor exit geometry: the exit tile
//! moved one step back toward the room along the axis it protrudes on
//! lands exactly on the wall ring, whatever shape the corridor took.

use crate::config::GenConfig;
use crate::corridor::Corridor;
use crate::level::Level;
use crate::rng::GameRng;
use crate::room::{Door, DoorState, WallSide};
use crate::tile::Tile;

/// Derive the door tile for an exit: one step back toward the room.
pub fn door_for_exit(exit: (i32, i32), side: WallSide, state: DoorState) -> Door {
    let (ox, oy) = side.outward();
    Door {
        x: exit.0 - ox,
        y: exit.1 - oy,
        side,
        state,
    }
}

fn roll_state(cfg: &GenConfig, rng: &mut GameRng) -> DoorState {
    if rng.percent(cfg.secret_percent) {
        return DoorState::SECRET | DoorState::CLOSED;
    }
    match rng.rn2(3) {
        0 => DoorState::LOCKED | DoorState::CLOSED,
        1 => DoorState::CLOSED,
        _ => DoorState::OPEN,
    }
}

/// Place the doors for a freshly carved corridor between rooms `a` and
/// `b`. A wall side that already holds a door keeps it (the corridor
/// reused its exit), so each room ends up with at most one door per side.
pub fn place_doors(
    level: &mut Level,
    a: usize,
    b: usize,
    corridor: &Corridor,
    cfg: &GenConfig,
    rng: &mut GameRng,
) {
    let ends = [
        (a, corridor.exit_a, corridor.side_a),
        (b, corridor.exit_b, corridor.side_b),
    ];
    for (room_id, exit, side) in ends {
        let Some(room) = level.rooms.get(room_id) else {
            continue;
        };
        if room.door_on(side).is_some() {
            continue;
        }
        let door = door_for_exit(exit, side, roll_state(cfg, rng));
        let tile = if door.state.contains(DoorState::SECRET) {
            Tile::SecretMarker
        } else {
            Tile::Door
        };
        level.tiles.set(door.x, door.y, tile);
        if let Some(room) = level.rooms.get_mut(room_id) {
            room.add_door(door);
        }
    }
}
