//! Rooms and the fixed-capacity room arena.
//!
//! A room is its interior rectangle; the wall ring sits one tile outside it
//! and corridor exits two tiles outside. Each room keeps at most one door
//! per wall side and up to four packed link records (peer id + corridor
//! kind). Rooms live in a contiguous arena addressed by small integer
//! handles; the arena never grows past [`MAX_ROOMS`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DOORS_PER_ROOM, MAX_LINKS_PER_ROOM, MAX_ROOMS};

/// Which wall of a room a door or exit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WallSide {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl WallSide {
    /// Unit vector pointing out of the room through this wall.
    pub const fn outward(&self) -> (i32, i32) {
        match self {
            WallSide::Top => (0, -1),
            WallSide::Right => (1, 0),
            WallSide::Bottom => (0, 1),
            WallSide::Left => (-1, 0),
        }
    }

    /// True for left/right walls, whose exits protrude horizontally.
    pub const fn is_vertical_wall(&self) -> bool {
        matches!(self, WallSide::Left | WallSide::Right)
    }
}

bitflags! {
    /// Door state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DoorState: u8 {
        const OPEN = 0x01;
        const CLOSED = 0x02;
        const LOCKED = 0x04;
        const SECRET = 0x08;
    }
}

impl Serialize for DoorState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DoorState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(DoorState::from_bits_truncate(bits))
    }
}

/// A door tile on a room's wall ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub side: WallSide,
    pub state: DoorState,
}

/// Corridor shape connecting two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CorridorKind {
    /// One straight segment between aligned rooms.
    Straight = 0,
    /// Two perpendicular segments.
    Elbow = 1,
    /// Three segments with a middle jog.
    Zigzag = 2,
}

/// Packed record of one corridor attached to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Arena handle of the peer room.
    pub peer: usize,
    pub kind: CorridorKind,
}

/// A rectangular room. Coordinates describe the interior; the wall ring is
/// one tile outside on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Cached interior center.
    center: (i32, i32),
    /// Stairs-selection weight, assigned at placement.
    pub priority: u8,
    /// Number of corridors attached to this room.
    pub connection_count: u8,
    doors: [Option<Door>; MAX_DOORS_PER_ROOM],
    links: [Option<Link>; MAX_LINKS_PER_ROOM],
}

impl Default for Room {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            center: (x + width / 2, y + height / 2),
            priority: 0,
            connection_count: 0,
            doors: [None; MAX_DOORS_PER_ROOM],
            links: [None; MAX_LINKS_PER_ROOM],
        }
    }

    /// Cached interior center.
    pub fn center(&self) -> (i32, i32) {
        self.center
    }

    /// Check if a point lies in the interior.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Check if a point lies in the interior or on the wall ring.
    pub fn contains_with_walls(&self, x: i32, y: i32) -> bool {
        x >= self.x - 1 && x <= self.x + self.width && y >= self.y - 1 && y <= self.y + self.height
    }

    /// Check if this room's bounding box, expanded by `buffer` on every
    /// side, intersects the other room's expanded box. Used to keep rooms
    /// out of each other's buffer zones.
    pub fn overlaps(&self, other: &Room, buffer: i32) -> bool {
        let x1 = self.x - buffer;
        let y1 = self.y - buffer;
        let x2 = self.x + self.width + buffer;
        let y2 = self.y + self.height + buffer;

        let ox1 = other.x - buffer;
        let oy1 = other.y - buffer;
        let ox2 = other.x + other.width + buffer;
        let oy2 = other.y + other.height + buffer;

        !(x2 <= ox1 || x1 >= ox2 || y2 <= oy1 || y1 >= oy2)
    }

    /// Shared interior rows with another room, if any.
    pub fn y_overlap(&self, other: &Room) -> Option<(i32, i32)> {
        let lo = self.y.max(other.y);
        let hi = (self.y + self.height - 1).min(other.y + other.height - 1);
        (lo <= hi).then_some((lo, hi))
    }

    /// Shared interior columns with another room, if any.
    pub fn x_overlap(&self, other: &Room) -> Option<(i32, i32)> {
        let lo = self.x.max(other.x);
        let hi = (self.x + self.width - 1).min(other.x + other.width - 1);
        (lo <= hi).then_some((lo, hi))
    }

    /// Interior area in tiles.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// The door on a given wall side, if one has been placed.
    pub fn door_on(&self, side: WallSide) -> Option<&Door> {
        self.doors[side as usize].as_ref()
    }

    /// All placed doors.
    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter().flatten()
    }

    /// Record a door. Returns false (and changes nothing) when that wall
    /// side already holds one.
    pub fn add_door(&mut self, door: Door) -> bool {
        let slot = &mut self.doors[door.side as usize];
        if slot.is_some() {
            return false;
        }
        *slot = Some(door);
        true
    }

    /// All recorded corridor links.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().flatten()
    }

    /// Record a corridor link; dropped silently once all slots are used,
    /// but the connection count still tracks the attach.
    pub fn add_link(&mut self, link: Link) {
        self.connection_count = self.connection_count.saturating_add(1);
        if let Some(slot) = self.links.iter_mut().find(|s| s.is_none()) {
            *slot = Some(link);
        }
    }
}

/// Fixed-capacity room storage with stable integer handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomArena {
    rooms: [Room; MAX_ROOMS],
    count: usize,
}

impl Default for RoomArena {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomArena {
    pub fn new() -> Self {
        Self {
            rooms: [Room::default(); MAX_ROOMS],
            count: 0,
        }
    }

    /// Number of rooms placed so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Add a room, returning its handle; `None` once the arena is full
    /// (the room is dropped, consistent with the capacity-clipping design).
    pub fn push(&mut self, room: Room) -> Option<usize> {
        if self.count >= MAX_ROOMS {
            return None;
        }
        let id = self.count;
        self.rooms[id] = room;
        self.count += 1;
        Some(id)
    }

    pub fn get(&self, id: usize) -> Option<&Room> {
        (id < self.count).then(|| &self.rooms[id])
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Room> {
        (id < self.count).then(|| &mut self.rooms[id])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms[..self.count].iter()
    }

    /// Drop all rooms; handles from earlier passes become invalid.
    pub fn clear(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_cached_from_rect() {
        let room = Room::new(10, 10, 5, 5);
        assert_eq!(room.center(), (12, 12));
    }

    #[test]
    fn test_contains() {
        let room = Room::new(4, 3, 3, 2);
        assert!(room.contains(4, 3));
        assert!(room.contains(6, 4));
        assert!(!room.contains(7, 4));
        assert!(!room.contains(3, 3));
    }

    #[test]
    fn test_contains_with_walls() {
        let room = Room::new(4, 3, 3, 2);
        assert!(room.contains_with_walls(3, 2));
        assert!(room.contains_with_walls(7, 5));
        assert!(!room.contains_with_walls(8, 5));
        assert!(!room.contains_with_walls(2, 3));
    }

    #[test]
    fn test_overlap_with_buffer() {
        let a = Room::new(5, 5, 5, 5);
        let b = Room::new(8, 8, 5, 5);
        let c = Room::new(16, 5, 5, 5);

        assert!(a.overlaps(&b, 0));
        assert!(!a.overlaps(&c, 0));
        assert!(a.overlaps(&c, 4));
    }

    #[test]
    fn test_range_overlap() {
        let a = Room::new(2, 2, 4, 4);
        let b = Room::new(14, 3, 4, 5);
        assert_eq!(a.y_overlap(&b), Some((3, 5)));
        assert_eq!(a.x_overlap(&b), None);
    }

    #[test]
    fn test_one_door_per_side() {
        let mut room = Room::new(2, 2, 4, 4);
        let door = Door {
            x: 6,
            y: 4,
            side: WallSide::Right,
            state: DoorState::OPEN,
        };
        assert!(room.add_door(door));
        assert!(!room.add_door(Door { y: 3, ..door }));
        assert_eq!(room.doors().count(), 1);
        assert_eq!(room.door_on(WallSide::Right).unwrap().y, 4);
        assert!(room.door_on(WallSide::Left).is_none());
    }

    #[test]
    fn test_link_records_clip_at_capacity() {
        let mut room = Room::new(0, 0, 3, 3);
        for peer in 1..=6 {
            room.add_link(Link {
                peer,
                kind: CorridorKind::Straight,
            });
        }
        assert_eq!(room.links().count(), MAX_LINKS_PER_ROOM);
        assert_eq!(room.connection_count, 6);
    }

    #[test]
    fn test_arena_capacity_clips() {
        let mut arena = RoomArena::new();
        for i in 0..MAX_ROOMS {
            assert_eq!(arena.push(Room::new(i as i32, 0, 3, 3)), Some(i));
        }
        assert_eq!(arena.push(Room::new(99, 0, 3, 3)), None);
        assert_eq!(arena.len(), MAX_ROOMS);
    }

    #[test]
    fn test_wall_side_outward() {
        assert_eq!(WallSide::Top.outward(), (0, -1));
        assert_eq!(WallSide::Right.outward(), (1, 0));
        assert!(WallSide::Left.is_vertical_wall());
        assert!(!WallSide::Bottom.is_vertical_wall());
    }
}
