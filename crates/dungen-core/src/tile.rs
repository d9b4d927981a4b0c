//! Packed tile storage.
//!
//! Each map cell is one of eight tile kinds, stored as 3 bits in a flat
//! row-major buffer. A cell may straddle a byte boundary, so reads and
//! writes go through a two-byte merge path when the bit offset is past 5.
//!
//! Out-of-bounds access is defined behavior: reads return [`Tile::Empty`],
//! writes are dropped. Callers never need to bounds-check first.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Tile kind, 3 bits on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Wall = 1,
    Floor = 2,
    Door = 3,
    StairsUp = 4,
    StairsDown = 5,
    SecretMarker = 6,
    Reserved = 7,
}

impl Tile {
    /// Decode a 3-bit value.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x7 {
            0 => Tile::Empty,
            1 => Tile::Wall,
            2 => Tile::Floor,
            3 => Tile::Door,
            4 => Tile::StairsUp,
            5 => Tile::StairsDown,
            6 => Tile::SecretMarker,
            _ => Tile::Reserved,
        }
    }

    /// Check if this tile can be walked on.
    pub const fn is_passable(&self) -> bool {
        matches!(
            self,
            Tile::Floor | Tile::Door | Tile::StairsUp | Tile::StairsDown | Tile::SecretMarker
        )
    }

    /// Display character for this tile.
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Door => '+',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
            Tile::SecretMarker => '*',
            Tile::Reserved => '?',
        }
    }
}

/// Packed 3-bit-per-cell tile buffer.
///
/// Allocated once per pass and mutated in place; never resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    bits: Vec<u8>,
}

impl TileGrid {
    /// Create a cleared grid for a `width` x `height` map.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            width,
            height,
            bits: vec![0u8; (w * h * 3).div_ceil(8)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Read the tile at (x, y). Out-of-bounds reads return `Empty`.
    pub fn get(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::Empty;
        }
        let bit = (y as usize * self.width as usize + x as usize) * 3;
        let byte = bit / 8;
        let shift = bit % 8;
        let raw = if shift <= 5 {
            self.bits[byte] >> shift
        } else {
            // Cell straddles the byte boundary: merge two bytes.
            let word = self.bits[byte] as u16 | (self.bits[byte + 1] as u16) << 8;
            (word >> shift) as u8
        };
        Tile::from_bits(raw)
    }

    /// Write the tile at (x, y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if !self.in_bounds(x, y) {
            return;
        }
        let bit = (y as usize * self.width as usize + x as usize) * 3;
        let byte = bit / 8;
        let shift = bit % 8;
        let val = tile as u16;
        if shift <= 5 {
            let mask = 0x7u8 << shift;
            self.bits[byte] = (self.bits[byte] & !mask) | ((val as u8) << shift);
        } else {
            let mask = 0x7u16 << shift;
            let mut word = self.bits[byte] as u16 | (self.bits[byte + 1] as u16) << 8;
            word = (word & !mask) | (val << shift);
            self.bits[byte] = word as u8;
            self.bits[byte + 1] = (word >> 8) as u8;
        }
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = TileGrid::new(80, 21);
        for y in 0..21 {
            for x in 0..80 {
                assert_eq!(grid.get(x, y), Tile::Empty);
            }
        }
    }

    #[test]
    fn test_set_get_roundtrip_all_kinds() {
        let mut grid = TileGrid::new(16, 4);
        for (i, tile) in Tile::iter().enumerate() {
            grid.set(i as i32, 2, tile);
        }
        for (i, tile) in Tile::iter().enumerate() {
            assert_eq!(grid.get(i as i32, 2), tile);
        }
    }

    #[test]
    fn test_byte_straddling_cell() {
        // Cell index 2 starts at bit 6 and spans bytes 0 and 1.
        let mut grid = TileGrid::new(8, 1);
        grid.set(2, 0, Tile::Reserved);
        assert_eq!(grid.get(2, 0), Tile::Reserved);
        // Neighbors on both sides of the boundary are untouched.
        assert_eq!(grid.get(1, 0), Tile::Empty);
        assert_eq!(grid.get(3, 0), Tile::Empty);

        grid.set(1, 0, Tile::Door);
        grid.set(3, 0, Tile::Floor);
        assert_eq!(grid.get(2, 0), Tile::Reserved);
        assert_eq!(grid.get(1, 0), Tile::Door);
        assert_eq!(grid.get(3, 0), Tile::Floor);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = TileGrid::new(10, 10);
        assert_eq!(grid.get(-1, 0), Tile::Empty);
        assert_eq!(grid.get(0, -1), Tile::Empty);
        assert_eq!(grid.get(10, 0), Tile::Empty);
        assert_eq!(grid.get(0, 10), Tile::Empty);

        let before = grid.clone();
        grid.set(-1, 0, Tile::Wall);
        grid.set(10, 0, Tile::Wall);
        grid.set(0, 999, Tile::Wall);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear() {
        let mut grid = TileGrid::new(7, 3);
        grid.set(6, 2, Tile::StairsDown);
        grid.clear();
        assert_eq!(grid.get(6, 2), Tile::Empty);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(x in 0i32..80, y in 0i32..21, bits in 0u8..8) {
            let mut grid = TileGrid::new(80, 21);
            let tile = Tile::from_bits(bits);
            grid.set(x, y, tile);
            prop_assert_eq!(grid.get(x, y), tile);
        }

        #[test]
        fn prop_neighbors_unaffected(x in 1i32..79, y in 0i32..21, bits in 0u8..8) {
            let mut grid = TileGrid::new(80, 21);
            grid.set(x - 1, y, Tile::Wall);
            grid.set(x + 1, y, Tile::Floor);
            grid.set(x, y, Tile::from_bits(bits));
            prop_assert_eq!(grid.get(x - 1, y), Tile::Wall);
            prop_assert_eq!(grid.get(x + 1, y), Tile::Floor);
        }
    }
}
