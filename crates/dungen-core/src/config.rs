//! Generation configuration.
//!
//! A plain struct of concrete values supplied by the caller; the core never
//! interprets presets or difficulty enums itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_ROOMS;

/// Errors from configuration validation. Everything that can go wrong
/// inside a generation pass is signaled by boolean/sentinel returns instead;
/// only a config the pass cannot even start from is an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    #[error("map {width}x{height} cannot fit {rooms} rooms of minimum size {min}")]
    MapTooSmall {
        width: i32,
        height: i32,
        rooms: usize,
        min: i32,
    },
    #[error("invalid room size range {min}..={max}")]
    RoomSizeRange { min: i32, max: i32 },
    #[error("room ceiling must be at least 1")]
    NoRooms,
}

/// Concrete knobs for one generation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Map width in tiles.
    pub width: i32,
    /// Map height in tiles.
    pub height: i32,
    /// Ceiling on placed rooms; clamped to [`MAX_ROOMS`].
    pub max_rooms: usize,
    /// Minimum room interior side length.
    pub min_room_size: i32,
    /// Maximum room interior side length.
    pub max_room_size: i32,
    /// Minimum spacing between room bounding boxes.
    pub room_buffer: i32,
    /// Room pairs whose centers are further apart than this are never
    /// connected directly.
    pub max_link_distance: u16,
    /// Chance (percent) for a carved corridor tile or door to be secret.
    pub secret_percent: u32,
    /// Chance (percent) that a candidate non-tree edge is added for loop
    /// variety after the network is connected.
    pub extra_link_percent: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 21,
            max_rooms: 9,
            min_room_size: 3,
            max_room_size: 8,
            room_buffer: 2,
            max_link_distance: 30,
            secret_percent: 0,
            extra_link_percent: 15,
        }
    }
}

impl GenConfig {
    /// Number of rooms this pass will aim for.
    pub fn room_ceiling(&self) -> usize {
        self.max_rooms.min(MAX_ROOMS)
    }

    /// Side length of the square placement grid.
    pub fn grid_dim(&self) -> i32 {
        let target = self.room_ceiling() as i32;
        let mut n = 1;
        while n * n < target {
            n += 1;
        }
        n
    }

    /// Check that at least one room of minimum size fits in every placement
    /// grid cell, leaving a one-tile wall margin at the map edge.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.max_rooms == 0 {
            return Err(GenError::NoRooms);
        }
        if self.min_room_size < 2 || self.min_room_size > self.max_room_size {
            return Err(GenError::RoomSizeRange {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        let n = self.grid_dim();
        let cell_w = (self.width - 2) / n;
        let cell_h = (self.height - 2) / n;
        // One tile of slack per cell keeps neighboring rooms off each other's
        // walls even before the buffer check.
        if cell_w < self.min_room_size + 1 || cell_h < self.min_room_size + 1 {
            return Err(GenError::MapTooSmall {
                width: self.width,
                height: self.height,
                rooms: self.room_ceiling(),
                min: self.min_room_size,
            });
        }
        Ok(())
    }
}
