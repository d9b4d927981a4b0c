//! Fixed capacities for the generation pass.
//!
//! Everything the pass touches is sized up front to these bounds; work past
//! a bound is dropped silently rather than reallocating.

/// Maximum number of rooms per level. All matrices are sized to this
/// capacity regardless of how many rooms a pass actually places.
pub const MAX_ROOMS: usize = 12;

/// Maximum placement-grid cells (4x4 grid covers `MAX_ROOMS`).
pub const MAX_GRID_CELLS: usize = 16;

/// Maximum unordered room pairs: MAX_ROOMS choose 2.
pub const MAX_PAIRS: usize = MAX_ROOMS * (MAX_ROOMS - 1) / 2;

/// A room holds at most one door per wall side.
pub const MAX_DOORS_PER_ROOM: usize = 4;

/// Cap on recorded corridor links per room.
pub const MAX_LINKS_PER_ROOM: usize = 4;

/// Cap on corridor path length in tiles.
pub const MAX_PATH_LEN: usize = 80;

/// Sentinel meaning "distance not cached yet".
pub const DIST_UNCACHED: u16 = u16::MAX;
