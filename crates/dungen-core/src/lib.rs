//! dungen-core: procedural dungeon layout generation.
//!
//! Generates a connected dungeon: non-overlapping rectangular rooms placed
//! on a shuffled grid, linked into a single traversable component by
//! straight, L-shaped, or Z-shaped corridors, with doors derived from
//! corridor exit geometry. The map is stored in a packed 3-bit-per-cell
//! tile buffer.
//!
//! The whole pass is a pure function of the seed and configuration: no
//! global state, no I/O, and all working structures are fixed-capacity.
//! Renderers, persistence, and UI live in other crates and only read the
//! finished [`Level`].

pub mod config;
pub mod corridor;
pub mod distance;
pub mod door;
pub mod generation;
pub mod level;
pub mod network;
pub mod placement;
pub mod room;
pub mod stairs;
pub mod tile;

mod consts;
mod rng;

pub use config::{GenConfig, GenError};
pub use consts::{MAX_DOORS_PER_ROOM, MAX_LINKS_PER_ROOM, MAX_PATH_LEN, MAX_ROOMS};
pub use generation::generate;
pub use level::Level;
pub use room::{CorridorKind, Door, DoorState, Link, Room, RoomArena, WallSide};
pub use rng::GameRng;
pub use tile::{Tile, TileGrid};
