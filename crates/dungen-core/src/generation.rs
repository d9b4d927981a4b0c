//! Generation driver.
//!
//! One pass: validate the config, place rooms on the shuffled grid, build
//! the corridor network, optionally add loop edges, then drop the stairs.
//! Everything downstream of validation is infallible; a pathological seed
//! yields a sparser level, never an error.

use crate::config::{GenConfig, GenError};
use crate::distance::DistanceCache;
use crate::level::Level;
use crate::network::{self, LinkTable};
use crate::placement::place_rooms;
use crate::rng::GameRng;
use crate::stairs::place_stairs;

/// How many fresh layouts to try when a pass places too few rooms.
const MAX_PASSES: usize = 3;

/// Generate a complete level from the configuration and seeded RNG.
pub fn generate(cfg: &GenConfig, rng: &mut GameRng) -> Result<Level, GenError> {
    cfg.validate()?;

    let enough = cfg.room_ceiling().min(2);
    let mut level = Level::new(cfg);
    for pass in 0..MAX_PASSES {
        place_rooms(&mut level, cfg, rng);
        if level.rooms.len() >= enough || pass + 1 == MAX_PASSES {
            break;
        }
        level = Level::new(cfg);
    }

    let mut links = LinkTable::new();
    let mut cache = DistanceCache::new();
    network::build_room_network(&mut level, &mut links, &mut cache, cfg, rng);
    network::add_extra_links(&mut level, &mut links, &mut cache, cfg, rng);
    place_stairs(&mut level, &mut cache);

    Ok(level)
}
