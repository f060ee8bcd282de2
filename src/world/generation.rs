//! Random location generation.

use super::location::Location;
use crate::core::constants::{
    INN_SUB_LOCATION, MAX_LOCATION_ENEMIES, MAX_LOCATION_ITEMS, MIN_LOCATION_ITEMS,
    SAFE_ZONE_CHANCE, SHRINE_SUB_LOCATION,
};
use crate::registry::Registry;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

pub const LOCATION_PREFIXES: [&str; 5] = ["Forgotten", "Ancient", "Silent", "Haunted", "Shimmering"];
pub const LOCATION_PLACES: [&str; 6] = ["Cavern", "Ruins", "Grove", "Shrine", "Tomb", "Valley"];
const SAFE_ZONE_PLACE: &str = "Hamlet";

pub fn describe(name: &str) -> String {
    format!(
        "This {} holds secrets lost in time. The air is thick with mystery and the scent of damp earth.",
        name
    )
}

/// Builds a fresh location from the registry.
///
/// Items and enemies are each sampled without replacement, so a location never lists the
/// same definition twice. Safe zones carry no enemies.
pub fn generate_location(registry: &Registry, rng: &mut impl Rng) -> Location {
    let safe_zone = rng.gen_bool(SAFE_ZONE_CHANCE);
    let prefix = LOCATION_PREFIXES.choose(rng).copied().unwrap_or("Forgotten");
    let place = if safe_zone {
        SAFE_ZONE_PLACE
    } else {
        LOCATION_PLACES.choose(rng).copied().unwrap_or("Cavern")
    };
    let name = format!("{} {}", prefix, place);

    let items = sample(&registry.spawnable_items(), MIN_LOCATION_ITEMS, MAX_LOCATION_ITEMS, rng);
    if items.is_empty() {
        warn!("No spawnable items defined; {} is empty", name);
    }

    let (enemies, sub_locations) = if safe_zone {
        (
            Vec::new(),
            vec![INN_SUB_LOCATION.to_string(), SHRINE_SUB_LOCATION.to_string()],
        )
    } else {
        (sample(&registry.enemy_names(), 0, MAX_LOCATION_ENEMIES, rng), Vec::new())
    };

    debug!("Generated {}: items {:?}, enemies {:?}", name, items, enemies);
    Location {
        description: describe(&name),
        name,
        items,
        enemies,
        sub_locations,
    }
}

/// Picks between `min` and `max` distinct entries, both bounds capped by the pool size.
fn sample(pool: &[&str], min: usize, max: usize, rng: &mut impl Rng) -> Vec<String> {
    let high = max.min(pool.len());
    let low = min.min(high);
    let k = rng.gen_range(low..=high);
    pool.choose_multiple(rng, k).map(|s| s.to_string()).collect()
}
