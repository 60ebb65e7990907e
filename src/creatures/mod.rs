//! Creatures swimming over the water: species table, baits, spawning and hit-testing.

mod bait;
mod director;
mod select;
mod species;

pub use bait::{BaitEffect, BaitId};
pub use director::{CreatureDirector, CreatureInstance, WaterConditions};
pub use select::weighted_pick;
pub use species::{default_catalog, CreatureSpecies, SpeciesCatalog};
