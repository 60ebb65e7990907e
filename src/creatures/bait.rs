//! Equipped bait and the spawn modifiers it applies.

use std::fmt;
use std::str::FromStr;

use crate::creatures::CreatureSpecies;
use crate::params::{normalize_name, OceanState, UnknownName, ZoneId};

/// Bait equipped by the player
///
/// Each bait belongs to a zone tier and only works in that tier's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaitId {
    #[default]
    None,
    Bread,
    Standard,
    Deluxe,
    Glow,
    Abyssal,
    Fermented,
    Pheromones,
    Tech,
    SirenNectar,
    Singularity,
    FallenStar,
    VoidEssence,
}

impl BaitId {
    pub const ALL: [BaitId; 13] = [
        BaitId::None,
        BaitId::Bread,
        BaitId::Standard,
        BaitId::Deluxe,
        BaitId::Glow,
        BaitId::Abyssal,
        BaitId::Fermented,
        BaitId::Pheromones,
        BaitId::Tech,
        BaitId::SirenNectar,
        BaitId::Singularity,
        BaitId::FallenStar,
        BaitId::VoidEssence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BaitId::None => "none",
            BaitId::Bread => "bread",
            BaitId::Standard => "standard",
            BaitId::Deluxe => "deluxe",
            BaitId::Glow => "glow",
            BaitId::Abyssal => "abyssal",
            BaitId::Fermented => "fermented",
            BaitId::Pheromones => "pheromones",
            BaitId::Tech => "tech",
            BaitId::SirenNectar => "siren-nectar",
            BaitId::Singularity => "singularity",
            BaitId::FallenStar => "fallen-star",
            BaitId::VoidEssence => "void-essence",
        }
    }

    /// Zone tier the bait is sold for; `None` has no tier
    pub fn tier(self) -> Option<u8> {
        match self {
            BaitId::None => None,
            BaitId::SirenNectar
            | BaitId::Singularity
            | BaitId::FallenStar
            | BaitId::VoidEssence => Some(2),
            _ => Some(1),
        }
    }

    pub fn applies_in(self, zone: ZoneId) -> bool {
        self.tier() == Some(zone.tier())
    }

    /// Multiplier on a species' spawn weight
    pub fn weight_multiplier(self, species: &CreatureSpecies) -> f32 {
        let chance = species.chance;
        match self {
            BaitId::Abyssal if chance < 0.05 => 1.25,
            BaitId::Pheromones if chance < 0.01 => 1.1,
            BaitId::SirenNectar if chance < 0.01 => 5.0,
            BaitId::Singularity if chance < 0.05 => 10.0,
            BaitId::FallenStar if chance < 0.01 => 1.5,
            BaitId::VoidEssence if chance < 0.001 => 50.0,
            _ => 1.0,
        }
    }

    /// Spawn-rate bonus; the cooldown is divided by this
    pub fn cadence_bonus(self, ocean: OceanState) -> f32 {
        match self {
            BaitId::Bread => 1.02,
            BaitId::Standard => 1.05,
            BaitId::Deluxe => 1.15,
            BaitId::Glow if ocean == OceanState::Stormy => 1.3,
            _ => 1.0,
        }
    }

    /// Creatures spawned per cadence tick
    pub fn spawn_batch(self) -> usize {
        match self {
            BaitId::Fermented => 2,
            _ => 1,
        }
    }

    /// Next bait in cycling order
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&b| b == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for BaitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BaitId {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|bait| bait.name() == wanted)
            .ok_or_else(|| UnknownName::new("bait", s))
    }
}

/// Bait effects resolved for the current zone and ocean state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaitEffect {
    bait: BaitId,
    ocean: OceanState,
}

impl BaitEffect {
    /// Effects of `bait` in `zone`; baits from another tier do nothing
    pub fn resolve(bait: BaitId, zone: ZoneId, ocean: OceanState) -> Self {
        let bait = if bait.applies_in(zone) { bait } else { BaitId::None };
        Self { bait, ocean }
    }

    pub fn bait(&self) -> BaitId {
        self.bait
    }

    pub fn weight(&self, species: &CreatureSpecies) -> f32 {
        species.chance * self.bait.weight_multiplier(species)
    }

    /// Cooldown after a spawn, at least one frame
    pub fn cooldown_frames(&self, base: u32) -> u32 {
        let bonus = self.bait.cadence_bonus(self.ocean);
        ((base as f32 / bonus).round() as u32).max(1)
    }

    pub fn spawn_batch(&self) -> usize {
        self.bait.spawn_batch()
    }
}

impl Default for BaitEffect {
    fn default() -> Self {
        Self::resolve(BaitId::None, ZoneId::Surface, OceanState::Calm)
    }
}
