//! Zones, ocean states and the per-zone wave/creature constants derived from them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::render::Rgb;

/// Error returned when a zone, bait or ocean state name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} name '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// Lowercase, `-`-separated form used for name matching
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

/// Gameplay area with its own species table, tint and wave constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneId {
    #[default]
    Surface,
    DiamondPit,
    /// Boss zone: creatures are never drawn by weight here
    AbyssalVoid,
}

impl ZoneId {
    pub const ALL: [ZoneId; 3] = [ZoneId::Surface, ZoneId::DiamondPit, ZoneId::AbyssalVoid];

    pub fn is_boss_zone(self) -> bool {
        matches!(self, ZoneId::AbyssalVoid)
    }

    /// Shop tier of the zone (baits only work in the zone of their tier)
    pub fn tier(self) -> u8 {
        match self {
            ZoneId::Surface => 1,
            ZoneId::DiamondPit => 2,
            ZoneId::AbyssalVoid => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ZoneId::Surface => ZoneId::DiamondPit,
            ZoneId::DiamondPit => ZoneId::AbyssalVoid,
            ZoneId::AbyssalVoid => ZoneId::Surface,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoneId::Surface => "surface",
            ZoneId::DiamondPit => "diamond-pit",
            ZoneId::AbyssalVoid => "abyssal-void",
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoneId {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        ZoneId::ALL
            .into_iter()
            .find(|zone| zone.name() == wanted)
            .ok_or_else(|| UnknownName::new("zone", s))
    }
}

/// Weather/encounter state of the ocean, supplied by the game layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OceanState {
    #[default]
    Calm,
    Stormy,
    Clear,
    BossBattle,
}

impl OceanState {
    pub const ALL: [OceanState; 4] = [
        OceanState::Calm,
        OceanState::Stormy,
        OceanState::Clear,
        OceanState::BossBattle,
    ];

    pub fn next(self) -> Self {
        match self {
            OceanState::Calm => OceanState::Stormy,
            OceanState::Stormy => OceanState::Clear,
            OceanState::Clear => OceanState::BossBattle,
            OceanState::BossBattle => OceanState::Calm,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OceanState::Calm => "calm",
            OceanState::Stormy => "stormy",
            OceanState::Clear => "clear",
            OceanState::BossBattle => "boss-battle",
        }
    }
}

impl fmt::Display for OceanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OceanState {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        OceanState::ALL
            .into_iter()
            .find(|state| state.name() == wanted)
            .ok_or_else(|| UnknownName::new("ocean state", s))
    }
}

/// Per-zone wave and creature constants
///
/// Pure derived data: recomputed from `(ZoneId, OceanState)` whenever either
/// changes, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneConfig {
    /// Target water colour the renderer eases toward
    pub tint: Rgb,

    /// Shift amount of the per-step decay (`next -= next >> decay_shift`)
    /// Larger = slower decay, always >= 1
    pub decay_shift: u32,

    /// Multiplier on `WavePhysics::pointer_strength`
    pub ripple_strength: f32,

    /// Probability per frame of one ambient ripple (0-1)
    pub ambient_chance: f64,

    /// Multiplier on every creature's base speed
    pub speed_multiplier: f32,
}

impl ZoneConfig {
    /// Derive the constants for a zone under the given ocean state
    pub fn derive(zone: ZoneId, state: OceanState) -> Self {
        let base = match zone {
            ZoneId::Surface => Self {
                tint: Rgb::new(5, 25, 60), // Deep ocean blue
                decay_shift: 5,
                ripple_strength: 1.0,
                ambient_chance: 0.02,
                speed_multiplier: 1.0,
            },
            ZoneId::DiamondPit => Self {
                tint: Rgb::new(10, 45, 75),
                decay_shift: 6, // Ripples linger in the pit
                ripple_strength: 1.15,
                ambient_chance: 0.04,
                speed_multiplier: 1.25,
            },
            ZoneId::AbyssalVoid => Self {
                tint: Rgb::new(3, 5, 18),
                decay_shift: 4,
                ripple_strength: 0.8,
                ambient_chance: 0.06,
                speed_multiplier: 0.6,
            },
        };

        let derived = match state {
            OceanState::Calm => Self {
                ambient_chance: base.ambient_chance * 0.5,
                speed_multiplier: base.speed_multiplier * 0.9,
                ..base
            },
            OceanState::Stormy => Self {
                tint: base.tint.scaled(0.7),
                ripple_strength: base.ripple_strength * 1.5,
                ambient_chance: base.ambient_chance * 4.0,
                speed_multiplier: base.speed_multiplier * 1.4,
                ..base
            },
            OceanState::Clear => Self {
                tint: base.tint.offset(12),
                ambient_chance: base.ambient_chance * 0.75,
                ..base
            },
            OceanState::BossBattle => Self {
                tint: base.tint.lerp(Rgb::new(40, 4, 12), 0.5),
                ripple_strength: base.ripple_strength * 1.25,
                ambient_chance: base.ambient_chance.max(0.12),
                speed_multiplier: base.speed_multiplier * 0.8,
                ..base
            },
        };

        Self {
            decay_shift: derived.decay_shift.max(1),
            ambient_chance: derived.ambient_chance.clamp(0.0, 1.0),
            ..derived
        }
    }
}
