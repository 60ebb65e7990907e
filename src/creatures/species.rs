//! Static creature species table.

use crate::params::{Rgb, ZoneId};

/// Read-only description of a creature kind
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureSpecies {
    /// Unique, user-facing name
    pub name: String,

    /// Spawn weight (probability mass within the zone, need not sum to 1)
    /// 0 marks the zone's boss, which is never drawn by weight
    pub chance: f32,

    /// Monetary value reported on capture
    pub value: u32,

    pub color: Rgb,

    /// Vertical sprite radius (field cells)
    pub base_size: f32,

    /// Horizontal radius = `base_size * width_ratio`
    pub width_ratio: f32,

    /// Base speed (field cells per frame)
    pub speed: f32,

    pub zone: ZoneId,
}

impl CreatureSpecies {
    pub fn new(name: &str, chance: f32, value: u32, color: Rgb, zone: ZoneId) -> Self {
        Self {
            name: name.to_string(),
            chance,
            value,
            color,
            base_size: 4.0,
            width_ratio: 2.0,
            speed: 0.5,
            zone,
        }
    }

    pub fn with_shape(mut self, base_size: f32, width_ratio: f32) -> Self {
        self.base_size = base_size;
        self.width_ratio = width_ratio;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn is_boss(&self) -> bool {
        self.chance <= 0.0
    }

    /// Sprite radii `(horizontal, vertical)`
    pub fn radii(&self) -> (f32, f32) {
        (self.base_size * self.width_ratio, self.base_size)
    }
}

/// Flat, immutable list of every species, each tagged with its zone
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: Vec<CreatureSpecies>,
}

impl SpeciesCatalog {
    pub fn new(species: Vec<CreatureSpecies>) -> Self {
        Self { species }
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CreatureSpecies> {
        self.species.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatureSpecies> {
        self.species.iter()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name == name)
    }

    /// Indices of the species a zone can draw by weight (bosses excluded)
    pub fn candidates(&self, zone: ZoneId) -> Vec<usize> {
        self.species
            .iter()
            .enumerate()
            .filter(|(_, s)| s.zone == zone && !s.is_boss())
            .map(|(i, _)| i)
            .collect()
    }

    /// The zone's boss, if it has one
    pub fn boss_for(&self, zone: ZoneId) -> Option<usize> {
        self.species
            .iter()
            .position(|s| s.zone == zone && s.is_boss())
    }
}

impl Default for CreatureSpecies {
    fn default() -> Self {
        Self::new("Sardine", 1.0, 10, Rgb::new(180, 190, 200), ZoneId::Surface)
    }
}

/// Built-in species table
pub fn default_catalog() -> SpeciesCatalog {
    use ZoneId::*;

    SpeciesCatalog::new(vec![
        // Surface
        CreatureSpecies::new("Sardine", 0.45, 10, Rgb::new(180, 190, 200), Surface)
            .with_shape(3.0, 2.2)
            .with_speed(0.9),
        CreatureSpecies::new("Mackerel", 0.25, 25, Rgb::new(70, 130, 150), Surface)
            .with_shape(4.0, 2.5)
            .with_speed(0.8),
        CreatureSpecies::new("Clownfish", 0.15, 40, Rgb::new(240, 120, 30), Surface)
            .with_shape(3.5, 1.6)
            .with_speed(0.6),
        CreatureSpecies::new("Sea Turtle", 0.08, 120, Rgb::new(60, 140, 80), Surface)
            .with_shape(7.0, 1.3)
            .with_speed(0.3),
        CreatureSpecies::new("Manta Ray", 0.05, 300, Rgb::new(40, 50, 70), Surface)
            .with_shape(9.0, 1.8)
            .with_speed(0.4),
        CreatureSpecies::new("Swordfish", 0.015, 900, Rgb::new(120, 140, 200), Surface)
            .with_shape(5.0, 3.5)
            .with_speed(1.4),
        CreatureSpecies::new("Golden Koi", 0.004, 5_000, Rgb::new(255, 200, 40), Surface)
            .with_shape(5.0, 2.0)
            .with_speed(0.7),
        CreatureSpecies::new("Ghost Whale", 0.001, 25_000, Rgb::new(220, 230, 255), Surface)
            .with_shape(16.0, 2.6)
            .with_speed(0.2),
        // Diamond pit
        CreatureSpecies::new("Crystal Shrimp", 0.5, 400, Rgb::new(180, 240, 255), DiamondPit)
            .with_shape(3.0, 1.8)
            .with_speed(1.0),
        CreatureSpecies::new("Prism Eel", 0.3, 900, Rgb::new(150, 100, 255), DiamondPit)
            .with_shape(3.0, 4.5)
            .with_speed(0.7),
        CreatureSpecies::new("Diamond Ray", 0.15, 2_500, Rgb::new(200, 255, 255), DiamondPit)
            .with_shape(9.0, 1.7)
            .with_speed(0.5),
        CreatureSpecies::new("Opal Jellyfish", 0.04, 8_000, Rgb::new(255, 150, 220), DiamondPit)
            .with_shape(7.0, 1.0)
            .with_speed(0.2),
        CreatureSpecies::new("Siren", 0.008, 40_000, Rgb::new(255, 220, 240), DiamondPit)
            .with_shape(8.0, 1.5)
            .with_speed(0.5),
        CreatureSpecies::new("Starfall Serpent", 0.0008, 250_000, Rgb::new(255, 255, 200), DiamondPit)
            .with_shape(10.0, 3.0)
            .with_speed(0.3),
        // Abyssal void
        CreatureSpecies::new("Void Leviathan", 0.0, 1_000_000, Rgb::new(150, 20, 50), AbyssalVoid)
            .with_shape(40.0, 1.6)
            .with_speed(0.02),
    ])
}
