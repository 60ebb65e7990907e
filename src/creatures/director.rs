//! Active creature set: spawning, motion and click resolution.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use noise::{NoiseFn, OpenSimplex};
use rand::Rng;

use crate::creatures::{weighted_pick, BaitEffect, CreatureSpecies, SpeciesCatalog};
use crate::events::GameEvent;
use crate::params::{SpawnConfig, ZoneId};

/// A live creature swimming in the field
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureInstance {
    pub id: u64,
    /// Index into the director's species catalog
    pub species: usize,
    /// Field coordinates (cells)
    pub position: Vec2,
    /// Swim direction (radians, 0 = +x)
    pub heading: f32,
    /// Per-instance offset into the wander noise and boss orbit
    pub phase: f32,
}

impl CreatureInstance {
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }
}

/// Zone-dependent inputs for one spawn or advance call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterConditions {
    pub zone: ZoneId,
    pub bait: BaitEffect,
    pub speed_multiplier: f32,
}

impl WaterConditions {
    pub fn new(zone: ZoneId, bait: BaitEffect, speed_multiplier: f32) -> Self {
        Self {
            zone,
            bait,
            speed_multiplier,
        }
    }
}

impl Default for WaterConditions {
    fn default() -> Self {
        Self::new(ZoneId::Surface, BaitEffect::default(), 1.0)
    }
}

/// Owns the active creature set
pub struct CreatureDirector {
    catalog: SpeciesCatalog,
    config: SpawnConfig,
    instances: Vec<CreatureInstance>,
    /// Frames left before the next spawn is allowed
    cooldown: u32,
    next_id: u64,
    frame: u64,
    field_size: Vec2,
    wander: OpenSimplex,
}

impl CreatureDirector {
    pub fn new(catalog: SpeciesCatalog, config: SpawnConfig) -> Self {
        let wander = OpenSimplex::new(config.noise_seed);
        Self {
            catalog,
            config,
            instances: Vec::new(),
            cooldown: 0,
            next_id: 1,
            frame: 0,
            field_size: Vec2::ZERO,
            wander,
        }
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn instances(&self) -> &[CreatureInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn species_of(&self, instance: &CreatureInstance) -> Option<&CreatureSpecies> {
        self.catalog.get(instance.species)
    }

    /// The boss instance, if one is swimming
    pub fn boss(&self) -> Option<&CreatureInstance> {
        self.instances.iter().find(|i| self.is_boss_instance(i))
    }

    fn is_boss_instance(&self, instance: &CreatureInstance) -> bool {
        self.species_of(instance).is_some_and(CreatureSpecies::is_boss)
    }

    fn regular_count(&self) -> usize {
        self.instances
            .iter()
            .filter(|i| !self.is_boss_instance(i))
            .count()
    }

    fn field_centre(&self) -> Vec2 {
        self.field_size * 0.5
    }

    /// Track the field size creatures swim in; a zero size pauses spawning
    pub fn resize(&mut self, width: usize, height: usize) {
        let size = Vec2::new(width as f32, height as f32);
        if width == 0 || height == 0 {
            self.field_size = Vec2::ZERO;
            return;
        }

        // Pull stragglers back into the new bounds
        for instance in &mut self.instances {
            instance.position = instance.position.clamp(Vec2::ZERO, size);
        }
        self.field_size = size;
    }

    /// Remove every creature and reset the spawn cooldown
    pub fn clear(&mut self) {
        self.instances.clear();
        self.cooldown = 0;
    }

    /// Add an instance of `species` at a fixed position
    pub fn place(&mut self, species: usize, position: Vec2, heading: f32) -> Option<u64> {
        self.catalog.get(species)?;

        let id = self.next_id;
        self.next_id += 1;
        self.instances.push(CreatureInstance {
            id,
            species,
            position,
            heading,
            phase: 0.0,
        });
        Some(id)
    }

    /// Spawn one creature for the current zone, ignoring the cooldown
    ///
    /// In a boss zone this force-spawns the boss at the field centre unless it
    /// is already present. Elsewhere the species is drawn by bait-adjusted
    /// weight and the concurrent cap applies. Returns the new instance id.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        conditions: &WaterConditions,
        rng: &mut R,
    ) -> Option<u64> {
        if self.field_size == Vec2::ZERO {
            return None;
        }

        if conditions.zone.is_boss_zone() {
            return self.spawn_boss(conditions.zone, rng);
        }

        if self.regular_count() >= self.config.max_active {
            return None;
        }

        let species = self.pick_species(conditions, rng)?;
        let position = Vec2::new(
            rng.gen_range(0.0..self.field_size.x),
            rng.gen_range(0.0..self.field_size.y),
        );
        let heading = rng.gen_range(0.0..TAU);
        let id = self.place(species, position, heading)?;

        if let Some(instance) = self.instances.last_mut() {
            instance.phase = rng.gen_range(0.0..1000.0);
        }
        log::debug!(
            "Spawned {} (#{}) at ({:.0}, {:.0})",
            self.catalog.get(species).map_or("?", |s| s.name.as_str()),
            id,
            position.x,
            position.y
        );
        Some(id)
    }

    fn spawn_boss<R: Rng + ?Sized>(&mut self, zone: ZoneId, rng: &mut R) -> Option<u64> {
        if self.boss().is_some() {
            return None;
        }
        let boss = self.catalog.boss_for(zone)?;

        let id = self.place(boss, self.field_centre(), 0.0)?;
        if let Some(instance) = self.instances.last_mut() {
            instance.phase = rng.gen_range(0.0..TAU);
        }
        log::debug!("Boss #{} rises in {}", id, zone);
        Some(id)
    }

    /// Weighted draw over the zone's species, falling back to the first
    /// species in the table when the zone has none
    fn pick_species<R: Rng + ?Sized>(
        &self,
        conditions: &WaterConditions,
        rng: &mut R,
    ) -> Option<usize> {
        let candidates = self.catalog.candidates(conditions.zone);
        if candidates.is_empty() {
            return (!self.catalog.is_empty()).then_some(0);
        }

        let weights: Vec<f32> = candidates
            .iter()
            .filter_map(|&i| self.catalog.get(i))
            .map(|species| conditions.bait.weight(species))
            .collect();

        weighted_pick(&candidates, &weights, rng).copied()
    }

    /// Run one frame: spawn cadence, then motion
    pub fn advance<R: Rng + ?Sized>(&mut self, conditions: &WaterConditions, rng: &mut R) {
        self.frame += 1;

        if conditions.zone.is_boss_zone() {
            self.spawn(conditions, rng);
        } else {
            self.cooldown = self.cooldown.saturating_sub(1);
            if self.cooldown == 0 {
                let spawned = (0..conditions.bait.spawn_batch())
                    .filter_map(|_| self.spawn(conditions, rng))
                    .count();
                if spawned > 0 {
                    self.cooldown = conditions.bait.cooldown_frames(self.config.cooldown_frames);
                }
            }
        }

        self.move_all(conditions.speed_multiplier, rng);
    }

    fn move_all<R: Rng + ?Sized>(&mut self, speed_multiplier: f32, rng: &mut R) {
        if self.field_size == Vec2::ZERO {
            return;
        }

        let time = self.frame as f32 / self.config.frames_per_second.max(1.0);
        let centre = self.field_centre();
        let margin = self.config.edge_margin;
        let (min, max) = (Vec2::splat(-margin), self.field_size + Vec2::splat(margin));

        for instance in &mut self.instances {
            let Some(species) = self.catalog.get(instance.species) else {
                continue;
            };

            if species.is_boss() {
                // Slow Lissajous drift about the centre
                let t = self.frame as f32 * species.speed * speed_multiplier + instance.phase;
                let offset = Vec2::new(t.sin(), (t * 2.0).sin() * 0.5);
                instance.position = centre + offset * self.config.boss_orbit_radius;
                continue;
            }

            let wobble = self.wander.get([
                instance.phase as f64,
                (time * self.config.wander_rate) as f64,
            ]) as f32;
            instance.heading += wobble * self.config.wander_turn_rad;

            let velocity = instance.direction() * species.speed * speed_multiplier;
            instance.position += velocity;

            let p = instance.position;
            let heads_out = |dir: Vec2| {
                (p.x < min.x && dir.x < 0.0)
                    || (p.x > max.x && dir.x > 0.0)
                    || (p.y < min.y && dir.y < 0.0)
                    || (p.y > max.y && dir.y > 0.0)
            };
            if heads_out(velocity) {
                let jitter = self.config.bounce_jitter_rad;
                let perturbation = if jitter > 0.0 {
                    rng.gen_range(-jitter..=jitter)
                } else {
                    0.0
                };
                let mut heading = instance.heading + PI + perturbation;
                // A grazing exit can be jittered back outward; fall back to the plain half-turn
                if heads_out(Vec2::from_angle(heading)) {
                    heading = instance.heading + PI;
                }
                instance.heading = heading.rem_euclid(TAU);
            }
        }
    }

    /// Resolve a primary action at `point` (field coordinates)
    ///
    /// The first instance in list order within its species' hit radius wins.
    /// A regular creature is removed and reported as a capture; the boss stays
    /// and reports a hit. A miss changes nothing.
    pub fn hit_test(&mut self, point: Vec2) -> Option<GameEvent> {
        let index = self.instances.iter().position(|instance| {
            self.catalog.get(instance.species).is_some_and(|species| {
                instance.position.distance(point) < self.config.hit_radius(species.base_size)
            })
        })?;

        let species = self.catalog.get(self.instances[index].species)?;
        if species.is_boss() {
            return Some(GameEvent::BossHit);
        }

        let event = GameEvent::Capture {
            species_name: species.name.clone(),
            value: species.value,
            spawn_chance: species.chance,
        };
        self.instances.remove(index);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::{default_catalog, BaitId};
    use crate::params::{OceanState, Rgb};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn director(width: usize, height: usize) -> CreatureDirector {
        let mut director = CreatureDirector::new(default_catalog(), SpawnConfig::default());
        director.resize(width, height);
        director
    }

    fn surface() -> WaterConditions {
        WaterConditions::default()
    }

    fn abyss() -> WaterConditions {
        WaterConditions::new(ZoneId::AbyssalVoid, BaitEffect::default(), 1.0)
    }

    fn still_config() -> SpawnConfig {
        SpawnConfig {
            wander_turn_rad: 0.0,
            bounce_jitter_rad: 0.0,
            ..SpawnConfig::default()
        }
    }

    #[test]
    fn test_click_on_creature_captures_it() {
        let mut director = director(100, 100);
        let koi = director.catalog().find("Golden Koi").unwrap();
        director.place(koi, Vec2::new(10.0, 10.0), 0.0);
        director.place(0, Vec2::new(80.0, 80.0), 0.0);

        let event = director.hit_test(Vec2::new(11.0, 10.0));
        assert_eq!(
            event,
            Some(GameEvent::Capture {
                species_name: "Golden Koi".into(),
                value: 5_000,
                spawn_chance: 0.004,
            })
        );
        assert_eq!(director.len(), 1);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut director = director(100, 100);
        director.place(0, Vec2::new(10.0, 10.0), 0.0);
        let before = director.instances().to_vec();

        assert_eq!(director.hit_test(Vec2::new(60.0, 60.0)), None);
        assert_eq!(director.hit_test(Vec2::new(-1e9, f32::NAN)), None);
        assert_eq!(director.instances(), &before[..]);

        director.clear();
        assert_eq!(director.hit_test(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_tiny_species_keep_a_minimum_hit_radius() {
        let catalog = SpeciesCatalog::new(vec![
            CreatureSpecies::new("Krill", 1.0, 1, Rgb::new(255, 0, 0), ZoneId::Surface)
                .with_shape(0.5, 1.0),
        ]);
        let mut director = CreatureDirector::new(catalog, SpawnConfig::default());
        director.resize(50, 50);
        director.place(0, Vec2::new(20.0, 20.0), 0.0);

        assert!(director.hit_test(Vec2::new(23.5, 20.0)).is_some());
    }

    #[test]
    fn test_first_in_list_order_wins() {
        let mut director = director(100, 100);
        let first = director.place(1, Vec2::new(30.0, 30.0), 0.0).unwrap();
        let second = director.place(0, Vec2::new(31.0, 30.0), 0.0).unwrap();

        let event = director.hit_test(Vec2::new(31.0, 30.0));
        assert!(matches!(event, Some(GameEvent::Capture { ref species_name, .. }) if species_name == "Mackerel"));
        assert_eq!(director.instances()[0].id, second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_boss_spawns_once_at_centre() {
        let mut director = director(120, 80);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(director.spawn(&abyss(), &mut rng).is_some());
        assert_eq!(director.len(), 1);
        let boss = director.boss().unwrap();
        assert_eq!(boss.position, Vec2::new(60.0, 40.0));

        assert!(director.spawn(&abyss(), &mut rng).is_none());
        for _ in 0..500 {
            director.advance(&abyss(), &mut rng);
        }
        assert_eq!(director.len(), 1);
    }

    #[test]
    fn test_boss_hit_keeps_the_boss() {
        let mut director = director(120, 80);
        let mut rng = StdRng::seed_from_u64(2);
        director.spawn(&abyss(), &mut rng);

        let position = director.boss().unwrap().position;
        assert_eq!(director.hit_test(position), Some(GameEvent::BossHit));
        assert_eq!(director.hit_test(position), Some(GameEvent::BossHit));
        assert_eq!(director.len(), 1);
    }

    #[test]
    fn test_boss_orbits_near_centre() {
        let mut director = director(200, 200);
        let mut rng = StdRng::seed_from_u64(3);
        let radius = director.config().boss_orbit_radius;

        for _ in 0..600 {
            director.advance(&abyss(), &mut rng);
            let boss = director.boss().unwrap();
            assert!(boss.position.distance(Vec2::new(100.0, 100.0)) <= radius * 1.2);
        }
    }

    #[test]
    fn test_spawning_respects_cap_and_cooldown() {
        let config = SpawnConfig {
            cooldown_frames: 10,
            max_active: 5,
            ..SpawnConfig::default()
        };
        let mut director = CreatureDirector::new(default_catalog(), config);
        director.resize(160, 90);
        let mut rng = StdRng::seed_from_u64(4);

        director.advance(&surface(), &mut rng);
        assert_eq!(director.len(), 1);
        for _ in 0..9 {
            director.advance(&surface(), &mut rng);
        }
        assert_eq!(director.len(), 1);
        director.advance(&surface(), &mut rng);
        assert_eq!(director.len(), 2);

        for _ in 0..500 {
            director.advance(&surface(), &mut rng);
            assert!(director.len() <= 5);
        }
        assert_eq!(director.len(), 5);
    }

    #[test]
    fn test_spawned_species_belong_to_the_zone() {
        let mut director = director(160, 90);
        let mut rng = StdRng::seed_from_u64(5);
        let pit = WaterConditions::new(ZoneId::DiamondPit, BaitEffect::default(), 1.0);

        for _ in 0..8 {
            director.spawn(&pit, &mut rng);
        }
        assert_eq!(director.len(), 8);
        for instance in director.instances() {
            assert_eq!(director.species_of(instance).unwrap().zone, ZoneId::DiamondPit);
        }
    }

    #[test]
    fn test_fermented_bait_spawns_pairs() {
        let mut director = director(160, 90);
        let mut rng = StdRng::seed_from_u64(6);
        let bait = BaitEffect::resolve(BaitId::Fermented, ZoneId::Surface, OceanState::Calm);
        let conditions = WaterConditions::new(ZoneId::Surface, bait, 1.0);

        director.advance(&conditions, &mut rng);
        assert_eq!(director.len(), 2);
    }

    #[test]
    fn test_empty_catalog_is_inert() {
        let mut director = CreatureDirector::new(SpeciesCatalog::default(), SpawnConfig::default());
        director.resize(64, 64);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(director.spawn(&surface(), &mut rng), None);
        assert_eq!(director.spawn(&abyss(), &mut rng), None);
        director.advance(&surface(), &mut rng);
        assert!(director.is_empty());
        assert_eq!(director.hit_test(Vec2::new(32.0, 32.0)), None);
    }

    #[test]
    fn test_boss_zone_without_boss_stays_empty() {
        let catalog = SpeciesCatalog::new(vec![
            CreatureSpecies::new("Lone Carp", 0.5, 3, Rgb::new(9, 9, 9), ZoneId::Surface),
        ]);
        let mut director = CreatureDirector::new(catalog, SpawnConfig::default());
        director.resize(64, 64);
        let mut rng = StdRng::seed_from_u64(10);

        for _ in 0..600 {
            director.advance(&abyss(), &mut rng);
        }
        assert!(director.is_empty());
        assert_eq!(director.spawn(&abyss(), &mut rng), None);
    }

    #[test]
    fn test_zone_without_species_falls_back_to_first_entry() {
        let catalog = SpeciesCatalog::new(vec![
            CreatureSpecies::new("Lone Carp", 0.5, 3, Rgb::new(9, 9, 9), ZoneId::Surface),
        ]);
        let mut director = CreatureDirector::new(catalog, SpawnConfig::default());
        director.resize(64, 64);
        let mut rng = StdRng::seed_from_u64(8);
        let pit = WaterConditions::new(ZoneId::DiamondPit, BaitEffect::default(), 1.0);

        assert!(director.spawn(&pit, &mut rng).is_some());
        assert_eq!(director.instances()[0].species, 0);
    }

    #[test]
    fn test_zero_size_field_does_not_spawn() {
        let mut director = director(0, 0);
        let mut rng = StdRng::seed_from_u64(9);
        director.advance(&surface(), &mut rng);
        director.advance(&abyss(), &mut rng);
        assert!(director.is_empty());
    }

    #[test]
    fn test_motion_scales_with_zone_speed() {
        let mut director = CreatureDirector::new(default_catalog(), still_config());
        director.resize(200, 200);
        let mut rng = StdRng::seed_from_u64(10);
        let id = director.place(0, Vec2::new(100.0, 100.0), 0.0).unwrap();
        let speed = director.catalog().get(0).unwrap().speed;

        let conditions = WaterConditions::new(ZoneId::Surface, BaitEffect::default(), 2.0);
        director.advance(&conditions, &mut rng);

        let moved = director.instances().iter().find(|i| i.id == id).unwrap();
        assert!((moved.position.x - (100.0 + 2.0 * speed)).abs() < 1e-4);
        assert!((moved.position.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_creatures_bounce_back_at_the_edge() {
        let mut director = CreatureDirector::new(default_catalog(), still_config());
        director.resize(100, 100);
        let mut rng = StdRng::seed_from_u64(11);
        let margin = director.config().edge_margin;
        let id = director
            .place(0, Vec2::new(100.0 + margin + 0.5, 50.0), 0.0)
            .unwrap();

        let find = |d: &CreatureDirector| d.instances().iter().find(|i| i.id == id).cloned().unwrap();

        director.advance(&surface(), &mut rng);
        let bounced = find(&director);
        assert!(bounced.direction().x < 0.0);

        // Heads back inside instead of oscillating at the margin
        for _ in 0..20 {
            director.advance(&surface(), &mut rng);
        }
        assert!(find(&director).position.x < bounced.position.x);
    }

    #[test]
    fn test_wandering_creatures_stay_near_the_field() {
        let mut director = director(120, 80);
        let mut rng = StdRng::seed_from_u64(12);
        let margin = director.config().edge_margin + 2.0;

        for _ in 0..3_000 {
            director.advance(&surface(), &mut rng);
        }
        assert!(!director.is_empty());
        for instance in director.instances() {
            let p = instance.position;
            assert!(p.x > -margin && p.x < 120.0 + margin, "x = {}", p.x);
            assert!(p.y > -margin && p.y < 80.0 + margin, "y = {}", p.y);
        }
    }

    #[test]
    fn test_clear_resets_cooldown() {
        let mut director = director(100, 100);
        let mut rng = StdRng::seed_from_u64(13);
        director.advance(&surface(), &mut rng);
        assert!(director.cooldown() > 0);

        director.clear();
        assert!(director.is_empty());
        assert_eq!(director.cooldown(), 0);
    }
}
