//! Host-facing simulation object.
//!
//! The host owns one `Simulation`, forwards pointer input and state changes
//! to it, and calls `step` once per display refresh. Inputs are plain
//! setters; the derived zone constants are recomputed lazily at the start of
//! the next frame.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::creatures::{
    default_catalog, BaitEffect, BaitId, CreatureDirector, SpeciesCatalog, WaterConditions,
};
use crate::events::GameEvent;
use crate::ocean::FrameBuffer;
use crate::params::{OceanState, RenderConfig, SpawnConfig, WavePhysics, ZoneConfig, ZoneId};
use crate::scene::SceneRenderer;

/// Everything needed to start a simulation
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub physics: WavePhysics,
    pub spawn: SpawnConfig,
    pub render: RenderConfig,
    pub catalog: SpeciesCatalog,
    pub zone: ZoneId,
    pub bait: BaitId,
    pub ocean: OceanState,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            physics: WavePhysics::default(),
            spawn: SpawnConfig::default(),
            render: RenderConfig::default(),
            catalog: default_catalog(),
            zone: ZoneId::default(),
            bait: BaitId::default(),
            ocean: OceanState::default(),
            seed: None,
        }
    }
}

/// Constants derived from zone, bait and ocean state
#[derive(Debug, Clone, Copy)]
struct Derived {
    zone: ZoneConfig,
    conditions: WaterConditions,
}

pub struct Simulation {
    scene: SceneRenderer,
    rng: StdRng,
    zone: ZoneId,
    bait: BaitId,
    ocean: OceanState,
    boss_health: f32,
    derived: Option<Derived>,
    display_size: (u32, u32),
    disposed: bool,
}

impl Simulation {
    pub fn init(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let initial = ZoneConfig::derive(config.zone, config.ocean);
        let director = CreatureDirector::new(config.catalog, config.spawn);
        let scene = SceneRenderer::new(config.physics, config.render, director, initial.tint);

        log::debug!(
            "Simulation initialized in {} ({} bait, {} ocean)",
            config.zone,
            config.bait,
            config.ocean
        );

        Self {
            scene,
            rng,
            zone: config.zone,
            bait: config.bait,
            ocean: config.ocean,
            boss_health: 1.0,
            derived: None,
            display_size: (0, 0),
            disposed: false,
        }
    }

    /// Track a new display size; the field is reallocated at
    /// `display / resolution_divisor`
    pub fn resize(&mut self, display_width: u32, display_height: u32) {
        if self.disposed {
            return;
        }
        self.display_size = (display_width, display_height);
        let (width, height) = self
            .scene
            .physics()
            .field_size(display_width, display_height);
        self.scene.resize(width, height);
    }

    /// Moderate ripple under the pointer; never a hit-test
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(point) = self.to_field(x, y) else {
            return;
        };
        let strength = self.pointer_strength(1);
        self.scene.field_mut().inject(point.x, point.y, strength);
    }

    /// Strong ripple plus a hit-test against active creatures
    pub fn pointer_primary(&mut self, x: f32, y: f32) -> Option<GameEvent> {
        let point = self.to_field(x, y)?;
        let multiplier = self.scene.physics().primary_multiplier;
        let strength = self.pointer_strength(multiplier);
        self.scene.field_mut().inject(point.x, point.y, strength);

        let event = self.scene.director_mut().hit_test(point);
        if let Some(GameEvent::Capture {
            species_name,
            value,
            ..
        }) = &event
        {
            log::debug!("Caught {} worth {}", species_name, value);
        }
        event
    }

    /// Switch zone; creatures from the old zone are released
    pub fn set_zone(&mut self, zone: ZoneId) {
        if zone == self.zone {
            return;
        }
        log::info!("Zone: {} -> {}", self.zone, zone);
        self.zone = zone;
        self.derived = None;
        self.scene.director_mut().clear();
    }

    pub fn set_bait(&mut self, bait: BaitId) {
        if bait == self.bait {
            return;
        }
        log::info!("Bait: {}", bait);
        self.bait = bait;
        self.derived = None;
    }

    pub fn set_ocean_state(&mut self, ocean: OceanState) {
        if ocean == self.ocean {
            return;
        }
        log::info!("Ocean: {}", ocean);
        self.ocean = ocean;
        self.derived = None;
    }

    /// Remaining boss health as a fraction of full (clamped to 0-1)
    pub fn set_boss_health(&mut self, fraction: f32) {
        self.boss_health = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
    }

    /// Derived zone constants, recomputed if an input changed
    pub fn zone_config(&mut self) -> ZoneConfig {
        self.derived().zone
    }

    fn derived(&mut self) -> Derived {
        if let Some(derived) = self.derived {
            return derived;
        }

        let zone = ZoneConfig::derive(self.zone, self.ocean);
        let bait = BaitEffect::resolve(self.bait, self.zone, self.ocean);
        if self.bait != BaitId::None && bait.bait() == BaitId::None {
            log::warn!("Bait {} has no effect in {}", self.bait, self.zone);
        }
        let derived = Derived {
            zone,
            conditions: WaterConditions::new(self.zone, bait, zone.speed_multiplier),
        };
        self.derived = Some(derived);
        derived
    }

    /// Advance one frame and return the finished pixel buffer
    ///
    /// `None` while the display has zero area or after `dispose`.
    pub fn step(&mut self) -> Option<&FrameBuffer> {
        if self.disposed {
            return None;
        }
        let derived = self.derived();
        self.scene.render(
            &derived.zone,
            &derived.conditions,
            self.boss_health,
            &mut self.rng,
        )
    }

    /// Release every buffer; later calls become no-ops
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scene.resize(0, 0);
        self.scene.director_mut().clear();
        self.disposed = true;
        log::debug!("Simulation disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    pub fn bait(&self) -> BaitId {
        self.bait
    }

    pub fn ocean_state(&self) -> OceanState {
        self.ocean
    }

    pub fn boss_health(&self) -> f32 {
        self.boss_health
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.display_size
    }

    pub fn scene(&self) -> &SceneRenderer {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneRenderer {
        &mut self.scene
    }

    fn pointer_strength(&mut self, multiplier: i32) -> f32 {
        let ripple = self.zone_config().ripple_strength;
        (self.scene.physics().pointer_strength * multiplier) as f32 * ripple
    }

    /// Field cells back to display pixels
    pub fn display_point(&self, field_point: Vec2) -> Option<Vec2> {
        let (display_width, display_height) = self.display_size;
        let field = self.scene.field();
        if !field.is_ready() {
            return None;
        }

        Some(Vec2::new(
            field_point.x / field.width() as f32 * display_width as f32,
            field_point.y / field.height() as f32 * display_height as f32,
        ))
    }

    /// Display pixels to field cells
    fn to_field(&self, x: f32, y: f32) -> Option<Vec2> {
        let (display_width, display_height) = self.display_size;
        let field = self.scene.field();
        if self.disposed || display_width == 0 || display_height == 0 || !field.is_ready() {
            return None;
        }

        Some(Vec2::new(
            x / display_width as f32 * field.width() as f32,
            y / display_height as f32 * field.height() as f32,
        ))
    }
}
