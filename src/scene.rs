//! Per-frame pipeline: wave step, ambient ripples, creatures, shading, sprites.

use glam::Vec2;
use rand::Rng;

use crate::creatures::{CreatureDirector, WaterConditions};
use crate::ocean::{shade_field, FrameBuffer, Tint, WaveField};
use crate::params::{RenderConfig, Rgb, WavePhysics, ZoneConfig};

/// Owns the wave field, the creature director and the pixel buffer they are drawn into
pub struct SceneRenderer {
    field: WaveField,
    director: CreatureDirector,
    frame: FrameBuffer,
    tint: Tint,
    physics: WavePhysics,
    config: RenderConfig,
}

impl SceneRenderer {
    pub fn new(
        physics: WavePhysics,
        config: RenderConfig,
        director: CreatureDirector,
        initial_tint: Rgb,
    ) -> Self {
        Self {
            field: WaveField::new(physics.inject_radius),
            director,
            frame: FrameBuffer::default(),
            tint: Tint::new(initial_tint),
            physics,
            config,
        }
    }

    /// Reinitialize every buffer for a new field size
    ///
    /// Safe to call repeatedly; each call fully replaces field and frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.field.resize(width, height);
        self.frame.resize(width, height);
        self.director.resize(width, height);
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut WaveField {
        &mut self.field
    }

    pub fn director(&self) -> &CreatureDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut CreatureDirector {
        &mut self.director
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn tint(&self) -> &Tint {
        &self.tint
    }

    pub fn physics(&self) -> &WavePhysics {
        &self.physics
    }

    /// Produce one frame
    ///
    /// Returns `None` (and does no work) while the buffer has zero area.
    pub fn render<R: Rng + ?Sized>(
        &mut self,
        zone: &ZoneConfig,
        conditions: &WaterConditions,
        boss_health: f32,
        rng: &mut R,
    ) -> Option<&FrameBuffer> {
        if self.frame.is_empty() || !self.field.is_ready() {
            return None;
        }

        self.field.step(zone.decay_shift);
        self.ambient_ripple(zone, rng);
        self.director.advance(conditions, rng);

        self.tint.ease_toward(zone.tint, self.config.tint_easing);
        shade_field(&self.field, &self.tint, &self.config, &mut self.frame);
        self.draw_creatures(boss_health);

        Some(&self.frame)
    }

    /// Bernoulli trial per frame: one weak ripple at a random cell
    fn ambient_ripple<R: Rng + ?Sized>(&mut self, zone: &ZoneConfig, rng: &mut R) {
        let chance = zone.ambient_chance;
        if chance.is_nan() || chance <= 0.0 || !rng.gen_bool(chance.min(1.0)) {
            return;
        }

        let x = rng.gen_range(0.0..self.field.width() as f32);
        let y = rng.gen_range(0.0..self.field.height() as f32);
        let strength = self.physics.pointer_strength as f32
            * self.physics.ambient_strength_factor
            * zone.ripple_strength;
        self.field.inject(x, y, strength);
    }

    fn draw_creatures(&mut self, boss_health: f32) {
        let boss_alpha = self.config.boss_alpha_for(boss_health);

        for instance in self.director.instances() {
            let Some(species) = self.director.species_of(instance) else {
                continue;
            };
            let modifier = if species.is_boss() { boss_alpha } else { 1.0 };
            let (rx, ry) = species.radii();

            composite_sprite(
                &mut self.frame,
                instance.position,
                Vec2::new(rx, ry),
                species.color,
                self.config.sprite_alpha * modifier,
            );
        }
    }
}

/// Blend a soft elliptical sprite into `frame`
///
/// Pixels with `dx²/rx² + dy²/ry² <= 1` get
/// `out = pixel * (1 - a) + color * a` where `a = (1 - nd) * peak_alpha`.
/// Parts outside the frame are clipped.
pub fn composite_sprite(
    frame: &mut FrameBuffer,
    centre: Vec2,
    radii: Vec2,
    color: Rgb,
    peak_alpha: f32,
) {
    if frame.is_empty() || radii.x <= 0.0 || radii.y <= 0.0 || !centre.is_finite() {
        return;
    }

    let (width, height) = (frame.width() as i64, frame.height() as i64);
    let x0 = ((centre.x - radii.x).floor() as i64).max(0);
    let x1 = ((centre.x + radii.x).ceil() as i64).min(width - 1);
    let y0 = ((centre.y - radii.y).floor() as i64).max(0);
    let y1 = ((centre.y + radii.y).ceil() as i64).min(height - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let color = color.to_array();
    let pixels = frame.pixels_mut();

    for y in y0..=y1 {
        let dy = (y as f32 - centre.y) / radii.y;
        for x in x0..=x1 {
            let dx = (x as f32 - centre.x) / radii.x;
            let nd = dx * dx + dy * dy;
            if nd > 1.0 {
                continue;
            }

            let alpha = ((1.0 - nd) * peak_alpha).clamp(0.0, 1.0);
            let pixel = &mut pixels[(y * width + x) as usize];
            for channel in 0..3 {
                let blended = pixel[channel] as f32 * (1.0 - alpha) + color[channel] * alpha;
                pixel[channel] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
