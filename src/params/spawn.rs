//! Creature spawn cadence, motion and hit-test parameters.

/// Creature director tuning
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    /// Maximum concurrent non-boss creatures
    pub max_active: usize,

    /// Frames between spawns once the cooldown has elapsed
    pub cooldown_frames: u32,

    /// Distance past the field edge before a creature turns back (cells)
    pub edge_margin: f32,

    /// Random perturbation added to the half-turn on bounce (radians, ±)
    pub bounce_jitter_rad: f32,

    /// Hit radius as a multiple of the species' base size
    pub hit_radius_scale: f32,

    /// Smallest hit radius so tiny species stay clickable (cells)
    pub min_hit_radius: f32,

    /// Maximum heading change per frame from the wander noise (radians)
    pub wander_turn_rad: f32,

    /// How fast the wander noise evolves (noise units per second)
    pub wander_rate: f32,

    /// Radius of the boss's drift around the field centre (cells)
    pub boss_orbit_radius: f32,

    /// Simulation frames per second, used to turn frame counts into time
    pub frames_per_second: f32,

    /// Seed of the wander noise
    pub noise_seed: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_active: 8,
            cooldown_frames: 90, // 1.5 s at 60 FPS
            edge_margin: 8.0,
            bounce_jitter_rad: 0.35,
            hit_radius_scale: 1.5,
            min_hit_radius: 4.0,
            wander_turn_rad: 0.04,
            wander_rate: 0.5,
            boss_orbit_radius: 12.0,
            frames_per_second: 60.0,
            noise_seed: 42,
        }
    }
}

impl SpawnConfig {
    /// Click radius for a creature of the given base size
    pub fn hit_radius(&self, base_size: f32) -> f32 {
        (base_size * self.hit_radius_scale).max(self.min_hit_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_radius_has_a_floor() {
        let config = SpawnConfig::default();
        assert_eq!(config.hit_radius(1.0), 4.0);
        assert_eq!(config.hit_radius(10.0), 15.0);
    }
}
