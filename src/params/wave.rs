//! Height-field resolution and ripple injection parameters.

/// Wave field sizing and pointer ripple parameters
#[derive(Debug, Clone)]
pub struct WavePhysics {
    /// Display pixels per field cell along each axis (2 = half resolution)
    pub resolution_divisor: u32,

    /// Impulse magnitude written by a pointer move (height units)
    /// Scaled by the zone's ripple strength factor before injection
    pub pointer_strength: i32,

    /// Multiplier applied to `pointer_strength` for a primary action (click/tap)
    pub primary_multiplier: i32,

    /// Fraction of the zone ripple strength used by ambient ripples
    pub ambient_strength_factor: f32,

    /// Half-width of the square injection neighbourhood (cells, 0 = single cell)
    pub inject_radius: i32,
}

impl Default for WavePhysics {
    fn default() -> Self {
        Self {
            resolution_divisor: 2, // Halved for performance, shown pixelated
            pointer_strength: 512,
            primary_multiplier: 3,
            ambient_strength_factor: 0.5,
            inject_radius: 3,
        }
    }
}

impl WavePhysics {
    /// Field dimensions for a display of the given size (0 for degenerate sizes)
    pub fn field_size(&self, display_width: u32, display_height: u32) -> (usize, usize) {
        let divisor = self.resolution_divisor.max(1);
        (
            (display_width / divisor) as usize,
            (display_height / divisor) as usize,
        )
    }
}
