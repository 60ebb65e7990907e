//! Rendering, colour and recording configuration.

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    pub fn from_array(channels: [f32; 3]) -> Self {
        let [r, g, b] = channels.map(|c| c.round().clamp(0.0, 255.0) as u8);
        Self { r, g, b }
    }

    /// Multiply every channel (saturating)
    pub fn scaled(self, factor: f32) -> Self {
        Self::from_array(self.to_array().map(|c| c * factor))
    }

    /// Add the same amount to every channel (saturating)
    pub fn offset(self, amount: i32) -> Self {
        Self::from_array(self.to_array().map(|c| c + amount as f32))
    }

    /// Linear blend toward `other` (`t` = 0 keeps self, 1 gives other)
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        let a = self.to_array();
        let b = other.to_array();
        Self::from_array([0, 1, 2].map(|i| a[i] + (b[i] - a[i]) * t))
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Fraction of the remaining distance the tint moves toward the zone colour per frame
    pub tint_easing: f32,

    /// Constant added per channel after shading (R, G, B)
    pub channel_bias: [i32; 3],

    /// Include the vertical gradient (`up - down`) in the shade term
    pub vertical_gradient: bool,

    /// Peak sprite opacity at the ellipse centre (0-1)
    pub sprite_alpha: f32,

    /// Extra opacity multiplier for the boss sprite (0-1)
    pub boss_alpha: f32,

    /// Boss opacity fraction kept when its health reaches zero (0-1)
    pub boss_min_alpha_fraction: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            tint_easing: 0.05,
            channel_bias: [0, 5, 20], // Lifts green/blue for the water look
            vertical_gradient: true,
            sprite_alpha: 0.8,
            boss_alpha: 0.9,
            boss_min_alpha_fraction: 0.35,
        }
    }
}

impl RenderConfig {
    /// Boss opacity multiplier for a remaining health fraction
    pub fn boss_alpha_for(&self, health_fraction: f32) -> f32 {
        let fraction = health_fraction.clamp(0.0, 1.0);
        let min = self.boss_min_alpha_fraction.clamp(0.0, 1.0);
        self.boss_alpha * (min + (1.0 - min) * fraction)
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs.max(0.0) * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Path of a single captured frame
    pub fn frame_path(&self, frame_num: usize) -> String {
        format!("{}/frame_{:05}.png", self.frames_dir(), frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_helpers_saturate() {
        assert_eq!(Rgb::new(250, 10, 0).offset(12), Rgb::new(255, 22, 12));
        assert_eq!(Rgb::new(100, 200, 50).scaled(0.5), Rgb::new(50, 100, 25));
        assert_eq!(
            Rgb::new(0, 0, 0).lerp(Rgb::new(100, 50, 10), 0.5),
            Rgb::new(50, 25, 5)
        );
    }

    #[test]
    fn test_boss_alpha_dims_with_health() {
        let config = RenderConfig::default();
        let full = config.boss_alpha_for(1.0);
        let empty = config.boss_alpha_for(0.0);
        assert!((full - 0.9).abs() < 1e-6);
        assert!(empty < full);
        assert!((empty - 0.9 * 0.35).abs() < 1e-6);
        assert_eq!(config.boss_alpha_for(7.0), full);
    }

    #[test]
    fn test_recording_frame_count_and_paths() {
        let config = RecordingConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert_eq!(config.frame_path(7), "recording/frames/frame_00007.png");
    }
}
