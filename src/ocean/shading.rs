//! Gradient shading of the height field into an RGBA pixel buffer.

use crate::ocean::WaveField;
use crate::params::{RenderConfig, Rgb};

/// RGBA8 pixel buffer, row-major, one pixel per field cell
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut frame = Self::default();
        frame.resize(width, height);
        frame
    }

    /// Reallocate for a new size (opaque black)
    pub fn resize(&mut self, width: usize, height: usize) {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 255]; width * height];
    }

    /// True when the buffer has zero area and nothing should be drawn
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Raw bytes for texture upload or image encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Water base colour, eased toward the zone colour every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    color: [f32; 3],
}

impl Tint {
    pub fn new(color: Rgb) -> Self {
        Self {
            color: color.to_array(),
        }
    }

    /// `color += (target - color) * easing`
    pub fn ease_toward(&mut self, target: Rgb, easing: f32) {
        let target = target.to_array();
        let easing = easing.clamp(0.0, 1.0);
        for (channel, goal) in self.color.iter_mut().zip(target) {
            *channel += (goal - *channel) * easing;
        }
    }

    pub fn channels(&self) -> [f32; 3] {
        self.color
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::from_array(self.color)
    }
}

/// Fill `frame` from the field's height gradient
///
/// `shade = left - right (+ up - down)`, each channel is
/// `clamp(tint + shade + bias, 0, 255)`. Neighbours outside the grid count
/// as height 0. `frame` must already match the field size.
pub fn shade_field(field: &WaveField, tint: &Tint, config: &RenderConfig, frame: &mut FrameBuffer) {
    let (width, height) = (field.width(), field.height());
    if frame.is_empty() || frame.width() != width || frame.height() != height {
        return;
    }

    let heights = field.current();
    let at = |x: usize, y: usize| heights[y * width + x] as i32;
    let base = tint.channels().map(|c| c.round() as i32);
    let bias = config.channel_bias;

    for (y, row) in frame.pixels_mut().chunks_exact_mut(width).enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            let left = if x > 0 { at(x - 1, y) } else { 0 };
            let right = if x + 1 < width { at(x + 1, y) } else { 0 };
            let mut shade = left - right;

            if config.vertical_gradient {
                let up = if y > 0 { at(x, y - 1) } else { 0 };
                let down = if y + 1 < height { at(x, y + 1) } else { 0 };
                shade += up - down;
            }

            for channel in 0..3 {
                pixel[channel] = (base[channel] + shade + bias[channel]).clamp(0, 255) as u8;
            }
            pixel[3] = 255;
        }
    }
}
