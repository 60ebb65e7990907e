//! Damped wave height field with ping-pong buffers.

/// Discrete damped wave equation over a `width × height` grid
///
/// Two same-length buffers alternate roles every step: `current` holds the
/// latest heights (impulses are written here) and `previous` the heights one
/// step older. Values are 16-bit with wrapping arithmetic.
pub struct WaveField {
    width: usize,
    height: usize,
    buffers: [Vec<i16>; 2],
    /// Index of the buffer currently playing the `current` role
    current: usize,
    inject_radius: i32,
}

impl WaveField {
    /// Create an empty field; it stays inert until `resize` is given a non-zero size
    pub fn new(inject_radius: i32) -> Self {
        Self {
            width: 0,
            height: 0,
            buffers: [Vec::new(), Vec::new()],
            current: 0,
            inject_radius: inject_radius.max(0),
        }
    }

    /// Reallocate both buffers for a new size, zero-filled
    ///
    /// A zero dimension leaves the field unusable (step and inject become
    /// no-ops) until a valid size arrives.
    pub fn resize(&mut self, width: usize, height: usize) {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        let size = width * height;

        self.width = width;
        self.height = height;
        self.buffers = [vec![0; size], vec![0; size]];
        self.current = 0;

        log::debug!("Wave field resized to {}x{}", width, height);
    }

    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Latest heights, row-major
    pub fn current(&self) -> &[i16] {
        &self.buffers[self.current]
    }

    /// Heights one step older than `current`, row-major
    pub fn previous(&self) -> &[i16] {
        &self.buffers[self.current ^ 1]
    }

    /// Height of a cell, or 0 outside the grid
    pub fn height_at(&self, x: i64, y: i64) -> i32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.current()[y as usize * self.width + x as usize] as i32
    }

    /// Sum of absolute heights (a cheap activity measure)
    pub fn energy(&self) -> u64 {
        self.current()
            .iter()
            .map(|&h| (h as i32).unsigned_abs() as u64)
            .sum()
    }

    /// Add `magnitude` to every writable cell around `(x, y)`
    ///
    /// Coordinates are truncated to the containing cell. A centre outside the
    /// grid is ignored. Border rows are never written since `step` never
    /// updates them. Returns the number of cells touched.
    pub fn inject(&mut self, x: f32, y: f32, magnitude: f32) -> usize {
        if !self.is_ready() || !x.is_finite() || !y.is_finite() || !magnitude.is_finite() {
            return 0;
        }

        let ix = x.floor() as i64;
        let iy = y.floor() as i64;
        let (width, height) = (self.width as i64, self.height as i64);
        if ix < 0 || iy < 0 || ix >= width || iy >= height {
            return 0;
        }

        let delta = magnitude.trunc() as i32;
        let radius = self.inject_radius as i64;
        let current = self.current;
        let buffer = &mut self.buffers[current];
        let mut touched = 0;

        for j in (iy - radius).max(1)..=(iy + radius).min(height - 2) {
            for i in (ix - radius).max(0)..=(ix + radius).min(width - 1) {
                let cell = &mut buffer[(j * width + i) as usize];
                *cell = (*cell as i32 + delta) as i16;
                touched += 1;
            }
        }

        touched
    }

    /// Advance the simulation by one step and swap buffer roles
    ///
    /// For every cell outside the first and last rows:
    /// `next = (up + down + left + right) / 2 - previous`, then
    /// `next -= next >> decay_shift`. Neighbours are taken in row-major
    /// order, so the first and last columns see the adjacent row's edge.
    pub fn step(&mut self, decay_shift: u32) {
        if !self.is_ready() || self.height < 3 {
            return;
        }

        // i16 shifts of 16 or more would overflow
        let shift = decay_shift.clamp(1, 15);
        let width = self.width;
        let len = width * self.height;

        let [first, second] = &mut self.buffers;
        let (src, dst) = if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };

        for i in width..len - width {
            let sum = src[i - 1] as i32 + src[i + 1] as i32 + src[i - width] as i32
                + src[i + width] as i32;
            let next = ((sum >> 1) - dst[i] as i32) as i16;
            dst[i] = next.wrapping_sub(next >> shift);
        }

        self.current ^= 1;
    }
}
