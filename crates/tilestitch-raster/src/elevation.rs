//! Elevation normalization.
//!
//! Elevation tiles (e.g. the Terrarium encoding) pack a 24-bit value into
//! R, G and B: `value = R << 16 | G << 8 | B`. The normalizer scans the
//! composited canvas for the value range, then rewrites every pixel as an
//! 8-bit gray level stretched over that range. Alpha is left untouched.

use crate::canvas::Canvas;

/// Largest packed elevation value.
pub const MAX_PACKED_ELEVATION: u32 = 0xFF_FFFF;

/// Unpack the 24-bit elevation value of an RGBA pixel.
pub fn packed_elevation(pixel: &[u8]) -> u32 {
    (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32
}

/// Convert a Terrarium-encoded value to meters.
pub fn terrarium_meters(value: f64) -> f64 {
    value / 256.0 - 32768.0
}

/// Running statistics over packed elevation values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStats {
    /// Smallest value seen.
    pub min: u32,
    /// Largest value seen.
    pub max: u32,
    /// Incremental mean of all values.
    pub average: f64,
    /// Number of values seen.
    pub count: u64,
}

impl Default for ElevationStats {
    fn default() -> Self {
        Self {
            min: MAX_PACKED_ELEVATION,
            max: 0,
            average: 0.0,
            count: 0,
        }
    }
}

impl ElevationStats {
    /// Gather statistics over every canvas pixel.
    pub fn scan(canvas: &Canvas) -> Self {
        let mut stats = Self::default();
        for pixel in canvas.pixels() {
            stats.push(packed_elevation(pixel));
        }
        stats
    }

    /// Add one value.
    pub fn push(&mut self, value: u32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.count += 1;
        self.average += (value as f64 - self.average) / self.count as f64;
    }

    /// Gray levels per packed unit: `255 / (max - min)`, or 1 for a flat range.
    pub fn ratio(&self) -> f64 {
        if self.max > self.min {
            255.0 / (self.max - self.min) as f64
        } else {
            1.0
        }
    }

    /// Map a packed value onto `0..=255`.
    pub fn normalize(&self, value: u32) -> u8 {
        let level = (value.saturating_sub(self.min) as f64 * self.ratio()).round();
        level.clamp(0.0, 255.0) as u8
    }

    /// Position of the average within the range, in `[0, 1]`.
    pub fn midpoint(&self) -> f64 {
        (self.average - self.min as f64) * self.ratio() / 255.0
    }

    /// Minimum in meters, assuming Terrarium encoding.
    pub fn min_meters(&self) -> f64 {
        terrarium_meters(self.min as f64)
    }

    /// Maximum in meters, assuming Terrarium encoding.
    pub fn max_meters(&self) -> f64 {
        terrarium_meters(self.max as f64)
    }

    /// Average in meters, assuming Terrarium encoding.
    pub fn average_meters(&self) -> f64 {
        terrarium_meters(self.average)
    }

    /// Height of the range in meters.
    pub fn span_meters(&self) -> f64 {
        self.max.saturating_sub(self.min) as f64 / 256.0
    }
}

/// Rewrite `canvas` as a normalized grayscale elevation map.
///
/// Returns the statistics gathered before the rewrite.
pub fn normalize_elevation(canvas: &mut Canvas) -> ElevationStats {
    let stats = ElevationStats::scan(canvas);
    for pixel in canvas.pixels_mut() {
        let level = stats.normalize(packed_elevation(pixel));
        pixel[..3].fill(level);
    }
    stats
}
