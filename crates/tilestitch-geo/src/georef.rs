//! Georeferencing of the finished raster.

use serde::{Deserialize, Serialize};

/// Bounds of the request area in Pseudo-Mercator meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBounds {
    /// West edge.
    pub min_x: f64,
    /// South edge.
    pub min_y: f64,
    /// East edge.
    pub max_x: f64,
    /// North edge.
    pub max_y: f64,
}

/// Pixel scale and tie point handed to the GeoTIFF and world-file writers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Georeference {
    /// Width of one pixel in meters.
    pub pixel_size_x: f64,
    /// Height of one pixel in meters (positive).
    pub pixel_size_y: f64,
    /// Projected x of the top-left corner.
    pub top_left_x: f64,
    /// Projected y of the top-left corner.
    pub top_left_y: f64,
}

impl Georeference {
    /// Derive the georeference of a `width` x `height` raster covering `bounds`.
    pub fn new(bounds: &ProjectedBounds, width: u32, height: u32) -> Self {
        Self {
            pixel_size_x: (bounds.max_x - bounds.min_x) / width as f64,
            pixel_size_y: (bounds.max_y - bounds.min_y).abs() / height as f64,
            top_left_x: bounds.min_x,
            top_left_y: bounds.max_y,
        }
    }

    /// GeoTIFF ModelPixelScale: `[ScaleX, ScaleY, ScaleZ]`.
    pub fn pixel_scale(&self) -> [f64; 3] {
        [self.pixel_size_x, self.pixel_size_y, 0.0]
    }

    /// GeoTIFF ModelTiepoint tying raster `(0, 0)` to the top-left corner:
    /// `[I, J, K, X, Y, Z]`.
    pub fn tie_point(&self) -> [f64; 6] {
        [0.0, 0.0, 0.0, self.top_left_x, self.top_left_y, 0.0]
    }

    /// The six world-file coefficients `[A, D, B, E, C, F]`.
    ///
    /// The y resolution is negative because raster rows run south while
    /// projected y runs north.
    pub fn world_file_coefficients(&self) -> [f64; 6] {
        [
            self.pixel_size_x,
            0.0,
            0.0,
            -self.pixel_size_y,
            self.top_left_x,
            self.top_left_y,
        ]
    }
}
