//! The output canvas.

/// Bytes per canvas pixel (RGBA).
pub const CANVAS_CHANNELS: usize = 4;

/// Index of the alpha channel within a canvas pixel.
pub const ALPHA: usize = 3;

/// An RGBA raster with straight alpha, zero-initialized.
///
/// Rows are stored north to south, pixels west to east, 4 bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CANVAS_CHANNELS;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte offset of `channel` of the pixel at (`row`, `col`).
    pub fn index(&self, row: u32, col: u32, channel: usize) -> usize {
        debug_assert!(row < self.height && col < self.width && channel < CANVAS_CHANNELS);
        (row as usize * self.width as usize + col as usize) * CANVAS_CHANNELS + channel
    }

    /// Whether a signed canvas coordinate falls inside the canvas.
    pub fn contains(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && col < self.width as i64 && row < self.height as i64
    }

    /// Copy of the pixel at (`row`, `col`).
    pub fn pixel(&self, row: u32, col: u32) -> [u8; CANVAS_CHANNELS] {
        let start = self.index(row, col, 0);
        let mut out = [0; CANVAS_CHANNELS];
        out.copy_from_slice(&self.data[start..start + CANVAS_CHANNELS]);
        out
    }

    /// Mutable view of the pixel at (`row`, `col`).
    pub fn pixel_mut(&mut self, row: u32, col: u32) -> &mut [u8] {
        let start = self.index(row, col, 0);
        &mut self.data[start..start + CANVAS_CHANNELS]
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CANVAS_CHANNELS)
    }

    /// Iterate mutably over all pixels in row-major order.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(CANVAS_CHANNELS)
    }

    /// The raw RGBA buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
