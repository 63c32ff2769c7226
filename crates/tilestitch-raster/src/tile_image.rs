//! Decoded tile images.

use crate::{RasterError, Result};

/// Number of interleaved channels in a decoded tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelDepth {
    /// One gray channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, straight (non-premultiplied) alpha.
    Rgba,
}

impl ChannelDepth {
    /// Map a channel count to a depth.
    pub fn from_channels(channels: u8) -> Result<Self> {
        match channels {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(RasterError::UnsupportedChannelDepth(other)),
        }
    }

    /// Number of bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// A decoded tile: 8-bit samples in row-major order, channels interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    width: u32,
    height: u32,
    depth: ChannelDepth,
    pixels: Vec<u8>,
}

impl TileImage {
    /// Wrap a pixel buffer.
    ///
    /// Fails if `channels` is not 1, 3 or 4 or if the buffer is not exactly
    /// `width * height * channels` bytes.
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self> {
        let depth = ChannelDepth::from_channels(channels)?;
        let expected = width as usize * height as usize * depth.channels();
        if pixels.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            pixels,
        })
    }

    /// A tile filled with one pixel value. The length of `pixel` sets the depth.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self> {
        let count = width as usize * height as usize;
        let pixels = pixel.repeat(count);
        let channels = u8::try_from(pixel.len()).unwrap_or(u8::MAX);
        Self::new(width, height, channels, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn depth(&self) -> ChannelDepth {
        self.depth
    }

    /// Raw interleaved samples.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Samples of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = self.depth.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        &self.pixels[start..start + channels]
    }
}
