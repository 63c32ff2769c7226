//! Placing decoded tiles onto the canvas.
//!
//! A tile's pixel `(x, y)` lands on canvas column
//! `column * tile_size + x - offset_x` and row `row * tile_size + y - offset_y`.
//! Destinations outside the canvas are dropped.
//!
//! Blending depends on the tile's channels:
//! - RGBA tiles are composited source-over (tile over canvas) in straight alpha
//! - RGB tiles overwrite the pixel and make it opaque
//! - gray tiles overwrite R, G and B with the gray value and make it opaque

use crate::canvas::{Canvas, ALPHA};
use crate::tile_image::{ChannelDepth, TileImage};
use crate::{RasterError, Result};
use tilestitch_geo::Placement;
use tracing::trace;

impl Canvas {
    /// Composite `tile` at `placement`.
    ///
    /// Fails without touching the canvas if the tile is not exactly
    /// `placement.tile_size` pixels square.
    pub fn place_tile(&mut self, tile: &TileImage, placement: &Placement) -> Result<()> {
        if tile.width() != placement.tile_size || tile.height() != placement.tile_size {
            return Err(RasterError::TileSizeMismatch {
                width: tile.width(),
                height: tile.height(),
                expected: placement.tile_size,
            });
        }

        let (origin_x, origin_y) = placement.origin();
        trace!(
            "Placing {:?} tile at ({}, {})",
            tile.depth(),
            origin_x,
            origin_y
        );

        for y in 0..tile.height() {
            let dest_row = origin_y + y as i64;
            if dest_row < 0 || dest_row >= self.height() as i64 {
                continue;
            }
            for x in 0..tile.width() {
                let dest_col = origin_x + x as i64;
                if !self.contains(dest_col, dest_row) {
                    continue;
                }

                let src = tile.pixel(x, y);
                let dst = self.pixel_mut(dest_row as u32, dest_col as u32);
                match tile.depth() {
                    ChannelDepth::Rgba => source_over(dst, src),
                    ChannelDepth::Rgb => {
                        dst[..3].copy_from_slice(src);
                        dst[ALPHA] = u8::MAX;
                    }
                    ChannelDepth::Gray => {
                        dst[..3].fill(src[0]);
                        dst[ALPHA] = u8::MAX;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Blend a straight-alpha RGBA source over a straight-alpha RGBA destination.
///
/// Colors are premultiplied by their own alpha, combined with
/// `out = src + dst * (1 - src_alpha)`, and divided back by the result alpha.
/// A result alpha of zero leaves the destination untouched.
fn source_over(dst: &mut [u8], src: &[u8]) {
    let src_alpha = src[ALPHA] as f64 / 255.0;
    let dst_alpha = dst[ALPHA] as f64 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return;
    }

    for channel in 0..ALPHA {
        let src_premult = src[channel] as f64 / 255.0 * src_alpha;
        let dst_premult = dst[channel] as f64 / 255.0 * dst_alpha;
        let out = (src_premult + dst_premult * (1.0 - src_alpha)) / out_alpha;
        dst[channel] = to_sample(out);
    }
    dst[ALPHA] = to_sample(out_alpha);
}

fn to_sample(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(column: u32, row: u32, tile_size: u32) -> Placement {
        Placement {
            column,
            row,
            tile_size,
            offset_x: 0,
            offset_y: 0,
        }
    }

    /// Canvas with a distinct translucent value in every pixel.
    fn patterned_canvas(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        for row in 0..height {
            for col in 0..width {
                let v = (row * width + col) as u8;
                canvas
                    .pixel_mut(row, col)
                    .copy_from_slice(&[v.wrapping_mul(7), v.wrapping_mul(13), v, 40 + v]);
            }
        }
        canvas
    }

    #[test]
    fn test_adjacent_rgb_tiles() {
        let mut canvas = Canvas::new(4, 2);
        let red = TileImage::filled(2, 2, &[255, 0, 0]).unwrap();
        let blue = TileImage::filled(2, 2, &[0, 0, 255]).unwrap();

        canvas.place_tile(&red, &placement(0, 0, 2)).unwrap();
        canvas.place_tile(&blue, &placement(1, 0, 2)).unwrap();

        for row in 0..2 {
            assert_eq!(canvas.pixel(row, 0), [255, 0, 0, 255]);
            assert_eq!(canvas.pixel(row, 1), [255, 0, 0, 255]);
            assert_eq!(canvas.pixel(row, 2), [0, 0, 255, 255]);
            assert_eq!(canvas.pixel(row, 3), [0, 0, 255, 255]);
        }
    }

    #[test]
    fn test_opaque_placement_is_idempotent() {
        let rgb = TileImage::new(2, 2, 3, (0..12).collect()).unwrap();
        let gray = TileImage::new(2, 2, 1, vec![5, 50, 100, 200]).unwrap();

        for tile in [rgb, gray] {
            let mut once = patterned_canvas(3, 3);
            let p = Placement {
                column: 0,
                row: 0,
                tile_size: 2,
                offset_x: 1,
                offset_y: 0,
            };
            once.place_tile(&tile, &p).unwrap();
            let mut twice = once.clone();
            twice.place_tile(&tile, &p).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_gray_replicates_channel() {
        let mut canvas = Canvas::new(1, 1);
        let tile = TileImage::filled(1, 1, &[77]).unwrap();
        canvas.place_tile(&tile, &placement(0, 0, 1)).unwrap();
        assert_eq!(canvas.pixel(0, 0), [77, 77, 77, 255]);
    }

    #[test]
    fn test_transparent_rgba_leaves_canvas() {
        let before = patterned_canvas(4, 4);
        let mut canvas = before.clone();
        let tile = TileImage::filled(4, 4, &[200, 100, 50, 0]).unwrap();
        canvas.place_tile(&tile, &placement(0, 0, 4)).unwrap();
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_opaque_rgba_replaces_canvas() {
        let mut canvas = patterned_canvas(4, 4);
        let pixels: Vec<u8> = (0..16u8).flat_map(|i| [i * 3, 255 - i, i * 11, 255]).collect();
        let tile = TileImage::new(4, 4, 4, pixels).unwrap();
        canvas.place_tile(&tile, &placement(0, 0, 4)).unwrap();
        assert_eq!(canvas.as_bytes(), tile.pixels());
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let mut canvas = Canvas::new(1, 1);
        canvas.pixel_mut(0, 0).copy_from_slice(&[0, 0, 0, 255]);
        let tile = TileImage::filled(1, 1, &[255, 255, 255, 128]).unwrap();
        canvas.place_tile(&tile, &placement(0, 0, 1)).unwrap();

        let px = canvas.pixel(0, 0);
        assert_eq!(px[ALPHA], 255);
        assert_eq!(px[0], 128);
        assert_eq!(px[1], 128);
        assert_eq!(px[2], 128);
    }

    #[test]
    fn test_rgba_over_transparent_keeps_color() {
        let mut canvas = Canvas::new(1, 1);
        let tile = TileImage::filled(1, 1, &[10, 20, 30, 100]).unwrap();
        canvas.place_tile(&tile, &placement(0, 0, 1)).unwrap();
        assert_eq!(canvas.pixel(0, 0), [10, 20, 30, 100]);
    }

    #[test]
    fn test_clipping_outside_canvas() {
        let before = patterned_canvas(4, 4);
        let tile = TileImage::filled(2, 2, &[1, 2, 3]).unwrap();

        // Column or row 2 of 2-pixel tiles starts at pixel 4, past the 4-pixel canvas
        for (column, row) in [(2, 0), (0, 2), (5, 5)] {
            let mut canvas = before.clone();
            canvas.place_tile(&tile, &placement(column, row, 2)).unwrap();
            assert_eq!(canvas, before, "tile at ({}, {}) touched the canvas", column, row);
        }

        // Negative origin: the whole tile sits above and left of the canvas
        let mut canvas = before.clone();
        let p = Placement {
            column: 0,
            row: 0,
            tile_size: 2,
            offset_x: 2,
            offset_y: 2,
        };
        canvas.place_tile(&tile, &p).unwrap();
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_partial_clipping() {
        let mut canvas = Canvas::new(3, 3);
        let tile = TileImage::filled(2, 2, &[9, 9, 9]).unwrap();
        let p = Placement {
            column: 0,
            row: 0,
            tile_size: 2,
            offset_x: 1,
            offset_y: 1,
        };
        canvas.place_tile(&tile, &p).unwrap();

        assert_eq!(canvas.pixel(0, 0), [9, 9, 9, 255]);
        assert_eq!(canvas.pixel(0, 1), [0, 0, 0, 0]);
        assert_eq!(canvas.pixel(1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_tile_size_mismatch() {
        let mut canvas = Canvas::new(4, 4);
        let tile = TileImage::filled(3, 4, &[1, 2, 3]).unwrap();
        let err = canvas.place_tile(&tile, &placement(0, 0, 4)).unwrap_err();
        assert!(matches!(
            err,
            RasterError::TileSizeMismatch {
                width: 3,
                height: 4,
                expected: 4
            }
        ));
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }
}
