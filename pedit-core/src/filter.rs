//! Per-pixel colour operations
//!
//! Each filter recomputes the colour channels of every pixel and leaves
//! alpha alone.

use nalgebra::{Matrix3, Vector3};

use crate::color::{hsv_to_rgb, luma, rgb_to_hsv, Rgba};
use crate::error::Result;
use crate::grid::{ColorMode, PixelGrid};
use crate::transform::require_pixels;

/// Replace every pixel with its Rec. 709 luma, replicated across R, G and B.
///
/// The result stays 8 bits per channel and is tagged as grayscale.
pub fn to_grayscale(grid: &PixelGrid) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let mut out = grid.clone();
    if !grid.mode().is_grayscale() {
        out.map_pixels(|p| {
            let level = luma(p.r, p.g, p.b);
            Rgba::new(level, level, level, p.a)
        });
    }
    out.set_mode(grid.mode().to_grayscale());
    Ok(out)
}

/// Normalise to opaque 8-bit RGB
pub fn to_rgb(grid: &PixelGrid) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let mut out = grid.clone();
    if grid.mode().has_alpha() {
        out.map_pixels(|p| Rgba { a: u8::MAX, ..p });
    }
    out.set_mode(ColorMode::Rgb);
    Ok(out)
}

fn sepia_matrix() -> Matrix3<f64> {
    Matrix3::new(
        0.393, 0.769, 0.189, //
        0.349, 0.686, 0.168, //
        0.272, 0.534, 0.131,
    )
}

/// Classic sepia tone matrix, truncated and clamped to [0, 255]
pub fn to_sepia(grid: &PixelGrid) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let matrix = sepia_matrix();
    let mut out = grid.clone();
    out.map_pixels(|p| {
        let toned = matrix * Vector3::new(p.r as f64, p.g as f64, p.b as f64);
        Rgba::new(truncate(toned.x), truncate(toned.y), truncate(toned.z), p.a)
    });
    out.set_mode(grid.mode().to_color());
    Ok(out)
}

#[inline]
fn truncate(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Round-trip every pixel through HSV, turning the hue by `degrees`.
///
/// A zero turn reproduces the input exactly.
pub fn rotate_hue(grid: &PixelGrid, degrees: f32) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let mut out = grid.clone();
    out.map_pixels(|p| {
        let (r, g, b) = hsv_to_rgb(rgb_to_hsv(p.r, p.g, p.b).rotated(degrees));
        Rgba::new(r, g, b, p.a)
    });
    Ok(out)
}
