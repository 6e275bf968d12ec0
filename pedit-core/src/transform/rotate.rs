use nalgebra::{Point2, Rotation2, Vector2};
use ndarray::{Array3, Axis};

use super::{check_pixel_count, require_pixels, rotate_quarter_turns};
use crate::error::{EditError, Result};
use crate::grid::{PixelGrid, CHANNELS};

// Bounding-box slack so that e.g. 45.0000001 degrees does not gain a pixel
const EXTENT_EPSILON: f64 = 1e-6;

/// Rotate by `degrees`, positive is clockwise.
///
/// Multiples of 90 degrees are exact and swap width and height for odd
/// quarter turns. Any other angle rotates about the centre with bilinear
/// resampling onto the bounding box of the rotated image; the corners that
/// no source pixel covers are transparent, so the grid gains alpha.
pub fn rotate(grid: &PixelGrid, degrees: f64) -> Result<PixelGrid> {
    require_pixels(grid)?;

    if !degrees.is_finite() {
        return Err(EditError::invalid(format!(
            "rotation angle must be finite, got {degrees}"
        )));
    }

    let quarter_turns = degrees / 90.0;
    if quarter_turns.fract() == 0.0 {
        return rotate_quarter_turns(grid, (quarter_turns % 4.0) as i64);
    }

    rotate_resampled(grid, degrees.to_radians())
}

fn rotate_resampled(grid: &PixelGrid, radians: f64) -> Result<PixelGrid> {
    let (width, height) = grid.dimensions();
    let (w, h) = (width as f64, height as f64);

    // Image coordinates have y pointing down, so a positive angle of the
    // standard rotation matrix turns clockwise on screen
    let rotation = Rotation2::new(radians);
    let inverse = rotation.inverse();

    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let new_width = (w * cos + h * sin - EXTENT_EPSILON).ceil().max(1.0) as usize;
    let new_height = (w * sin + h * cos - EXTENT_EPSILON).ceil().max(1.0) as usize;
    check_pixel_count("rotate", new_width as u64, new_height as u64)?;

    let src_center = Vector2::new(w / 2.0, h / 2.0);
    let dst_center = Vector2::new(new_width as f64 / 2.0, new_height as f64 / 2.0);

    let premultiplied = premultiply(grid.as_array());
    let mut out = Array3::<u8>::zeros((new_height, new_width, CHANNELS));

    for ((y, x), mut pixel) in out
        .lanes_mut(Axis(2))
        .into_iter()
        .enumerate()
        .map(|(i, lane)| ((i / new_width, i % new_width), lane))
    {
        let dst = Point2::new(x as f64 + 0.5, y as f64 + 0.5) - dst_center;
        let src = inverse * dst + src_center;

        let sample = sample_bilinear(&premultiplied, src.x - 0.5, src.y - 0.5);
        let alpha = sample[3];
        if alpha <= 0.0 {
            continue;
        }
        for c in 0..3 {
            pixel[c] = to_level(sample[c] * 255.0 / alpha);
        }
        pixel[3] = to_level(alpha);
    }

    PixelGrid::from_array(out, grid.mode().with_alpha())
}

/// Colour channels scaled by alpha, as f32
pub(crate) fn premultiply(data: &Array3<u8>) -> Array3<f32> {
    let mut out = data.mapv(|v| v as f32);
    for mut lane in out.lanes_mut(Axis(2)) {
        let alpha = lane[3] / 255.0;
        for c in 0..3 {
            lane[c] *= alpha;
        }
    }
    out
}

/// Bilinear sample at a continuous pixel position, outside samples count as
/// transparent black
fn sample_bilinear(data: &Array3<f32>, x: f64, y: f64) -> [f32; CHANNELS] {
    let (height, width) = (data.len_of(Axis(0)) as i64, data.len_of(Axis(1)) as i64);

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = (x - x0) as f32;
    let fy = (y - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f32; CHANNELS];
    for (dy, wy) in [(0, 1.0 - fy), (1, fy)] {
        for (dx, wx) in [(0, 1.0 - fx), (1, fx)] {
            let (sx, sy) = (x0 + dx, y0 + dy);
            let weight = wx * wy;
            if weight == 0.0 || sx < 0 || sy < 0 || sx >= width || sy >= height {
                continue;
            }
            for (c, value) in acc.iter_mut().enumerate() {
                *value += weight * data[[sy as usize, sx as usize, c]];
            }
        }
    }
    acc
}

#[inline]
pub(crate) fn to_level(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
