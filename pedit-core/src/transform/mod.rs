//! Geometric transforms: rotate, flip, crop and resize
//!
//! Every transform reads a grid and returns a new one; the input is never
//! modified. Colour values only change where resampling is needed.

mod crop;
mod orient;
mod resize;
mod rotate;

pub use crop::crop;
pub use orient::{mirror, rotate_quarter_turns};
pub use resize::{resize, MAX_DIMENSION, MAX_PIXELS};
pub use rotate::rotate;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};
use crate::grid::PixelGrid;

/// Mirror axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    /// Reverse the column order of every row
    Horizontal,
    /// Reverse the row order
    Vertical,
}

impl FlipAxis {
    /// Scale vector that produces this mirror
    pub fn scale(self) -> Vector2<f64> {
        match self {
            FlipAxis::Horizontal => Vector2::new(-1.0, 1.0),
            FlipAxis::Vertical => Vector2::new(1.0, -1.0),
        }
    }
}

/// Mirror the grid across `axis`
pub fn flip(grid: &PixelGrid, axis: FlipAxis) -> Result<PixelGrid> {
    mirror(grid, &axis.scale())
}

/// Resize target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resize {
    /// Multiply each dimension by a factor
    Scale { x: f64, y: f64 },
    /// Explicit output dimensions
    Exact { width: u32, height: u32 },
}

impl Resize {
    /// Same factor on both axes
    pub fn uniform(factor: f64) -> Self {
        Resize::Scale {
            x: factor,
            y: factor,
        }
    }

    /// Output dimensions for a `width` x `height` source
    pub fn target(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let (new_width, new_height) = match *self {
            Resize::Scale { x, y } => (scaled(width, x, "x")?, scaled(height, y, "y")?),
            Resize::Exact { width, height } => (width, height),
        };

        if new_width == 0 || new_height == 0 {
            return Err(EditError::invalid(format!(
                "resize to {new_width}x{new_height} leaves no pixels"
            )));
        }
        if new_width > MAX_DIMENSION || new_height > MAX_DIMENSION {
            return Err(EditError::invalid(format!(
                "resize to {new_width}x{new_height} exceeds {MAX_DIMENSION} pixels per side"
            )));
        }
        check_pixel_count("resize", u64::from(new_width), u64::from(new_height))?;

        Ok((new_width, new_height))
    }
}

/// Reject outputs too large to allocate, before any buffer exists
pub(crate) fn check_pixel_count(operation: &str, width: u64, height: u64) -> Result<()> {
    match width.checked_mul(height) {
        Some(count) if count <= MAX_PIXELS => Ok(()),
        _ => Err(EditError::invalid(format!(
            "{operation} to {width}x{height} exceeds {MAX_PIXELS} pixels"
        ))),
    }
}

fn scaled(len: u32, factor: f64, axis: &str) -> Result<u32> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(EditError::invalid(format!(
            "scale {axis} must be a positive number, got {factor}"
        )));
    }
    let value = (len as f64 * factor).round();
    if value > u32::MAX as f64 {
        return Err(EditError::invalid(format!("scale {axis} of {factor} overflows")));
    }
    Ok(value as u32)
}

pub(crate) fn require_pixels(grid: &PixelGrid) -> Result<()> {
    if grid.is_empty() {
        return Err(EditError::EmptyImage);
    }
    Ok(())
}
