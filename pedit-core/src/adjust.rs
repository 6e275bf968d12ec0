//! Tonal adjustments: brightness and contrast
//!
//! Both are absolute with respect to the grid they are given. Nothing is
//! remembered between calls, so an amount of zero is always the identity.

use std::ops::RangeInclusive;

use ndarray::s;

use crate::error::{EditError, Result};
use crate::grid::PixelGrid;
use crate::transform::require_pixels;

/// Accepted brightness offsets
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -255..=255;

/// Accepted contrast amounts, in percent of extra gain
pub const CONTRAST_RANGE: RangeInclusive<i32> = -100..=500;

/// Add `amount` to every colour channel, clamping to [0, 255]
pub fn brightness(grid: &PixelGrid, amount: i32) -> Result<PixelGrid> {
    require_pixels(grid)?;
    check_range("brightness", amount, &BRIGHTNESS_RANGE)?;

    let mut out = grid.clone();
    if amount != 0 {
        out.array_mut()
            .slice_mut(s![.., .., ..3])
            .mapv_inplace(|v| (v as i32 + amount).clamp(0, 255) as u8);
    }
    Ok(out)
}

/// Multiply every colour channel by `1 + amount / 100`, clamping to [0, 255]
pub fn contrast(grid: &PixelGrid, amount: i32) -> Result<PixelGrid> {
    require_pixels(grid)?;
    check_range("contrast", amount, &CONTRAST_RANGE)?;

    let mut out = grid.clone();
    if amount != 0 {
        let gain = 1.0 + amount as f32 / 100.0;
        out.array_mut()
            .slice_mut(s![.., .., ..3])
            .mapv_inplace(|v| (v as f32 * gain).round().clamp(0.0, 255.0) as u8);
    }
    Ok(out)
}

fn check_range(name: &str, amount: i32, range: &RangeInclusive<i32>) -> Result<()> {
    if !range.contains(&amount) {
        return Err(EditError::invalid(format!(
            "{name} {amount} outside [{}, {}]",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}
