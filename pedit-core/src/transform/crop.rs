use ndarray::s;

use super::require_pixels;
use crate::error::{BoundsError, EditError, Result};
use crate::grid::{PixelGrid, Rect};

/// Cut out the sub-grid inside `rect`
pub fn crop(grid: &PixelGrid, rect: Rect) -> Result<PixelGrid> {
    require_pixels(grid)?;

    if rect.width == 0 || rect.height == 0 {
        return Err(EditError::invalid(format!("crop region {rect} is empty")));
    }

    let (width, height) = grid.dimensions();
    if !rect.fits_within(width, height) {
        return Err(BoundsError::Region {
            rect,
            width,
            height,
        }
        .into());
    }

    let (x0, y0) = (rect.x as usize, rect.y as usize);
    let (x1, y1) = (x0 + rect.width as usize, y0 + rect.height as usize);

    let region = grid
        .as_array()
        .slice(s![y0..y1, x0..x1, ..])
        .as_standard_layout()
        .into_owned();

    PixelGrid::from_array(region, grid.mode())
}
