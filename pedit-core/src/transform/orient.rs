use nalgebra::Vector2;
use ndarray::s;

use super::require_pixels;
use crate::error::{EditError, Result};
use crate::grid::PixelGrid;

/// Rotate by a whole number of quarter turns, positive is clockwise.
///
/// Pure index remapping, no interpolation. For one clockwise turn
/// `new[y'][x'] = old[h - 1 - x'][y']`.
pub fn rotate_quarter_turns(grid: &PixelGrid, turns: i64) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let src = grid.as_array().view();
    let rotated = match turns.rem_euclid(4) {
        0 => return Ok(grid.clone()),
        // Transpose, then reverse columns
        1 => src
            .permuted_axes([1, 0, 2])
            .slice_move(s![.., ..;-1, ..]),
        2 => src.slice_move(s![..;-1, ..;-1, ..]),
        // Transpose, then reverse rows
        _ => src
            .permuted_axes([1, 0, 2])
            .slice_move(s![..;-1, .., ..]),
    };

    PixelGrid::from_array(rotated.as_standard_layout().into_owned(), grid.mode())
}

/// Apply a mirroring scale vector.
///
/// Each component must be +1 (keep) or -1 (reverse): x reverses columns,
/// y reverses rows.
pub fn mirror(grid: &PixelGrid, scale: &Vector2<f64>) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let reverse = |component: f64, name: &str| -> Result<bool> {
        if component == 1.0 {
            Ok(false)
        } else if component == -1.0 {
            Ok(true)
        } else {
            Err(EditError::invalid(format!(
                "mirror scale {name} must be 1 or -1, got {component}"
            )))
        }
    };
    let reverse_x = reverse(scale.x, "x")?;
    let reverse_y = reverse(scale.y, "y")?;

    let src = grid.as_array().view();
    let mirrored = match (reverse_x, reverse_y) {
        (false, false) => return Ok(grid.clone()),
        (true, false) => src.slice_move(s![.., ..;-1, ..]),
        (false, true) => src.slice_move(s![..;-1, .., ..]),
        (true, true) => src.slice_move(s![..;-1, ..;-1, ..]),
    };

    PixelGrid::from_array(mirrored.as_standard_layout().into_owned(), grid.mode())
}
