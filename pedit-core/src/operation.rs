//! Serialisable description of a single edit
//!
//! Operations have a JSON form (`{"op": "rotate", "degrees": 90}`) for
//! recipes and a compact text form (`rotate:90`) for the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adjust;
use crate::error::{EditError, Result};
use crate::filter;
use crate::grid::{PixelGrid, Rect};
use crate::transform::{self, FlipAxis, Resize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Rotate { degrees: f64 },
    Flip { axis: FlipAxis },
    Crop(Rect),
    Resize { target: Resize },
    Grayscale,
    Rgb,
    Sepia,
    Hue,
    Brightness { amount: i32 },
    Contrast { amount: i32 },
    /// Restore the original image; needs the owner of both buffers
    Revert,
}

impl Operation {
    /// Apply to `grid`, producing a new grid.
    ///
    /// `Revert` cannot be expressed on a single grid and is rejected here.
    pub fn apply(&self, grid: &PixelGrid) -> Result<PixelGrid> {
        match *self {
            Operation::Rotate { degrees } => transform::rotate(grid, degrees),
            Operation::Flip { axis } => transform::flip(grid, axis),
            Operation::Crop(rect) => transform::crop(grid, rect),
            Operation::Resize { target } => transform::resize(grid, target),
            Operation::Grayscale => filter::to_grayscale(grid),
            Operation::Rgb => filter::to_rgb(grid),
            Operation::Sepia => filter::to_sepia(grid),
            Operation::Hue => filter::rotate_hue(grid, 0.0),
            Operation::Brightness { amount } => adjust::brightness(grid, amount),
            Operation::Contrast { amount } => adjust::contrast(grid, amount),
            Operation::Revert => Err(EditError::invalid(
                "revert needs the original image and cannot run on a single grid",
            )),
        }
    }

    /// Short name used in logs and the text syntax
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Rotate { .. } => "rotate",
            Operation::Flip { .. } => "flip",
            Operation::Crop(_) => "crop",
            Operation::Resize { .. } => "resize",
            Operation::Grayscale => "grayscale",
            Operation::Rgb => "rgb",
            Operation::Sepia => "sepia",
            Operation::Hue => "hue",
            Operation::Brightness { .. } => "brightness",
            Operation::Contrast { .. } => "contrast",
            Operation::Revert => "revert",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Operation::Rotate { degrees } => write!(f, "{name}:{degrees}"),
            Operation::Flip { axis } => {
                let axis = match axis {
                    FlipAxis::Horizontal => "horizontal",
                    FlipAxis::Vertical => "vertical",
                };
                write!(f, "{name}:{axis}")
            }
            Operation::Crop(rect) => write!(
                f,
                "{name}:{},{},{},{}",
                rect.x, rect.y, rect.width, rect.height
            ),
            Operation::Resize {
                target: Resize::Scale { x, y },
            } => write!(f, "{name}:{x},{y}"),
            Operation::Resize {
                target: Resize::Exact { width, height },
            } => write!(f, "{name}:{width}x{height}"),
            Operation::Brightness { amount } | Operation::Contrast { amount } => {
                write!(f, "{name}:{amount}")
            }
            _ => f.write_str(name),
        }
    }
}

impl FromStr for Operation {
    type Err = EditError;

    /// Parse the compact form, e.g. `rotate:cw`, `crop:10,20,400,200`,
    /// `resize:800x600` or `sepia`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s, None),
        };

        let require_arg = || {
            arg.filter(|a| !a.is_empty())
                .ok_or_else(|| EditError::invalid(format!("{name} needs an argument, e.g. {}", example(name))))
        };

        let op = match name.to_ascii_lowercase().as_str() {
            "rotate" => Operation::Rotate {
                degrees: parse_degrees(require_arg()?)?,
            },
            "flip" => Operation::Flip {
                axis: parse_axis(require_arg()?)?,
            },
            "crop" => Operation::Crop(require_arg()?.parse()?),
            "resize" => Operation::Resize {
                target: parse_resize(require_arg()?)?,
            },
            "brightness" => Operation::Brightness {
                amount: parse_amount(name, require_arg()?)?,
            },
            "contrast" => Operation::Contrast {
                amount: parse_amount(name, require_arg()?)?,
            },
            unit @ ("grayscale" | "gray" | "rgb" | "sepia" | "hue" | "revert") => {
                if arg.is_some() {
                    return Err(EditError::invalid(format!("{name} takes no argument, got: {s}")));
                }
                match unit {
                    "grayscale" | "gray" => Operation::Grayscale,
                    "rgb" => Operation::Rgb,
                    "sepia" => Operation::Sepia,
                    "hue" => Operation::Hue,
                    _ => Operation::Revert,
                }
            }
            _ => return Err(EditError::invalid(format!("unknown operation: {s}"))),
        };

        Ok(op)
    }
}

fn example(name: &str) -> &'static str {
    match name {
        "rotate" => "rotate:90 or rotate:cw",
        "flip" => "flip:horizontal",
        "crop" => "crop:10,20,400,200",
        "resize" => "resize:0.5 or resize:800x600",
        "brightness" => "brightness:-40",
        "contrast" => "contrast:25",
        _ => "name:value",
    }
}

fn parse_degrees(arg: &str) -> Result<f64> {
    match arg.to_ascii_lowercase().as_str() {
        "cw" => Ok(90.0),
        "ccw" => Ok(-90.0),
        other => other
            .parse::<f64>()
            .map_err(|_| EditError::invalid(format!("invalid rotation angle: {arg}"))),
    }
}

fn parse_axis(arg: &str) -> Result<FlipAxis> {
    match arg.to_ascii_lowercase().as_str() {
        "horizontal" | "h" => Ok(FlipAxis::Horizontal),
        "vertical" | "v" => Ok(FlipAxis::Vertical),
        _ => Err(EditError::invalid(format!(
            "flip axis must be horizontal or vertical, got: {arg}"
        ))),
    }
}

/// `WxH` for exact dimensions, `F` or `X,Y` for scale factors
fn parse_resize(arg: &str) -> Result<Resize> {
    if let Some((width, height)) = arg.split_once(['x', 'X']) {
        let dim = |value: &str| {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| EditError::invalid(format!("invalid resize dimensions: {arg}")))
        };
        return Ok(Resize::Exact {
            width: dim(width)?,
            height: dim(height)?,
        });
    }

    let factor = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| EditError::invalid(format!("invalid resize factor: {arg}")))
    };
    match arg.split_once(',') {
        Some((x, y)) => Ok(Resize::Scale {
            x: factor(x)?,
            y: factor(y)?,
        }),
        None => Ok(Resize::uniform(factor(arg)?)),
    }
}

fn parse_amount(name: &str, arg: &str) -> Result<i32> {
    arg.parse::<i32>()
        .map_err(|_| EditError::invalid(format!("invalid {name} amount: {arg}")))
}
