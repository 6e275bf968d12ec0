use thiserror::Error;

use crate::grid::Rect;

/// Common errors across the editing pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("No image loaded")]
    EmptyImage,

    #[error("Out of bounds: {0}")]
    OutOfBounds(#[from] BoundsError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    Pixel {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("region {rect} exceeds {width}x{height} image")]
    Region { rect: Rect, width: u32, height: u32 },
}

impl EditError {
    /// Shorthand for building an `InvalidArgument` from anything printable
    pub fn invalid(msg: impl Into<String>) -> Self {
        EditError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
