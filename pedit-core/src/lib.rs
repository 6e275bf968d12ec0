//! Pixel model and editing operations for the photo editor
//!
//! Every operation takes a [`PixelGrid`] by reference and returns a new
//! grid, so callers decide when a result replaces their current image.

pub mod adjust;
pub mod color;
pub mod error;
pub mod filter;
pub mod grid;
pub mod operation;
pub mod transform;

pub use adjust::{BRIGHTNESS_RANGE, CONTRAST_RANGE};
pub use color::{Hsv, Rgba};
pub use error::{BoundsError, EditError, Result};
pub use grid::{ColorMode, PixelGrid, Rect, CHANNELS};
pub use operation::Operation;
pub use transform::{FlipAxis, Resize};
