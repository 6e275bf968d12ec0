//! File I/O and editing session for the photo editor

pub mod buffer;
pub mod codec;
pub mod editor;
pub mod error;

pub use buffer::ImageBuffer;
pub use codec::{supported_formats, FormatSupport};
pub use editor::ImageEditor;
pub use error::{ErrorKind, ImageError, Result};
pub use pedit_core::{ColorMode, FlipAxis, Operation, PixelGrid, Rect, Resize, Rgba};
