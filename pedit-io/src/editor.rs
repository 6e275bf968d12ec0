use std::path::Path;

use pedit_core::{EditError, FlipAxis, Operation, Rect, Resize};
use tracing::{debug, warn};

use crate::buffer::ImageBuffer;
use crate::error::Result;

/// Applies edits to the current image of the buffer it owns.
///
/// Every edit builds a complete new grid from the current one and swaps it
/// in, so a failed edit leaves the current image exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct ImageEditor {
    buffer: ImageBuffer,
}

impl ImageEditor {
    /// Editor with no image loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor with an image decoded from `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::with_buffer(ImageBuffer::open(path)?))
    }

    pub fn with_buffer(buffer: ImageBuffer) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ImageBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> ImageBuffer {
        self.buffer
    }

    /// Whether an image is available for editing
    pub fn is_loaded(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.buffer.load(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.buffer.save(path)
    }

    pub fn revert(&mut self) -> Result<()> {
        self.buffer.revert()?;
        debug!("reverted to original");
        Ok(())
    }

    /// Rotate by `degrees`, positive is clockwise
    pub fn rotate(&mut self, degrees: f64) -> Result<()> {
        self.apply(&Operation::Rotate { degrees })
    }

    pub fn flip(&mut self, axis: FlipAxis) -> Result<()> {
        self.apply(&Operation::Flip { axis })
    }

    pub fn crop(&mut self, rect: Rect) -> Result<()> {
        self.apply(&Operation::Crop(rect))
    }

    pub fn resize(&mut self, target: Resize) -> Result<()> {
        self.apply(&Operation::Resize { target })
    }

    pub fn to_grayscale(&mut self) -> Result<()> {
        self.apply(&Operation::Grayscale)
    }

    pub fn to_rgb(&mut self) -> Result<()> {
        self.apply(&Operation::Rgb)
    }

    pub fn to_sepia(&mut self) -> Result<()> {
        self.apply(&Operation::Sepia)
    }

    /// HSV round trip of every pixel with the hue written back unchanged.
    ///
    /// No hue delta is wired up yet, so this reproduces the image.
    pub fn rotate_hue(&mut self) -> Result<()> {
        self.apply(&Operation::Hue)
    }

    /// Add `amount` in [-255, 255] to every colour channel of the current image
    pub fn set_brightness(&mut self, amount: i32) -> Result<()> {
        self.apply(&Operation::Brightness { amount })
    }

    /// Scale every colour channel by `1 + amount / 100`, `amount` in [-100, 500]
    pub fn set_contrast(&mut self, amount: i32) -> Result<()> {
        self.apply(&Operation::Contrast { amount })
    }

    /// Apply one operation to the current image
    pub fn apply(&mut self, operation: &Operation) -> Result<()> {
        if let Operation::Revert = operation {
            return self.revert();
        }

        if self.buffer.is_empty() {
            warn!(operation = %operation, "no image loaded");
            return Err(EditError::EmptyImage.into());
        }

        match operation.apply(self.buffer.current()) {
            Ok(grid) => {
                debug!(
                    operation = %operation,
                    width = grid.width(),
                    height = grid.height(),
                    "applied"
                );
                self.buffer.replace_current(grid);
                Ok(())
            }
            Err(err) => {
                warn!(operation = %operation, error = %err, "rejected");
                Err(err.into())
            }
        }
    }

    /// Apply operations in order, stopping at the first failure.
    ///
    /// Operations before the failing one stay applied.
    pub fn apply_all<'a, I>(&mut self, operations: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        operations.into_iter().try_for_each(|op| self.apply(op))
    }
}
