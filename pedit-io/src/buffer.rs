use std::path::{Path, PathBuf};

use image::ImageFormat;
use pedit_core::{ColorMode, EditError, PixelGrid, Rgba};
use tracing::info;

use crate::codec;
use crate::error::Result;

/// Current and original pixels of one loaded image.
///
/// Both grids come from the same decode. Edits replace `current` only;
/// `original` changes only when a new file is loaded.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    current: PixelGrid,
    original: PixelGrid,
    source: Option<PathBuf>,
    format: Option<ImageFormat>,
}

impl ImageBuffer {
    /// Buffer with no image
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image from file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut buffer = Self::new();
        buffer.load(path)?;
        Ok(buffer)
    }

    /// Buffer holding an in-memory grid as both current and original
    pub fn from_grid(grid: PixelGrid) -> Self {
        Self {
            original: grid.clone(),
            current: grid,
            source: None,
            format: None,
        }
    }

    /// Replace both grids with a fresh decode of `path`.
    ///
    /// On failure the previously loaded image is kept as it was.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let (grid, format) = codec::decode(path)?;

        info!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            mode = %grid.mode(),
            "loaded image"
        );

        self.original = grid.clone();
        self.current = grid;
        self.source = Some(path.to_path_buf());
        self.format = format;
        Ok(())
    }

    /// Encode the current grid in the format implied by the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.require_image()?;
        codec::encode(&self.current, path)?;

        info!(path = %path.display(), "saved image");
        Ok(())
    }

    /// Make the current grid a copy of the original again
    pub fn revert(&mut self) -> Result<()> {
        self.require_image()?;
        self.current = self.original.clone();
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    /// Get current dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.current.dimensions()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.current.mode()
    }

    /// Read one pixel of the current grid
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Rgba> {
        Ok(self.current.pixel_at(x, y)?)
    }

    /// Write one pixel of the current grid
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        Ok(self.current.set_pixel(x, y, color)?)
    }

    pub fn current(&self) -> &PixelGrid {
        &self.current
    }

    pub fn original(&self) -> &PixelGrid {
        &self.original
    }

    /// Path of the last successful load
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Format detected at load time
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub(crate) fn replace_current(&mut self, grid: PixelGrid) {
        self.current = grid;
    }

    fn require_image(&self) -> Result<()> {
        if self.is_empty() {
            return Err(EditError::EmptyImage.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = ImageBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.dimensions(), (0, 0));
        assert!(buffer.source().is_none());
        assert!(buffer.format().is_none());
    }

    #[test]
    fn test_empty_buffer_rejects_revert_and_save() {
        let mut buffer = ImageBuffer::new();
        assert_eq!(buffer.revert().unwrap_err().kind(), ErrorKind::EmptyImage);
        assert_eq!(
            buffer.save("never-written.png").unwrap_err().kind(),
            ErrorKind::EmptyImage
        );
        assert_eq!(buffer.pixel_at(0, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_set_pixel_leaves_original() {
        let mut buffer = ImageBuffer::from_grid(PixelGrid::filled(2, 2, Rgba::WHITE));
        buffer.set_pixel(1, 1, Rgba::BLACK).unwrap();

        assert_eq!(buffer.pixel_at(1, 1).unwrap(), Rgba::BLACK);
        assert_eq!(buffer.original().pixel_at(1, 1).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn test_revert_restores_original() {
        let grid = PixelGrid::filled(3, 1, Rgba::rgb(1, 2, 3));
        let mut buffer = ImageBuffer::from_grid(grid.clone());
        buffer.replace_current(PixelGrid::filled(1, 1, Rgba::BLACK));
        assert_eq!(buffer.dimensions(), (1, 1));

        buffer.revert().unwrap();
        assert_eq!(buffer.current(), &grid);
        assert_eq!(buffer.original(), &grid);
    }

    #[test]
    fn test_pixel_access_bounds() {
        let mut buffer = ImageBuffer::from_grid(PixelGrid::filled(2, 2, Rgba::WHITE));
        assert_eq!(buffer.pixel_at(2, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(
            buffer.set_pixel(0, 5, Rgba::BLACK).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
    }
}
