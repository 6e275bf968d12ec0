//! Pixel grid storage shared by every editing operation

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, Axis};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{BoundsError, EditError, Result};

/// Samples stored per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// Semantic pixel format of a grid.
///
/// Storage is always four 8-bit channels; the mode records what the pixels
/// mean and decides how they are written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    #[default]
    Rgba,
}

impl ColorMode {
    pub fn has_alpha(self) -> bool {
        matches!(self, ColorMode::GrayscaleAlpha | ColorMode::Rgba)
    }

    pub fn is_grayscale(self) -> bool {
        matches!(self, ColorMode::Grayscale | ColorMode::GrayscaleAlpha)
    }

    /// Colour counterpart, keeping alpha
    pub fn to_color(self) -> Self {
        if self.has_alpha() {
            ColorMode::Rgba
        } else {
            ColorMode::Rgb
        }
    }

    /// Grayscale counterpart, keeping alpha
    pub fn to_grayscale(self) -> Self {
        if self.has_alpha() {
            ColorMode::GrayscaleAlpha
        } else {
            ColorMode::Grayscale
        }
    }

    /// Same family, with an alpha channel
    pub fn with_alpha(self) -> Self {
        if self.is_grayscale() {
            ColorMode::GrayscaleAlpha
        } else {
            ColorMode::Rgba
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMode::Grayscale => "grayscale",
            ColorMode::GrayscaleAlpha => "grayscale+alpha",
            ColorMode::Rgb => "rgb",
            ColorMode::Rgba => "rgba",
        };
        f.write_str(name)
    }
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, `None` on overflow
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on overflow
    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.height)
    }

    /// Whether the rectangle lies inside a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        matches!(
            (self.right(), self.bottom()),
            (Some(right), Some(bottom)) if right <= width && bottom <= height
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl FromStr for Rect {
    type Err = EditError;

    /// Parse "x,y,width,height"
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(EditError::invalid(format!(
                "rectangle must be in format x,y,width,height, got: {s}"
            )));
        }

        let mut values = [0u32; 4];
        for (value, (part, name)) in values
            .iter_mut()
            .zip(parts.iter().zip(["x", "y", "width", "height"]))
        {
            *value = part
                .parse::<u32>()
                .map_err(|_| EditError::invalid(format!("invalid {name} value: {part}")))?;
        }

        let [x, y, width, height] = values;
        Ok(Rect::new(x, y, width, height))
    }
}

/// Row-major grid of RGBA samples, shape `[height, width, 4]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    data: Array3<u8>,
    mode: ColorMode,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl PixelGrid {
    /// Grid with no pixels
    pub fn empty() -> Self {
        Self {
            data: Array3::zeros((0, 0, CHANNELS)),
            mode: ColorMode::default(),
        }
    }

    /// Grid with every pixel set to `color`.
    ///
    /// The mode is the narrowest one that represents `color` exactly.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut data = Array3::zeros((height as usize, width as usize, CHANNELS));
        for mut pixel in data.lanes_mut(Axis(2)) {
            pixel.assign(&ndarray::aview1(&color.channels()));
        }

        let mut mode = if color.is_gray() {
            ColorMode::Grayscale
        } else {
            ColorMode::Rgb
        };
        if !color.is_opaque() {
            mode = mode.with_alpha();
        }

        Self { data, mode }
    }

    /// Wrap interleaved RGBA bytes (row-major, 4 bytes per pixel)
    pub fn from_rgba_raw(width: u32, height: u32, raw: Vec<u8>, mode: ColorMode) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if raw.len() != expected {
            return Err(EditError::invalid(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                raw.len()
            )));
        }

        let data = Array3::from_shape_vec((height as usize, width as usize, CHANNELS), raw)
            .map_err(|e| EditError::invalid(e.to_string()))?;

        Ok(Self { data, mode })
    }

    /// Wrap an existing `[height, width, 4]` array
    pub fn from_array(data: Array3<u8>, mode: ColorMode) -> Result<Self> {
        if data.len_of(Axis(2)) != CHANNELS {
            return Err(EditError::invalid(format!(
                "expected {CHANNELS} channels, got {}",
                data.len_of(Axis(2))
            )));
        }
        Ok(Self { data, mode })
    }

    pub fn width(&self) -> u32 {
        self.data.len_of(Axis(1)) as u32
    }

    pub fn height(&self) -> u32 {
        self.data.len_of(Axis(0)) as u32
    }

    /// Get dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Underlying sample array
    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    pub(crate) fn array_mut(&mut self) -> &mut Array3<u8> {
        &mut self.data
    }

    /// Read one pixel
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Rgba> {
        self.check_pixel(x, y)?;
        let (x, y) = (x as usize, y as usize);
        Ok(Rgba::new(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ))
    }

    /// Write one pixel, widening the mode if `color` needs it
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        self.check_pixel(x, y)?;

        if self.mode.is_grayscale() && !color.is_gray() {
            self.mode = self.mode.to_color();
        }
        if !self.mode.has_alpha() && !color.is_opaque() {
            self.mode = self.mode.with_alpha();
        }

        let (x, y) = (x as usize, y as usize);
        for (c, value) in color.channels().into_iter().enumerate() {
            self.data[[y, x, c]] = value;
        }
        Ok(())
    }

    /// Every pixel in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data.lanes(Axis(2)).into_iter().map(|lane| {
            Rgba::new(lane[0], lane[1], lane[2], lane[3])
        })
    }

    /// Whether every pixel has full alpha
    pub fn is_opaque(&self) -> bool {
        self.data
            .index_axis(Axis(2), 3)
            .iter()
            .all(|&a| a == u8::MAX)
    }

    /// Interleaved RGBA bytes in row-major order
    pub fn to_rgba_raw(&self) -> Vec<u8> {
        self.data.as_standard_layout().iter().copied().collect()
    }

    /// Consume the grid into interleaved RGBA bytes
    pub fn into_rgba_raw(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            let (raw, _offset) = self.data.into_raw_vec_and_offset();
            raw
        } else {
            self.to_rgba_raw()
        }
    }

    /// Replace every pixel with `f(pixel)`, in place
    pub(crate) fn map_pixels(&mut self, mut f: impl FnMut(Rgba) -> Rgba) {
        for mut lane in self.data.lanes_mut(Axis(2)) {
            let out = f(Rgba::new(lane[0], lane[1], lane[2], lane[3]));
            lane[0] = out.r;
            lane[1] = out.g;
            lane[2] = out.b;
            lane[3] = out.a;
        }
    }

    fn check_pixel(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(BoundsError::Pixel {
                x,
                y,
                width: self.width(),
                height: self.height(),
            }
            .into());
        }
        Ok(())
    }
}
