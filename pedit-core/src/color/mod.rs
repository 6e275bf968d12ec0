//! Colour values and colour space conversions

mod hsv;

pub use hsv::{hsv_to_rgb, rgb_to_hsv, Hsv};

use std::fmt;

use serde::{Deserialize, Serialize};

// Rec. 709 luma weights, scaled by 10_000 for integer arithmetic
const LUMA_R: u32 = 2126;
const LUMA_G: u32 = 7152;
const LUMA_B: u32 = 722;
const LUMA_SCALE: u32 = 10_000;

/// One 8-bit RGBA sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Opaque gray level
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_channels(channels: [u8; 4]) -> Self {
        let [r, g, b, a] = channels;
        Self::new(r, g, b, a)
    }

    /// True when all three colour channels carry the same value
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Rec. 709 luma, rounded to the nearest level
    pub fn luma(&self) -> u8 {
        luma(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Rec. 709 luma of an 8-bit RGB triple
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    // Weights sum to LUMA_SCALE so the result never exceeds 255
    ((weighted + LUMA_SCALE / 2) / LUMA_SCALE) as u8
}

#[cfg(test)]
mod tests;
