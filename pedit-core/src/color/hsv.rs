//! HSV (Hue-Saturation-Value) conversions for 8-bit RGB

/// HSV colour representation
/// - H (hue): 0.0-360.0 degrees
/// - S (saturation): 0.0-1.0
/// - V (value): 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Same colour with the hue turned by `degrees`, wrapped into [0, 360)
    pub fn rotated(self, degrees: f32) -> Self {
        Self {
            h: (self.h + degrees).rem_euclid(360.0),
            ..self
        }
    }
}

/// Convert 8-bit RGB to HSV
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    // Achromatic, hue is undefined and reported as 0
    if delta <= 0.0 {
        return Hsv { h: 0.0, s: 0.0, v: max };
    }

    let s = delta / max;

    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsv {
        h: h.rem_euclid(360.0),
        s,
        v: max,
    }
}

/// Convert HSV back to 8-bit RGB, rounding each channel
#[inline]
pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);
    let h = hsv.h.rem_euclid(360.0);

    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (to_level(r + m), to_level(g + m), to_level(b + m))
}

#[inline]
fn to_level(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}
