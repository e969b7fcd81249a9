//! Integer RGB <-> HSV conversion.
//!
//! Hue is in degrees `[0, 360)`, saturation and value in `[0, 255]`. All
//! arithmetic is integer and truncating, so results are bit-exact and
//! identical on every platform.

use super::Rgb;

/// HSV coordinates in integer units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub h: u16,
    /// Saturation, `[0, 255]`.
    pub s: u8,
    /// Value (largest channel), `[0, 255]`.
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u16, s: u8, v: u8) -> Self {
        Hsv { h, s, v }
    }
}

/// Convert an RGB triple to HSV.
///
/// Black collapses to `(0, 0, 0)` and grays to hue 0, saturation 0.
pub fn rgb_to_hsv(c: Rgb) -> Hsv {
    let (r, g, b) = (i32::from(c.r), i32::from(c.g), i32::from(c.b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if max == 0 {
        return Hsv::new(0, 0, 0);
    }

    let s = delta * 255 / max;
    if delta == 0 {
        return Hsv::new(0, s as u8, max as u8);
    }

    let h = if max == r {
        60 * (g - b) / delta
    } else if max == g {
        120 + 60 * (b - r) / delta
    } else {
        240 + 60 * (r - g) / delta
    };

    Hsv::new(h.rem_euclid(360) as u16, s as u8, max as u8)
}

/// Convert HSV back to RGB using the six-sector reconstruction.
///
/// Hues of 360 and above wrap. Zero saturation short-circuits to gray.
pub fn hsv_to_rgb(c: Hsv) -> Rgb {
    let v = i32::from(c.v);
    let s = i32::from(c.s);
    if s == 0 {
        return Rgb::new(c.v, c.v, c.v);
    }

    let h = i32::from(c.h) % 360;
    let region = h / 60;
    let remainder = h % 60;

    let p = (v * (255 - s) / 255) as u8;
    let q = (v * (255 - s * remainder / 60) / 255) as u8;
    let t = (v * (255 - s * (60 - remainder) / 60) / 255) as u8;
    let v = c.v;

    match region {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}
