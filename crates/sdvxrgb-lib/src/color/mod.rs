//! Color math: RGB/HSV conversion, gamma LUTs, hex colors, channel orders.
//!
//! Everything here is pure and allocation-free so it can run inside the
//! per-frame hook path.

mod gamma;
mod hex;
mod hsv;
mod order;

use serde::{Deserialize, Serialize};

pub use gamma::{GammaLut, build_gamma_lut};
pub use hex::{format_hex_color, parse_hex_color};
pub use hsv::{Hsv, hsv_to_rgb, rgb_to_hsv};
pub use order::{ChannelOrder, parse_channel_order};

/// An 8-bit RGB triple, in the order the LED data is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Read a triple from the first three bytes of `px`.
    #[inline]
    pub fn from_slice(px: &[u8]) -> Self {
        Rgb::new(px[0], px[1], px[2])
    }

    /// Write this triple into the first three bytes of `px`.
    #[inline]
    pub fn write_to(self, px: &mut [u8]) {
        px[0] = self.r;
        px[1] = self.g;
        px[2] = self.b;
    }

    /// Largest channel (the HSV value).
    pub fn max_channel(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
