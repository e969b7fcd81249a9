//! Per-pixel color pipeline.
//!
//! Each RGB triple goes through, in order: channel reorder, gamma LUT, color
//! override or hue/saturation adjustment, brightness scaling.

use crate::color::{Hsv, Rgb, hsv_to_rgb, rgb_to_hsv};
use crate::model::{ColorOverride, StripTransform, TransformParams};

/// Hue/saturation stage, resolved once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorStage {
    /// Reordered, gamma-corrected value stands.
    Passthrough,
    /// Replace H and S, keep each pixel's V.
    Fixed { h: u16, s: u8 },
    /// Interpolate H (shortest arc) and S across the strip, keep V.
    Gradient { h1: i32, s1: i32, dh: i32, ds: i32, last: i32 },
    /// Rotate hue and scale saturation.
    Adjust { hue_shift: u16, saturation: u16 },
}

impl ColorStage {
    fn resolve(params: &TransformParams, num_leds: usize) -> Self {
        match params.color_override {
            Some(ColorOverride::Gradient { from, to }) if num_leds > 1 => {
                let c1 = rgb_to_hsv(from);
                let c2 = rgb_to_hsv(to);
                let mut dh = i32::from(c2.h) - i32::from(c1.h);
                if dh > 180 {
                    dh -= 360;
                } else if dh < -180 {
                    dh += 360;
                }
                ColorStage::Gradient {
                    h1: i32::from(c1.h),
                    s1: i32::from(c1.s),
                    dh,
                    ds: i32::from(c2.s) - i32::from(c1.s),
                    last: (num_leds - 1) as i32,
                }
            }
            // A one-LED gradient is just its start color
            Some(over) => {
                let c = rgb_to_hsv(over.static_color());
                ColorStage::Fixed { h: c.h, s: c.s }
            }
            None if params.hue_shift != 0 || params.saturation != 100 => ColorStage::Adjust {
                hue_shift: params.hue_shift,
                saturation: params.saturation,
            },
            None => ColorStage::Passthrough,
        }
    }

    #[inline]
    fn apply(self, c: Rgb, led: usize) -> Rgb {
        match self {
            ColorStage::Passthrough => c,
            ColorStage::Fixed { h, s } => hsv_to_rgb(Hsv::new(h, s, c.max_channel())),
            ColorStage::Gradient { h1, s1, dh, ds, last } => {
                let i = led as i32;
                let h = (h1 + dh * i / last).rem_euclid(360);
                let s = s1 + ds * i / last;
                hsv_to_rgb(Hsv::new(h as u16, s as u8, c.max_channel()))
            }
            ColorStage::Adjust {
                hue_shift,
                saturation,
            } => {
                let mut hsv = rgb_to_hsv(c);
                hsv.h = (hsv.h + hue_shift) % 360;
                if saturation != 100 {
                    let s = u32::from(hsv.s) * u32::from(saturation) / 100;
                    hsv.s = s.min(255) as u8;
                }
                hsv_to_rgb(hsv)
            }
        }
    }
}

#[inline]
fn scale(channel: u8, percent: u16) -> u8 {
    (u32::from(channel) * u32::from(percent) / 100).min(255) as u8
}

impl StripTransform {
    /// Transform a strip's RGB bytes in place.
    ///
    /// `data` holds consecutive RGB triples; a trailing partial triple is left
    /// alone. Disabled (identity) transforms return immediately.
    pub fn apply(&self, data: &mut [u8]) {
        if !self.enabled() {
            return;
        }

        let params = self.params();
        let stage = ColorStage::resolve(params, data.len() / 3);
        let (lut_r, lut_g, lut_b) = (self.lut_r(), self.lut_g(), self.lut_b());
        let order = params.channel_order;
        let brightness = params.brightness;

        for (led, px) in data.chunks_exact_mut(3).enumerate() {
            let c = order.permute(Rgb::from_slice(px));
            let c = Rgb::new(
                lut_r[usize::from(c.r)],
                lut_g[usize::from(c.g)],
                lut_b[usize::from(c.b)],
            );
            let mut c = stage.apply(c, led);
            if brightness != 100 {
                c = Rgb::new(
                    scale(c.r, brightness),
                    scale(c.g, brightness),
                    scale(c.b, brightness),
                );
            }
            c.write_to(px);
        }
    }
}
