//! Capture files: recorded LED frames, per-strip statistics, and INI
//! suggestions derived from comparing two captures.
//!
//! ## File format
//!
//! A plain sequence of records, no header:
//!
//! | Bytes   | Content                                  |
//! |---------|------------------------------------------|
//! | 0..8    | UNIX timestamp, `f64` little-endian      |
//! | 8..1292 | one 1284-byte frame (strips at offsets)  |
//!
//! A trailing partial record is dropped with a warning.

use std::path::Path;

use serde::Serialize;

use crate::color::Rgb;
use crate::error::{Result, SdvxRgbError};
use crate::ini::IniDocument;
use crate::layout::{FRAME_SIZE, STRIP_COUNT, Strip};
use crate::loader::{KEY_BRIGHTNESS, KEY_HUE_SHIFT, KEY_SATURATION};
use crate::model::{PERCENT_MAX, TransformConfig};
use crate::pipeline::LedFrame;

/// Size of one record on disk.
pub const RECORD_SIZE: usize = 8 + FRAME_SIZE;

/// Number of 10° hue histogram buckets.
pub const HUE_BUCKETS: usize = 36;

/// Brightness delta (0–255 scale) below which no suggestion is made.
const BRIGHTNESS_THRESHOLD: f64 = 5.0;

/// Saturation delta (0–1 scale) below which no suggestion is made.
const SATURATION_THRESHOLD: f64 = 0.05;

/// One recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureFrame {
    pub timestamp: f64,
    pub frame: LedFrame,
}

// ── Reading / writing ──

/// Decode capture bytes. Never fails; a trailing partial record is dropped.
pub fn parse_capture(bytes: &[u8]) -> Vec<CaptureFrame> {
    let chunks = bytes.chunks_exact(RECORD_SIZE);
    let rest = chunks.remainder().len();
    if rest > 0 {
        log::warn!("capture has {rest} trailing bytes (partial frame), ignored");
    }
    chunks
        .filter_map(|rec| {
            let (ts, data) = rec.split_at(8);
            let timestamp = f64::from_le_bytes(ts.try_into().ok()?);
            let frame = LedFrame::from_bytes(data).ok()?;
            Some(CaptureFrame { timestamp, frame })
        })
        .collect()
}

/// Encode frames in the capture file format.
pub fn encode_capture(frames: &[CaptureFrame]) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames.len() * RECORD_SIZE);
    for f in frames {
        out.extend_from_slice(&f.timestamp.to_le_bytes());
        out.extend_from_slice(f.frame.as_bytes());
    }
    out
}

/// Read a capture file.
pub fn read_capture(path: &Path) -> Result<Vec<CaptureFrame>> {
    let bytes = std::fs::read(path)?;
    Ok(parse_capture(&bytes))
}

/// Write a capture file, replacing any existing one.
pub fn write_capture(path: &Path, frames: &[CaptureFrame]) -> Result<()> {
    std::fs::write(path, encode_capture(frames))?;
    Ok(())
}

/// Seconds between the first and last frame.
pub fn capture_duration(frames: &[CaptureFrame]) -> f64 {
    match (frames.first(), frames.last()) {
        (Some(a), Some(b)) => b.timestamp - a.timestamp,
        _ => 0.0,
    }
}

/// Apply `config` to every strip of every frame.
pub fn replay<S>(config: &TransformConfig<S>, frames: &[CaptureFrame]) -> Vec<CaptureFrame> {
    frames
        .iter()
        .map(|f| {
            let mut out = f.clone();
            for strip in Strip::ALL {
                config.strip(strip).apply(out.frame.strip_mut(strip));
            }
            out
        })
        .collect()
}

// ── Statistics ──

/// Averages for one strip over all frames of a capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripStats {
    pub strip: Strip,
    pub led_count: usize,
    pub avg_r: f64,
    pub avg_g: f64,
    pub avg_b: f64,
    /// Mean of each pixel's largest channel, 0–255.
    pub avg_brightness: f64,
    /// Saturation summed over non-black pixels, divided by all pixels. 0–1.
    pub avg_saturation: f64,
    /// Start of the most populated hue bucket, in degrees.
    pub dominant_hue: u16,
    /// Non-black pixel counts per 10° hue bucket.
    pub hue_distribution: Vec<u64>,
}

/// Per-strip statistics over `frames`.
pub fn compute_strip_stats(frames: &[CaptureFrame]) -> [StripStats; STRIP_COUNT] {
    Strip::ALL.map(|strip| strip_stats(frames, strip))
}

fn strip_stats(frames: &[CaptureFrame], strip: Strip) -> StripStats {
    let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
    let mut brightness = 0.0;
    let mut saturation = 0.0;
    let mut buckets = vec![0u64; HUE_BUCKETS];
    let mut pixels = 0usize;

    for f in frames {
        for px in f.frame.strip(strip).chunks_exact(3) {
            let c = Rgb::from_slice(px);
            r += f64::from(c.r);
            g += f64::from(c.g);
            b += f64::from(c.b);
            brightness += f64::from(c.max_channel());
            if c != Rgb::BLACK {
                let (h, s) = hue_saturation(c);
                saturation += s;
                buckets[(h * HUE_BUCKETS as f64) as usize % HUE_BUCKETS] += 1;
            }
            pixels += 1;
        }
    }

    let n = pixels.max(1) as f64;
    // First bucket wins ties; all-black captures report 0°.
    let dominant = buckets
        .iter()
        .enumerate()
        .fold((0, 0), |best, (i, &count)| if count > best.1 { (i, count) } else { best })
        .0;

    StripStats {
        strip,
        led_count: strip.led_count(),
        avg_r: r / n,
        avg_g: g / n,
        avg_b: b / n,
        avg_brightness: brightness / n,
        avg_saturation: saturation / n,
        dominant_hue: (dominant * 10) as u16,
        hue_distribution: buckets,
    }
}

/// Floating-point hue (0–1 turn) and saturation (0–1) of a pixel.
fn hue_saturation(c: Rgb) -> (f64, f64) {
    let r = f64::from(c.r) / 255.0;
    let g = f64::from(c.g) / 255.0;
    let b = f64::from(c.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0.0, 0.0);
    }
    let d = max - min;
    let h = if max == r {
        (g - b) / d
    } else if max == g {
        2.0 + (b - r) / d
    } else {
        4.0 + (r - g) / d
    };
    ((h / 6.0).rem_euclid(1.0), d / max)
}

// ── Comparison ──

/// Difference between two captures for one strip (`new - old`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripDelta {
    pub strip: Strip,
    pub d_r: f64,
    pub d_g: f64,
    pub d_b: f64,
    pub d_brightness: f64,
    pub d_saturation: f64,
    pub old_hue: u16,
    pub new_hue: u16,
}

pub fn compare_stats(old: &[StripStats], new: &[StripStats]) -> Vec<StripDelta> {
    old.iter()
        .zip(new)
        .map(|(o, n)| StripDelta {
            strip: o.strip,
            d_r: n.avg_r - o.avg_r,
            d_g: n.avg_g - o.avg_g,
            d_b: n.avg_b - o.avg_b,
            d_brightness: n.avg_brightness - o.avg_brightness,
            d_saturation: n.avg_saturation - o.avg_saturation,
            old_hue: o.dominant_hue,
            new_hue: n.dominant_hue,
        })
        .collect()
}

/// INI values that would make `new` look like `old` for one strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub strip: Option<Strip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue_shift: Option<u16>,
}

impl Suggestion {
    pub fn is_empty(&self) -> bool {
        self.brightness.is_none() && self.saturation.is_none() && self.hue_shift.is_none()
    }

    /// `key=value` pairs in INI order.
    pub fn entries(&self) -> Vec<(&'static str, u16)> {
        [
            (KEY_BRIGHTNESS, self.brightness),
            (KEY_SATURATION, self.saturation),
            (KEY_HUE_SHIFT, self.hue_shift),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }

    /// Write the suggested values into the strip's section of `doc`.
    pub fn apply_to(&self, doc: &mut IniDocument) {
        let Some(strip) = self.strip else { return };
        for (key, value) in self.entries() {
            doc.set(strip.section_name(), key, &value.to_string());
        }
    }
}

/// Suggested adjustments, one per strip that needs any.
pub fn suggest_adjustments(old: &[StripStats], new: &[StripStats]) -> Vec<Suggestion> {
    old.iter()
        .zip(new)
        .map(|(o, n)| suggest_one(o, n))
        .filter(|s| !s.is_empty())
        .collect()
}

fn suggest_one(old: &StripStats, new: &StripStats) -> Suggestion {
    let percent = |ratio: f64| (ratio * 100.0).clamp(0.0, PERCENT_MAX as f64) as u16;

    let d_bright = new.avg_brightness - old.avg_brightness;
    let brightness = (d_bright.abs() > BRIGHTNESS_THRESHOLD && old.avg_brightness > 0.0).then(|| {
        if new.avg_brightness > 0.0 {
            percent(old.avg_brightness / new.avg_brightness)
        } else {
            100
        }
    });

    let d_sat = new.avg_saturation - old.avg_saturation;
    let saturation = (d_sat.abs() > SATURATION_THRESHOLD && new.avg_saturation > 0.0)
        .then(|| percent(old.avg_saturation / new.avg_saturation));

    let shift = (i32::from(old.dominant_hue) - i32::from(new.dominant_hue)).rem_euclid(360);
    let hue_shift = (shift != 0).then_some(shift as u16);

    Suggestion {
        strip: Some(old.strip),
        brightness,
        saturation,
        hue_shift,
    }
}

/// Check that a capture has at least one frame.
pub fn require_frames(frames: &[CaptureFrame], path: &Path) -> Result<()> {
    if frames.is_empty() {
        return Err(SdvxRgbError::Capture(format!(
            "no frames in {}",
            path.display()
        )));
    }
    Ok(())
}
