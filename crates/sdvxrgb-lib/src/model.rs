//! Transform data model: per-strip parameters, derived LUTs, and the
//! configuration root shared by the loader, the reload watcher and the
//! pixel transformer.

use std::time::SystemTime;

use serde::Serialize;

use crate::color::{ChannelOrder, GammaLut, Rgb, build_gamma_lut};
use crate::layout::{STRIP_COUNT, Strip};

/// Upper bound for saturation and brightness percentages.
pub const PERCENT_MAX: i64 = 200;

/// Color override replacing each pixel's hue and saturation.
///
/// A gradient always has a start color; "gradient without static color"
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorOverride {
    /// One color for the whole strip.
    Static(Rgb),
    /// Hue/saturation interpolated from `from` (first LED) to `to` (last LED).
    Gradient { from: Rgb, to: Rgb },
}

impl ColorOverride {
    /// The static color (gradient start).
    pub fn static_color(&self) -> Rgb {
        match *self {
            ColorOverride::Static(c) => c,
            ColorOverride::Gradient { from, .. } => from,
        }
    }

    /// The gradient end color, if this is a gradient.
    pub fn gradient_color(&self) -> Option<Rgb> {
        match *self {
            ColorOverride::Static(_) => None,
            ColorOverride::Gradient { to, .. } => Some(to),
        }
    }
}

/// User-facing transform parameters for one strip (or the global section).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformParams {
    pub channel_order: ChannelOrder,
    pub gamma_r: f32,
    pub gamma_g: f32,
    pub gamma_b: f32,
    /// Degrees, `[0, 360)`.
    pub hue_shift: u16,
    /// Percent, `[0, 200]`, 100 = unchanged.
    pub saturation: u16,
    /// Percent, `[0, 200]`, 100 = unchanged.
    pub brightness: u16,
    pub color_override: Option<ColorOverride>,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformParams {
    /// The no-op transform.
    pub const IDENTITY: TransformParams = TransformParams {
        channel_order: ChannelOrder::Rgb,
        gamma_r: 1.0,
        gamma_g: 1.0,
        gamma_b: 1.0,
        hue_shift: 0,
        saturation: 100,
        brightness: 100,
        color_override: None,
    };

    /// Wrap a hue shift of any sign or magnitude into `[0, 360)`.
    pub fn normalize_hue(hue_shift: i64) -> u16 {
        hue_shift.rem_euclid(360) as u16
    }

    /// Clamp a saturation/brightness percentage into `[0, 200]`.
    pub fn clamp_percent(value: i64) -> u16 {
        value.clamp(0, PERCENT_MAX) as u16
    }

    /// Copy with every field forced into its valid range. Gammas that are
    /// not finite and positive become 1.0.
    pub fn normalized(self) -> Self {
        let gamma = |g: f32| if g.is_finite() && g > 0.0 { g } else { 1.0 };
        TransformParams {
            gamma_r: gamma(self.gamma_r),
            gamma_g: gamma(self.gamma_g),
            gamma_b: gamma(self.gamma_b),
            hue_shift: Self::normalize_hue(i64::from(self.hue_shift)),
            saturation: Self::clamp_percent(i64::from(self.saturation)),
            brightness: Self::clamp_percent(i64::from(self.brightness)),
            ..self
        }
    }

    pub fn static_color(&self) -> Option<Rgb> {
        self.color_override.map(|o| o.static_color())
    }

    pub fn gradient_color(&self) -> Option<Rgb> {
        self.color_override.and_then(|o| o.gradient_color())
    }

    /// Whether these parameters change anything at all.
    pub fn is_active(&self) -> bool {
        self.channel_order != ChannelOrder::Rgb
            || self.gamma_r != 1.0
            || self.gamma_g != 1.0
            || self.gamma_b != 1.0
            || self.hue_shift != 0
            || self.saturation != 100
            || self.brightness != 100
            || self.color_override.is_some()
    }
}

/// Resolved transform for one strip: parameters plus derived state.
///
/// Only constructible through [`StripTransform::new`], so the LUTs and the
/// `enabled` flag always match the parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StripTransform {
    params: TransformParams,
    enabled: bool,
    lut_r: GammaLut,
    lut_g: GammaLut,
    lut_b: GammaLut,
}

impl Default for StripTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl StripTransform {
    pub fn new(params: TransformParams) -> Self {
        let params = params.normalized();
        StripTransform {
            enabled: params.is_active(),
            lut_r: build_gamma_lut(params.gamma_r),
            lut_g: build_gamma_lut(params.gamma_g),
            lut_b: build_gamma_lut(params.gamma_b),
            params,
        }
    }

    pub fn identity() -> Self {
        Self::new(TransformParams::IDENTITY)
    }

    pub fn params(&self) -> &TransformParams {
        &self.params
    }

    /// False when every parameter is at identity; the transform is then a no-op.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn lut_r(&self) -> &GammaLut {
        &self.lut_r
    }

    pub fn lut_g(&self) -> &GammaLut {
        &self.lut_g
    }

    pub fn lut_b(&self) -> &GammaLut {
        &self.lut_b
    }
}

/// Configuration root: the ten strip transforms plus change-tracking state.
///
/// `S` is where the INI text comes from (a file in production, an
/// in-memory source in tests). Owned by whatever drives the pipeline and
/// mutated only by loads and reload checks, from a single thread.
#[derive(Debug)]
pub struct TransformConfig<S> {
    pub(crate) strips: [StripTransform; STRIP_COUNT],
    pub(crate) source: S,
    pub(crate) last_write: Option<SystemTime>,
    pub(crate) call_counter: u32,
}

impl<S> TransformConfig<S> {
    /// New root with every strip at identity and no timestamp recorded.
    pub fn new(source: S) -> Self {
        TransformConfig {
            strips: std::array::from_fn(|_| StripTransform::identity()),
            source,
            last_write: None,
            call_counter: 0,
        }
    }

    pub fn strip(&self, strip: Strip) -> &StripTransform {
        &self.strips[strip.index()]
    }

    /// All strips in index order.
    pub fn strips(&self) -> &[StripTransform; STRIP_COUNT] {
        &self.strips
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Modification time of the source at the last load, `None` if nothing
    /// is loaded.
    pub fn last_write(&self) -> Option<SystemTime> {
        self.last_write
    }

    /// Calls since the last reload check.
    pub fn call_counter(&self) -> u32 {
        self.call_counter
    }

    /// Number of strips with a non-identity transform.
    pub fn active_count(&self) -> usize {
        self.strips.iter().filter(|s| s.enabled()).count()
    }

    /// Reset every strip to identity and forget the recorded timestamp.
    pub fn reset(&mut self) {
        for strip in &mut self.strips {
            *strip = StripTransform::identity();
        }
        self.last_write = None;
    }
}
