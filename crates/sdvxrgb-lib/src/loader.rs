//! Configuration loader: INI text to resolved per-strip transforms.
//!
//! Resolution is two-pass. `[global]` is parsed against the identity
//! transform, then every strip section is parsed against the resolved
//! global record, so a key missing from a strip inherits the global value
//! and a key missing from `[global]` inherits identity.
//!
//! Nothing here fails. Unparsable values inherit, out-of-range numbers
//! clamp, and a missing source means "no customization".

use serde::Serialize;

use crate::color::{ChannelOrder, parse_channel_order, parse_hex_color};
use crate::error::{Result, SdvxRgbError};
use crate::ini::{IniDocument, IniSection};
use crate::layout::{GLOBAL_SECTION, STRIP_COUNT, Strip, is_known_section};
use crate::model::{ColorOverride, StripTransform, TransformConfig, TransformParams};
use crate::source::ConfigSource;

// ── Recognized keys ──

pub const KEY_CHANNEL_ORDER: &str = "channel_order";
pub const KEY_GAMMA_R: &str = "gamma_r";
pub const KEY_GAMMA_G: &str = "gamma_g";
pub const KEY_GAMMA_B: &str = "gamma_b";
pub const KEY_HUE_SHIFT: &str = "hue_shift";
pub const KEY_SATURATION: &str = "saturation";
pub const KEY_BRIGHTNESS: &str = "brightness";
pub const KEY_STATIC_COLOR: &str = "static_color";
pub const KEY_GRADIENT_COLOR: &str = "gradient_color";

/// Every key the loader understands, in INI write order.
pub const KNOWN_KEYS: [&str; 9] = [
    KEY_CHANNEL_ORDER,
    KEY_GAMMA_R,
    KEY_GAMMA_G,
    KEY_GAMMA_B,
    KEY_HUE_SHIFT,
    KEY_SATURATION,
    KEY_BRIGHTNESS,
    KEY_STATIC_COLOR,
    KEY_GRADIENT_COLOR,
];

/// Result of a [`TransformConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The source does not exist; every strip was reset to identity.
    Missing,
    /// The source was parsed; `active` strips have a non-identity transform.
    Loaded { active: usize },
}

/// Fully resolved parameters: the global record and each strip's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub global: TransformParams,
    pub strips: [TransformParams; STRIP_COUNT],
}

impl ResolvedConfig {
    pub fn strip(&self, strip: Strip) -> &TransformParams {
        &self.strips[strip.index()]
    }
}

/// Resolve the global record and all strip records from a document.
pub fn resolve(doc: &IniDocument) -> ResolvedConfig {
    let global = load_section(doc.section(GLOBAL_SECTION), &TransformParams::IDENTITY);
    let strips = Strip::ALL.map(|strip| load_section(doc.section(strip.section_name()), &global));
    ResolvedConfig { global, strips }
}

/// Parse one section, taking every absent or unparsable key from `fallback`.
///
/// A missing section behaves like an empty one: the result equals
/// `fallback`.
pub fn load_section(section: Option<&IniSection>, fallback: &TransformParams) -> TransformParams {
    let get = |key: &str| section.and_then(|s| s.get(key));
    let name = section.map(IniSection::name).unwrap_or("-");

    let channel_order = match get(KEY_CHANNEL_ORDER) {
        Some(text) => parse_channel_order(text),
        None => fallback.channel_order,
    };

    let gamma = |key: &str, inherited: f32| match get(key) {
        Some(text) => parse_gamma(text).unwrap_or_else(|| {
            log::debug!("[{name}] {key}={text:?} is not a positive number, inheriting {inherited}");
            inherited
        }),
        None => inherited,
    };
    let gamma_r = gamma(KEY_GAMMA_R, fallback.gamma_r);
    let gamma_g = gamma(KEY_GAMMA_G, fallback.gamma_g);
    let gamma_b = gamma(KEY_GAMMA_B, fallback.gamma_b);

    let int = |key: &str, inherited: u16| match get(key) {
        Some(text) => text.trim().parse::<i64>().unwrap_or_else(|_| {
            log::debug!("[{name}] {key}={text:?} is not an integer, inheriting {inherited}");
            i64::from(inherited)
        }),
        None => i64::from(inherited),
    };
    let hue_shift = TransformParams::normalize_hue(int(KEY_HUE_SHIFT, fallback.hue_shift));
    let saturation = TransformParams::clamp_percent(int(KEY_SATURATION, fallback.saturation));
    let brightness = TransformParams::clamp_percent(int(KEY_BRIGHTNESS, fallback.brightness));

    // A malformed color is treated exactly like an absent one.
    let static_color = get(KEY_STATIC_COLOR)
        .and_then(parse_hex_color)
        .or_else(|| fallback.static_color());

    // The gradient is only honored once a static color is in effect, whether
    // set here or inherited. Otherwise the fallback's gradient carries over.
    let gradient_color = static_color
        .and_then(|_| get(KEY_GRADIENT_COLOR).and_then(parse_hex_color))
        .or_else(|| fallback.gradient_color());

    let color_override = match (static_color, gradient_color) {
        (Some(from), Some(to)) => Some(ColorOverride::Gradient { from, to }),
        (Some(c), None) => Some(ColorOverride::Static(c)),
        (None, _) => None,
    };

    TransformParams {
        channel_order,
        gamma_r,
        gamma_g,
        gamma_b,
        hue_shift,
        saturation,
        brightness,
        color_override,
    }
}

fn parse_gamma(text: &str) -> Option<f32> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|g| g.is_finite() && *g > 0.0)
}

/// Check an edit before it is written to the INI.
///
/// Reading is lenient, editing is not: the section must be `global` or a
/// strip, the key must be recognized, and the value must parse for that key.
pub fn validate_entry(section: &str, key: &str, value: &str) -> Result<()> {
    if !is_known_section(section) {
        return Err(SdvxRgbError::Config(format!("unknown section [{section}]")));
    }
    let key = key.to_ascii_lowercase();
    let ok = match key.as_str() {
        KEY_CHANNEL_ORDER => ChannelOrder::from_name(value.trim()).is_some(),
        KEY_GAMMA_R | KEY_GAMMA_G | KEY_GAMMA_B => parse_gamma(value).is_some(),
        KEY_HUE_SHIFT | KEY_SATURATION | KEY_BRIGHTNESS => value.trim().parse::<i64>().is_ok(),
        KEY_STATIC_COLOR | KEY_GRADIENT_COLOR => parse_hex_color(value).is_some(),
        _ => {
            return Err(SdvxRgbError::Config(format!(
                "unknown key \"{key}\" (expected one of: {})",
                KNOWN_KEYS.join(", ")
            )));
        }
    };
    if ok {
        Ok(())
    } else {
        Err(SdvxRgbError::Config(format!(
            "invalid value for {key}: \"{value}\""
        )))
    }
}

impl<S: ConfigSource> TransformConfig<S> {
    /// Load (or reload) every strip from the source.
    ///
    /// Overwrites all ten strips and the recorded timestamp. A missing
    /// source resets everything to identity; that is the documented
    /// "no customization" state, not an error.
    ///
    /// The timestamp is taken before the text is read, so a save racing
    /// the read leaves a newer timestamp for the next check to pick up.
    pub fn load(&mut self) -> LoadOutcome {
        let modified = self.source.modified();
        let Some(text) = self.source.read() else {
            log::info!(
                "{} not found or unreadable, all strips pass through unchanged",
                self.source.describe()
            );
            self.reset();
            // Present but unreadable: only retry once the timestamp moves
            self.last_write = modified;
            return LoadOutcome::Missing;
        };
        self.last_write = modified;

        let resolved = resolve(&IniDocument::parse(&text));
        for (slot, params) in self.strips.iter_mut().zip(resolved.strips) {
            *slot = StripTransform::new(params);
        }

        let active = self.active_count();
        log::info!(
            "loaded {} ({active} of {STRIP_COUNT} strips active)",
            self.source.describe()
        );
        LoadOutcome::Loaded { active }
    }
}
