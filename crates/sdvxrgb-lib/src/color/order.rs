//! Channel order permutations.

use serde::{Deserialize, Serialize};

use super::Rgb;

/// Which input channel feeds each output channel.
///
/// The name reads as the output: `GRB` means output red takes input green,
/// output green takes input red, output blue stays blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ChannelOrder {
    pub const ALL: [ChannelOrder; 6] = [
        ChannelOrder::Rgb,
        ChannelOrder::Rbg,
        ChannelOrder::Grb,
        ChannelOrder::Gbr,
        ChannelOrder::Brg,
        ChannelOrder::Bgr,
    ];

    /// Canonical upper-case name, as written in the INI file.
    pub fn name(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "RGB",
            ChannelOrder::Rbg => "RBG",
            ChannelOrder::Grb => "GRB",
            ChannelOrder::Gbr => "GBR",
            ChannelOrder::Brg => "BRG",
            ChannelOrder::Bgr => "BGR",
        }
    }

    /// Look up an order by name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|order| order.name().eq_ignore_ascii_case(s))
    }

    /// Reorder one pixel.
    #[inline]
    pub fn permute(self, c: Rgb) -> Rgb {
        let Rgb { r, g, b } = c;
        match self {
            ChannelOrder::Rgb => Rgb::new(r, g, b),
            ChannelOrder::Rbg => Rgb::new(r, b, g),
            ChannelOrder::Grb => Rgb::new(g, r, b),
            ChannelOrder::Gbr => Rgb::new(g, b, r),
            ChannelOrder::Brg => Rgb::new(b, r, g),
            ChannelOrder::Bgr => Rgb::new(b, g, r),
        }
    }
}

impl std::fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a channel order; unrecognized text falls back to `RGB`.
pub fn parse_channel_order(s: &str) -> ChannelOrder {
    ChannelOrder::from_name(s).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_names() {
        for order in ChannelOrder::ALL {
            assert_eq!(parse_channel_order(order.name()), order);
        }
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(parse_channel_order("grb"), ChannelOrder::Grb);
        assert_eq!(parse_channel_order("bGr"), ChannelOrder::Bgr);
    }

    #[test]
    fn parse_unknown_defaults_to_rgb() {
        assert_eq!(parse_channel_order("XYZ"), ChannelOrder::Rgb);
        assert_eq!(parse_channel_order(""), ChannelOrder::Rgb);
        assert_eq!(parse_channel_order("RGBA"), ChannelOrder::Rgb);
    }

    #[test]
    fn permute_each_order() {
        let px = Rgb::new(1, 2, 3);
        assert_eq!(ChannelOrder::Rgb.permute(px), Rgb::new(1, 2, 3));
        assert_eq!(ChannelOrder::Rbg.permute(px), Rgb::new(1, 3, 2));
        assert_eq!(ChannelOrder::Grb.permute(px), Rgb::new(2, 1, 3));
        assert_eq!(ChannelOrder::Gbr.permute(px), Rgb::new(2, 3, 1));
        assert_eq!(ChannelOrder::Brg.permute(px), Rgb::new(3, 1, 2));
        assert_eq!(ChannelOrder::Bgr.permute(px), Rgb::new(3, 2, 1));
    }

    #[test]
    fn permutations_are_distinct() {
        let px = Rgb::new(1, 2, 3);
        let outs: Vec<Rgb> = ChannelOrder::ALL.iter().map(|o| o.permute(px)).collect();
        for (i, a) in outs.iter().enumerate() {
            for b in &outs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ChannelOrder::Gbr.to_string(), "GBR");
    }
}
