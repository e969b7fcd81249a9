//! Tape LED layout: the ten fixed strips and their place in the frame.
//!
//! The game pushes each strip separately as `index + RGB bytes`. Published
//! frames concatenate all ten strips into one 1284-byte region, strip `i`
//! at the sum of the preceding strips' byte lengths.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SdvxRgbError;

/// Number of strips.
pub const STRIP_COUNT: usize = 10;

/// Size of a full frame (all strips, RGB) in bytes.
pub const FRAME_SIZE: usize = 1284;

/// Byte length of the largest strip (`ctrl_panel`).
pub const MAX_STRIP_BYTES: usize = 282;

/// INI section holding the defaults every strip inherits.
pub const GLOBAL_SECTION: &str = "global";

// ── Strip table ──
//
// index  section               LEDs  bytes  offset
//   0    title                   74    222       0
//   1    upper_left_speaker      12     36     222
//   2    upper_right_speaker     12     36     258
//   3    left_wing               56    168     294
//   4    right_wing              56    168     462
//   5    ctrl_panel              94    282     630
//   6    lower_left_speaker      12     36     912
//   7    lower_right_speaker     12     36     948
//   8    woofer                  14     42     984
//   9    v_unit                  86    258    1026

const SECTION_NAMES: [&str; STRIP_COUNT] = [
    "title",
    "upper_left_speaker",
    "upper_right_speaker",
    "left_wing",
    "right_wing",
    "ctrl_panel",
    "lower_left_speaker",
    "lower_right_speaker",
    "woofer",
    "v_unit",
];

const LABELS: [&str; STRIP_COUNT] = [
    "Title",
    "Upper L Speaker",
    "Upper R Speaker",
    "Left Wing",
    "Right Wing",
    "Ctrl Panel",
    "Lower L Speaker",
    "Lower R Speaker",
    "Woofer",
    "V Unit",
];

const LED_COUNTS: [usize; STRIP_COUNT] = [74, 12, 12, 56, 56, 94, 12, 12, 14, 86];

const BYTE_OFFSETS: [usize; STRIP_COUNT] = [0, 222, 258, 294, 462, 630, 912, 948, 984, 1026];

/// One of the ten tape LED strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strip {
    Title,
    UpperLeftSpeaker,
    UpperRightSpeaker,
    LeftWing,
    RightWing,
    CtrlPanel,
    LowerLeftSpeaker,
    LowerRightSpeaker,
    Woofer,
    VUnit,
}

impl Strip {
    /// All strips in index order.
    pub const ALL: [Strip; STRIP_COUNT] = [
        Strip::Title,
        Strip::UpperLeftSpeaker,
        Strip::UpperRightSpeaker,
        Strip::LeftWing,
        Strip::RightWing,
        Strip::CtrlPanel,
        Strip::LowerLeftSpeaker,
        Strip::LowerRightSpeaker,
        Strip::Woofer,
        Strip::VUnit,
    ];

    /// Strip for a hook index. Out-of-range indices are not strips.
    pub fn from_index(index: u32) -> Option<Strip> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// INI section name, e.g. `upper_left_speaker`.
    pub fn section_name(self) -> &'static str {
        SECTION_NAMES[self.index()]
    }

    /// Human-readable label, e.g. `Upper L Speaker`.
    pub fn label(self) -> &'static str {
        LABELS[self.index()]
    }

    pub fn led_count(self) -> usize {
        LED_COUNTS[self.index()]
    }

    /// Length of this strip's RGB data in bytes.
    pub fn byte_len(self) -> usize {
        self.led_count() * 3
    }

    /// Offset of this strip inside a published frame.
    pub fn byte_offset(self) -> usize {
        BYTE_OFFSETS[self.index()]
    }

    /// Byte range of this strip inside a published frame.
    pub fn frame_range(self) -> std::ops::Range<usize> {
        let start = self.byte_offset();
        start..start + self.byte_len()
    }
}

impl fmt::Display for Strip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

impl FromStr for Strip {
    type Err = SdvxRgbError;

    /// Parse a section name (case-insensitive) or a numeric index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(strip) = Self::ALL
            .into_iter()
            .find(|strip| strip.section_name().eq_ignore_ascii_case(s))
        {
            return Ok(strip);
        }
        s.parse::<u32>()
            .ok()
            .and_then(Strip::from_index)
            .ok_or_else(|| {
                SdvxRgbError::Strip(format!(
                    "unknown strip \"{s}\" (expected one of: {})",
                    SECTION_NAMES.join(", ")
                ))
            })
    }
}

/// True if `name` is `global` or a strip section name (case-insensitive).
pub fn is_known_section(name: &str) -> bool {
    name.eq_ignore_ascii_case(GLOBAL_SECTION)
        || SECTION_NAMES.iter().any(|s| s.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_running_sum() {
        let mut expected = 0;
        for strip in Strip::ALL {
            assert_eq!(strip.byte_offset(), expected, "{strip}");
            expected += strip.byte_len();
        }
        assert_eq!(expected, FRAME_SIZE);
    }

    #[test]
    fn byte_lengths_match_hook_table() {
        let lens: Vec<usize> = Strip::ALL.iter().map(|s| s.byte_len()).collect();
        assert_eq!(lens, [222, 36, 36, 168, 168, 282, 36, 36, 42, 258]);
    }

    #[test]
    fn max_strip_bytes_is_ctrl_panel() {
        let max = Strip::ALL.iter().map(|s| s.byte_len()).max().unwrap();
        assert_eq!(max, MAX_STRIP_BYTES);
        assert_eq!(Strip::CtrlPanel.byte_len(), MAX_STRIP_BYTES);
    }

    #[test]
    fn from_index_bounds() {
        assert_eq!(Strip::from_index(0), Some(Strip::Title));
        assert_eq!(Strip::from_index(9), Some(Strip::VUnit));
        assert_eq!(Strip::from_index(10), None);
        assert_eq!(Strip::from_index(u32::MAX), None);
    }

    #[test]
    fn index_round_trip() {
        for (i, strip) in Strip::ALL.iter().enumerate() {
            assert_eq!(strip.index(), i);
            assert_eq!(Strip::from_index(i as u32), Some(*strip));
        }
    }

    #[test]
    fn parse_section_name() {
        assert_eq!("woofer".parse::<Strip>().unwrap(), Strip::Woofer);
        assert_eq!("V_UNIT".parse::<Strip>().unwrap(), Strip::VUnit);
        assert_eq!("5".parse::<Strip>().unwrap(), Strip::CtrlPanel);
    }

    #[test]
    fn parse_unknown_strip_errors() {
        let err = "subwoofer".parse::<Strip>().unwrap_err();
        assert!(err.to_string().contains("unknown strip"));
        assert!("10".parse::<Strip>().is_err());
        assert!("global".parse::<Strip>().is_err());
    }

    #[test]
    fn known_sections() {
        assert!(is_known_section("global"));
        assert!(is_known_section("Title"));
        assert!(!is_known_section("speakers"));
    }

    #[test]
    fn frame_range_of_last_strip_ends_at_frame_size() {
        assert_eq!(Strip::VUnit.frame_range(), 1026..FRAME_SIZE);
    }
}
