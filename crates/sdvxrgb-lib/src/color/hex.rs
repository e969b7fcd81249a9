//! Hex color parsing and formatting (`RRGGBB` / `#RRGGBB`).

use super::Rgb;

/// Parse a 6-digit hex color, optionally prefixed with `#`.
///
/// Returns `None` for any other length or non-hex content. Configuration
/// values are free-form text, so a bad color is "absent", not an error.
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let val = u32::from_str_radix(hex, 16).ok()?;
    Some(Rgb::new((val >> 16) as u8, (val >> 8) as u8, val as u8))
}

/// Format a color as `#RRGGBB`.
pub fn format_hex_color(c: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_hex_color ──

    #[test]
    fn parse_with_hash() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(parse_hex_color("#8000FF"), Some(Rgb::new(0x80, 0, 0xFF)));
    }

    #[test]
    fn parse_without_hash() {
        assert_eq!(parse_hex_color("00FF00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(parse_hex_color("ABCDEF"), Some(Rgb::new(0xAB, 0xCD, 0xEF)));
    }

    #[test]
    fn parse_lowercase() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Rgb::new(255, 0x80, 0)));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_hex_color("  #123456 "), Some(Rgb::new(0x12, 0x34, 0x56)));
    }

    #[test]
    fn parse_wrong_length_is_absent() {
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#FF000000"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#"), None);
    }

    #[test]
    fn parse_non_hex_is_absent() {
        assert_eq!(parse_hex_color("#GGHHII"), None);
        assert_eq!(parse_hex_color("12345g"), None);
        assert_eq!(parse_hex_color("+12345"), None);
    }

    #[test]
    fn parse_double_hash_is_absent() {
        assert_eq!(parse_hex_color("##12345"), None);
    }

    // ── format_hex_color ──

    #[test]
    fn format_pads_and_uppercases() {
        assert_eq!(format_hex_color(Rgb::new(0xAB, 0x01, 0xcd)), "#AB01CD");
        assert_eq!(format_hex_color(Rgb::BLACK), "#000000");
    }

    #[test]
    fn format_parses_back() {
        let c = Rgb::new(0x12, 0xEF, 0x7A);
        assert_eq!(parse_hex_color(&format_hex_color(c)), Some(c));
    }
}
