//! Readable text color for colored badges

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

/// Weighted channel sum at luminance 0.5: `(299 + 587 + 114) * 255 / 2`.
const LUMINANCE_HALF: u32 = 127_500;

/// A 24-bit RGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor { r: 0, g: 0, b: 0 };
    pub const WHITE: HexColor = HexColor {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse exactly six hex digits, optionally prefixed with one `#`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 {
            return Err(DomainError::malformed_color(
                input,
                format!("expected 6 hex digits, got {}", digits.chars().count()),
            ));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DomainError::malformed_color(input, "non-hex character"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| DomainError::malformed_color(input, e.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Perceptual luminance in [0, 1]: green weighs most, blue least.
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }

    /// Black on light backgrounds, white otherwise. Exactly 0.5 is white.
    ///
    /// Decided on the integer weighted sum so the boundary is exact.
    pub fn contrasting_text(&self) -> HexColor {
        let weighted = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        if weighted > LUMINANCE_HALF {
            HexColor::BLACK
        } else {
            HexColor::WHITE
        }
    }
}

impl FromStr for HexColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Text color (`#000000` or `#ffffff`) readable on `background`.
///
/// Malformed input is a caller bug and is reported, never defaulted.
pub fn contrasting_text_color(background: &str) -> DomainResult<HexColor> {
    Ok(HexColor::parse(background)?.contrasting_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(HexColor::parse("#FFFFFF").unwrap(), HexColor::WHITE);
        assert_eq!(HexColor::parse("000000").unwrap(), HexColor::BLACK);
        assert_eq!(HexColor::parse("#9D4EDD").unwrap(), HexColor::new(157, 78, 221));
        assert_eq!(HexColor::parse("#06ffa5").unwrap(), HexColor::new(6, 255, 165));
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(HexColor::new(157, 78, 221).to_string(), "#9d4edd");
        assert_eq!(HexColor::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["#zzz", "#12345", "#1234567", "##123456", "#12345g", "", "#ééé"] {
            let err = HexColor::parse(input).unwrap_err();
            assert!(err.is_parse_error(), "{input:?} should be a parse error");
        }
    }

    #[test]
    fn test_exact_half_luminance_is_white() {
        // 299 * 0xda + 587 * 0x3a + 114 * 0xf8 == 127_500
        let color = HexColor::new(0xda, 0x3a, 0xf8);
        assert_eq!(color.contrasting_text(), HexColor::WHITE);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(HexColor::BLACK.luminance(), 0.0);
        assert!((HexColor::WHITE.luminance() - 1.0).abs() < 1e-9);
    }
}
