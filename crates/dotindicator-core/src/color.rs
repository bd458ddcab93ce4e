//! Straight-alpha RGBA colors with hex parsing and per-channel blending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::anim::timing::lerp;

/// An 8-bit-per-channel color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// All channels zero, the blend target for fading a color out.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Parse a hex color string.
    /// Accepts formats: "#RGB", "#RRGGBB", "#AARRGGBB" (the leading '#' is optional)
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            // Short form: RGB -> RRGGBB
            3 => Some(Self::opaque(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Some(Self::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            // Alpha leads, as in #AARRGGBB
            8 => Some(Self::new(
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
                channel(0..2)?,
            )),
            _ => None,
        }
    }

    /// Linear interpolation of every channel, alpha included.
    pub fn lerp(self, to: Rgba, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |from: u8, to: u8| lerp(from as f64, to as f64, t).round() as u8;
        Rgba::new(
            mix(self.r, to.r),
            mix(self.g, to.g),
            mix(self.b, to.b),
            mix(self.a, to.a),
        )
    }

    /// Source-over composite onto an opaque background, returning an opaque color.
    pub fn over(self, background: Rgba) -> Rgba {
        let alpha = self.a as f64 / 255.0;
        let mix = |fg: u8, bg: u8| lerp(bg as f64, fg as f64, alpha).round() as u8;
        Rgba::opaque(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

impl FromStr for Rgba {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse_hex(s).ok_or_else(|| crate::Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgba {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Rgba::parse_hex("#6177E5"), Some(Rgba::opaque(0x61, 0x77, 0xe5)));
        assert_eq!(Rgba::parse_hex("22262f"), Some(Rgba::opaque(0x22, 0x26, 0x2f)));
        assert_eq!(Rgba::parse_hex("#fff"), Some(Rgba::WHITE));
        assert_eq!(
            Rgba::parse_hex("#B36177E5"),
            Some(Rgba::new(0x61, 0x77, 0xe5, 0xb3))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Rgba::parse_hex(""), None);
        assert_eq!(Rgba::parse_hex("#12345"), None);
        assert_eq!(Rgba::parse_hex("#gggggg"), None);
        assert!("nope".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        let inner = Rgba::new(0x61, 0x77, 0xe5, 0xb3);
        assert_eq!(inner.to_string(), "#B36177E5");
        assert_eq!(Rgba::opaque(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let inner = Rgba::new(0x61, 0x77, 0xe5, 0xb3);
        assert_eq!(inner.lerp(Rgba::TRANSPARENT, 0.0), inner);
        assert_eq!(inner.lerp(Rgba::TRANSPARENT, 1.0), Rgba::TRANSPARENT);
        assert_eq!(
            Rgba::new(0, 0, 0, 0).lerp(Rgba::new(200, 100, 50, 255), 0.5),
            Rgba::new(100, 50, 25, 128)
        );
    }

    #[test]
    fn test_over_background() {
        let half_white = Rgba::new(0xff, 0xff, 0xff, 0x80);
        let c = half_white.over(Rgba::BLACK);
        assert_eq!(c.a, 0xff);
        assert_eq!(c.r, 0x80);
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
    }
}
