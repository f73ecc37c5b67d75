/// Hex color type used for fills, strokes and backgrounds.
///
/// Accepts `"#RGB"`, `"#RRGGBB"` and `"#RRGGBBAA"`; serializes as hex.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#')?;
        if !s.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16).ok();
        match s.len() {
            // #RGB doubles each digit: #f0a == #ff00aa
            3 => {
                let digit = |i: usize| channel(i..i + 1).map(|d| d * 17);
                Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim()).ok_or_else(|| format!("invalid hex color: {s}"))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_colors() {
        assert_eq!(
            HexColor::from_hex("#8b5cf6"),
            Some(HexColor::rgb(0x8b, 0x5c, 0xf6))
        );
        assert_eq!(
            HexColor::from_hex("#06B6D4"),
            Some(HexColor::rgb(0x06, 0xb6, 0xd4))
        );
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(HexColor::from_hex("#fff"), Some(HexColor::WHITE));
        assert_eq!(HexColor::from_hex("#f0a"), Some(HexColor::rgb(255, 0, 170)));
    }

    #[test]
    fn test_parse_with_alpha() {
        let c = HexColor::from_hex("#80000080").unwrap();
        assert_eq!(c, HexColor::rgba(128, 0, 0, 128));
        assert!(!c.is_opaque());
        assert_eq!(c.to_hex(), "#80000080");
    }

    #[test]
    fn test_to_hex_is_lowercase() {
        assert_eq!(HexColor::rgb(0xEF, 0x44, 0x44).to_hex(), "#ef4444");
        assert_eq!(HexColor::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_invalid_input() {
        assert!(HexColor::from_hex("").is_none());
        assert!(HexColor::from_hex("#").is_none());
        assert!(HexColor::from_hex("#GG0000").is_none());
        assert!(HexColor::from_hex("#12345").is_none());
        assert!(HexColor::from_hex("800000").is_none());
        assert!(HexColor::from_hex("#ééé").is_none());
        assert!("maroon".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_string(&HexColor::rgb(0xf5, 0x9e, 0x0b)).unwrap();
        assert_eq!(json, "\"#f59e0b\"");
        let parsed: HexColor = serde_json::from_str("\"#F59E0B\"").unwrap();
        assert_eq!(parsed, HexColor::rgb(0xf5, 0x9e, 0x0b));
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }
}
