//! Color representation for drawing entities and layers

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Represents an entity or layer color
///
/// - By layer: inherit the owning layer's color
/// - By block: inherit the enclosing block instance's color
/// - By index (1-255): palette color
/// - By RGB values: true color
///
/// Serialized as a string token: `"ByLayer"`, `"ByBlock"`, `"#RRGGBB"`, or a
/// palette index as decimal text. Plain JSON integers are accepted as
/// palette indices when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Color by layer
    #[default]
    ByLayer,
    /// Color by block
    ByBlock,
    /// Palette index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from a palette index (0 = by block, 256 = by layer)
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            _ if index < 0 => Color::Index((-index).min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Create a true color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Get RGB values (if applicable)
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }

    /// Whether the color has to be resolved against the layer
    pub fn is_by_layer(&self) -> bool {
        matches!(self, Color::ByLayer)
    }

    /// Parse a serialized color token
    pub fn parse(token: &str) -> Option<Color> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("bylayer") || token.is_empty() {
            return Some(Color::ByLayer);
        }
        if token.eq_ignore_ascii_case("byblock") {
            return Some(Color::ByBlock);
        }
        if let Some(hex) = token.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            return Some(Color::from_rgb(
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            ));
        }
        token.parse::<i16>().ok().map(Color::from_index)
    }

    /// Serialized token for this color
    pub fn to_token(&self) -> String {
        match self {
            Color::ByLayer => "ByLayer".to_string(),
            Color::ByBlock => "ByBlock".to_string(),
            Color::Index(i) => i.to_string(),
            Color::Rgb { r, g, b } => format!("#{:02X}{:02X}{:02X}", r, g, b),
        }
    }

    /// Common color constants
    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_token())
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a color token or palette index")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
        Color::parse(v).ok_or_else(|| E::custom(format!("invalid color: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Color, E> {
        Ok(Color::from_index(v.clamp(-255, 256) as i16))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Color, E> {
        Ok(Color::from_index(v.min(256) as i16))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Color, E> {
        Ok(Color::ByLayer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(1), Color::Index(1));
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("ByLayer"), Some(Color::ByLayer));
        assert_eq!(Color::parse("byblock"), Some(Color::ByBlock));
        assert_eq!(Color::parse("#FF8040"), Some(Color::from_rgb(255, 128, 64)));
        assert_eq!(Color::parse("5"), Some(Color::BLUE));
        assert_eq!(Color::parse("#FFF"), None);
        assert_eq!(Color::parse("teal"), None);
    }

    #[test]
    fn test_color_token_roundtrip() {
        for color in [
            Color::ByLayer,
            Color::ByBlock,
            Color::RED,
            Color::from_rgb(1, 2, 255),
        ] {
            assert_eq!(Color::parse(&color.to_token()), Some(color));
        }
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::from_rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let c: Color = serde_json::from_str("3").unwrap();
        assert_eq!(c, Color::GREEN);
        let c: Color = serde_json::from_str("null").unwrap();
        assert_eq!(c, Color::ByLayer);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::ByLayer.to_string(), "ByLayer");
        assert_eq!(Color::from_rgb(255, 0, 0).to_string(), "RGB(255, 0, 0)");
    }

    #[test]
    fn test_default_color() {
        assert_eq!(Color::default(), Color::ByLayer);
        assert!(Color::default().is_by_layer());
    }
}
