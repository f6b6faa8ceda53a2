//! Color representation

use std::fmt;

/// Color used for fonts, fills and borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// RGB color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// White
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Red
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Light gray, a common header fill
    pub const LIGHT_GRAY: Color = Color::rgb(217, 217, 217);
    /// Light yellow, a common description banner fill
    pub const LIGHT_YELLOW: Color = Color::rgb(255, 242, 204);

    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create from a hex string (`#FF0000` or `FF0000`)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Convert to hex string without `#`; `Auto` renders as `auto`.
    pub fn to_hex(&self) -> String {
        match self {
            Color::Auto => "auto".to_string(),
            Color::Rgb { r, g, b } => format!("{r:02X}{g:02X}{b:02X}"),
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => f.write_str("auto"),
            Color::Rgb { .. } => write!(f, "#{}", self.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("d9d9d9"), Some(Color::LIGHT_GRAY));
        assert_eq!(Color::from_hex("12345"), None);
        assert_eq!(Color::from_hex("GG0000"), None);
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "0102FF");
        assert_eq!(Color::Auto.to_string(), "auto");
    }
}
