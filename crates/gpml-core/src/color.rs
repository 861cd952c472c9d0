//! Color handling for pathway elements.
//!
//! GPML stores colors as text. Legacy documents mix hex strings (`"ff0000"`)
//! with named constants (`"Black"`, `"Transparent"`); GPML2021 always writes
//! hex. [`Color`] is the parsed, format-independent value: 8-bit RGBA
//! components obtained through the `color` crate's CSS parser.

use std::fmt;

use color::{Srgb, parse_color};

/// An sRGB color with alpha, stored as 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha component.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color as found in GPML documents.
    ///
    /// Accepts hex strings with or without a leading `#` (`rrggbb` or
    /// `rrggbbaa`) and CSS color names in any letter case.
    ///
    /// # Examples
    ///
    /// ```
    /// use gpml_core::color::Color;
    ///
    /// assert_eq!(Color::new("ff0000").unwrap(), Color::rgb(255, 0, 0));
    /// assert_eq!(Color::new("#FF0000").unwrap(), Color::rgb(255, 0, 0));
    /// assert_eq!(Color::new("White").unwrap(), Color::WHITE);
    /// assert!(Color::new("Transparent").unwrap().is_transparent());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let css = if is_hex_color(digits) {
            format!("#{digits}")
        } else {
            trimmed.to_ascii_lowercase()
        };

        let dynamic =
            parse_color(&css).map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let rgba = dynamic.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::rgba(rgba.r, rgba.g, rgba.b, rgba.a))
    }

    pub fn red(self) -> u8 {
        self.r
    }

    pub fn green(self) -> u8 {
        self.g
    }

    pub fn blue(self) -> u8 {
        self.b
    }

    /// Returns the alpha component (0 = fully transparent, 255 = opaque).
    pub fn alpha(self) -> u8 {
        self.a
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Formats the color as lowercase hex without a `#` prefix.
    ///
    /// Opaque colors use six digits (`rrggbb`); anything else appends the
    /// alpha byte (`rrggbbaa`).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Formats the color as legacy GPML expects it.
    ///
    /// Fully transparent colors become the named constant `Transparent`;
    /// everything else is written as opaque `rrggbb`.
    pub fn to_legacy_string(self) -> String {
        if self.is_transparent() {
            "Transparent".to_string()
        } else {
            format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn is_hex_color(value: &str) -> bool {
    matches!(value.len(), 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_hex() {
        assert_eq!(Color::new("00ff00").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(Color::new("#0000FF").unwrap(), Color::rgb(0, 0, 255));
        assert_eq!(
            Color::new("ff000080").unwrap(),
            Color::rgba(255, 0, 0, 0x80)
        );
    }

    #[test]
    fn test_color_new_named() {
        assert_eq!(Color::new("Black").unwrap(), Color::BLACK);
        assert_eq!(Color::new("WHITE").unwrap(), Color::WHITE);
        assert!(Color::new("Transparent").unwrap().is_transparent());
    }

    #[test]
    fn test_color_new_invalid() {
        assert!(Color::new("not-a-color").is_err());
        assert!(Color::new("").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::rgb(255, 0, 16).to_hex(), "ff0010");
        assert_eq!(Color::TRANSPARENT.to_hex(), "00000000");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "01020304");
    }

    #[test]
    fn test_color_to_legacy_string() {
        assert_eq!(Color::TRANSPARENT.to_legacy_string(), "Transparent");
        assert_eq!(Color::LIGHT_GRAY.to_legacy_string(), "c0c0c0");
    }

    #[test]
    fn test_hex_round_trip() {
        for color in [Color::BLACK, Color::WHITE, Color::rgba(10, 20, 30, 40)] {
            assert_eq!(Color::new(&color.to_hex()).unwrap(), color);
        }
    }
}
