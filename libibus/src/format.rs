//! Toolkit-independent character formatting directives.

use serde::{Deserialize, Serialize};

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 0xff, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Colour from a packed `0x??RRGGBB` value. The top byte is ignored.
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Underline style as drawn by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnderlineStyle {
    None,
    Single,
    Dash,
    DashDot,
    Wave,
}

/// A set of optional character properties.
///
/// A property left at `None` is unset, which is different from being set to a
/// neutral value: an explicit `UnderlineStyle::None` still counts as a
/// directive and still overrides an underline during a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    pub underline_style: Option<UnderlineStyle>,
    pub underline_color: Option<Rgb>,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl TextFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        self.underline_style.is_none()
            && self.underline_color.is_none()
            && self.foreground.is_none()
            && self.background.is_none()
    }

    /// Apply every property set in `other` on top of this format.
    pub fn merge(&mut self, other: &TextFormat) {
        if other.underline_style.is_some() {
            self.underline_style = other.underline_style;
        }
        if other.underline_color.is_some() {
            self.underline_color = other.underline_color;
        }
        if other.foreground.is_some() {
            self.foreground = other.foreground;
        }
        if other.background.is_some() {
            self.background = other.background;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_colour_ignores_alpha() {
        let c = Rgb::from_packed(0x80_12_34_56);
        assert_eq!(c, Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(c.to_packed(), 0x12_34_56);
    }

    #[test]
    fn test_merge_keeps_unset_properties() {
        let mut fmt = TextFormat {
            underline_style: Some(UnderlineStyle::Single),
            ..TextFormat::default()
        };
        fmt.merge(&TextFormat {
            foreground: Some(Rgb::RED),
            ..TextFormat::default()
        });
        assert_eq!(fmt.underline_style, Some(UnderlineStyle::Single));
        assert_eq!(fmt.foreground, Some(Rgb::RED));
        assert!(fmt.background.is_none());
    }

    #[test]
    fn test_merge_later_wins() {
        let mut fmt = TextFormat {
            background: Some(Rgb::new(1, 1, 1)),
            ..TextFormat::default()
        };
        fmt.merge(&TextFormat {
            background: Some(Rgb::new(2, 2, 2)),
            ..TextFormat::default()
        });
        assert_eq!(fmt.background, Some(Rgb::new(2, 2, 2)));
    }

    #[test]
    fn test_explicit_no_underline_is_not_empty() {
        let fmt = TextFormat {
            underline_style: Some(UnderlineStyle::None),
            ..TextFormat::default()
        };
        assert!(!fmt.is_empty());
        assert!(TextFormat::new().is_empty());
    }
}
