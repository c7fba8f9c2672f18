//! `IBusAttribute`: one formatting range over preedit or candidate text.

use crate::format::{Rgb, TextFormat, UnderlineStyle};
use crate::serializable::{Marshal, Serializable};
use libibus_core::{ArgumentReader, ArgumentWriter, Result};
use serde::{Deserialize, Serialize};

/// What an attribute's `value` means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeType {
    #[default]
    Invalid,
    Underline,
    Foreground,
    Background,
    /// A type this library does not know. The raw value is written back as-is.
    Unknown(u32),
}

impl AttributeType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => AttributeType::Invalid,
            1 => AttributeType::Underline,
            2 => AttributeType::Foreground,
            3 => AttributeType::Background,
            other => AttributeType::Unknown(other),
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            AttributeType::Invalid => 0,
            AttributeType::Underline => 1,
            AttributeType::Foreground => 2,
            AttributeType::Background => 3,
            AttributeType::Unknown(raw) => raw,
        }
    }
}

/// Underline values carried by `AttributeType::Underline` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrUnderline {
    None,
    Single,
    Double,
    Low,
    Error,
}

impl AttrUnderline {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(AttrUnderline::None),
            1 => Some(AttrUnderline::Single),
            2 => Some(AttrUnderline::Double),
            3 => Some(AttrUnderline::Low),
            4 => Some(AttrUnderline::Error),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            AttrUnderline::None => 0,
            AttrUnderline::Single => 1,
            AttrUnderline::Double => 2,
            AttrUnderline::Low => 3,
            AttrUnderline::Error => 4,
        }
    }
}

/// A typed value applied to the character range `[start, end)`.
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub base: Serializable,
    pub kind: AttributeType,
    pub value: u32,
    pub start: u32,
    pub end: u32,
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new(AttributeType::Invalid, 0, 0, 0)
    }
}

impl Attribute {
    pub const NAME: &'static str = "IBusAttribute";

    pub fn new(kind: AttributeType, value: u32, start: u32, end: u32) -> Self {
        Self {
            base: Serializable::named(Self::NAME),
            kind,
            value,
            start,
            end,
        }
    }

    pub fn underline(style: AttrUnderline, start: u32, end: u32) -> Self {
        Self::new(AttributeType::Underline, style.as_raw(), start, end)
    }

    pub fn foreground(color: Rgb, start: u32, end: u32) -> Self {
        Self::new(AttributeType::Foreground, color.to_packed(), start, end)
    }

    pub fn background(color: Rgb, start: u32, end: u32) -> Self {
        Self::new(AttributeType::Background, color.to_packed(), start, end)
    }

    /// Formatting directive described by this attribute.
    ///
    /// Total over all inputs: `Invalid` and unknown types yield an empty format
    /// and an unknown underline value yields an explicit "no underline".
    pub fn format(&self) -> TextFormat {
        let mut fmt = TextFormat::new();
        match self.kind {
            AttributeType::Invalid | AttributeType::Unknown(_) => {}
            AttributeType::Underline => {
                let style = match AttrUnderline::from_raw(self.value) {
                    Some(AttrUnderline::None) | None => UnderlineStyle::None,
                    Some(AttrUnderline::Single) => UnderlineStyle::Single,
                    Some(AttrUnderline::Double) => UnderlineStyle::Dash,
                    Some(AttrUnderline::Low) => UnderlineStyle::DashDot,
                    Some(AttrUnderline::Error) => {
                        fmt.underline_color = Some(Rgb::RED);
                        UnderlineStyle::Wave
                    }
                };
                fmt.underline_style = Some(style);
            }
            AttributeType::Foreground => fmt.foreground = Some(Rgb::from_packed(self.value)),
            AttributeType::Background => fmt.background = Some(Rgb::from_packed(self.value)),
        }
        fmt
    }
}

impl Marshal for Attribute {
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.begin_structure();
        self.base.serialize_to(w)?;
        w.write_u32(self.kind.as_raw())?;
        w.write_u32(self.value)?;
        w.write_u32(self.start)?;
        w.write_u32(self.end)?;
        w.end_structure()
    }

    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        r.begin_structure()?;
        let base = Serializable::deserialize_from(r)?;
        let kind = AttributeType::from_raw(r.read_u32()?);
        if let AttributeType::Unknown(raw) = kind {
            tracing::debug!(target: "libibus", raw, "unknown attribute type, formatting skipped");
        }
        let value = r.read_u32()?;
        let start = r.read_u32()?;
        let end = r.read_u32()?;
        r.end_structure()?;

        Ok(Self {
            base,
            kind,
            value,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libibus_core::{Argument, Signature};

    #[test]
    fn test_wire_signature() {
        let arg = Attribute::underline(AttrUnderline::Single, 0, 3)
            .to_argument()
            .unwrap();
        assert_eq!(arg.signature(), "(sa{sv}uuuu)");
    }

    #[test]
    fn test_roundtrip() {
        let mut attr = Attribute::foreground(Rgb::new(0x11, 0x22, 0x33), 2, 9);
        attr.base.attach("k", &Argument::from("v")).unwrap();
        let decoded = Attribute::from_argument(&attr.to_argument().unwrap()).unwrap();
        assert_eq!(decoded, attr);

        let plain = Attribute::default();
        let decoded = Attribute::from_argument(&plain.to_argument().unwrap()).unwrap();
        assert_eq!(decoded, plain);
    }

    fn raw_attribute(raw_type: u32, value: u32, start: u32, end: u32) -> Argument {
        Argument::Struct(vec![
            Argument::from(Attribute::NAME),
            Argument::Dict {
                key: Signature::string(),
                value: Signature::variant(),
                entries: vec![],
            },
            Argument::U32(raw_type),
            Argument::U32(value),
            Argument::U32(start),
            Argument::U32(end),
        ])
    }

    #[test]
    fn test_unknown_type_has_no_format() {
        let attr = Attribute::from_argument(&raw_attribute(42, 7, 0, 1)).unwrap();
        assert_eq!(attr.kind, AttributeType::Unknown(42));
        assert_eq!(attr.value, 7);
        assert!(attr.format().is_empty());
    }

    #[test]
    fn test_unknown_type_reencodes_unchanged() {
        // 4 is the hint type of newer daemons
        let arg = raw_attribute(4, 1, 0, 3);
        let attr = Attribute::from_argument(&arg).unwrap();
        assert_eq!(attr.kind.as_raw(), 4);
        assert_eq!(attr.to_argument().unwrap(), arg);
    }

    #[test]
    fn test_raw_type_conversions() {
        for raw in [0, 1, 2, 3, 4, 99, u32::MAX] {
            assert_eq!(AttributeType::from_raw(raw).as_raw(), raw);
        }
        assert_eq!(AttributeType::from_raw(0), AttributeType::Invalid);
    }

    #[test]
    fn test_underline_mapping() {
        let cases = [
            (AttrUnderline::None, UnderlineStyle::None),
            (AttrUnderline::Single, UnderlineStyle::Single),
            (AttrUnderline::Double, UnderlineStyle::Dash),
            (AttrUnderline::Low, UnderlineStyle::DashDot),
            (AttrUnderline::Error, UnderlineStyle::Wave),
        ];
        for (raw, style) in cases {
            let fmt = Attribute::underline(raw, 0, 1).format();
            assert_eq!(fmt.underline_style, Some(style), "{raw:?}");
            assert!(fmt.foreground.is_none());
        }
    }

    #[test]
    fn test_error_underline_is_red() {
        let fmt = Attribute::underline(AttrUnderline::Error, 0, 1).format();
        assert_eq!(fmt.underline_color, Some(Rgb::RED));
        let fmt = Attribute::underline(AttrUnderline::Single, 0, 1).format();
        assert!(fmt.underline_color.is_none());
    }

    #[test]
    fn test_unknown_underline_falls_back_to_none() {
        for value in [5, 99, u32::MAX] {
            let fmt = Attribute::new(AttributeType::Underline, value, 0, 1).format();
            assert_eq!(fmt.underline_style, Some(UnderlineStyle::None));
            assert!(fmt.underline_color.is_none());
        }
    }

    #[test]
    fn test_colours() {
        let fmt = Attribute::new(AttributeType::Foreground, 0x00ff_0000, 0, 1).format();
        assert_eq!(fmt.foreground, Some(Rgb::RED));
        assert!(fmt.background.is_none());

        let fmt = Attribute::new(AttributeType::Background, 0x0000_ff00, 0, 1).format();
        assert_eq!(fmt.background, Some(Rgb::new(0, 0xff, 0)));
        assert!(fmt.foreground.is_none());
    }

    #[test]
    fn test_invalid_has_no_format() {
        for value in [0, 1, u32::MAX] {
            assert!(Attribute::new(AttributeType::Invalid, value, 0, 5)
                .format()
                .is_empty());
        }
    }
}
