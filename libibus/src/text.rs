//! `IBusText`: a preedit, auxiliary or candidate string with its attributes.

use crate::attr_list::{AttributeList, FormatRange};
use crate::serializable::{Marshal, Serializable};
use libibus_core::{ArgumentReader, ArgumentWriter, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub base: Serializable,
    pub text: String,
    pub attributes: AttributeList,
}

impl Default for Text {
    fn default() -> Self {
        Self::new("")
    }
}

impl Text {
    pub const NAME: &'static str = "IBusText";

    pub fn new<T: Into<String>>(text: T) -> Self {
        Self::with_attributes(text, AttributeList::new())
    }

    pub fn with_attributes<T: Into<String>>(text: T, attributes: AttributeList) -> Self {
        Self {
            base: Serializable::named(Self::NAME),
            text: text.into(),
            attributes,
        }
    }

    /// Merged format ranges of the attached attribute list.
    pub fn format_ranges(&self) -> Vec<FormatRange> {
        self.attributes.format_ranges()
    }
}

impl Marshal for Text {
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.begin_structure();
        self.base.serialize_to(w)?;
        w.write_str(&self.text)?;
        w.write_variant(self.attributes.to_argument()?)?;
        w.end_structure()
    }

    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        tracing::debug!(
            target: "libibus::serialize",
            signature = %r.current_signature(),
            "Text::deserialize_from"
        );
        r.begin_structure()?;
        let base = Serializable::deserialize_from(r)?;
        let text = r.read_str()?;
        let inner = r.read_variant()?;
        let attributes = AttributeList::deserialize_from(&mut r.descend(inner))?;
        r.end_structure()?;

        Ok(Self {
            base,
            text,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttrUnderline, Attribute};
    use libibus_core::{Argument, WireError};

    #[test]
    fn test_wire_signature() {
        let arg = Text::new("nihao").to_argument().unwrap();
        assert_eq!(arg.signature(), "(sa{sv}sv)");
    }

    #[test]
    fn test_roundtrip() {
        let mut attrs = AttributeList::new();
        attrs.push(Attribute::underline(AttrUnderline::Single, 0, 2));
        let text = Text::with_attributes("你好", attrs);
        let decoded = Text::from_argument(&text.to_argument().unwrap()).unwrap();
        assert_eq!(decoded, text);
        assert_eq!(decoded.format_ranges().len(), 1);

        let empty = Text::default();
        let decoded = Text::from_argument(&empty.to_argument().unwrap()).unwrap();
        assert_eq!(decoded, empty);
    }

    #[test]
    fn test_malformed_attribute_list_aborts() {
        let mut arg = Text::new("x").to_argument().unwrap();
        if let Argument::Struct(fields) = &mut arg {
            fields[3] = Argument::variant(Argument::U32(0));
        }
        assert!(matches!(
            Text::from_argument(&arg),
            Err(WireError::ShapeMismatch { .. })
        ));
    }
}
