//! `IBusAttrList` and its conversion into renderable format ranges.

use crate::attribute::Attribute;
use crate::format::TextFormat;
use crate::serializable::{Marshal, Serializable};
use ahash::AHashMap;
use libibus_core::{ArgumentReader, ArgumentWriter, Result, Signature};
use serde::{Deserialize, Serialize};

/// Formatting applied to `length` characters starting at `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRange {
    pub start: u32,
    pub length: u32,
    pub format: TextFormat,
}

/// Ordered attributes of a preedit or candidate string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeList {
    pub base: Serializable,
    pub attributes: Vec<Attribute>,
}

impl Default for AttributeList {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeList {
    pub const NAME: &'static str = "IBusAttrList";

    pub fn new() -> Self {
        Self {
            base: Serializable::named(Self::NAME),
            attributes: Vec::new(),
        }
    }

    pub fn from_attributes(attributes: Vec<Attribute>) -> Self {
        Self {
            base: Serializable::named(Self::NAME),
            attributes,
        }
    }

    pub fn push(&mut self, attr: Attribute) {
        self.attributes.push(attr);
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// One format range per attribute, in attribute order.
    ///
    /// Attributes sharing the exact same `[start, end)` have their formats
    /// merged, later attributes overriding earlier ones property by property,
    /// and every one of them reports the merged result. Ranges that merely
    /// overlap are not merged. Attributes without a format (`Invalid`) report
    /// an empty format and do not contribute to any merge.
    pub fn format_ranges(&self) -> Vec<FormatRange> {
        let formats: Vec<TextFormat> = self.attributes.iter().map(Attribute::format).collect();

        let mut merged: AHashMap<(u32, u32), TextFormat> = AHashMap::new();
        for (attr, format) in self.attributes.iter().zip(&formats) {
            if !format.is_empty() {
                merged.entry((attr.start, attr.end)).or_default().merge(format);
            }
        }

        self.attributes
            .iter()
            .zip(formats)
            .map(|(attr, format)| {
                if attr.end < attr.start {
                    tracing::warn!(
                        target: "libibus",
                        start = attr.start,
                        end = attr.end,
                        "attribute range ends before it starts"
                    );
                }
                let format = if format.is_empty() {
                    format
                } else {
                    merged
                        .get(&(attr.start, attr.end))
                        .cloned()
                        .unwrap_or(format)
                };
                FormatRange {
                    start: attr.start,
                    length: attr.end.saturating_sub(attr.start),
                    format,
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl Marshal for AttributeList {
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.begin_structure();
        self.base.serialize_to(w)?;

        w.begin_array(Signature::variant());
        for attr in &self.attributes {
            w.write_variant(attr.to_argument()?)?;
        }
        w.end_array()?;

        w.end_structure()
    }

    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        tracing::debug!(
            target: "libibus::serialize",
            signature = %r.current_signature(),
            "AttributeList::deserialize_from"
        );
        r.begin_structure()?;
        let base = Serializable::deserialize_from(r)?;

        let mut attributes = Vec::new();
        r.begin_array()?;
        while !r.at_end() {
            let inner = r.read_variant()?;
            let mut nested = r.descend(inner);
            attributes.push(Attribute::deserialize_from(&mut nested)?);
        }
        r.end_array()?;

        r.end_structure()?;
        Ok(Self { base, attributes })
    }
}
