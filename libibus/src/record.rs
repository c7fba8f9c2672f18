//! Dispatch over every wire record kind.

use crate::attr_list::{AttributeList, FormatRange};
use crate::attribute::Attribute;
use crate::engine_desc::EngineDesc;
use crate::property::{ClientCommitPreedit, ContentType};
use crate::serializable::Marshal;
use crate::text::Text;
use libibus_core::{Argument, Config, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Attribute,
    AttributeList,
    Text,
    EngineDesc,
    ClientCommitPreedit,
    ContentType,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Attribute,
        RecordKind::AttributeList,
        RecordKind::Text,
        RecordKind::EngineDesc,
        RecordKind::ClientCommitPreedit,
        RecordKind::ContentType,
    ];

    /// Type name written at the head of named records.
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            RecordKind::Attribute => Some(Attribute::NAME),
            RecordKind::AttributeList => Some(AttributeList::NAME),
            RecordKind::Text => Some(Text::NAME),
            RecordKind::EngineDesc => Some(EngineDesc::NAME),
            RecordKind::ClientCommitPreedit | RecordKind::ContentType => None,
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == Some(name))
    }

    /// Short name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Attribute => "attribute",
            RecordKind::AttributeList => "attr-list",
            RecordKind::Text => "text",
            RecordKind::EngineDesc => "engine-desc",
            RecordKind::ClientCommitPreedit => "commit-preedit",
            RecordKind::ContentType => "content-type",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.wire_name() == Some(s))
            .ok_or_else(|| format!("unknown record kind: {s}"))
    }
}

/// Any decoded wire record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record")]
pub enum Record {
    Attribute(Attribute),
    AttributeList(AttributeList),
    Text(Text),
    EngineDesc(EngineDesc),
    ClientCommitPreedit(ClientCommitPreedit),
    ContentType(ContentType),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Attribute(_) => RecordKind::Attribute,
            Record::AttributeList(_) => RecordKind::AttributeList,
            Record::Text(_) => RecordKind::Text,
            Record::EngineDesc(_) => RecordKind::EngineDesc,
            Record::ClientCommitPreedit(_) => RecordKind::ClientCommitPreedit,
            Record::ContentType(_) => RecordKind::ContentType,
        }
    }

    /// Guess the record kind of a payload.
    ///
    /// Named records are recognised by their leading type name; the two
    /// property payloads by their signature.
    pub fn detect(arg: &Argument) -> Option<RecordKind> {
        let fields = arg.as_struct()?;
        if let Some(kind) = fields
            .first()
            .and_then(Argument::as_str)
            .and_then(RecordKind::from_wire_name)
        {
            return Some(kind);
        }
        match arg.signature().as_str() {
            "(b)" => Some(RecordKind::ClientCommitPreedit),
            "(uu)" => Some(RecordKind::ContentType),
            _ => None,
        }
    }

    pub fn encode(&self) -> Result<Argument> {
        match self {
            Record::Attribute(r) => r.to_argument(),
            Record::AttributeList(r) => r.to_argument(),
            Record::Text(r) => r.to_argument(),
            Record::EngineDesc(r) => r.to_argument(),
            Record::ClientCommitPreedit(r) => r.to_argument(),
            Record::ContentType(r) => r.to_argument(),
        }
    }

    pub fn decode(kind: RecordKind, arg: &Argument, config: &Config) -> Result<Record> {
        let record = match kind {
            RecordKind::Attribute => Record::Attribute(Attribute::from_argument_with(arg, config)?),
            RecordKind::AttributeList => {
                Record::AttributeList(AttributeList::from_argument_with(arg, config)?)
            }
            RecordKind::Text => Record::Text(Text::from_argument_with(arg, config)?),
            RecordKind::EngineDesc => {
                Record::EngineDesc(EngineDesc::from_argument_with(arg, config)?)
            }
            RecordKind::ClientCommitPreedit => {
                Record::ClientCommitPreedit(ClientCommitPreedit::from_argument_with(arg, config)?)
            }
            RecordKind::ContentType => {
                Record::ContentType(ContentType::from_argument_with(arg, config)?)
            }
        };
        Ok(record)
    }

    /// Merged format ranges for records that carry attributes.
    pub fn format_ranges(&self) -> Option<Vec<FormatRange>> {
        match self {
            Record::AttributeList(list) => Some(list.format_ranges()),
            Record::Text(text) => Some(text.format_ranges()),
            _ => None,
        }
    }
}
