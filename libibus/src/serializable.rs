//! Common header of every named IBus record.
//!
//! Named records start with their type name and a map of attachments. The
//! header is written inside the record's own structure frame, so it is never
//! framed on its own.

use libibus_core::{
    Argument, ArgumentReader, ArgumentWriter, Attachment, Config, Result, Signature, WireError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encode/decode contract shared by all wire records.
pub trait Marshal: Sized {
    /// Write the record at the writer's current position.
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()>;

    /// Read the record from the reader's current position.
    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self>;

    fn to_argument(&self) -> Result<Argument> {
        let mut w = ArgumentWriter::new();
        self.serialize_to(&mut w)?;
        w.finish()
    }

    fn from_argument(arg: &Argument) -> Result<Self> {
        Self::from_argument_with(arg, &Config::default())
    }

    fn from_argument_with(arg: &Argument, config: &Config) -> Result<Self> {
        let mut r = ArgumentReader::with_config(arg, config);
        Self::deserialize_from(&mut r)
    }
}

/// Type name plus attachments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Serializable {
    pub name: String,
    pub attachments: BTreeMap<String, Attachment>,
}

impl Serializable {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attachments: BTreeMap::new(),
        }
    }

    /// Attach an arbitrary argument under `key`, replacing any previous value.
    pub fn attach(&mut self, key: &str, value: &Argument) -> Result<()> {
        self.attachments
            .insert(key.to_string(), Attachment::from_argument(value)?);
        Ok(())
    }

    /// Decode the attachment stored under `key`, if any.
    pub fn attachment(&self, key: &str) -> Option<Result<Argument>> {
        self.attachments.get(key).map(Attachment::decode)
    }

    pub fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.write_str(&self.name)?;

        w.begin_map(Signature::string(), Signature::variant());
        for (key, attachment) in &self.attachments {
            w.begin_map_entry()?;
            w.write_str(key)?;
            w.write_variant(attachment.decode()?)?;
            w.end_map_entry()?;
        }
        w.end_map()
    }

    pub fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        let name = r.read_str()?;
        let limit = r.config().max_attachment_bytes;

        let mut attachments = BTreeMap::new();
        r.begin_map()?;
        while !r.at_end() {
            r.begin_map_entry()?;
            let key = r.read_str()?;
            let value = r.read_variant()?;
            r.end_map_entry()?;

            let attachment = Attachment::from_argument(value)?;
            if attachment.len() > limit {
                return Err(WireError::AttachmentTooLarge {
                    key,
                    size: attachment.len(),
                    limit,
                });
            }
            attachments.insert(key, attachment);
        }
        r.end_map()?;

        Ok(Self { name, attachments })
    }
}
