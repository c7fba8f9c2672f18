//! `IBusEngineDesc`: description of an installed input method engine.
//!
//! The record grew over five protocol revisions without ever carrying a
//! version number. A decoder tells revisions apart only by how many fields are
//! left in the structure, so fields are read strictly in order and the
//! structure is checked for exhaustion after every optional group.

use crate::serializable::{Marshal, Serializable};
use libibus_core::{ArgumentReader, ArgumentWriter, Result};
use serde::{Deserialize, Serialize};

/// Protocol revision of an engine description, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Revision {
    /// `engine_name` through `setup`.
    V1,
    /// Adds `layout_variant` and `layout_option`.
    V2,
    /// Adds `version`.
    V3,
    /// Adds `textdomain`.
    V4,
    /// Adds `iconpropkey`.
    V5,
}

impl Revision {
    pub const NEWEST: Revision = Revision::V5;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDesc {
    pub base: Serializable,
    pub engine_name: String,
    pub longname: String,
    pub description: String,
    pub language: String,
    pub license: String,
    pub author: String,
    pub icon: String,
    pub layout: String,
    pub rank: i32,
    pub hotkeys: String,
    pub symbol: String,
    pub setup: String,
    pub layout_variant: String,
    pub layout_option: String,
    pub version: String,
    pub textdomain: String,
    pub iconpropkey: String,
}

impl Default for EngineDesc {
    fn default() -> Self {
        Self {
            base: Serializable::named(Self::NAME),
            engine_name: String::new(),
            longname: String::new(),
            description: String::new(),
            language: String::new(),
            license: String::new(),
            author: String::new(),
            icon: String::new(),
            layout: String::new(),
            rank: 0,
            hotkeys: String::new(),
            symbol: String::new(),
            setup: String::new(),
            layout_variant: String::new(),
            layout_option: String::new(),
            version: String::new(),
            textdomain: String::new(),
            iconpropkey: String::new(),
        }
    }
}

/// Fields introduced by one revision after the first.
struct FieldGroup {
    revision: Revision,
    read: fn(&mut EngineDesc, &mut ArgumentReader<'_>) -> Result<()>,
    clear: fn(&mut EngineDesc),
}

static OPTIONAL_GROUPS: [FieldGroup; 4] = [
    FieldGroup {
        revision: Revision::V2,
        read: read_layout_details,
        clear: clear_layout_details,
    },
    FieldGroup {
        revision: Revision::V3,
        read: read_version,
        clear: clear_version,
    },
    FieldGroup {
        revision: Revision::V4,
        read: read_textdomain,
        clear: clear_textdomain,
    },
    FieldGroup {
        revision: Revision::V5,
        read: read_iconpropkey,
        clear: clear_iconpropkey,
    },
];

fn read_layout_details(desc: &mut EngineDesc, r: &mut ArgumentReader<'_>) -> Result<()> {
    desc.layout_variant = r.read_str()?;
    desc.layout_option = r.read_str()?;
    Ok(())
}

fn clear_layout_details(desc: &mut EngineDesc) {
    desc.layout_variant.clear();
    desc.layout_option.clear();
}

fn read_version(desc: &mut EngineDesc, r: &mut ArgumentReader<'_>) -> Result<()> {
    desc.version = r.read_str()?;
    Ok(())
}

fn clear_version(desc: &mut EngineDesc) {
    desc.version.clear();
}

fn read_textdomain(desc: &mut EngineDesc, r: &mut ArgumentReader<'_>) -> Result<()> {
    desc.textdomain = r.read_str()?;
    Ok(())
}

fn clear_textdomain(desc: &mut EngineDesc) {
    desc.textdomain.clear();
}

fn read_iconpropkey(desc: &mut EngineDesc, r: &mut ArgumentReader<'_>) -> Result<()> {
    desc.iconpropkey = r.read_str()?;
    Ok(())
}

fn clear_iconpropkey(desc: &mut EngineDesc) {
    desc.iconpropkey.clear();
}

impl EngineDesc {
    pub const NAME: &'static str = "IBusEngineDesc";

    /// Decode and report which protocol revision the payload was written in.
    pub fn decode_with_revision(r: &mut ArgumentReader<'_>) -> Result<(Self, Revision)> {
        tracing::debug!(
            target: "libibus::serialize",
            signature = %r.current_signature(),
            "EngineDesc::deserialize_from"
        );
        r.begin_structure()?;

        let mut desc = EngineDesc {
            base: Serializable::deserialize_from(r)?,
            ..EngineDesc::default()
        };
        desc.engine_name = r.read_str()?;
        desc.longname = r.read_str()?;
        desc.description = r.read_str()?;
        desc.language = r.read_str()?;
        desc.license = r.read_str()?;
        desc.author = r.read_str()?;
        desc.icon = r.read_str()?;
        desc.layout = r.read_str()?;
        desc.rank = r.read_i32()?;
        desc.hotkeys = r.read_str()?;
        desc.symbol = r.read_str()?;
        desc.setup = r.read_str()?;

        let mut revision = Revision::V1;
        let mut groups = OPTIONAL_GROUPS.iter();
        for group in groups.by_ref() {
            if r.at_end() {
                (group.clear)(&mut desc);
                break;
            }
            (group.read)(&mut desc, r)?;
            revision = group.revision;
        }
        for group in groups {
            (group.clear)(&mut desc);
        }

        r.end_structure()?;
        Ok((desc, revision))
    }
}

impl Marshal for EngineDesc {
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.begin_structure();
        self.base.serialize_to(w)?;

        w.write_str(&self.engine_name)?;
        w.write_str(&self.longname)?;
        w.write_str(&self.description)?;
        w.write_str(&self.language)?;
        w.write_str(&self.license)?;
        w.write_str(&self.author)?;
        w.write_str(&self.icon)?;
        w.write_str(&self.layout)?;
        w.write_i32(self.rank)?;
        w.write_str(&self.hotkeys)?;
        w.write_str(&self.symbol)?;
        w.write_str(&self.setup)?;
        w.write_str(&self.layout_variant)?;
        w.write_str(&self.layout_option)?;
        w.write_str(&self.version)?;
        w.write_str(&self.textdomain)?;
        w.write_str(&self.iconpropkey)?;

        w.end_structure()
    }

    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        Self::decode_with_revision(r).map(|(desc, _)| desc)
    }
}
