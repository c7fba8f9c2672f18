//! Payloads of the input context properties a client sets on the bus.
//!
//! Unlike the named records these carry no header, only their fields.

use crate::serializable::Marshal;
use libibus_core::{ArgumentReader, ArgumentWriter, Result};
use serde::{Deserialize, Serialize};

/// `ClientCommitPreedit` property: whether the client commits the preedit
/// itself when focus moves away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientCommitPreedit {
    pub client_commit_preedit: bool,
}

impl ClientCommitPreedit {
    pub fn new(client_commit_preedit: bool) -> Self {
        Self {
            client_commit_preedit,
        }
    }
}

impl Marshal for ClientCommitPreedit {
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.begin_structure();
        w.write_bool(self.client_commit_preedit)?;
        w.end_structure()
    }

    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        r.begin_structure()?;
        let client_commit_preedit = r.read_bool()?;
        r.end_structure()?;
        Ok(Self {
            client_commit_preedit,
        })
    }
}

/// Input purpose hint for context-aware input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputPurpose {
    /// Free-form text input (default)
    #[default]
    FreeForm,
    Alpha,
    Digits,
    Number,
    Phone,
    Url,
    Email,
    Name,
    /// Password (disable suggestions)
    Password,
    Pin,
    /// Terminal/command line
    Terminal,
}

impl InputPurpose {
    pub fn from_raw(raw: u32) -> Option<Self> {
        let purpose = match raw {
            0 => InputPurpose::FreeForm,
            1 => InputPurpose::Alpha,
            2 => InputPurpose::Digits,
            3 => InputPurpose::Number,
            4 => InputPurpose::Phone,
            5 => InputPurpose::Url,
            6 => InputPurpose::Email,
            7 => InputPurpose::Name,
            8 => InputPurpose::Password,
            9 => InputPurpose::Pin,
            10 => InputPurpose::Terminal,
            _ => return None,
        };
        Some(purpose)
    }

    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Bits of `ContentType::hints`.
pub mod hints {
    pub const NONE: u32 = 0;
    pub const SPELLCHECK: u32 = 1 << 0;
    pub const NO_SPELLCHECK: u32 = 1 << 1;
    pub const WORD_COMPLETION: u32 = 1 << 2;
    pub const LOWERCASE: u32 = 1 << 3;
    pub const UPPERCASE_CHARS: u32 = 1 << 4;
    pub const UPPERCASE_WORDS: u32 = 1 << 5;
    pub const UPPERCASE_SENTENCES: u32 = 1 << 6;
    pub const INHIBIT_OSK: u32 = 1 << 7;
    pub const VERTICAL_WRITING: u32 = 1 << 8;
    pub const EMOJI: u32 = 1 << 9;
    pub const NO_EMOJI: u32 = 1 << 10;
    pub const PRIVATE: u32 = 1 << 11;
}

/// `ContentType` property: input purpose and hint bits of the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentType {
    pub purpose: u32,
    pub hints: u32,
}

impl ContentType {
    pub fn new(purpose: u32, hints: u32) -> Self {
        Self { purpose, hints }
    }

    /// Typed purpose. `None` for values this crate does not know about.
    pub fn input_purpose(&self) -> Option<InputPurpose> {
        InputPurpose::from_raw(self.purpose)
    }

    pub fn has_hint(&self, hint: u32) -> bool {
        self.hints & hint == hint
    }
}

impl Marshal for ContentType {
    fn serialize_to(&self, w: &mut ArgumentWriter) -> Result<()> {
        w.begin_structure();
        w.write_u32(self.purpose)?;
        w.write_u32(self.hints)?;
        w.end_structure()
    }

    fn deserialize_from(r: &mut ArgumentReader<'_>) -> Result<Self> {
        r.begin_structure()?;
        let purpose = r.read_u32()?;
        let hints = r.read_u32()?;
        r.end_structure()?;
        Ok(Self { purpose, hints })
    }
}
