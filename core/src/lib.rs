//! libibus-core
//!
//! In-memory implementation of the tagged bus argument stream that IBus wire
//! records are marshalled through: a D-Bus style value tree, a writer and a
//! reader cursor over it, and opaque attachment payloads.
//!
//! Public API:
//! - `Argument` - Tagged bus value (scalars, variants, structures, arrays, maps)
//! - `Signature` - D-Bus type signature string
//! - `ArgumentWriter` - Frame-stack builder producing one `Argument`
//! - `ArgumentReader` - Positional cursor with exhaustion checks
//! - `Attachment` - Lazily decoded side-channel payload
//! - `codec` - Bincode encoding of arguments with depth-bounded decode
//! - `Config` - Codec limits
use serde::{Deserialize, Serialize};

pub mod argument;
pub use argument::Argument;

pub mod signature;
pub use signature::Signature;

pub mod writer;
pub use writer::ArgumentWriter;

pub mod reader;
pub use reader::ArgumentReader;

pub mod attachment;
pub use attachment::Attachment;

pub mod codec;

pub mod error;
pub use error::{Result, WireError};

/// Codec limits applied while decoding records.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of nested containers a reader will descend into.
    /// Default: 64 (32 structure levels plus 32 array levels on D-Bus).
    pub max_nesting_depth: usize,

    /// Largest encoded attachment accepted while decoding a record, in bytes.
    /// Default: 65536.
    pub max_attachment_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
            max_attachment_bytes: 64 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
