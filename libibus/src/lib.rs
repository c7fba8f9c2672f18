//! # libibus
//!
//! IBus wire records and preedit formatting built on libibus-core.
//!
//! Every record marshals itself through the `Marshal` trait into the tagged
//! argument stream of `libibus_core`. Attribute lists additionally convert into
//! ordered `FormatRange`s ready for rendering.

pub mod serializable;
pub mod format;
pub mod attribute;
pub mod attr_list;
pub mod text;
pub mod engine_desc;
pub mod property;
pub mod record;

// Re-export the argument stream from core
pub use libibus_core::codec;
pub use libibus_core::{
    Argument, ArgumentReader, ArgumentWriter, Attachment, Config, Signature, WireError,
};

pub use serializable::{Marshal, Serializable};
pub use format::{Rgb, TextFormat, UnderlineStyle};
pub use attribute::{AttrUnderline, Attribute, AttributeType};
pub use attr_list::{AttributeList, FormatRange};
pub use text::Text;
pub use engine_desc::{EngineDesc, Revision};
pub use property::{hints, ClientCommitPreedit, ContentType, InputPurpose};
pub use record::{Record, RecordKind};
