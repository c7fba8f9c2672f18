use crate::signature::Signature;
use thiserror::Error;

/// Errors raised by the argument writer/reader and attachment codec.
///
/// Any of these aborts the record currently being decoded; callers never see a
/// partially populated record.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("shape mismatch: expected `{expected}`, found `{found}`")]
    ShapeMismatch { expected: String, found: Signature },

    #[error("unexpected end of {frame} while reading `{expected}`")]
    UnexpectedEnd {
        frame: &'static str,
        expected: String,
    },

    #[error("unbalanced frame: cannot close {requested} while inside {open}")]
    UnbalancedFrame {
        requested: &'static str,
        open: &'static str,
    },

    #[error("{role} signature mismatch: declared `{declared}`, got `{actual}`")]
    SignatureMismatch {
        role: &'static str,
        declared: Signature,
        actual: Signature,
    },

    #[error("map entry holds {0} arguments, expected a key and a value")]
    IncompleteEntry(usize),

    #[error("map entry already holds a key and a value")]
    OverfullEntry,

    #[error("nesting depth exceeds limit of {0}")]
    NestingTooDeep(usize),

    #[error("attachment `{key}` is {size} bytes, limit is {limit}")]
    AttachmentTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("attachment codec: {0}")]
    Attachment(#[from] bincode::Error),

    #[error("writer holds {0} top-level arguments, expected exactly one")]
    Unfinished(usize),
}

pub type Result<T> = std::result::Result<T, WireError>;
