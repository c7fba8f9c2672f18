//! In-memory tagged bus arguments.
//!
//! `Argument` is the value tree the writer produces and the reader walks. It
//! mirrors the D-Bus type system closely enough that every value can report a
//! signature, but only carries the basic types IBus records actually use.

use crate::signature::Signature;
use serde::{Deserialize, Serialize};

/// A single tagged bus argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    Bool(bool),
    U32(u32),
    I32(i32),
    Str(String),
    /// A value carrying its own type, unwrapped with `ArgumentReader::read_variant`.
    Variant(Box<Argument>),
    Struct(Vec<Argument>),
    Array {
        element: Signature,
        items: Vec<Argument>,
    },
    Dict {
        key: Signature,
        value: Signature,
        entries: Vec<(Argument, Argument)>,
    },
}

impl Argument {
    pub fn variant(inner: Argument) -> Self {
        Argument::Variant(Box::new(inner))
    }

    /// Signature of this argument.
    pub fn signature(&self) -> Signature {
        match self {
            Argument::Bool(_) => Signature::bool(),
            Argument::U32(_) => Signature::u32(),
            Argument::I32(_) => Signature::i32(),
            Argument::Str(_) => Signature::string(),
            Argument::Variant(_) => Signature::variant(),
            Argument::Struct(fields) => {
                let sigs: Vec<Signature> = fields.iter().map(Argument::signature).collect();
                Signature::structure(&sigs)
            }
            Argument::Array { element, .. } => Signature::array(element),
            Argument::Dict { key, value, .. } => Signature::dict(key, value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Argument::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Fields of a structure argument.
    pub fn as_struct(&self) -> Option<&[Argument]> {
        match self {
            Argument::Struct(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }
}

impl From<bool> for Argument {
    fn from(v: bool) -> Self {
        Argument::Bool(v)
    }
}

impl From<u32> for Argument {
    fn from(v: u32) -> Self {
        Argument::U32(v)
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Argument::I32(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Argument::Str(v.to_string())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Argument::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_signature() {
        let arg = Argument::Struct(vec![
            Argument::from("IBusAttribute"),
            Argument::Dict {
                key: Signature::string(),
                value: Signature::variant(),
                entries: Vec::new(),
            },
            Argument::U32(1),
            Argument::I32(-3),
            Argument::Bool(true),
        ]);
        assert_eq!(arg.signature(), "(sa{sv}uib)");
    }

    #[test]
    fn test_array_signature_uses_declared_element() {
        let arg = Argument::Array {
            element: Signature::variant(),
            items: Vec::new(),
        };
        assert_eq!(arg.signature(), "av");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Argument::from("x").as_str(), Some("x"));
        assert_eq!(Argument::U32(7).as_u32(), Some(7));
        assert!(Argument::U32(7).as_str().is_none());
        assert!(Argument::Struct(vec![]).as_struct().unwrap().is_empty());
    }
}
