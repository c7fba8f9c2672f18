//! D-Bus type signatures.
//!
//! A `Signature` is the textual type code of a bus argument: `s` for a string,
//! `(su)` for a structure of a string and a `u32`, `av` for an array of
//! variants, `a{sv}` for a string-keyed map of variants, and so on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type signature of one or more bus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature(String);

impl Signature {
    pub const BOOL: &'static str = "b";
    pub const U32: &'static str = "u";
    pub const I32: &'static str = "i";
    pub const STRING: &'static str = "s";
    pub const VARIANT: &'static str = "v";

    pub fn new<S: Into<String>>(code: S) -> Self {
        Signature(code.into())
    }

    pub fn bool() -> Self {
        Self::new(Self::BOOL)
    }

    pub fn u32() -> Self {
        Self::new(Self::U32)
    }

    pub fn i32() -> Self {
        Self::new(Self::I32)
    }

    pub fn string() -> Self {
        Self::new(Self::STRING)
    }

    pub fn variant() -> Self {
        Self::new(Self::VARIANT)
    }

    /// `(` fields `)`
    pub fn structure<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a Signature>,
    {
        let mut code = String::from("(");
        for field in fields {
            code.push_str(field.as_str());
        }
        code.push(')');
        Signature(code)
    }

    /// `a` element
    pub fn array(element: &Signature) -> Self {
        Signature(format!("a{}", element.0))
    }

    /// `a{` key value `}`
    pub fn dict(key: &Signature, value: &Signature) -> Self {
        Signature(format!("a{{{}{}}}", key.0, value.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append another signature, used to describe a run of sibling arguments.
    pub fn push(&mut self, other: &Signature) {
        self.0.push_str(&other.0);
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Signature {
    fn from(code: &str) -> Self {
        Signature::new(code)
    }
}

impl PartialEq<str> for Signature {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Signature {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
