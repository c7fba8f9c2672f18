//! Opaque attachment payloads.
//!
//! Every IBus record carries a string-keyed map of loosely typed side values.
//! The codec never interprets them: an attachment is kept as the bincode
//! encoding of its embedded argument and decoded only when a consumer asks for
//! a specific key.

use crate::argument::Argument;
use crate::codec;
use crate::error::Result;
use crate::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment(Vec<u8>);

impl Attachment {
    /// Encode an embedded argument into an opaque attachment.
    pub fn from_argument(arg: &Argument) -> Result<Self> {
        Ok(Attachment(codec::encode(arg)?))
    }

    /// Wrap bytes previously produced by `from_argument` or `as_bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Attachment(bytes)
    }

    /// Decode the embedded argument under the default nesting limit.
    pub fn decode(&self) -> Result<Argument> {
        codec::decode(&self.0, self.0.len(), &Config::default())
    }

    /// Decode the embedded argument, refusing attachments larger than
    /// `config.max_attachment_bytes` or nested deeper than
    /// `config.max_nesting_depth`.
    pub fn decode_with(&self, config: &Config) -> Result<Argument> {
        codec::decode(&self.0, config.max_attachment_bytes, config)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WireError;

    #[test]
    fn test_decode_is_lazy_and_exact() {
        let arg = Argument::Struct(vec![Argument::from("x"), Argument::U32(4)]);
        let att = Attachment::from_argument(&arg).unwrap();
        assert!(!att.is_empty());
        assert_eq!(att.decode().unwrap(), arg);
    }

    #[test]
    fn test_garbage_bytes_fail_on_decode() {
        let att = Attachment::from_bytes(vec![0xff, 0xff, 0xff, 0xff]);
        assert!(matches!(att.decode(), Err(WireError::Attachment(_))));
    }

    #[test]
    fn test_deep_variant_chain_fails_instead_of_overflowing() {
        let bytes: Vec<u8> = 4u32.to_le_bytes().repeat(200_000);
        let att = Attachment::from_bytes(bytes);
        assert!(matches!(att.decode(), Err(WireError::NestingTooDeep(64))));

        let config = Config {
            max_nesting_depth: 8,
            max_attachment_bytes: usize::MAX,
        };
        assert!(matches!(att.decode_with(&config), Err(WireError::NestingTooDeep(8))));
    }

    #[test]
    fn test_decode_with_size_limit() {
        let att = Attachment::from_argument(&Argument::from("x".repeat(64))).unwrap();
        let config = Config {
            max_attachment_bytes: 16,
            ..Config::default()
        };
        assert!(att.decode_with(&config).is_err());
        assert!(att.decode_with(&Config::default()).is_ok());
    }
}
