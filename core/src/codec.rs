//! Bincode encoding of whole arguments.
//!
//! Decoding walks the value tree through a depth-counting seed instead of the
//! derived `Deserialize`, so untrusted bytes can never nest deeper than
//! `Config::max_nesting_depth` and never read past the byte limit.

use crate::argument::Argument;
use crate::error::{Result, WireError};
use crate::signature::Signature;
use crate::Config;
use bincode::Options;
use serde::de::{self, DeserializeSeed, EnumAccess, SeqAccess, VariantAccess, Visitor};
use serde::Deserialize;
use std::cell::Cell;
use std::fmt;

// Same byte layout as `bincode::serialize`.
fn options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

/// Encode an argument tree.
pub fn encode(arg: &Argument) -> Result<Vec<u8>> {
    Ok(options().serialize(arg)?)
}

/// Decode an argument tree, reading at most `limit` bytes and rejecting
/// containers nested deeper than `config.max_nesting_depth`.
pub fn decode(bytes: &[u8], limit: usize, config: &Config) -> Result<Argument> {
    if bytes.len() > limit {
        return Err(WireError::Attachment(Box::new(bincode::ErrorKind::SizeLimit)));
    }
    let guard = DepthGuard {
        limit: config.max_nesting_depth,
        tripped: Cell::new(false),
    };
    let seed = Bounded {
        depth: 0,
        guard: &guard,
    };
    match options().with_limit(limit as u64).deserialize_seed(seed, bytes) {
        Ok(arg) => Ok(arg),
        Err(_) if guard.tripped.get() => Err(WireError::NestingTooDeep(guard.limit)),
        Err(e) => Err(e.into()),
    }
}

struct DepthGuard {
    limit: usize,
    tripped: Cell<bool>,
}

#[derive(Deserialize)]
#[serde(variant_identifier)]
enum Tag {
    Bool,
    U32,
    I32,
    Str,
    Variant,
    Struct,
    Array,
    Dict,
}

const TAGS: &[&str] = &[
    "Bool", "U32", "I32", "Str", "Variant", "Struct", "Array", "Dict",
];

/// One argument at `depth` enclosing containers.
#[derive(Clone, Copy)]
struct Bounded<'g> {
    depth: usize,
    guard: &'g DepthGuard,
}

impl<'g> Bounded<'g> {
    /// Seed for the children of a container opened at this level.
    fn enter<E: de::Error>(self) -> std::result::Result<Bounded<'g>, E> {
        if self.depth >= self.guard.limit {
            self.guard.tripped.set(true);
            return Err(E::custom(format!(
                "nesting depth exceeds limit of {}",
                self.guard.limit
            )));
        }
        Ok(Bounded {
            depth: self.depth + 1,
            guard: self.guard,
        })
    }
}

impl<'de, 'g> DeserializeSeed<'de> for Bounded<'g> {
    type Value = Argument;

    fn deserialize<D: de::Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Argument, D::Error> {
        deserializer.deserialize_enum("Argument", TAGS, self)
    }
}

impl<'de, 'g> Visitor<'de> for Bounded<'g> {
    type Value = Argument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a bus argument")
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> std::result::Result<Argument, A::Error> {
        let (tag, variant) = data.variant::<Tag>()?;
        match tag {
            Tag::Bool => variant.newtype_variant().map(Argument::Bool),
            Tag::U32 => variant.newtype_variant().map(Argument::U32),
            Tag::I32 => variant.newtype_variant().map(Argument::I32),
            Tag::Str => variant.newtype_variant().map(Argument::Str),
            Tag::Variant => {
                let inner = variant.newtype_variant_seed(self.enter()?)?;
                Ok(Argument::variant(inner))
            }
            Tag::Struct => {
                let fields = variant.newtype_variant_seed(Items(self.enter()?))?;
                Ok(Argument::Struct(fields))
            }
            Tag::Array => variant.struct_variant(&["element", "items"], ArrayBody(self.enter()?)),
            Tag::Dict => {
                variant.struct_variant(&["key", "value", "entries"], DictBody(self.enter()?))
            }
        }
    }
}

fn field<'de, A, T>(
    seq: &mut A,
    index: usize,
    exp: &dyn de::Expected,
) -> std::result::Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, exp))
}

fn field_seed<'de, A, S>(
    seq: &mut A,
    seed: S,
    index: usize,
    exp: &dyn de::Expected,
) -> std::result::Result<S::Value, A::Error>
where
    A: SeqAccess<'de>,
    S: DeserializeSeed<'de>,
{
    seq.next_element_seed(seed)?
        .ok_or_else(|| de::Error::invalid_length(index, exp))
}

/// A sequence of arguments, all one level below the container.
struct Items<'g>(Bounded<'g>);

impl<'de, 'g> DeserializeSeed<'de> for Items<'g> {
    type Value = Vec<Argument>;

    fn deserialize<D: de::Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Vec<Argument>, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'g> Visitor<'de> for Items<'g> {
    type Value = Vec<Argument>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of bus arguments")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Vec<Argument>, A::Error> {
        // Length prefixes are untrusted.
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
        while let Some(item) = seq.next_element_seed(self.0)? {
            items.push(item);
        }
        Ok(items)
    }
}

struct Entries<'g>(Bounded<'g>);

impl<'de, 'g> DeserializeSeed<'de> for Entries<'g> {
    type Value = Vec<(Argument, Argument)>;

    fn deserialize<D: de::Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'g> Visitor<'de> for Entries<'g> {
    type Value = Vec<(Argument, Argument)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of map entries")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
        while let Some(entry) = seq.next_element_seed(Entry(self.0))? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

struct Entry<'g>(Bounded<'g>);

impl<'de, 'g> DeserializeSeed<'de> for Entry<'g> {
    type Value = (Argument, Argument);

    fn deserialize<D: de::Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_tuple(2, self)
    }
}

impl<'de, 'g> Visitor<'de> for Entry<'g> {
    type Value = (Argument, Argument);

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a key and a value")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let key = field_seed(&mut seq, self.0, 0, &self)?;
        let value = field_seed(&mut seq, self.0, 1, &self)?;
        Ok((key, value))
    }
}

struct ArrayBody<'g>(Bounded<'g>);

impl<'de, 'g> Visitor<'de> for ArrayBody<'g> {
    type Value = Argument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array argument")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Argument, A::Error> {
        let element: Signature = field(&mut seq, 0, &self)?;
        let items = field_seed(&mut seq, Items(self.0), 1, &self)?;
        Ok(Argument::Array { element, items })
    }
}

struct DictBody<'g>(Bounded<'g>);

impl<'de, 'g> Visitor<'de> for DictBody<'g> {
    type Value = Argument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map argument")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Argument, A::Error> {
        let key: Signature = field(&mut seq, 0, &self)?;
        let value: Signature = field(&mut seq, 1, &self)?;
        let entries = field_seed(&mut seq, Entries(self.0), 2, &self)?;
        Ok(Argument::Dict {
            key,
            value,
            entries,
        })
    }
}
