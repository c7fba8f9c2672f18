//! Frame-stack cursor over a borrowed bus argument.
//!
//! The reader is the demarshalling half of the argument API. Reads are
//! positional: each `read_*` consumes the next argument of the current frame
//! and fails with `WireError::ShapeMismatch` when its type differs. Closing a
//! frame skips whatever the caller did not read, so a record written by a newer
//! protocol revision still decodes with an older field list.

use crate::argument::Argument;
use crate::error::{Result, WireError};
use crate::signature::Signature;
use crate::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Top,
    Structure,
    Array,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::Top => "top level",
            Kind::Structure => "structure",
            Kind::Array => "array",
        }
    }
}

#[derive(Debug)]
enum Cursor<'a> {
    Seq {
        kind: Kind,
        items: &'a [Argument],
        pos: usize,
    },
    Map {
        entries: &'a [(Argument, Argument)],
        pos: usize,
    },
    Entry {
        entry: &'a (Argument, Argument),
        pos: usize,
    },
}

impl<'a> Cursor<'a> {
    fn name(&self) -> &'static str {
        match self {
            Cursor::Seq { kind, .. } => kind.name(),
            Cursor::Map { .. } => "map",
            Cursor::Entry { .. } => "map entry",
        }
    }

    fn remaining(&self) -> usize {
        match self {
            Cursor::Seq { items, pos, .. } => items.len().saturating_sub(*pos),
            Cursor::Map { entries, pos } => entries.len().saturating_sub(*pos),
            Cursor::Entry { pos, .. } => 2usize.saturating_sub(*pos),
        }
    }

    fn peek(&self) -> Option<&'a Argument> {
        match *self {
            Cursor::Seq { items, pos, .. } => items.get(pos),
            Cursor::Entry { entry, pos: 0 } => Some(&entry.0),
            Cursor::Entry { entry, pos: 1 } => Some(&entry.1),
            Cursor::Entry { .. } | Cursor::Map { .. } => None,
        }
    }

    fn signature(&self) -> Signature {
        let mut sig = Signature::default();
        match *self {
            Cursor::Seq { items, pos, .. } => {
                for item in items.iter().skip(pos) {
                    sig.push(&item.signature());
                }
            }
            Cursor::Map { entries, pos } => {
                for (key, value) in entries.iter().skip(pos) {
                    sig.push(&Signature::new(format!(
                        "{{{}{}}}",
                        key.signature(),
                        value.signature()
                    )));
                }
            }
            Cursor::Entry { entry, pos } => {
                if pos == 0 {
                    sig.push(&entry.0.signature());
                }
                if pos <= 1 {
                    sig.push(&entry.1.signature());
                }
            }
        }
        sig
    }
}

/// Positional reader over a single top-level `Argument`.
#[derive(Debug)]
pub struct ArgumentReader<'a> {
    stack: Vec<Cursor<'a>>,
    config: Config,
    base_depth: usize,
}

impl<'a> ArgumentReader<'a> {
    /// Reader with the default codec configuration.
    pub fn new(root: &'a Argument) -> Self {
        Self::with_config(root, &Config::default())
    }

    pub fn with_config(root: &'a Argument, config: &Config) -> Self {
        Self {
            stack: vec![Cursor::Seq {
                kind: Kind::Top,
                items: std::slice::from_ref(root),
                pos: 0,
            }],
            config: config.clone(),
            base_depth: 0,
        }
    }

    /// Reader over an argument embedded at the current position (for example
    /// the content of a variant). Nesting depth keeps counting from here.
    pub fn descend(&self, inner: &'a Argument) -> ArgumentReader<'a> {
        ArgumentReader {
            stack: vec![Cursor::Seq {
                kind: Kind::Top,
                items: std::slice::from_ref(inner),
                pos: 0,
            }],
            config: self.config.clone(),
            base_depth: self.depth(),
        }
    }

    /// Codec limits this reader was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of open containers, including those of enclosing readers.
    pub fn depth(&self) -> usize {
        self.base_depth + self.stack.len() - 1
    }

    /// True when the current frame has no unread arguments.
    pub fn at_end(&self) -> bool {
        self.current().map_or(true, |c| c.remaining() == 0)
    }

    /// Signature of the unread remainder of the current frame. Empty when the
    /// frame is exhausted. Does not consume anything.
    pub fn current_signature(&self) -> Signature {
        self.current().map(Cursor::signature).unwrap_or_default()
    }

    pub fn begin_structure(&mut self) -> Result<()> {
        self.check_depth()?;
        match self.next("(...)")? {
            Argument::Struct(fields) => {
                self.stack.push(Cursor::Seq {
                    kind: Kind::Structure,
                    items: fields,
                    pos: 0,
                });
                Ok(())
            }
            other => Err(mismatch("(...)", other)),
        }
    }

    pub fn end_structure(&mut self) -> Result<()> {
        self.close("structure")
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.check_depth()?;
        match self.next("a...")? {
            Argument::Array { items, .. } => {
                self.stack.push(Cursor::Seq {
                    kind: Kind::Array,
                    items,
                    pos: 0,
                });
                Ok(())
            }
            other => Err(mismatch("a...", other)),
        }
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.close("array")
    }

    pub fn begin_map(&mut self) -> Result<()> {
        self.check_depth()?;
        match self.next("a{..}")? {
            Argument::Dict { entries, .. } => {
                self.stack.push(Cursor::Map { entries, pos: 0 });
                Ok(())
            }
            other => Err(mismatch("a{..}", other)),
        }
    }

    pub fn begin_map_entry(&mut self) -> Result<()> {
        let entry = match self.stack.last_mut() {
            Some(Cursor::Map { entries, pos }) => {
                let entries: &'a [(Argument, Argument)] = *entries;
                let entry = entries.get(*pos).ok_or_else(|| WireError::UnexpectedEnd {
                    frame: "map",
                    expected: "{..}".to_string(),
                })?;
                *pos += 1;
                entry
            }
            other => {
                return Err(WireError::UnbalancedFrame {
                    requested: "map entry",
                    open: other.map_or("top level", |c| c.name()),
                })
            }
        };
        self.stack.push(Cursor::Entry { entry, pos: 0 });
        Ok(())
    }

    pub fn end_map_entry(&mut self) -> Result<()> {
        self.close("map entry")
    }

    pub fn end_map(&mut self) -> Result<()> {
        self.close("map")
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.next(Signature::BOOL)? {
            Argument::Bool(v) => Ok(*v),
            other => Err(mismatch(Signature::BOOL, other)),
        }
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        match self.next(Signature::U32)? {
            Argument::U32(v) => Ok(*v),
            other => Err(mismatch(Signature::U32, other)),
        }
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        match self.next(Signature::I32)? {
            Argument::I32(v) => Ok(*v),
            other => Err(mismatch(Signature::I32, other)),
        }
    }

    pub fn read_str(&mut self) -> Result<String> {
        match self.next(Signature::STRING)? {
            Argument::Str(v) => Ok(v.clone()),
            other => Err(mismatch(Signature::STRING, other)),
        }
    }

    /// Read a variant and return the argument embedded in it.
    pub fn read_variant(&mut self) -> Result<&'a Argument> {
        match self.next(Signature::VARIANT)? {
            Argument::Variant(inner) => Ok(&**inner),
            other => Err(mismatch(Signature::VARIANT, other)),
        }
    }

    fn current(&self) -> Option<&Cursor<'a>> {
        self.stack.last()
    }

    fn check_depth(&self) -> Result<()> {
        if self.depth() >= self.config.max_nesting_depth {
            return Err(WireError::NestingTooDeep(self.config.max_nesting_depth));
        }
        Ok(())
    }

    fn next(&mut self, expected: &str) -> Result<&'a Argument> {
        let cursor = match self.stack.last_mut() {
            Some(cursor) => cursor,
            None => {
                return Err(WireError::UnexpectedEnd {
                    frame: "top level",
                    expected: expected.to_string(),
                })
            }
        };
        if let Cursor::Map { .. } = cursor {
            return Err(WireError::UnbalancedFrame {
                requested: "value outside a map entry",
                open: "map",
            });
        }
        let arg = cursor.peek().ok_or_else(|| WireError::UnexpectedEnd {
            frame: cursor.name(),
            expected: expected.to_string(),
        })?;
        match cursor {
            Cursor::Seq { pos, .. } | Cursor::Entry { pos, .. } => *pos += 1,
            Cursor::Map { .. } => {}
        }
        Ok(arg)
    }

    fn close(&mut self, requested: &'static str) -> Result<()> {
        let open = match self.stack.last() {
            Some(cursor) if cursor.name() != "top level" => cursor.name(),
            _ => {
                return Err(WireError::UnbalancedFrame {
                    requested,
                    open: "top level",
                })
            }
        };
        if open != requested {
            return Err(WireError::UnbalancedFrame { requested, open });
        }
        if let Some(cursor) = self.stack.pop() {
            if cursor.remaining() > 0 {
                tracing::trace!(
                    target: "libibus::serialize",
                    frame = requested,
                    skipped = %cursor.signature(),
                    "skipping unread trailing arguments"
                );
            }
        }
        Ok(())
    }
}

fn mismatch(expected: &str, found: &Argument) -> WireError {
    WireError::ShapeMismatch {
        expected: expected.to_string(),
        found: found.signature(),
    }
}
