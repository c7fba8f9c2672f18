//! Frame-stack builder for bus arguments.
//!
//! The writer mirrors the marshalling half of a bus argument API: containers
//! are opened with `begin_*`, filled with scalar writes or nested containers,
//! and closed with the matching `end_*`. Array and map element types are
//! declared up front and every appended value is checked against them.

use crate::argument::Argument;
use crate::error::{Result, WireError};
use crate::signature::Signature;

#[derive(Debug)]
enum Frame {
    Structure(Vec<Argument>),
    Array {
        element: Signature,
        items: Vec<Argument>,
    },
    Map {
        key: Signature,
        value: Signature,
        entries: Vec<(Argument, Argument)>,
    },
    Entry(Vec<Argument>),
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Frame::Structure(_) => "structure",
            Frame::Array { .. } => "array",
            Frame::Map { .. } => "map",
            Frame::Entry(_) => "map entry",
        }
    }
}

/// Builds a single top-level `Argument`.
#[derive(Debug, Default)]
pub struct ArgumentWriter {
    stack: Vec<Frame>,
    top: Vec<Argument>,
}

impl ArgumentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_structure(&mut self) {
        self.stack.push(Frame::Structure(Vec::new()));
    }

    pub fn end_structure(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Structure(fields)) => self.push(Argument::Struct(fields)),
            other => self.restore("structure", other),
        }
    }

    /// Open an array whose items all have signature `element`.
    pub fn begin_array(&mut self, element: Signature) {
        self.stack.push(Frame::Array {
            element,
            items: Vec::new(),
        });
    }

    pub fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array { element, items }) => self.push(Argument::Array { element, items }),
            other => self.restore("array", other),
        }
    }

    /// Open a map. Key and value signatures must be declared before any entry.
    pub fn begin_map(&mut self, key: Signature, value: Signature) {
        self.stack.push(Frame::Map {
            key,
            value,
            entries: Vec::new(),
        });
    }

    pub fn begin_map_entry(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Map { .. }) => {
                self.stack.push(Frame::Entry(Vec::with_capacity(2)));
                Ok(())
            }
            other => Err(WireError::UnbalancedFrame {
                requested: "map entry",
                open: other.map_or("top level", Frame::name),
            }),
        }
    }

    pub fn end_map_entry(&mut self) -> Result<()> {
        let pair = match self.stack.pop() {
            Some(Frame::Entry(pair)) => pair,
            other => return self.restore("map entry", other),
        };
        let [key, value] = <[Argument; 2]>::try_from(pair)
            .map_err(|pair| WireError::IncompleteEntry(pair.len()))?;
        match self.stack.last_mut() {
            Some(Frame::Map {
                key: key_sig,
                value: value_sig,
                entries,
            }) => {
                check("map key", key_sig, &key)?;
                check("map value", value_sig, &value)?;
                entries.push((key, value));
                Ok(())
            }
            other => Err(WireError::UnbalancedFrame {
                requested: "map entry",
                open: other.map_or("top level", |frame| frame.name()),
            }),
        }
    }

    pub fn end_map(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Map {
                key,
                value,
                entries,
            }) => self.push(Argument::Dict {
                key,
                value,
                entries,
            }),
            other => self.restore("map", other),
        }
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.push(Argument::Bool(v))
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.push(Argument::U32(v))
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.push(Argument::I32(v))
    }

    pub fn write_str(&mut self, v: &str) -> Result<()> {
        self.push(Argument::Str(v.to_string()))
    }

    /// Wrap `inner` in a variant and append it.
    pub fn write_variant(&mut self, inner: Argument) -> Result<()> {
        self.push(Argument::variant(inner))
    }

    /// Append an already built argument as-is.
    pub fn write_argument(&mut self, arg: Argument) -> Result<()> {
        self.push(arg)
    }

    /// Consume the writer and return the single top-level argument.
    pub fn finish(mut self) -> Result<Argument> {
        if let Some(open) = self.stack.last() {
            return Err(WireError::UnbalancedFrame {
                requested: "top level",
                open: open.name(),
            });
        }
        if self.top.len() != 1 {
            return Err(WireError::Unfinished(self.top.len()));
        }
        Ok(self.top.remove(0))
    }

    fn push(&mut self, arg: Argument) -> Result<()> {
        match self.stack.last_mut() {
            None => self.top.push(arg),
            Some(Frame::Structure(fields)) => fields.push(arg),
            Some(Frame::Array { element, items }) => {
                check("array element", element, &arg)?;
                items.push(arg);
            }
            Some(Frame::Map { .. }) => {
                return Err(WireError::UnbalancedFrame {
                    requested: "map value outside an entry",
                    open: "map",
                });
            }
            Some(Frame::Entry(pair)) => {
                if pair.len() == 2 {
                    return Err(WireError::OverfullEntry);
                }
                pair.push(arg);
            }
        }
        Ok(())
    }

    /// Put back a frame popped by a mismatched `end_*` call and report it.
    fn restore<T>(&mut self, requested: &'static str, popped: Option<Frame>) -> Result<T> {
        let open = match popped {
            Some(frame) => {
                let name = frame.name();
                self.stack.push(frame);
                name
            }
            None => "top level",
        };
        Err(WireError::UnbalancedFrame { requested, open })
    }
}

fn check(role: &'static str, declared: &Signature, arg: &Argument) -> Result<()> {
    let actual = arg.signature();
    if &actual != declared {
        return Err(WireError::SignatureMismatch {
            role,
            declared: declared.clone(),
            actual,
        });
    }
    Ok(())
}
