//! Command definitions
//!
//! A command is a name followed by positional arguments, sent to the store
//! as-is. Order is significant and command-specific.

use std::fmt;

use bytes::Bytes;

/// One positional argument of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// UTF-8 text (keys, names, textual values)
    Str(String),

    /// Signed integer, sent in decimal (ttl, offset, limit, delta, ...)
    Int(i64),

    /// Opaque value bytes
    Bytes(Bytes),
}

impl Arg {
    /// Wire representation of the argument
    pub fn as_bytes(&self) -> Bytes {
        match self {
            Arg::Str(s) => Bytes::copy_from_slice(s.as_bytes()),
            Arg::Int(n) => Bytes::from(n.to_string()),
            Arg::Bytes(b) => b.clone(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => f.write_str(s),
                Err(_) => write!(f, "<{} bytes>", b.len()),
            },
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<Bytes> for Arg {
    fn from(value: Bytes) -> Self {
        Arg::Bytes(value)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(value: Vec<u8>) -> Self {
        Arg::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self {
        Arg::Bytes(Bytes::copy_from_slice(value))
    }
}

/// A command ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: &'static str,
    args: Vec<Arg>,
}

impl Command {
    /// Start a command with no arguments
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Append an argument (builder style)
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append an argument in place
    pub fn push(&mut self, arg: impl Into<Arg>) {
        self.args.push(arg.into());
    }

    /// Append every argument of an iterator in order
    pub fn extend<I, A>(&mut self, args: I)
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
    }

    /// The command name (first wire block)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Positional arguments after the name
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Arguments rendered as text, for diagnostics
    pub fn params(&self) -> Vec<String> {
        self.args.iter().map(|a| a.to_string()).collect()
    }

    /// Every block of the command as text, name first
    pub fn to_strings(&self) -> Vec<String> {
        std::iter::once(self.name.to_string())
            .chain(self.params())
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
