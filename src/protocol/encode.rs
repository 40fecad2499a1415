//! Argument encoding
//!
//! Builds [`Command`]s for each operation family:
//!
//! - single key:   `name key [value] [ttl]`
//! - batch write:  `name [set] k1 v1 k2 v2 ...`
//! - batch read:   `name [set] k1 k2 ...`
//! - range:        `name [set] start end limit`
//!
//! Direction and ordering are never sent as arguments. They select a
//! different command name from a fixed table.

use super::{Arg, Command};

// =============================================================================
// Direction / Order
// =============================================================================

/// End of a queue an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Front,
    Back,
}

impl Direction {
    pub fn push_command(self) -> &'static str {
        match self {
            Direction::Front => "qpush_front",
            Direction::Back => "qpush_back",
        }
    }

    pub fn pop_command(self) -> &'static str {
        match self {
            Direction::Front => "qpop_front",
            Direction::Back => "qpop_back",
        }
    }

    pub fn trim_command(self) -> &'static str {
        match self {
            Direction::Front => "qtrim_front",
            Direction::Back => "qtrim_back",
        }
    }
}

/// Iteration order of a range query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Forward,
    Reverse,
}

impl Order {
    /// Pick the forward or reverse variant of a command
    pub fn select(self, forward: &'static str, reverse: &'static str) -> &'static str {
        match self {
            Order::Forward => forward,
            Order::Reverse => reverse,
        }
    }

    pub fn scan_command(self) -> &'static str {
        self.select("scan", "rscan")
    }

    pub fn keys_command(self) -> &'static str {
        self.select("keys", "rkeys")
    }

    pub fn hscan_command(self) -> &'static str {
        self.select("hscan", "hrscan")
    }

    pub fn hlist_command(self) -> &'static str {
        self.select("hlist", "hrlist")
    }

    pub fn qlist_command(self) -> &'static str {
        self.select("qlist", "qrlist")
    }
}

// =============================================================================
// Range
// =============================================================================

/// A key (or name) window: `(start, end]`, at most `limit` results.
///
/// An empty `start` means -inf and an empty `end` means +inf. For reverse
/// commands the store walks from `start` downwards, so `start` is the upper
/// bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub start: String,
    pub end: String,
    pub limit: u64,
}

impl Range {
    pub fn new(start: impl Into<String>, end: impl Into<String>, limit: u64) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            limit,
        }
    }

    /// The whole keyspace, capped at `limit` results
    pub fn all(limit: u64) -> Self {
        Self::new("", "", limit)
    }

    fn push_into(&self, command: &mut Command) {
        command.push(self.start.as_str());
        command.push(self.end.as_str());
        command.push(self.limit);
    }
}

// =============================================================================
// Encoders
// =============================================================================

/// `name key`
pub fn keyed(name: &'static str, key: &str) -> Command {
    Command::new(name).arg(key)
}

/// `name set key`
pub fn hash_keyed(name: &'static str, set: &str, key: &str) -> Command {
    Command::new(name).arg(set).arg(key)
}

/// `name [set] start end limit`
pub fn range(name: &'static str, set: Option<&str>, range: &Range) -> Command {
    let mut command = Command::new(name);
    if let Some(set) = set {
        command.push(set);
    }
    range.push_into(&mut command);
    command
}

/// `name [set] k1 v1 k2 v2 ...`
///
/// Returns `None` for an empty input; the caller skips the round trip.
/// Input iteration order becomes wire order.
pub fn flatten_pairs<I, K, V>(name: &'static str, set: Option<&str>, pairs: I) -> Option<Command>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Arg>,
    V: Into<Arg>,
{
    let mut command = Command::new(name);
    if let Some(set) = set {
        command.push(set);
    }
    let prefix = command.args().len();
    for (key, value) in pairs {
        command.push(key);
        command.push(value);
    }
    (command.args().len() > prefix).then_some(command)
}

/// `name [set] k1 k2 ...`
///
/// Returns `None` for an empty key list; the caller skips the round trip.
pub fn key_list<I, K>(name: &'static str, set: Option<&str>, keys: I) -> Option<Command>
where
    I: IntoIterator<Item = K>,
    K: Into<Arg>,
{
    let mut command = Command::new(name);
    if let Some(set) = set {
        command.push(set);
    }
    let prefix = command.args().len();
    command.extend(keys);
    (command.args().len() > prefix).then_some(command)
}
