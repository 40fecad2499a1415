//! Scalar key-value operations

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::network::Transport;
use crate::protocol::{flatten_pairs, key_list, keyed, range, Arg, Command, Order, Pairs, Range};

use super::Client;

/// Options for [`Client::set_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Time to live in seconds. `None` (the default) stores the key
    /// without expiry via `set`; `Some` uses `setx`.
    pub ttl: Option<i64>,
}

impl SetOptions {
    pub fn ttl(seconds: i64) -> Self {
        Self { ttl: Some(seconds) }
    }
}

impl<T: Transport> Client<T> {
    // =========================================================================
    // Single Key
    // =========================================================================

    /// Set the value of `key`
    pub fn set(&mut self, key: &str, value: impl Into<Arg>) -> Result<()> {
        self.set_with(key, value, SetOptions::default())
    }

    /// Set the value of `key`, optionally with a time to live
    pub fn set_with(&mut self, key: &str, value: impl Into<Arg>, options: SetOptions) -> Result<()> {
        let command = match options.ttl {
            Some(ttl) => Command::new("setx").arg(key).arg(value).arg(ttl),
            None => Command::new("set").arg(key).arg(value),
        };
        self.request(command)
    }

    /// Set the value of `key` expiring after `ttl` seconds
    pub fn setx(&mut self, key: &str, value: impl Into<Arg>, ttl: i64) -> Result<()> {
        self.set_with(key, value, SetOptions::ttl(ttl))
    }

    /// Set `key` only if it does not exist yet.
    ///
    /// Returns `true` when the value was written, `false` when the key
    /// already existed.
    pub fn setnx(&mut self, key: &str, value: impl Into<Arg>) -> Result<bool> {
        self.request(Command::new("setnx").arg(key).arg(value))
    }

    /// Value of `key`; `""` when the key does not exist
    pub fn get(&mut self, key: &str) -> Result<String> {
        self.request(keyed("get", key))
    }

    /// Replace the value of `key` and return the previous one (`""` if the
    /// key did not exist)
    pub fn getset(&mut self, key: &str, value: impl Into<Arg>) -> Result<String> {
        self.request(Command::new("getset").arg(key).arg(value))
    }

    pub fn del(&mut self, key: &str) -> Result<()> {
        self.request(keyed("del", key))
    }

    pub fn exists(&mut self, key: &str) -> Result<bool> {
        self.request(keyed("exists", key))
    }

    /// Set a time to live (seconds). `false` if the key does not exist.
    pub fn expire(&mut self, key: &str, ttl: i64) -> Result<bool> {
        self.request(keyed("expire", key).arg(ttl))
    }

    /// Remaining time to live in seconds; the store answers `-1` for keys
    /// without expiry
    pub fn ttl(&mut self, key: &str) -> Result<i64> {
        self.request(keyed("ttl", key))
    }

    /// Add `delta` (may be negative) and return the new value
    pub fn incr(&mut self, key: &str, delta: i64) -> Result<i64> {
        self.request(keyed("incr", key).arg(delta))
    }

    /// Length of the value in bytes; 0 for a missing key
    pub fn strlen(&mut self, key: &str) -> Result<i64> {
        self.request(keyed("strlen", key))
    }

    /// Substring of the value.
    ///
    /// A negative `start` counts from the end. `size` defaults to the rest
    /// of the string; a negative `size` drops that many bytes from the end.
    pub fn substr(&mut self, key: &str, start: i64, size: Option<i64>) -> Result<String> {
        let mut command = keyed("substr", key).arg(start);
        if let Some(size) = size {
            command.push(size);
        }
        self.request(command)
    }

    /// Set the bit at `offset`, returning its previous value
    pub fn setbit(&mut self, key: &str, offset: i64, bit: bool) -> Result<bool> {
        self.request(keyed("setbit", key).arg(offset).arg(i64::from(bit)))
    }

    pub fn getbit(&mut self, key: &str, offset: i64) -> Result<bool> {
        self.request(keyed("getbit", key).arg(offset))
    }

    // =========================================================================
    // Typed Values
    // =========================================================================

    /// Store `value` serialized as JSON
    pub fn set_json<V: Serialize + ?Sized>(&mut self, key: &str, value: &V) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, encoded)
    }

    /// Load a JSON value; `None` when the key does not exist
    pub fn get_json<V: DeserializeOwned>(&mut self, key: &str) -> Result<Option<V>> {
        let value: Option<String> = self.request(keyed("get", key))?;
        match value {
            Some(encoded) => Ok(Some(serde_json::from_str(&encoded)?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Batch
    // =========================================================================

    /// Set several keys in one command. An empty input sends nothing.
    pub fn multi_set<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Arg>,
        V: Into<Arg>,
    {
        match flatten_pairs("multi_set", None, pairs) {
            Some(command) => self.request(command),
            None => Ok(()),
        }
    }

    /// Values of several keys. Missing keys are absent from the result.
    /// An empty key list sends nothing.
    pub fn multi_get<I, K>(&mut self, keys: I) -> Result<Pairs>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        match key_list("multi_get", None, keys) {
            Some(command) => self.request(command),
            None => Ok(Pairs::default()),
        }
    }

    pub fn multi_del<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        match key_list("multi_del", None, keys) {
            Some(command) => self.request(command),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    /// Keys in `(start, end]`
    pub fn keys(&mut self, window: &Range) -> Result<Vec<String>> {
        self.request(range(Order::Forward.keys_command(), None, window))
    }

    /// Keys in `(start, end]`, walking backwards from `start`
    pub fn rkeys(&mut self, window: &Range) -> Result<Vec<String>> {
        self.request(range(Order::Reverse.keys_command(), None, window))
    }

    /// Key-value pairs in `(start, end]`
    pub fn scan(&mut self, window: &Range) -> Result<Pairs> {
        self.request(range(Order::Forward.scan_command(), None, window))
    }

    /// Key-value pairs in `(start, end]` in reverse key order
    pub fn rscan(&mut self, window: &Range) -> Result<Pairs> {
        self.request(range(Order::Reverse.scan_command(), None, window))
    }
}
