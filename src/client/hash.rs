//! Hashmap operations
//!
//! A hashmap is a named set of key-value pairs. Every command takes the
//! hashmap name first: `name set key [value]`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::network::Transport;
use crate::protocol::{
    flatten_pairs, hash_keyed, key_list, keyed, range, Arg, Order, Pairs, Range,
};

use super::Client;

impl<T: Transport> Client<T> {
    // =========================================================================
    // Single Field
    // =========================================================================

    pub fn hset(&mut self, set: &str, key: &str, value: impl Into<Arg>) -> Result<()> {
        self.request(hash_keyed("hset", set, key).arg(value))
    }

    /// Value of `key` in hashmap `set`; `""` when absent
    pub fn hget(&mut self, set: &str, key: &str) -> Result<String> {
        self.request(hash_keyed("hget", set, key))
    }

    /// Delete a field. Whether it existed is not reported.
    pub fn hdel(&mut self, set: &str, key: &str) -> Result<()> {
        self.request(hash_keyed("hdel", set, key))
    }

    pub fn hexists(&mut self, set: &str, key: &str) -> Result<bool> {
        self.request(hash_keyed("hexists", set, key))
    }

    /// Add `delta` to a field and return the new value
    pub fn hincr(&mut self, set: &str, key: &str, delta: i64) -> Result<i64> {
        self.request(hash_keyed("hincr", set, key).arg(delta))
    }

    /// Store `value` serialized as JSON in a field
    pub fn hset_json<V: Serialize + ?Sized>(&mut self, set: &str, key: &str, value: &V) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.hset(set, key, encoded)
    }

    /// Load a JSON field; `None` when absent
    pub fn hget_json<V: DeserializeOwned>(&mut self, set: &str, key: &str) -> Result<Option<V>> {
        let value: Option<String> = self.request(hash_keyed("hget", set, key))?;
        match value {
            Some(encoded) => Ok(Some(serde_json::from_str(&encoded)?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Whole Hashmap
    // =========================================================================

    /// Remove every field, returning how many were removed
    pub fn hclear(&mut self, set: &str) -> Result<i64> {
        self.request(keyed("hclear", set))
    }

    /// Number of fields; 0 for a missing hashmap
    pub fn hsize(&mut self, set: &str) -> Result<i64> {
        self.request(keyed("hsize", set))
    }

    /// Every field of the hashmap in key order
    pub fn hgetall(&mut self, set: &str) -> Result<Pairs> {
        self.request(keyed("hgetall", set))
    }

    // =========================================================================
    // Batch
    // =========================================================================

    /// Set several fields in one command. An empty input sends nothing.
    pub fn multi_hset<I, K, V>(&mut self, set: &str, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Arg>,
        V: Into<Arg>,
    {
        match flatten_pairs("multi_hset", Some(set), pairs) {
            Some(command) => self.request(command),
            None => Ok(()),
        }
    }

    /// Values of several fields. Missing fields are absent from the result.
    pub fn multi_hget<I, K>(&mut self, set: &str, keys: I) -> Result<Pairs>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        match key_list("multi_hget", Some(set), keys) {
            Some(command) => self.request(command),
            None => Ok(Pairs::default()),
        }
    }

    pub fn multi_hdel<I, K>(&mut self, set: &str, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        match key_list("multi_hdel", Some(set), keys) {
            Some(command) => self.request(command),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    /// Fields of `set` with keys in `(start, end]`
    pub fn hscan(&mut self, set: &str, window: &Range, order: Order) -> Result<Pairs> {
        self.request(range(order.hscan_command(), Some(set), window))
    }

    /// Same as `hscan(set, window, Order::Reverse)`
    pub fn hrscan(&mut self, set: &str, window: &Range) -> Result<Pairs> {
        self.hscan(set, window, Order::Reverse)
    }

    /// Field names of `set` in `(start, end]`
    pub fn hkeys(&mut self, set: &str, window: &Range) -> Result<Vec<String>> {
        self.request(range("hkeys", Some(set), window))
    }

    /// Names of hashmaps in `(start, end]`
    pub fn hlist(&mut self, window: &Range) -> Result<Vec<String>> {
        self.request(range(Order::Forward.hlist_command(), None, window))
    }

    pub fn hrlist(&mut self, window: &Range) -> Result<Vec<String>> {
        self.request(range(Order::Reverse.hlist_command(), None, window))
    }
}
