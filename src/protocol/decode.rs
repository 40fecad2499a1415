//! Result decoding
//!
//! Converts the payload of an `ok` response (everything after the status
//! token) into the shape an operation expects, and supplies the value an
//! operation yields when the store answers `not_found`.
//!
//! ## Shapes
//! | Shape  | Payload            | Rust type      | not_found |
//! |--------|--------------------|----------------|-----------|
//! | unit   | anything           | `()`           | `()`      |
//! | scalar | exactly 1 element  | `String`       | `""`      |
//! | bool   | exactly 1 element  | `bool`         | `false`   |
//! | int    | exactly 1 element  | `i64`          | `0`       |
//! | list   | 0..n elements      | `Vec<String>`  | `[]`      |
//! | pairs  | k1 v1 k2 v2 ...    | [`Pairs`]      | empty     |

use std::collections::HashMap;
use std::num::ParseIntError;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Expected payload shape of an operation.
///
/// Together with [`decode`] this is the untyped entry point, for callers
/// that pick the shape at runtime. Typed operations go through
/// [`FromPayload`]; both share the same rules and not_found values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Unit,
    Scalar,
    Bool,
    Int,
    List,
    Pairs,
}

impl Shape {
    /// The value an operation of this shape yields for `not_found`
    pub fn not_found(self) -> Decoded {
        match self {
            Shape::Unit => Decoded::Unit,
            Shape::Scalar => Decoded::Scalar(String::not_found()),
            Shape::Bool => Decoded::Bool(bool::not_found()),
            Shape::Int => Decoded::Int(i64::not_found()),
            Shape::List => Decoded::List(Vec::not_found()),
            Shape::Pairs => Decoded::Pairs(Pairs::not_found()),
        }
    }
}

/// A decoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Unit,
    Scalar(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    Pairs(Pairs),
}

/// Why an `ok` payload could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected {expected} payload element(s), got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("invalid integer {value:?}: {source}")]
    Integer {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Decode a payload into a shape chosen at runtime
pub fn decode(payload: &[String], shape: Shape) -> Result<Decoded, DecodeError> {
    Ok(match shape {
        Shape::Unit => Decoded::Unit,
        Shape::Scalar => Decoded::Scalar(String::from_payload(payload)?),
        Shape::Bool => Decoded::Bool(bool::from_payload(payload)?),
        Shape::Int => Decoded::Int(i64::from_payload(payload)?),
        Shape::List => Decoded::List(Vec::from_payload(payload)?),
        Shape::Pairs => Decoded::Pairs(Pairs::from_payload(payload)?),
    })
}

/// Rust types an operation can return, with their not_found value
pub trait FromPayload: Sized {
    /// Decode the payload of an `ok` response
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError>;

    /// The value for a `not_found` response
    fn not_found() -> Self;
}

fn single(payload: &[String]) -> Result<&str, DecodeError> {
    match payload {
        [value] => Ok(value.as_str()),
        _ => Err(DecodeError::Length {
            expected: 1,
            actual: payload.len(),
        }),
    }
}

impl FromPayload for () {
    fn from_payload(_payload: &[String]) -> Result<Self, DecodeError> {
        Ok(())
    }

    fn not_found() -> Self {}
}

impl FromPayload for String {
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError> {
        single(payload).map(str::to_string)
    }

    fn not_found() -> Self {
        String::new()
    }
}

impl FromPayload for bool {
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError> {
        single(payload).map(|value| value == "1")
    }

    fn not_found() -> Self {
        false
    }
}

impl FromPayload for i64 {
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError> {
        let value = single(payload)?;
        value.parse().map_err(|source| DecodeError::Integer {
            value: value.to_string(),
            source,
        })
    }

    fn not_found() -> Self {
        0
    }
}

/// Distinguishes `not_found` (`None`) from a stored empty string
impl FromPayload for Option<String> {
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError> {
        String::from_payload(payload).map(Some)
    }

    fn not_found() -> Self {
        None
    }
}

impl FromPayload for Vec<String> {
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError> {
        Ok(payload.to_vec())
    }

    fn not_found() -> Self {
        Vec::new()
    }
}

impl FromPayload for Pairs {
    fn from_payload(payload: &[String]) -> Result<Self, DecodeError> {
        Ok(Pairs::from_flat(payload))
    }

    fn not_found() -> Self {
        Pairs::default()
    }
}

// =============================================================================
// Pairs
// =============================================================================

/// Key-value pairs in wire order.
///
/// The ordered view ([`Pairs::iter`]) and the map view ([`Pairs::to_map`])
/// come from the same entries, so they always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairs {
    entries: Vec<(String, String)>,
}

impl Pairs {
    /// Pair adjacent elements `(flat[2i], flat[2i+1])`.
    ///
    /// A trailing element without a partner is dropped.
    pub fn from_flat(flat: &[String]) -> Self {
        let chunks = flat.chunks_exact(2);
        if let [orphan] = chunks.remainder() {
            tracing::warn!(
                elements = flat.len(),
                orphan = %orphan,
                "odd number of elements in key-value payload, dropping the last one"
            );
        }
        let entries = chunks
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in wire order
    pub fn iter(&self) -> std::slice::Iter<'_, (String, String)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    /// Value for `key`; a repeated key yields its last value, as in the
    /// map view
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Map view; a repeated key keeps its last value
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.entries.into_iter().collect()
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.entries
    }

    /// Split into parallel key and value lists
    pub fn unzip(self) -> (Vec<String>, Vec<String>) {
        self.entries.into_iter().unzip()
    }
}

impl IntoIterator for Pairs {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pairs {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Pairs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// Serialized as a JSON object that keeps wire order
impl Serialize for Pairs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
