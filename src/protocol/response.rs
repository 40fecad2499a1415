//! Response classification
//!
//! Every store response is `[status, payload...]`. Only the status token is
//! inspected here; payload conversion lives in `decode`.

/// Status token of a successful response
pub const STATUS_OK: &str = "ok";

/// Status token of a response for an absent key or record
pub const STATUS_NOT_FOUND: &str = "not_found";

/// Response status classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

impl Status {
    /// Classify a single status token
    pub fn from_token(token: &str) -> Self {
        match token {
            STATUS_OK => Status::Ok,
            STATUS_NOT_FOUND => Status::NotFound,
            _ => Status::Error,
        }
    }
}

/// Outcome of a raw response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// `ok`; carries the payload (everything after the status token)
    Success(&'a [String]),

    /// `not_found`; not an error
    NotFound,

    /// Any other token, or an empty response
    ProtocolError,
}

/// Classify a raw response by its status token
pub fn classify(raw: &[String]) -> Classification<'_> {
    match raw.split_first() {
        None => Classification::ProtocolError,
        Some((status, payload)) => match Status::from_token(status) {
            Status::Ok => Classification::Success(payload),
            Status::NotFound => Classification::NotFound,
            Status::Error => Classification::ProtocolError,
        },
    }
}
