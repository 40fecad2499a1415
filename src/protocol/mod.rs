//! Protocol Module
//!
//! Defines the command/response contract with the store.
//!
//! ## Request
//! ```text
//! name  arg1  arg2  ...
//! ```
//! Positional only. Direction and ordering select a different command
//! name (`qpop_front` / `qpop_back`, `scan` / `rscan`), never an argument.
//!
//! ## Response
//! ```text
//! status  payload1  payload2  ...
//! ```
//!
//! ### Status Tokens
//! - `ok`:        success, payload follows
//! - `not_found`: key or record absent (not an error)
//! - anything else (`error`, `fail`, `client_error`, ...): failure, the
//!   payload is diagnostic text

mod command;
mod response;
mod encode;
mod decode;
mod codec;

pub use command::{Arg, Command};
pub use response::{classify, Classification, Status, STATUS_NOT_FOUND, STATUS_OK};
pub use encode::{flatten_pairs, hash_keyed, key_list, keyed, range, Direction, Order, Range};
pub use decode::{decode, DecodeError, Decoded, FromPayload, Pairs, Shape};
pub use codec::{
    encode_command, encode_response, read_packet, read_response, write_command, MAX_BLOCK_SIZE,
};
