//! Network Module
//!
//! The transport seam between the client and a live connection.
//!
//! ## Architecture
//! - [`Transport`]: one round trip, `command -> raw response`
//! - [`TcpTransport`]: blocking, buffered TCP connection (one socket, no pool)
//! - `memory::{MemoryStore, ScriptedTransport}`: in-process implementations

mod connection;

pub use connection::TcpTransport;

use std::io;

use crate::protocol::Command;

/// A connection that can execute a single command.
///
/// Implementations own framing, timeouts and cancellation. An `Err` means
/// the round trip itself failed; the store's own status lives in element 0
/// of the `Ok` value.
pub trait Transport {
    /// Send `command` and wait for its response
    fn execute(&mut self, command: &Command) -> io::Result<Vec<String>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, command: &Command) -> io::Result<Vec<String>> {
        (**self).execute(command)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&mut self, command: &Command) -> io::Result<Vec<String>> {
        (**self).execute(command)
    }
}
