//! Memory Module
//!
//! In-process transports.
//!
//! - [`MemoryStore`]: a working store kept in memory; behaves like the real
//!   peer for every command the client issues
//! - [`ScriptedTransport`]: canned replies and failures, records what was sent

mod store;
mod scripted;

pub use store::MemoryStore;
pub use scripted::ScriptedTransport;
