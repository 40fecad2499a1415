//! # ssdbkv
//!
//! A strongly-typed client for SSDB-style key-value stores:
//! - Scalar keys with ttl, counters, bit and substring access
//! - Hashmaps and queues/lists
//! - Range scans over `(start, end]` windows, forward or reverse
//! - Batch reads and writes in a single command
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Client<T: Transport>                    │
//! │            (kv / hash / queue operation methods)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Command (name + positional args)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Transport::execute                          │
//! │   TcpTransport │ MemoryStore │ ScriptedTransport │ custom   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  [status, payload...]
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  classify   │  ──ok──► │   decode    │
//!   │ (status)    │          │  (shape)    │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! A `not_found` status is never an error: string operations return `""`,
//! boolean ones `false`, counters `0` and listings an empty collection.
//!
//! ```no_run
//! use ssdbkv::{Client, Config};
//!
//! # fn main() -> ssdbkv::Result<()> {
//! let config = Config::builder().addr("127.0.0.1:8888").build();
//! let mut client = Client::connect(&config)?;
//! client.set("greeting", "hello")?;
//! assert_eq!(client.get("greeting")?, "hello");
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod memory;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SsdbError};
pub use config::Config;
pub use client::{Client, SetOptions};
pub use network::{TcpTransport, Transport};
pub use protocol::{Direction, Order, Pairs, Range};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ssdbkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
