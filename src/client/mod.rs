//! Client Module
//!
//! Typed operations over a [`Transport`].
//!
//! ## Request Path
//! Every operation is one round trip through [`Client::request`]:
//!
//! ```text
//! encode ──► Transport::execute ──► classify ──┬─ ok ─────────► decode
//!                    │                         ├─ not_found ──► empty value
//!                    ▼                         └─ other ──────► Protocol error
//!             Transport error
//! ```
//!
//! The `not_found` policy is applied here and nowhere else: the expected
//! result type supplies its own empty value ([`FromPayload::not_found`]).
//!
//! Operations are grouped by store family in `kv`, `hash` and `queue`.

mod kv;
mod hash;
mod queue;

pub use kv::SetOptions;

use crate::config::Config;
use crate::error::{Result, SsdbError};
use crate::network::{TcpTransport, Transport};
use crate::protocol::{classify, Classification, Command, DecodeError, FromPayload};

/// Typed client over a single connection.
///
/// Holds nothing but the transport; all methods are one round trip and no
/// state survives between calls.
pub struct Client<T> {
    transport: T,
}

impl Client<TcpTransport> {
    /// Open a TCP connection and authenticate once if a password is set
    pub fn connect(config: &Config) -> Result<Self> {
        let transport = TcpTransport::connect(config)?;
        let mut client = Client::new(transport);

        if let Some(password) = config.auth_password() {
            if let Err(e) = client.auth(password) {
                if let Err(close_err) = client.transport.shutdown() {
                    tracing::debug!("Closing after failed auth: {}", close_err);
                }
                return Err(e);
            }
        }

        Ok(client)
    }

    /// Close the connection
    pub fn close(self) -> Result<()> {
        self.transport.shutdown()
    }
}

impl<T: Transport> Client<T> {
    /// Wrap a connection
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Hand the connection back
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Execute one command and decode its payload into `R`.
    ///
    /// `not_found` yields `R::not_found()`. Transport failures, unknown
    /// status tokens and undecodable payloads are errors.
    pub fn request<R: FromPayload>(&mut self, command: Command) -> Result<R> {
        tracing::trace!("Executing {}", command);

        let raw = self
            .transport
            .execute(&command)
            .map_err(|source| SsdbError::Transport {
                command: command.name().to_string(),
                source,
            })?;

        match classify(&raw) {
            Classification::Success(payload) => {
                R::from_payload(payload).map_err(|e| decode_failure(&command, &raw, e))
            }
            Classification::NotFound => Ok(R::not_found()),
            Classification::ProtocolError => Err(protocol_failure(&command, &raw)),
        }
    }

    /// Authenticate the connection
    ///
    /// Normally called once by [`Client::connect`]; exposed for transports
    /// built by hand.
    pub fn auth(&mut self, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(SsdbError::Auth("empty password".to_string()));
        }

        let command = Command::new("auth").arg(password);
        let raw = self
            .transport
            .execute(&command)
            .map_err(|source| SsdbError::Transport {
                command: command.name().to_string(),
                source,
            })?;

        match classify(&raw) {
            Classification::Success(_) => {
                tracing::debug!("Authenticated");
                Ok(())
            }
            _ => Err(SsdbError::Auth(format!(
                "password rejected, store answered {:?}",
                raw
            ))),
        }
    }
}

fn protocol_failure(command: &Command, raw: &[String]) -> SsdbError {
    let status = raw.first().cloned().unwrap_or_default();
    tracing::warn!("{} failed with status {:?}", command.name(), status);
    SsdbError::Protocol {
        command: command.name().to_string(),
        status,
        params: command.params(),
        response: raw.to_vec(),
    }
}

fn decode_failure(command: &Command, raw: &[String], error: DecodeError) -> SsdbError {
    match error {
        DecodeError::Length { .. } => SsdbError::MalformedResponse {
            command: command.name().to_string(),
            reason: error.to_string(),
            response: raw.to_vec(),
        },
        DecodeError::Integer { value, source } => SsdbError::Decode {
            command: command.name().to_string(),
            value,
            source,
        },
    }
}
