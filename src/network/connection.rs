//! TCP Transport
//!
//! A single blocking connection to the store.

use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{Result, SsdbError};
use crate::protocol::{read_response, write_command, Command};

use super::Transport;

/// Blocking TCP connection to the store
pub struct TcpTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Set once a round trip fails; the stream may hold part of a reply
    broken: bool,
}

impl TcpTransport {
    /// Connect to `config.addr`, trying every resolved address in turn
    ///
    /// Applies the configured connect/read/write timeouts.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let addrs: Vec<SocketAddr> = config.addr.to_socket_addrs()?.collect();
        if addrs.is_empty() {
            return Err(SsdbError::Config(format!(
                "address {} did not resolve",
                config.addr
            )));
        }

        let mut last_err = None;
        for addr in addrs {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => return Self::from_stream(stream, config),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(SsdbError::Io(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "no address to connect to")
        })))
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let read_stream = stream.try_clone()?;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            peer_addr,
            broken: false,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// True after a failed round trip. A broken transport refuses every
    /// further command with `NotConnected`.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn round_trip(&mut self, command: &Command) -> io::Result<Vec<String>> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }

    /// Close both halves of the socket
    pub fn shutdown(&self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // already closed by the peer
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Transport for TcpTransport {
    fn execute(&mut self, command: &Command) -> io::Result<Vec<String>> {
        if self.broken {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "connection closed after an earlier failure",
            ));
        }

        tracing::trace!("Sending to {}: {}", self.peer_addr, command.name());
        let response = match self.round_trip(command) {
            Ok(response) => response,
            Err(e) => {
                // a late or partial reply would be read as the next answer
                self.broken = true;
                tracing::warn!(
                    "{} to {} failed, closing connection: {}",
                    command.name(),
                    self.peer_addr,
                    e
                );
                if let Err(close_err) = self.shutdown() {
                    tracing::debug!("Closing broken connection: {}", close_err);
                }
                return Err(e);
            }
        };
        tracing::trace!(
            "Received from {}: {} block(s)",
            self.peer_addr,
            response.len()
        );
        Ok(response)
    }
}
