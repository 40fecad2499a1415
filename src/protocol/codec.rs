//! Protocol codec
//!
//! Encoding and decoding functions for the wire framing.
//!
//! ## Wire Format
//!
//! A packet is a sequence of blocks followed by an empty line. Requests and
//! responses share the framing.
//!
//! ```text
//! ┌──────────────┬────┬──────────────────┬────┐
//! │ len (ASCII)  │ \n │   len bytes      │ \n │   block 1
//! ├──────────────┼────┼──────────────────┼────┤
//! │     ...      │    │                  │    │   block N
//! ├──────────────┴────┴──────────────────┴────┤
//! │ \n                                        │   end of packet
//! └───────────────────────────────────────────┘
//! ```
//!
//! `\r\n` line endings are accepted on receive.

use std::io::{self, BufRead, Write};

use bytes::{BufMut, BytesMut};

use super::Command;

/// Maximum block size (16 MB)
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

fn put_block(buf: &mut BytesMut, block: &[u8]) {
    buf.put_slice(block.len().to_string().as_bytes());
    buf.put_u8(b'\n');
    buf.put_slice(block);
    buf.put_u8(b'\n');
}

/// Encode a command as one packet
pub fn encode_command(command: &Command) -> BytesMut {
    let mut buf = BytesMut::with_capacity(64);
    put_block(&mut buf, command.name().as_bytes());
    for arg in command.args() {
        put_block(&mut buf, &arg.as_bytes());
    }
    buf.put_u8(b'\n');
    buf
}

/// Encode a response as one packet
pub fn encode_response<S: AsRef<str>>(response: &[S]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(64);
    for block in response {
        put_block(&mut buf, block.as_ref().as_bytes());
    }
    buf.put_u8(b'\n');
    buf
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> io::Result<()> {
    writer.write_all(&encode_command(command))?;
    writer.flush()
}

// =============================================================================
// Response Decoding
// =============================================================================

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Read one packet from a stream
///
/// Blocks until a complete packet is received or an error occurs. A stream
/// that ends before the packet is complete yields `UnexpectedEof`.
pub fn read_packet<R: BufRead>(reader: &mut R) -> io::Result<Vec<Vec<u8>>> {
    let mut blocks = Vec::new();
    let mut line = Vec::with_capacity(16);

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed while reading response",
            ));
        }

        let header = trim_line_end(&line);
        if header.is_empty() {
            // blank lines before the first block are keep-alive noise
            if blocks.is_empty() {
                continue;
            }
            return Ok(blocks);
        }

        let len = std::str::from_utf8(header)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .ok_or_else(|| {
                invalid(format!(
                    "bad block header: {:?}",
                    String::from_utf8_lossy(header)
                ))
            })?;

        if len > MAX_BLOCK_SIZE {
            return Err(invalid(format!(
                "block too large: {} bytes (max {})",
                len, MAX_BLOCK_SIZE
            )));
        }

        let mut block = vec![0u8; len];
        reader.read_exact(&mut block)?;

        line.clear();
        reader.read_until(b'\n', &mut line)?;
        if !trim_line_end(&line).is_empty() {
            return Err(invalid("block not terminated by a newline".to_string()));
        }

        blocks.push(block);
    }
}

/// Read one response packet and decode every block as UTF-8 text
pub fn read_response<R: BufRead>(reader: &mut R) -> io::Result<Vec<String>> {
    read_packet(reader)?
        .into_iter()
        .map(|block| {
            String::from_utf8(block)
                .map_err(|e| invalid(format!("response block is not valid UTF-8: {}", e)))
        })
        .collect()
}
