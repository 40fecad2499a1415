//! Codec Tests
//!
//! Tests for command and response framing.

use std::io::{Cursor, ErrorKind};

use ssdbkv::protocol::{
    encode_command, encode_response, read_packet, read_response, write_command, Command,
    MAX_BLOCK_SIZE,
};

use super::strings;

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_get() {
    let cmd = Command::new("get").arg("hello");
    assert_eq!(&encode_command(&cmd)[..], b"3\nget\n5\nhello\n\n");
}

#[test]
fn test_encode_integer_arguments_in_decimal() {
    let cmd = Command::new("setx").arg("k").arg("v").arg(-10i64);
    assert_eq!(&encode_command(&cmd)[..], b"4\nsetx\n1\nk\n1\nv\n3\n-10\n\n");
}

#[test]
fn test_encode_empty_argument() {
    let cmd = Command::new("set").arg("k").arg("");
    assert_eq!(&encode_command(&cmd)[..], b"3\nset\n1\nk\n0\n\n\n");
}

#[test]
fn test_encode_binary_argument() {
    let cmd = Command::new("set").arg("k").arg(vec![0u8, 0xff, b'\n']);

    let mut expected = b"3\nset\n1\nk\n3\n".to_vec();
    expected.extend_from_slice(&[0, 0xff, b'\n']);
    expected.extend_from_slice(b"\n\n");

    assert_eq!(&encode_command(&cmd)[..], &expected[..]);
}

#[test]
fn test_write_command_to_stream() {
    let mut out = Vec::new();
    write_command(&mut out, &Command::new("qsize").arg("q")).unwrap();
    assert_eq!(out, b"5\nqsize\n1\nq\n\n");
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_read_simple_response() {
    let mut reader = Cursor::new(b"2\nok\n5\nhello\n\n".to_vec());
    let response = read_response(&mut reader).unwrap();
    assert_eq!(response, strings(&["ok", "hello"]));
}

#[test]
fn test_read_response_with_empty_block() {
    let mut reader = Cursor::new(b"2\nok\n0\n\n\n".to_vec());
    let response = read_response(&mut reader).unwrap();
    assert_eq!(response, strings(&["ok", ""]));
}

#[test]
fn test_read_response_accepts_crlf() {
    let mut reader = Cursor::new(b"2\r\nok\r\n1\r\n7\r\n\r\n".to_vec());
    let response = read_response(&mut reader).unwrap();
    assert_eq!(response, strings(&["ok", "7"]));
}

#[test]
fn test_read_response_skips_leading_blank_lines() {
    let mut reader = Cursor::new(b"\n\n9\nnot_found\n\n".to_vec());
    let response = read_response(&mut reader).unwrap();
    assert_eq!(response, strings(&["not_found"]));
}

#[test]
fn test_read_consecutive_packets() {
    let mut stream = encode_response(&["ok", "1"]).to_vec();
    stream.extend_from_slice(&encode_response(&["not_found"]));
    let mut reader = Cursor::new(stream);

    assert_eq!(read_response(&mut reader).unwrap(), strings(&["ok", "1"]));
    assert_eq!(read_response(&mut reader).unwrap(), strings(&["not_found"]));
}

#[test]
fn test_block_containing_newlines() {
    let mut reader = Cursor::new(encode_response(&["ok", "a\nb\n"]).to_vec());
    let response = read_response(&mut reader).unwrap();
    assert_eq!(response[1], "a\nb\n");
}

#[test]
fn test_read_packet_keeps_raw_bytes() {
    let mut reader = Cursor::new(b"2\nok\n2\n\xff\x00\n\n".to_vec());
    let blocks = read_packet(&mut reader).unwrap();
    assert_eq!(blocks, vec![b"ok".to_vec(), vec![0xff, 0x00]]);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_eof_before_packet() {
    let mut reader = Cursor::new(Vec::new());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn test_eof_inside_packet() {
    let mut reader = Cursor::new(b"2\nok\n5\nhel".to_vec());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn test_eof_before_terminating_line() {
    let mut reader = Cursor::new(b"2\nok\n".to_vec());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn test_bad_block_header() {
    let mut reader = Cursor::new(b"abc\nok\n\n".to_vec());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_block_too_large() {
    let header = format!("{}\n", MAX_BLOCK_SIZE + 1);
    let mut reader = Cursor::new(header.into_bytes());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_block_length_mismatch() {
    // header says 2 bytes but 3 follow before the newline
    let mut reader = Cursor::new(b"2\nokk\n\n".to_vec());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_invalid_utf8_response() {
    let mut reader = Cursor::new(b"2\nok\n1\n\xff\n\n".to_vec());
    let err = read_response(&mut reader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}
