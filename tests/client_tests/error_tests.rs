//! Error Classification Tests
//!
//! Transport failures, store error statuses and malformed payloads must
//! each surface as a distinct error, never as an empty value.

use std::io::ErrorKind;

use ssdbkv::memory::{MemoryStore, ScriptedTransport};
use ssdbkv::{Client, Range, SsdbError};

use super::{sent, setup_scripted, strings};

// =============================================================================
// Transport Failures
// =============================================================================

#[test]
fn test_transport_failure_is_not_an_empty_value() {
    let mut client = Client::new(ScriptedTransport::new().fail(ErrorKind::ConnectionReset));

    let err = client.get("k").unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_protocol());

    match err {
        SsdbError::Transport { command, source } => {
            assert_eq!(command, "get");
            assert_eq!(source.kind(), ErrorKind::ConnectionReset);
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[test]
fn test_transport_failure_for_every_shape() {
    let mut client = Client::new(ScriptedTransport::new());

    // the script is empty, so every call fails with UnexpectedEof
    assert!(client.set("k", "v").unwrap_err().is_transport());
    assert!(client.exists("k").unwrap_err().is_transport());
    assert!(client.qsize("q").unwrap_err().is_transport());
    assert!(client.keys(&Range::all(10)).unwrap_err().is_transport());
    assert!(client.hgetall("h").unwrap_err().is_transport());
}

// =============================================================================
// Store Errors
// =============================================================================

#[test]
fn test_error_status() {
    let mut client = setup_scripted(&[&["error", "disk full"]]);

    match client.set("k", "v").unwrap_err() {
        SsdbError::Protocol {
            command,
            status,
            params,
            response,
        } => {
            assert_eq!(command, "set");
            assert_eq!(status, "error");
            assert_eq!(params, strings(&["k", "v"]));
            assert_eq!(response, strings(&["error", "disk full"]));
        }
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[test]
fn test_error_message_names_command_and_params() {
    let mut client = setup_scripted(&[&["fail"]]);

    let message = client.hget("h", "f").unwrap_err().to_string();
    assert!(message.contains("hget"), "{}", message);
    assert!(message.contains("\"h\""), "{}", message);
    assert!(message.contains("fail"), "{}", message);
}

#[test]
fn test_empty_response_is_protocol_error() {
    let mut client = setup_scripted(&[&[]]);

    match client.get("k").unwrap_err() {
        SsdbError::Protocol { status, .. } => assert_eq!(status, ""),
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[test]
fn test_unknown_command_from_store() {
    let mut client = Client::new(MemoryStore::new());

    let err = client
        .request::<()>(ssdbkv::protocol::Command::new("flushall"))
        .unwrap_err();

    match err {
        SsdbError::Protocol { status, response, .. } => {
            assert_eq!(status, "client_error");
            assert_eq!(response[1], "Unknown Command: flushall");
        }
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

// =============================================================================
// Malformed Payloads
// =============================================================================

#[test]
fn test_ok_without_value_is_malformed() {
    let mut client = setup_scripted(&[&["ok"]]);

    let err = client.get("k").unwrap_err();
    assert!(err.is_protocol());
    assert!(matches!(err, SsdbError::MalformedResponse { ref command, .. } if command == "get"));
}

#[test]
fn test_ok_with_extra_values_is_malformed() {
    let mut client = setup_scripted(&[&["ok", "a", "b"]]);
    assert!(matches!(
        client.get("k").unwrap_err(),
        SsdbError::MalformedResponse { .. }
    ));
}

#[test]
fn test_non_integer_count_is_decode_error() {
    let mut client = setup_scripted(&[&["ok", "many"]]);

    match client.qsize("q").unwrap_err() {
        SsdbError::Decode { command, value, .. } => {
            assert_eq!(command, "qsize");
            assert_eq!(value, "many");
        }
        other => panic!("Expected decode error, got {:?}", other),
    }
}

#[test]
fn test_odd_pair_payload_keeps_complete_pairs() {
    let mut client = setup_scripted(&[&["ok", "a", "1", "b"]]);

    let pairs = client.scan(&Range::all(10)).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs.get("a"), Some("1"));
}

// =============================================================================
// not_found Handling
// =============================================================================

#[test]
fn test_not_found_yields_empty_values() {
    let mut client = setup_scripted(&[
        &["not_found"],
        &["not_found"],
        &["not_found"],
        &["not_found"],
        &["not_found"],
        &["not_found"],
    ]);

    assert_eq!(client.get("k").unwrap(), "");
    assert!(!client.exists("k").unwrap());
    assert_eq!(client.ttl("k").unwrap(), 0);
    assert!(client.keys(&Range::all(10)).unwrap().is_empty());
    assert!(client.hgetall("h").unwrap().is_empty());
    client.del("k").unwrap();

    assert_eq!(client.transport().pending(), 0);
}

// =============================================================================
// Authentication
// =============================================================================

#[test]
fn test_commands_rejected_before_auth() {
    let mut client = Client::new(MemoryStore::with_password("secret"));

    match client.get("k").unwrap_err() {
        SsdbError::Protocol { status, .. } => assert_eq!(status, "noauth"),
        other => panic!("Expected protocol error, got {:?}", other),
    }

    client.auth("secret").unwrap();
    client.set("k", "v").unwrap();
    assert_eq!(client.get("k").unwrap(), "v");
}

#[test]
fn test_wrong_password() {
    let mut client = Client::new(MemoryStore::with_password("secret"));
    assert!(matches!(client.auth("guess"), Err(SsdbError::Auth(_))));
}

#[test]
fn test_empty_password_sends_nothing() {
    let mut client = setup_scripted(&[]);

    assert!(matches!(client.auth(""), Err(SsdbError::Auth(_))));
    assert!(sent(&client).is_empty());
}

#[test]
fn test_auth_command_layout() {
    let mut client = setup_scripted(&[&["ok", "1"]]);

    client.auth("pw").unwrap();
    assert_eq!(sent(&client), vec![strings(&["auth", "pw"])]);
}
