//! Encode Tests
//!
//! Command names chosen by direction and order, and argument layout.

use ssdbkv::protocol::{
    flatten_pairs, hash_keyed, key_list, keyed, range, Arg, Command, Direction, Order, Range,
};

use super::strings;

// =============================================================================
// Direction / Order
// =============================================================================

#[test]
fn test_direction_selects_command() {
    assert_eq!(Direction::Front.push_command(), "qpush_front");
    assert_eq!(Direction::Back.push_command(), "qpush_back");
    assert_eq!(Direction::Front.pop_command(), "qpop_front");
    assert_eq!(Direction::Back.pop_command(), "qpop_back");
    assert_eq!(Direction::Front.trim_command(), "qtrim_front");
    assert_eq!(Direction::Back.trim_command(), "qtrim_back");
}

#[test]
fn test_order_selects_command() {
    assert_eq!(Order::Forward.scan_command(), "scan");
    assert_eq!(Order::Reverse.scan_command(), "rscan");
    assert_eq!(Order::Forward.keys_command(), "keys");
    assert_eq!(Order::Reverse.keys_command(), "rkeys");
    assert_eq!(Order::Reverse.hscan_command(), "hrscan");
    assert_eq!(Order::Reverse.hlist_command(), "hrlist");
    assert_eq!(Order::Reverse.qlist_command(), "qrlist");
}

#[test]
fn test_defaults() {
    assert_eq!(Order::default(), Order::Forward);
    assert_eq!(Direction::default(), Direction::Front);
}

// =============================================================================
// Argument Layout
// =============================================================================

#[test]
fn test_keyed_layouts() {
    assert_eq!(keyed("get", "k").to_strings(), strings(&["get", "k"]));
    assert_eq!(
        hash_keyed("hget", "h", "f").to_strings(),
        strings(&["hget", "h", "f"])
    );
}

#[test]
fn test_range_layout() {
    let window = Range::new("a", "z", 10);
    assert_eq!(
        range("scan", None, &window).to_strings(),
        strings(&["scan", "a", "z", "10"])
    );
    assert_eq!(
        range("hscan", Some("h"), &window).to_strings(),
        strings(&["hscan", "h", "a", "z", "10"])
    );
}

#[test]
fn test_open_range_sends_empty_bounds() {
    assert_eq!(
        range("keys", None, &Range::all(5)).to_strings(),
        strings(&["keys", "", "", "5"])
    );
}

#[test]
fn test_flatten_pairs_keeps_input_order() {
    let command = flatten_pairs("multi_set", None, vec![("b", "2"), ("a", "1")]).unwrap();
    assert_eq!(
        command.to_strings(),
        strings(&["multi_set", "b", "2", "a", "1"])
    );
}

#[test]
fn test_flatten_pairs_with_set() {
    let command = flatten_pairs("multi_hset", Some("h"), vec![("f", 1i64)]).unwrap();
    assert_eq!(command.to_strings(), strings(&["multi_hset", "h", "f", "1"]));
}

#[test]
fn test_empty_batches_produce_no_command() {
    assert!(flatten_pairs("multi_set", None, Vec::<(&str, &str)>::new()).is_none());
    assert!(flatten_pairs("multi_hset", Some("h"), Vec::<(&str, &str)>::new()).is_none());
    assert!(key_list("multi_get", None, Vec::<&str>::new()).is_none());
    assert!(key_list("multi_hget", Some("h"), Vec::<&str>::new()).is_none());
}

#[test]
fn test_key_list() {
    let command = key_list("multi_hget", Some("h"), ["a", "b"]).unwrap();
    assert_eq!(command.to_strings(), strings(&["multi_hget", "h", "a", "b"]));
}

// =============================================================================
// Command / Arg
// =============================================================================

#[test]
fn test_command_display_and_params() {
    let command = Command::new("setx").arg("k").arg("v").arg(30i64);
    assert_eq!(command.to_string(), "setx k v 30");
    assert_eq!(command.name(), "setx");
    assert_eq!(command.params(), strings(&["k", "v", "30"]));
}

#[test]
fn test_arg_wire_bytes() {
    assert_eq!(&Arg::from("abc").as_bytes()[..], b"abc");
    assert_eq!(&Arg::from(-7i64).as_bytes()[..], b"-7");
    assert_eq!(&Arg::from(u64::MAX).as_bytes()[..], i64::MAX.to_string().as_bytes());
    assert_eq!(&Arg::from(vec![1u8, 2]).as_bytes()[..], &[1u8, 2][..]);
}

#[test]
fn test_binary_arg_display() {
    assert_eq!(Arg::from(vec![0xffu8, 0xfe]).to_string(), "<2 bytes>");
}
