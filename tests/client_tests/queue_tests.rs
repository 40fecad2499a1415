//! Queue Tests
//!
//! Tests verify:
//! - Push/pop at both ends
//! - Trimming, slicing and indexed access
//! - Empty queues answer with empty values

use ssdbkv::{Direction, Range, SsdbError};

use super::{setup_client, strings};

// =============================================================================
// Push / Pop Tests
// =============================================================================

#[test]
fn test_push_back_pop_front_is_fifo() {
    let mut client = setup_client();

    assert_eq!(client.qpush_back("q", ["a", "b", "c"]).unwrap(), 3);

    assert_eq!(client.qpop_front("q").unwrap(), "a");
    assert_eq!(client.qpop_front("q").unwrap(), "b");
    assert_eq!(client.qsize("q").unwrap(), 1);
}

#[test]
fn test_push_and_pop_same_end() {
    let mut client = setup_client();

    for direction in [Direction::Front, Direction::Back] {
        client.qpush("q", ["base"], Direction::Back).unwrap();
        client.qpush("q", ["top"], direction).unwrap();
        assert_eq!(client.qpop("q", direction).unwrap(), "top");
        client.qclear("q").unwrap();
    }
}

#[test]
fn test_push_onto_empty_queue_from_either_end() {
    let mut client = setup_client();

    for direction in [Direction::Front, Direction::Back] {
        client.qclear("q").unwrap();

        assert_eq!(client.qpush("q", ["only"], direction).unwrap(), 1);
        assert_eq!(client.qpop("q", direction).unwrap(), "only");
        assert_eq!(client.qsize("q").unwrap(), 0);
    }
}

#[test]
fn test_push_front_reverses_batch() {
    let mut client = setup_client();

    client.qpush_front("q", ["1", "2", "3"]).unwrap();
    assert_eq!(client.qslice("q", 0, -1).unwrap(), strings(&["3", "2", "1"]));
}

#[test]
fn test_pop_back() {
    let mut client = setup_client();

    client.qpush_back("q", ["a", "b"]).unwrap();
    assert_eq!(client.qpop_back("q").unwrap(), "b");
    assert_eq!(client.qback("q").unwrap(), "a");
}

#[test]
fn test_pop_empty_queue_is_empty_string() {
    let mut client = setup_client();

    assert_eq!(client.qpop_front("q").unwrap(), "");
    assert_eq!(client.qpop_back("q").unwrap(), "");
}

#[test]
fn test_qpop_many() {
    let mut client = setup_client();

    client.qpush_back("q", ["a", "b", "c", "d"]).unwrap();

    assert_eq!(
        client.qpop_many("q", 2, Direction::Front).unwrap(),
        strings(&["a", "b"])
    );
    assert_eq!(
        client.qpop_many("q", 5, Direction::Back).unwrap(),
        strings(&["d", "c"])
    );
    assert!(client.qpop_many("q", 1, Direction::Front).unwrap().is_empty());
}

#[test]
fn test_push_mixed_value_types() {
    let mut client = setup_client();

    client.qpush_back("q", vec![1i64, 2, 3]).unwrap();
    assert_eq!(client.qslice("q", 0, -1).unwrap(), strings(&["1", "2", "3"]));
}

// =============================================================================
// Size / Trim Tests
// =============================================================================

#[test]
fn test_qsize_missing_queue() {
    let mut client = setup_client();
    assert_eq!(client.qsize("nothing").unwrap(), 0);
}

#[test]
fn test_qtrim() {
    let mut client = setup_client();
    client.qpush_back("q", ["1", "2", "3", "4", "5"]).unwrap();

    assert_eq!(client.qtrim_front("q", 2).unwrap(), 2);
    assert_eq!(client.qtrim_back("q", 1).unwrap(), 1);
    assert_eq!(client.qslice("q", 0, -1).unwrap(), strings(&["3", "4"]));

    assert_eq!(client.qtrim("q", 10, Direction::Back).unwrap(), 2);
    assert_eq!(client.qsize("q").unwrap(), 0);
}

#[test]
fn test_qclear() {
    let mut client = setup_client();
    client.qpush_back("q", ["1", "2"]).unwrap();

    client.qclear("q").unwrap();
    assert_eq!(client.qsize("q").unwrap(), 0);
}

// =============================================================================
// Window Tests
// =============================================================================

#[test]
fn test_qslice() {
    let mut client = setup_client();
    client.qpush_back("q", ["a", "b", "c", "d"]).unwrap();

    assert_eq!(client.qslice("q", 1, 2).unwrap(), strings(&["b", "c"]));
    assert_eq!(client.qslice("q", -2, -1).unwrap(), strings(&["c", "d"]));
    assert_eq!(client.qslice("q", 2, 100).unwrap(), strings(&["c", "d"]));
    assert!(client.qslice("q", 3, 1).unwrap().is_empty());
    assert!(client.qslice("missing", 0, -1).unwrap().is_empty());
}

#[test]
fn test_qrange() {
    let mut client = setup_client();
    client.qpush_back("q", ["a", "b", "c", "d"]).unwrap();

    assert_eq!(client.qrange("q", 1, 2).unwrap(), strings(&["b", "c"]));
    assert_eq!(client.qrange("q", -1, 10).unwrap(), strings(&["d"]));
    assert!(client.qrange("q", 0, 0).unwrap().is_empty());
}

// =============================================================================
// Indexed Access Tests
// =============================================================================

#[test]
fn test_qget() {
    let mut client = setup_client();
    client.qpush_back("q", ["a", "b", "c"]).unwrap();

    assert_eq!(client.qget("q", 0).unwrap(), "a");
    assert_eq!(client.qget("q", -1).unwrap(), "c");
    assert_eq!(client.qget("q", 3).unwrap(), "");
}

#[test]
fn test_qset() {
    let mut client = setup_client();
    client.qpush_back("q", ["a", "b", "c"]).unwrap();

    client.qset("q", 1, "B").unwrap();
    client.qset("q", -1, "C").unwrap();
    assert_eq!(client.qslice("q", 0, -1).unwrap(), strings(&["a", "B", "C"]));
}

#[test]
fn test_qset_out_of_range_is_protocol_error() {
    let mut client = setup_client();
    client.qpush_back("q", ["a"]).unwrap();

    match client.qset("q", 5, "x").unwrap_err() {
        SsdbError::Protocol { command, status, params, .. } => {
            assert_eq!(command, "qset");
            assert_eq!(status, "error");
            assert_eq!(params, strings(&["q", "5", "x"]));
        }
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[test]
fn test_qfront_and_qback() {
    let mut client = setup_client();

    assert_eq!(client.qfront("q").unwrap(), "");

    client.qpush_back("q", ["first", "last"]).unwrap();
    assert_eq!(client.qfront("q").unwrap(), "first");
    assert_eq!(client.qback("q").unwrap(), "last");
}

// =============================================================================
// Name Listing Tests
// =============================================================================

#[test]
fn test_qlist_and_qrlist() {
    let mut client = setup_client();

    for name in ["q1", "q2", "q3"] {
        client.qpush_back(name, ["x"]).unwrap();
    }

    assert_eq!(
        client.qlist(&Range::new("q1", "", 10)).unwrap(),
        strings(&["q2", "q3"])
    );
    assert_eq!(
        client.qrlist(&Range::all(2)).unwrap(),
        strings(&["q3", "q2"])
    );
}

#[test]
fn test_drained_queue_leaves_listing() {
    let mut client = setup_client();

    client.qpush_back("q", ["only"]).unwrap();
    client.qpop_front("q").unwrap();

    assert!(client.qlist(&Range::all(10)).unwrap().is_empty());
}
