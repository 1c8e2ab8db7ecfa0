//! Tests for the single-slot matchmaking queue.

use quickmatch::{ConnId, Enqueue, Matchmaker};

fn conn(id: u64) -> ConnId {
    ConnId::from(id)
}

#[test]
fn test_first_enqueue_waits() {
    let mut queue = Matchmaker::new();
    assert_eq!(queue.enqueue(conn(1)), Enqueue::Waiting);
    assert_eq!(queue.waiting(), Some(conn(1)));
}

#[test]
fn test_duplicate_enqueue_is_noop() {
    let mut queue = Matchmaker::new();
    queue.enqueue(conn(1));
    assert_eq!(queue.enqueue(conn(1)), Enqueue::AlreadyWaiting);
    assert_eq!(queue.waiting(), Some(conn(1)));
}

#[test]
fn test_second_enqueue_pairs_in_order() {
    let mut queue = Matchmaker::new();
    queue.enqueue(conn(1));
    let Enqueue::Paired(pairing) = queue.enqueue(conn(2)) else {
        panic!("Expected a pairing");
    };
    // The waiter is always first; the requester second.
    assert_eq!(pairing.first, conn(1));
    assert_eq!(pairing.second, conn(2));
    assert_eq!(queue.waiting(), None);
}

#[test]
fn test_cancel_clears_only_the_occupant() {
    let mut queue = Matchmaker::new();
    queue.enqueue(conn(1));

    assert!(!queue.cancel(conn(2)));
    assert_eq!(queue.waiting(), Some(conn(1)));

    assert!(queue.cancel(conn(1)));
    assert_eq!(queue.waiting(), None);

    // Cancel on an empty slot is a no-op.
    assert!(!queue.cancel(conn(1)));
}

#[test]
fn test_keys_are_unique_across_repeat_pairings() {
    let mut queue = Matchmaker::new();
    queue.enqueue(conn(1));
    let Enqueue::Paired(first) = queue.enqueue(conn(2)) else {
        panic!("Expected a pairing");
    };

    // Same two identifiers pairing again (reconnect/rematch cycle) must
    // never reuse the earlier key.
    queue.enqueue(conn(1));
    let Enqueue::Paired(second) = queue.enqueue(conn(2)) else {
        panic!("Expected a pairing");
    };
    assert_ne!(first.key, second.key);
}

#[test]
fn test_slot_reopens_after_pairing() {
    let mut queue = Matchmaker::new();
    queue.enqueue(conn(1));
    queue.enqueue(conn(2));
    assert_eq!(queue.enqueue(conn(3)), Enqueue::Waiting);
    assert_eq!(queue.waiting(), Some(conn(3)));
}
