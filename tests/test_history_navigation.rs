// ABOUTME: Property-style tests for visit recording and history rotation
// Exercises the ordering guarantees over histories of varying length

use pretty_assertions::assert_eq;
use tmux_nav::session::{History, HistoryError};

fn history_of(len: usize) -> History {
    History::from((0..len).map(|i| format!("/srv/p{i}")).collect::<Vec<_>>())
}

#[test]
fn test_record_visit_never_duplicates() {
    for len in 0..6 {
        for target in ["/srv/p0", "/srv/p3", "/srv/new"] {
            let mut h = history_of(len);
            h.record_visit(target);
            assert_eq!(h.iter().filter(|e| e.as_str() == target).count(), 1);
            assert_eq!(h.current(), Some(target));
        }
    }
}

#[test]
fn test_record_visit_keeps_relative_order_of_others() {
    let mut h = history_of(5);
    h.record_visit("/srv/p2");
    let expected: Vec<String> = ["/srv/p0", "/srv/p1", "/srv/p3", "/srv/p4", "/srv/p2"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(h.as_slice(), expected.as_slice());
}

#[test]
fn test_record_visit_twice_equals_once() {
    for len in 0..6 {
        let mut once = history_of(len);
        once.record_visit("/srv/p1");
        let mut twice = once.clone();
        twice.record_visit("/srv/p1");
        assert_eq!(once, twice);
    }
}

#[test]
fn test_prev_then_next_restores_history() {
    for len in 1..8 {
        let original = history_of(len);
        let mut h = original.clone();
        h.rotate_prev().unwrap();
        h.rotate_next().unwrap();
        assert_eq!(h, original);
    }
}

#[test]
fn test_full_cycle_of_prev_visits_every_session() {
    let mut h = history_of(4);
    let mut targets: Vec<String> = (0..4).map(|_| h.rotate_prev().unwrap()).collect();
    assert_eq!(h, history_of(4));
    targets.sort();
    assert_eq!(targets, history_of(4).as_slice().to_vec());
}

#[test]
fn test_rotation_of_empty_history_is_an_error() {
    let mut h = History::new();
    assert_eq!(h.rotate_prev(), Err(HistoryError::Empty));
    assert_eq!(h.rotate_next(), Err(HistoryError::Empty));
    assert!(h.is_empty());
}
