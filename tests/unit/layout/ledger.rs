use super::*;

#[test]
fn empty_ledger_allocates_track_zero() {
    let mut ledger = OccupancyLedger::new();
    assert!(ledger.is_free(0, 0.0, 5.0));
    assert_eq!(ledger.allocate(0.0, 5.0), 0);
    assert_eq!(ledger.track_count(), 1);
}

#[test]
fn overlapping_requests_land_on_distinct_tracks() {
    let mut ledger = OccupancyLedger::new();
    let a = ledger.allocate(0.0, 5.0);
    ledger.record(a, PlacedInterval::new(0.0, 5.0));
    let b = ledger.allocate(2.0, 6.0);
    ledger.record(b, PlacedInterval::new(2.0, 6.0));
    assert_eq!(a, 0);
    assert_eq!(b, 1);
    assert!(!ledger.is_free(0, 4.0, 4.5));
    assert!(!ledger.is_free(1, 5.5, 7.0));
}

#[test]
fn touching_intervals_share_a_track() {
    let mut ledger = OccupancyLedger::new();
    ledger.record(0, PlacedInterval::new(0.0, 5.0));
    assert!(ledger.is_free(0, 5.0, 8.0));
    assert_eq!(ledger.allocate(5.0, 8.0), 0);
}

#[test]
fn allocation_prefers_lowest_free_track() {
    let mut ledger = OccupancyLedger::new();
    ledger.record(0, PlacedInterval::new(0.0, 10.0));
    ledger.record(1, PlacedInterval::new(0.0, 3.0));
    ledger.record(2, PlacedInterval::new(0.0, 1.0));
    assert_eq!(ledger.allocate(2.0, 4.0), 2);
    assert_eq!(ledger.allocate(3.0, 4.0), 1);
    assert_eq!(ledger.allocate(0.0, 0.5), 3);
    assert_eq!(ledger.track_count(), 4);
}

#[test]
fn allocation_is_deterministic_for_same_request_order() {
    let requests = [(0.0, 5.0), (2.0, 6.0), (5.0, 8.0), (1.0, 2.0), (7.0, 9.0)];
    let run = || {
        let mut ledger = OccupancyLedger::new();
        requests
            .iter()
            .map(|&(s, e)| {
                let t = ledger.allocate(s, e);
                ledger.record(t, PlacedInterval::new(s, e));
                t
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
    assert_eq!(run(), vec![0, 1, 0, 1, 1]);
}

#[test]
fn unknown_track_reports_no_intervals() {
    let ledger = OccupancyLedger::new();
    assert!(ledger.intervals(7).is_empty());
}
