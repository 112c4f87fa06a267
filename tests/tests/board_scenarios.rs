//! End-to-end board scenarios driven through the public API.

use whisper_store::{ErrorKind, MessageBoardApi, StoreError};
use whisperwall_tests::{default_store, fast_store};

const HOUR_MS: u64 = 3_600_000;
const DAY_MS: u64 = 86_400_000;

#[test]
fn posted_message_is_visible_until_retention_elapses() {
    let store = default_store();
    store.post("client-a", "hello", 40.0, -73.0, 0).unwrap();

    // One hour later, a 1 km query at the same point finds it.
    let got = store.query(40.0, -73.0, Some(1_000.0), None, HOUR_MS).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].message, "hello");
    assert_eq!(got[0].lat, 40.0);
    assert_eq!(got[0].lng, -73.0);

    // 25 hours later, it has aged out.
    let got = store
        .query(40.0, -73.0, Some(1_000.0), None, 25 * HOUR_MS)
        .unwrap();
    assert!(got.is_empty());
}

#[test]
fn expiration_boundary_is_exclusive() {
    let store = default_store();
    store.post("client-a", "edge", 40.0, -73.0, 0).unwrap();

    let center = |now| store.query(40.0, -73.0, Some(1_000.0), None, now).unwrap();
    assert_eq!(center(DAY_MS - 1).len(), 1);
    assert!(center(DAY_MS).is_empty());
}

#[test]
fn radius_selects_by_great_circle_distance() {
    let store = default_store();
    store.post("client-a", "origin", 0.0, 0.0, 0).unwrap();

    // (0, 1) is roughly 111 km away: outside 5 km, inside 200 km.
    assert!(store
        .query(0.0, 1.0, Some(5_000.0), None, 0)
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .query(0.0, 1.0, Some(200_000.0), None, 0)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn results_are_newest_first() {
    let store = default_store();
    for (client, t) in [("a", 0u64), ("b", 10), ("c", 20)] {
        store
            .post(client, &format!("posted at {t}"), 40.0, -73.0, t)
            .unwrap();
    }

    let got = store.query(40.0, -73.0, None, None, 100).unwrap();
    let times: Vec<_> = got.iter().map(|v| v.created_at).collect();
    assert_eq!(times, vec![20, 10, 0]);
}

#[test]
fn default_limit_caps_at_the_200_most_recent() {
    let store = default_store();
    for t in 0..250u64 {
        // Distinct clients so rate limiting stays out of the way.
        store.post(&format!("client-{t}"), "crowded", 40.0, -73.0, t).unwrap();
    }

    let got = store.query(40.0, -73.0, None, None, 1_000).unwrap();
    assert_eq!(got.len(), 200);
    assert_eq!(got[0].created_at, 249);
    assert_eq!(got[199].created_at, 50);
}

#[test]
fn second_post_inside_window_is_rejected_without_side_effects() {
    let store = default_store();
    store.post("client-a", "first", 40.0, -73.0, 0).unwrap();

    let err = store
        .post("client-a", "second", 40.0, -73.0, 119_999)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);

    let got = store.query(40.0, -73.0, None, None, 1_000).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].message, "first");

    // At the window boundary the same client posts again.
    store.post("client-a", "second", 40.0, -73.0, 120_000).unwrap();
    assert_eq!(store.query(40.0, -73.0, None, None, 130_000).unwrap().len(), 2);
}

#[test]
fn invalid_input_never_inserts_or_consumes_quota() {
    let store = default_store();

    assert_eq!(
        store.post("client-a", "   ", 40.0, -73.0, 0),
        Err(StoreError::EmptyMessage)
    );
    assert!(matches!(
        store.post("client-a", &"y".repeat(300), 40.0, -73.0, 0),
        Err(StoreError::MessageTooLong { .. })
    ));
    assert!(matches!(
        store.post("client-a", "fine", 200.0, 0.0, 0),
        Err(StoreError::InvalidCoordinate { .. })
    ));

    // None of the failures above touched the client's rate budget.
    assert!(store.post("client-a", "fine", 40.0, -73.0, 0).is_ok());
    assert_eq!(store.status(0).stored_messages, 1);
}

#[test]
fn sweep_reclaims_memory_without_changing_query_results() {
    let store = fast_store(); // 10 s retention
    store.post("client-a", "doomed", 40.0, -73.0, 0).unwrap();

    // Expired but unswept: invisible to queries, still in memory.
    assert!(store.query(40.0, -73.0, None, None, 10_000).unwrap().is_empty());
    assert_eq!(store.status(10_000).stored_messages, 1);

    let stats = store.sweep(10_000);
    assert_eq!(stats.expired_messages, 1);
    assert_eq!(store.status(10_000).stored_messages, 0);
    assert!(store.query(40.0, -73.0, None, None, 10_000).unwrap().is_empty());
}

#[test]
fn works_through_a_dyn_handle() {
    let store = default_store();
    let api: &dyn MessageBoardApi = &store;

    api.post("client-a", "via trait", 40.0, -73.0, 5).unwrap();
    let got = api.query(40.0, -73.0, None, None, 10).unwrap();
    assert_eq!(got.len(), 1);
    assert!(got[0].created_at_rfc3339().starts_with("1970-01-01"));
}
