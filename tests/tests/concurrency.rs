//! Concurrency behavior: parallel posts/queries and the background sweeper.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use whisper_store::{spawn_sweeper, BoardConfig, MessageBoardApi, MessageStore, MockTimeSource};
use whisperwall_tests::{default_store, init_tracing};

#[test]
fn concurrent_posts_from_distinct_clients_all_land() {
    let store = Arc::new(default_store());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for j in 0..25u64 {
                    store
                        .post(
                            &format!("client-{i}-{j}"),
                            "parallel",
                            40.0,
                            -73.0,
                            i * 100 + j,
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.status(1_000).stored_messages, 200);
}

#[test]
fn concurrent_posts_from_one_client_admit_exactly_one() {
    let store = Arc::new(default_store());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.post("shared-nat-ip", "me first", 40.0, -73.0, 0).is_ok())
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(admitted, 1);
    assert_eq!(store.status(0).stored_messages, 1);
}

#[test]
fn a_completed_post_is_visible_to_the_next_query() {
    let store = default_store();
    let view = store.post("client-a", "read me back", 40.0, -73.0, 7).unwrap();

    let got = store.query(40.0, -73.0, None, None, 7).unwrap();
    assert!(got.iter().any(|v| v.id == view.id));
}

#[test]
fn queries_run_against_a_moving_board_without_tearing() {
    init_tracing();
    let store = Arc::new(MessageStore::with_defaults());
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let writer = {
        let store = Arc::clone(&store);
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut rng = rand::thread_rng();
            let mut t = 0u64;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                let lat = rng.gen_range(39.5..40.5);
                let lng = rng.gen_range(-73.5..-72.5);
                t += 1;
                let _ = store.post(&format!("w-{t}"), "churn", lat, lng, t);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                    let got = store
                        .query(40.0, -73.0, Some(100_000.0), None, 3_600_000)
                        .unwrap();
                    // Every observed result is a complete message.
                    for view in &got {
                        assert!(!view.message.is_empty());
                    }
                    // Newest-first holds on every snapshot.
                    for pair in got.windows(2) {
                        assert!(pair[0].created_at >= pair[1].created_at);
                    }
                }
            })
        })
        .collect();

    std::thread::sleep(Duration::from_millis(200));
    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn sweeper_reclaims_under_injected_time_and_stops_cleanly() {
    init_tracing();
    // 10 s retention, 100 ms sweep cadence.
    let config = BoardConfig::for_testing();
    let interval = config.sweep_interval;
    let store = Arc::new(MessageStore::new(config));
    let clock = Arc::new(MockTimeSource::new(0));

    store.post("client-a", "ephemeral", 40.0, -73.0, 0).unwrap();
    let handle = spawn_sweeper(Arc::clone(&store), Arc::clone(&clock), interval);

    // Before expiry the sweeper leaves the message alone.
    clock.set(5_000);
    tokio::time::sleep(interval * 2).await;
    assert_eq!(store.status(5_000).stored_messages, 1);

    // After expiry the next pass reclaims it.
    clock.set(10_000);
    tokio::time::sleep(interval * 2).await;
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
    assert_eq!(store.status(10_000).stored_messages, 0);

    handle.stop().await;
}
