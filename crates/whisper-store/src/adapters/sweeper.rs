//! Background expiration sweep.
//!
//! The sweep is a memory-reclamation optimization: the lazy filter inside
//! the radius query is the source of truth, so a stopped or lagging sweeper
//! never affects what callers see. Each pass takes the store's write lock
//! once, for a single bounded pass.

use crate::ports::inbound::MessageBoardApi;
use crate::ports::outbound::TimeSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle owning a running sweeper task. Dropping the handle without
/// calling [`stop`](Self::stop) detaches the task.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals shutdown and waits for the task to finish its current pass.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawns the periodic sweep task on the current tokio runtime.
///
/// Missed ticks are skipped rather than bursted, so a slow pass never
/// queues up extra passes behind itself.
pub fn spawn_sweeper<S, T>(store: Arc<S>, time: Arc<T>, interval: Duration) -> SweeperHandle
where
    S: MessageBoardApi + 'static,
    T: TimeSource + 'static,
{
    let (shutdown, mut signal) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let stats = store.sweep(time.now());
                    if stats.expired_messages > 0 || stats.stale_clients > 0 {
                        debug!(
                            expired = stats.expired_messages,
                            stale_clients = stats.stale_clients,
                            "sweep pass reclaimed records"
                        );
                    }
                }
                changed = signal.changed() => {
                    if changed.is_err() || *signal.borrow() {
                        debug!("sweeper shutting down");
                        break;
                    }
                }
            }
        }
    });

    SweeperHandle { shutdown, task }
}
