//! Pull driver: polls the game client while any button is visible.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::DeckError;
use crate::models::StateSnapshot;
use crate::state::StateStore;
use crate::traits::{SourceError, StateSource};

/// Fetch one snapshot and install it, or install a logged-out snapshot if
/// the fetch fails or exceeds `timeout`. Returns the fetch error, if any.
pub async fn poll_once(
    source: &dyn StateSource,
    store: &StateStore,
    timeout: Duration,
) -> Result<(), SourceError> {
    let result = match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(timeout)),
    };

    match result {
        Ok(snapshot) => {
            store.replace(snapshot);
            Ok(())
        }
        Err(e) => {
            store.replace(StateSnapshot::logged_out());
            Err(e)
        }
    }
}

struct PollState {
    leases: usize,
    task: Option<JoinHandle<()>>,
}

struct PollInner {
    source: Arc<dyn StateSource>,
    store: Arc<StateStore>,
    interval: Duration,
    timeout: Duration,
    state: Mutex<PollState>,
}

impl PollInner {
    fn state(&self) -> MutexGuard<'_, PollState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn release(&self) {
        let mut state = self.state();
        state.leases = state.leases.saturating_sub(1);
        if state.leases == 0 {
            if let Some(task) = state.task.take() {
                task.abort();
                info!("Poll driver stopped");
            }
        }
    }
}

/// The single process-wide poll timer.
///
/// Every registry that needs polling holds a [`PollLease`]. The timer runs
/// while at least one lease is alive and stops when the last one drops.
pub struct PollDriver {
    inner: Arc<PollInner>,
}

impl PollDriver {
    pub fn new(
        source: Arc<dyn StateSource>,
        store: Arc<StateStore>,
        interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(PollInner {
                source,
                store,
                interval,
                timeout,
                state: Mutex::new(PollState {
                    leases: 0,
                    task: None,
                }),
            }),
        }
    }

    /// Take a lease, starting the timer if this is the first one.
    pub fn acquire(&self) -> PollLease {
        let mut state = self.inner.state();
        state.leases += 1;
        if state.task.is_none() {
            info!(
                interval_ms = self.inner.interval.as_millis() as u64,
                "Poll driver started"
            );
            state.task = Some(tokio::spawn(run_poll_loop(Arc::clone(&self.inner))));
        }
        PollLease {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn lease_count(&self) -> usize {
        self.inner.state().leases
    }

    pub fn is_running(&self) -> bool {
        self.inner.state().task.is_some()
    }
}

/// Keeps the poll timer alive. Dropping the last lease stops it.
pub struct PollLease {
    inner: Arc<PollInner>,
}

impl Drop for PollLease {
    fn drop(&mut self) {
        self.inner.release();
    }
}

impl std::fmt::Debug for PollLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollLease").finish_non_exhaustive()
    }
}

async fn run_poll_loop(inner: Arc<PollInner>) {
    let mut ticker = tokio::time::interval(inner.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut failing = false;

    loop {
        ticker.tick().await;
        match poll_once(inner.source.as_ref(), &inner.store, inner.timeout).await {
            Ok(()) => {
                if failing {
                    info!("State source reachable again");
                }
                failing = false;
            }
            Err(e) => {
                let err = DeckError::from(e);
                if failing {
                    debug!(code = err.error_code(), "State fetch failed: {}", err);
                } else {
                    warn!(
                        code = err.error_code(),
                        "State fetch failed, showing logged-out state: {}", err
                    );
                }
                failing = true;
            }
        }
    }
}
