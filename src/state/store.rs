//! Process-wide store holding the latest game state snapshot.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::{debug, error};

use crate::error::DeckError;
use crate::models::StateSnapshot;

/// Listener invoked with every installed snapshot.
pub type Subscriber = Arc<dyn Fn(&StateSnapshot) + Send + Sync>;

/// Handle returned by [`StateStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the single current snapshot and fans replacements out to listeners.
///
/// The snapshot is swapped wholesale behind an `Arc`, so readers always see a
/// complete snapshot and never a partial update. Replacements are dispatched
/// one at a time, so listeners observe snapshots in install order.
pub struct StateStore {
    current: RwLock<Arc<StateSnapshot>>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    dispatch: Mutex<()>,
    next_id: AtomicU64,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    /// Create a store holding a logged-out snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(StateSnapshot::logged_out())),
            subscribers: Mutex::new(Vec::new()),
            dispatch: Mutex::new(()),
            next_id: AtomicU64::new(1),
        }
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Subscriber)>> {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The latest snapshot.
    pub fn current(&self) -> Arc<StateSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Install `snapshot` and notify every subscriber in registration order.
    ///
    /// A panicking subscriber is logged and skipped; the remaining
    /// subscribers still run. Concurrent calls are serialized, so subscribers
    /// must not call `replace` themselves.
    pub fn replace(&self, snapshot: StateSnapshot) {
        let _dispatch = self.dispatch.lock().unwrap_or_else(|e| e.into_inner());
        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::clone(&snapshot);

        // Listeners run without the lock held so they may (un)subscribe.
        let subscribers: Vec<(SubscriptionId, Subscriber)> = self.subscribers().clone();
        debug!(
            listeners = subscribers.len(),
            logged_in = snapshot.is_logged_in(),
            "State snapshot replaced"
        );

        for (id, subscriber) in subscribers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| subscriber(&snapshot)));
            if let Err(payload) = outcome {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                let err = DeckError::Listener(message);
                error!(
                    subscription = id.0,
                    code = err.error_code(),
                    "State listener failed: {}",
                    err
                );
            }
        }
    }

    /// Register a listener. It is not called until the next [`replace`](Self::replace);
    /// callers that need the current state must read [`current`](Self::current).
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers().push((id, Arc::new(callback)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use std::sync::atomic::AtomicUsize;

    fn logged_in() -> StateSnapshot {
        StateSnapshot {
            player: Some(Player::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_current_defaults_to_logged_out() {
        let store = StateStore::new();
        assert_eq!(*store.current(), StateSnapshot::logged_out());
    }

    #[test]
    fn test_replace_updates_current() {
        let store = StateStore::new();
        store.replace(logged_in());
        assert!(store.current().is_logged_in());
    }

    #[test]
    fn test_subscribe_does_not_fire_immediately() {
        let store = StateStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.replace(logged_in());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let store = StateStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = Arc::clone(&order);
            store.subscribe(move |_| order.lock().unwrap().push(n));
        }
        store.replace(logged_in());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let store = StateStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        store.subscribe(|_| panic!("listener exploded"));
        let counter = Arc::clone(&calls);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.replace(logged_in());
        store.replace(StateSnapshot::logged_out());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.subscriber_count(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let store = StateStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.replace(logged_in());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_overlapping_replaces_notify_in_install_order() {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let store = Arc::new(StateStore::new());
        let (entered_tx, entered_rx) = mpsc::channel::<()>();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let entered_tx = Mutex::new(Some(entered_tx));
        let release_rx = Mutex::new(release_rx);
        store.subscribe(move |snapshot| {
            if snapshot.is_logged_in() {
                if let Some(tx) = entered_tx.lock().unwrap().take() {
                    tx.send(()).unwrap();
                    release_rx.lock().unwrap().recv().unwrap();
                }
            }
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        store.subscribe(move |snapshot| log.lock().unwrap().push(snapshot.is_logged_in()));

        let first = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.replace(logged_in()))
        };
        entered_rx.recv().unwrap();
        let second = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.replace(StateSnapshot::logged_out()))
        };
        thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();
        first.join().unwrap();
        second.join().unwrap();

        assert!(!store.current().is_logged_in());
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_subscriber_sees_new_snapshot() {
        let store = Arc::new(StateStore::new());
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        store.subscribe(move |snapshot| {
            *sink.lock().unwrap() = Some(snapshot.is_logged_in());
        });
        store.replace(logged_in());
        assert_eq!(*seen.lock().unwrap(), Some(true));
    }
}
