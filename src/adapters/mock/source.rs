//! Scripted state source for testing the pull driver.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::models::StateSnapshot;
use crate::traits::{SourceError, StateSource};

/// Replays queued results in order, then repeats the fallback.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Arc<Mutex<VecDeque<Result<StateSnapshot, SourceError>>>>,
    fallback: Arc<Mutex<Result<StateSnapshot, SourceError>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    fetches: Arc<AtomicUsize>,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(Ok(StateSnapshot::logged_out()))),
            delay: Arc::new(Mutex::new(None)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: Result<StateSnapshot, SourceError>) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn set_fallback(&self, result: Result<StateSnapshot, SourceError>) {
        *self.fallback.lock().unwrap() = result;
    }

    /// Make every fetch wait before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateSource for ScriptedSource {
    async fn fetch(&self) -> Result<StateSnapshot, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }
}
