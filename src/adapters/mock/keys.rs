//! Recording key sender for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::{KeyError, KeySender};

#[derive(Debug, Clone, Default)]
pub struct RecordingKeySender {
    sent: Arc<Mutex<Vec<Vec<String>>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingKeySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every combination sent so far.
    pub fn sent(&self) -> Vec<Vec<String>> {
        self.sent.lock().unwrap().clone()
    }

    /// Make subsequent sends fail after recording.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeySender for RecordingKeySender {
    async fn send_key_combo(&self, keys: &[String]) -> Result<(), KeyError> {
        if keys.is_empty() {
            return Err(KeyError::EmptyCombo);
        }
        self.sent.lock().unwrap().push(keys.to_vec());
        if self.fail.load(Ordering::SeqCst) {
            return Err(KeyError::Failed {
                program: "mock".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}
