//! Buttons that only send keys.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::kind::ButtonHandler;
use crate::error::DeckError;
use crate::traits::KeySender;

/// Send `combo` in the background. Failures are logged, never surfaced.
pub(crate) fn spawn_key_combo(kind: &'static str, keys: Arc<dyn KeySender>, combo: Vec<String>) {
    tokio::spawn(async move {
        match keys.send_key_combo(&combo).await {
            Ok(()) => debug!(kind, keys = %combo.join("+"), "Key combination sent"),
            Err(e) => {
                let err = DeckError::from(e);
                warn!(kind, code = err.error_code(), "Failed to send keys: {}", err);
            }
        }
    });
}

/// Sends a fixed key combination when the button is released.
///
/// Used for the world-map toggle, which has no rendered state of its own.
pub struct KeyComboAction {
    name: &'static str,
    keys: Arc<dyn KeySender>,
    combo: Vec<String>,
}

impl KeyComboAction {
    pub fn new(name: &'static str, keys: Arc<dyn KeySender>, combo: Vec<String>) -> Self {
        Self { name, keys, combo }
    }
}

impl ButtonHandler for KeyComboAction {
    fn name(&self) -> &'static str {
        self.name
    }

    fn on_shown(&self, _context: &str, _settings: &Value) {}

    fn on_hidden(&self, _context: &str) {}

    fn on_settings_changed(&self, _context: &str, _settings: &Value) {}

    fn on_pressed(&self, _context: &str) {}

    fn on_released(&self, _context: &str) {
        if self.combo.is_empty() {
            return;
        }
        spawn_key_combo(self.name, Arc::clone(&self.keys), self.combo.clone());
    }
}
