//! Keyboard injection trait abstraction.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("empty key combination")]
    EmptyCombo,

    #[error("failed to run key command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("key command `{program}` exited with {status}")]
    Failed { program: String, status: String },
}

/// Sends a key combination to the focused window.
///
/// Keys are pressed in order and released in reverse order, so
/// `["ctrl", "m"]` produces Ctrl+M.
#[async_trait]
pub trait KeySender: Send + Sync {
    async fn send_key_combo(&self, keys: &[String]) -> Result<(), KeyError>;
}
