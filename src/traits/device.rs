//! Device sink trait abstraction.
//!
//! The rendering core only ever talks to the physical device through this
//! capability set. Every call addresses one button instance by the opaque
//! context id the host assigned to it.

use async_trait::async_trait;
use thiserror::Error;

use crate::render::ButtonImage;

/// Errors returned by a device sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The connection to the device host is gone.
    #[error("device host disconnected")]
    Disconnected,

    /// The host refused the call (for example, the button no longer exists).
    #[error("device rejected {operation} for {context}: {message}")]
    Rejected {
        context: String,
        operation: &'static str,
        message: String,
    },
}

/// Narrow capability interface over a device host.
#[async_trait]
pub trait DeviceSink: Send + Sync {
    /// Display a bitmap on the button.
    async fn set_image(&self, context: &str, image: &ButtonImage) -> Result<(), SinkError>;

    /// Switch a multi-state button to `state`.
    async fn set_state(&self, context: &str, state: u8) -> Result<(), SinkError>;

    /// Replace the host-drawn title.
    async fn set_title(&self, context: &str, title: &str) -> Result<(), SinkError>;

    /// Ask the host to re-send the stored settings (answered by a settings-changed event).
    async fn get_settings(&self, context: &str) -> Result<(), SinkError>;

    /// Persist settings for the button.
    async fn set_settings(
        &self,
        context: &str,
        settings: &serde_json::Value,
    ) -> Result<(), SinkError>;
}
