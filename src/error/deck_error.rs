//! Unified error type.
//!
//! Every module keeps its own error enum; `DeckError` wraps them so callers
//! that cross module boundaries (startup, logging) can classify any failure.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::cli::LaunchError;
use crate::config::ConfigError;
use crate::render::RasterError;
use crate::streamdeck::ConnectionError;
use crate::traits::{AssetError, KeyError, SinkError, SourceError};

#[derive(Debug, Error)]
pub enum DeckError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    /// A state subscriber panicked with this message.
    #[error("state listener panicked: {0}")]
    Listener(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeckError::Source(_) => ErrorCategory::Source,
            DeckError::Asset(_) => ErrorCategory::Asset,
            DeckError::Sink(_) | DeckError::Key(_) => ErrorCategory::Sink,
            DeckError::Listener(_) => ErrorCategory::Listener,
            DeckError::Config(_) | DeckError::Launch(_) => ErrorCategory::Configuration,
            DeckError::Raster(_) | DeckError::Connection(_) | DeckError::Io(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.category().is_recoverable()
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DeckError::Source(SourceError::Transport(_)) => "SOURCE_UNREACHABLE",
            DeckError::Source(SourceError::Status(_)) => "SOURCE_STATUS",
            DeckError::Source(SourceError::Malformed(_)) => "SOURCE_MALFORMED",
            DeckError::Source(SourceError::Timeout(_)) => "SOURCE_TIMEOUT",
            DeckError::Asset(AssetError::NotFound(_)) => "ASSET_NOT_FOUND",
            DeckError::Asset(AssetError::InvalidName(_)) => "ASSET_INVALID_NAME",
            DeckError::Asset(AssetError::Io { .. }) => "ASSET_IO",
            DeckError::Asset(AssetError::Decode { .. }) => "ASSET_DECODE",
            DeckError::Sink(SinkError::Disconnected) => "SINK_DISCONNECTED",
            DeckError::Sink(SinkError::Rejected { .. }) => "SINK_REJECTED",
            DeckError::Key(_) => "KEY_SEND_FAILED",
            DeckError::Raster(_) => "RASTER_ENCODE",
            DeckError::Listener(_) => "LISTENER_PANIC",
            DeckError::Config(_) => "CONFIG_INVALID",
            DeckError::Launch(_) => "LAUNCH_ARGS_INVALID",
            DeckError::Connection(_) => "HOST_CONNECTION",
            DeckError::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpError;
    use std::time::Duration;

    #[test]
    fn test_error_unification() {
        let errors: Vec<(DeckError, ErrorCategory)> = vec![
            (
                SourceError::Timeout(Duration::from_secs(1)).into(),
                ErrorCategory::Source,
            ),
            (
                AssetError::NotFound("tabs/x".to_string()).into(),
                ErrorCategory::Asset,
            ),
            (SinkError::Disconnected.into(), ErrorCategory::Sink),
            (KeyError::EmptyCombo.into(), ErrorCategory::Sink),
            (
                DeckError::Listener("boom".to_string()),
                ErrorCategory::Listener,
            ),
            (
                LaunchError::Missing("-port").into(),
                ErrorCategory::Configuration,
            ),
            (
                std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use").into(),
                ErrorCategory::System,
            ),
        ];

        for (err, category) in errors {
            assert_eq!(err.category(), category, "{err:?}");
            assert!(!err.error_code().is_empty());
        }
    }

    #[test]
    fn test_recoverability() {
        let source: DeckError =
            SourceError::Transport(HttpError::Connect("refused".into())).into();
        assert!(source.is_recoverable());
        assert_eq!(source.error_code(), "SOURCE_UNREACHABLE");

        let launch: DeckError = LaunchError::InvalidPort("x".to_string()).into();
        assert!(!launch.is_recoverable());
    }

    #[test]
    fn test_display_is_transparent() {
        let err: DeckError = SourceError::Status(503).into();
        assert_eq!(err.to_string(), "state source returned HTTP 503");
    }
}
