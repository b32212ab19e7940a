//! Inbound state source for the pull driver.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::http::HttpError;
use crate::models::StateSnapshot;

/// Transient failures fetching a snapshot. All of them are recovered by
/// installing a logged-out snapshot.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("state source unreachable: {0}")]
    Transport(#[from] HttpError),

    #[error("state source returned HTTP {0}")]
    Status(u16),

    #[error("malformed state JSON: {0}")]
    Malformed(String),

    #[error("state fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces a fresh snapshot on demand.
#[async_trait]
pub trait StateSource: Send + Sync {
    async fn fetch(&self) -> Result<StateSnapshot, SourceError>;
}
