//! HTTP transport seam for the pull driver.
//!
//! The game client only ever serves `GET` requests on a local endpoint, so
//! the trait is limited to that.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// A 200 response carrying `value` as JSON.
    pub fn json_body<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(serde_json::to_vec(value)?),
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport failures. A non-2xx status is not an error at this level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// `GET url`, asking for the `accept` media type.
    async fn get(&self, url: &str, accept: &str) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(304, Bytes::new()).is_success());
        assert!(!Response::new(503, Bytes::new()).is_success());
    }

    #[test]
    fn test_json_body_round_trip() {
        #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
        struct Orb {
            current: u32,
        }

        let response = Response::json_body(&Orb { current: 42 }).unwrap();
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
        assert_eq!(response.json::<Orb>().unwrap(), Orb { current: 42 });
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            HttpError::Connect("refused".to_string()).to_string(),
            "connection failed: refused"
        );
        assert_eq!(HttpError::Timeout.to_string(), "request timed out");
    }
}
