//! Reqwest-backed [`HttpClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::traits::{HttpClient, HttpError, Response};

/// Production HTTP client for the pull driver.
///
/// ```ignore
/// let client = ReqwestHttpClient::with_timeout(Duration::from_secs(1))?;
/// let response = client.get("http://127.0.0.1:8080/state", "application/json").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests give up after `timeout`, including reading the body.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(|client| Self { client })
            .map_err(|e| HttpError::Other(e.to_string()))
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else if err.is_connect() {
        HttpError::Connect(err.to_string())
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else if err.is_body() || err.is_decode() {
        HttpError::Body(err.to_string())
    } else {
        HttpError::Other(err.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, accept: &str) -> Result<Response, HttpError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(classify)?;

        Ok(Response {
            status,
            content_type,
            body,
        })
    }
}
