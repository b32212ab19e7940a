//! State source that fetches snapshots from the game client over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::models::StateSnapshot;
use crate::traits::{HttpClient, SourceError, StateSource};

const JSON: &str = "application/json";

pub struct HttpStateSource {
    client: Arc<dyn HttpClient>,
    url: String,
}

impl HttpStateSource {
    pub fn new(client: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StateSource for HttpStateSource {
    async fn fetch(&self) -> Result<StateSnapshot, SourceError> {
        let response = self.client.get(&self.url, JSON).await?;
        if !response.is_success() {
            return Err(SourceError::Status(response.status));
        }
        trace!(bytes = response.body.len(), "Fetched state");
        response
            .json()
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::traits::{HttpError, Response};

    const URL: &str = "http://127.0.0.1:8080/state";

    fn source(client: &MockHttpClient) -> HttpStateSource {
        HttpStateSource::new(Arc::new(client.clone()), URL)
    }

    #[tokio::test]
    async fn test_fetch_parses_snapshot() {
        let client = MockHttpClient::new();
        client.respond(
            URL,
            Response::new(
                200,
                r#"{"player":{"name":"Zezima","world":301},"runEnergy":5000}"#,
            ),
        );

        let snapshot = source(&client).fetch().await.unwrap();
        assert!(snapshot.is_logged_in());
        assert_eq!(snapshot.run_energy, Some(5000));
        assert_eq!(client.requests()[0].accept, JSON);
    }

    #[tokio::test]
    async fn test_fetch_status_error() {
        let client = MockHttpClient::new();
        client.respond(URL, Response::new(503, ""));
        assert!(matches!(
            source(&client).fetch().await,
            Err(SourceError::Status(503))
        ));
    }

    #[tokio::test]
    async fn test_fetch_malformed() {
        let client = MockHttpClient::new();
        client.respond(URL, Response::new(200, "not json"));
        assert!(matches!(
            source(&client).fetch().await,
            Err(SourceError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let client = MockHttpClient::new();
        client.fail(URL, HttpError::Connect("refused".to_string()));
        assert!(matches!(
            source(&client).fetch().await,
            Err(SourceError::Transport(HttpError::Connect(_)))
        ));
    }

    #[tokio::test]
    async fn test_recovers_after_failure() {
        let client = MockHttpClient::new();
        client.fail(URL, HttpError::Timeout);
        client.respond(URL, Response::json_body(&StateSnapshot::logged_out()).unwrap());

        let source = source(&client);
        assert!(source.fetch().await.is_err());
        assert_eq!(source.fetch().await.unwrap(), StateSnapshot::logged_out());
    }
}
