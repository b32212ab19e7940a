//! Scripted HTTP client for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{HttpClient, HttpError, Response};

/// One `GET` seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub accept: String,
}

/// HTTP client answering from per-URL queues.
///
/// Each URL has a queue of outcomes consumed in order; the last outcome is
/// repeated once the queue is down to one entry. URLs without a queue fail
/// with [`HttpError::Connect`].
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    outcomes: Arc<Mutex<HashMap<String, VecDeque<Result<Response, HttpError>>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, response: Response) {
        self.push(url, Ok(response));
    }

    pub fn fail(&self, url: &str, error: HttpError) {
        self.push(url, Err(error));
    }

    fn push(&self, url: &str, outcome: Result<Response, HttpError>) {
        self.outcomes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, accept: &str) -> Result<Response, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            accept: accept.to_string(),
        });

        let mut outcomes = self.outcomes.lock().unwrap();
        let Some(queue) = outcomes.get_mut(url) else {
            return Err(HttpError::Connect(format!("nothing listening at {url}")));
        };
        match queue.len() {
            0 => Err(HttpError::Connect(format!("nothing listening at {url}"))),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap_or(Err(HttpError::Timeout)),
        }
    }
}
