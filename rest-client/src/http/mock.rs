// rest-client/src/http/mock.rs
use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// In-memory transport: replays queued responses and records every request
#[derive(Default)]
pub struct MockHttp {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw body
    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            body: body.into(),
        }))
    }

    /// Queue a response whose body is `value` encoded as JSON
    pub fn respond_json(&self, status: u16, value: Value) -> &Self {
        self.respond(status, value.to_string())
    }

    /// Queue a failure that happens before any response
    pub fn fail(&self, message: &str) -> &Self {
        self.push(Err(HttpError::new(message)))
    }

    pub fn fail_with(&self, error: HttpError) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, response: Result<HttpResponse, HttpError>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Every request sent so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("no mock response queued")))
    }
}
