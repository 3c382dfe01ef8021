// rest-client/src/http/mod.rs
use async_trait::async_trait;
use http::HeaderMap;

use crate::form::Form;

/// HTTP verbs the dispatcher knows how to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

/// Request body, already in its transport shape
#[derive(Debug, Clone)]
pub enum Body {
    /// Encoded JSON document
    Json(Vec<u8>),
    /// Multipart form; the transport picks the boundary and content-type
    Form(Form),
}

/// Outgoing request handed to an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Body>,
}

/// Raw response; any status, including non-2xx
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport failure: the request could not be built, the server could not
/// be reached, or the body could not be read after the status arrived
#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    /// Status line received before the failure, if any
    pub status: Option<u16>,
    /// Rejected locally; nothing was sent
    pub invalid_request: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            invalid_request: false,
        }
    }

    /// The request itself was malformed (bad MIME type, bad URL)
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            invalid_request: true,
            ..Self::new(message)
        }
    }

    /// The failure happened after `status` had been received
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP error after status {}: {}", status, self.message),
            None => write!(f, "HTTP error: {}", self.message),
        }
    }
}

impl std::error::Error for HttpError {}

/// Generic HTTP client trait - users can implement their own
#[async_trait]
pub trait HttpClient: Send + Sync + 'static {
    /// Send the request and return whatever the server answered
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request).await
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockHttp;

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestClient;
