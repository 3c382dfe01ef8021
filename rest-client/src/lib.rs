// rest-client/src/lib.rs
pub mod classify;
pub mod client;
pub mod error;
pub mod form;
pub mod hooks;
pub mod http;
pub mod payload;
pub mod resource;

pub use classify::{classify, Envelope, Outcome};
pub use client::{Api, RestClient};
pub use error::ApiError;
pub use form::{Form, FormPart};
pub use hooks::{AuthErrorHook, HeadersHook, HookRegistry};
pub use crate::http::{Body, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
pub use payload::{Payload, FIELDS_KEY, PAYLOAD_QUERY_PARAM};
pub use resource::{Resource, ResourceRegistry};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use crate::http::ReqwestClient;

#[cfg(any(test, feature = "mock"))]
pub use crate::http::MockHttp;

// Header types used by headers hooks
pub use ::http::{HeaderMap, HeaderName, HeaderValue};
