// rest-client/src/client.rs
use crate::classify::{classify, Outcome, UNAUTHORIZED};
use crate::error::ApiError;
use crate::hooks::HookRegistry;
use crate::http::{HttpClient, HttpMethod, HttpRequest};
use crate::payload::{self, Payload};
use crate::resource::{Resource, ResourceRegistry};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

const JSON_MIME: &str = "application/json";

/// `last_status` value while no response has been seen
const STATUS_UNSET: u16 = 0;

/// State shared by every handle to one dispatcher
struct Session<C> {
    http: C,
    base_url: String,
    token: RwLock<Option<String>>,
    /// Status of whichever response arrived last, across all requests
    last_status: AtomicU16,
    debug: bool,
    hooks: HookRegistry,
}

/// Handle to the request dispatcher.
///
/// Clones share one session (token, hooks, last status), so a resource
/// group holding an `Api` sees token changes made through any other handle.
pub struct Api<C: HttpClient> {
    session: Arc<Session<C>>,
}

impl<C: HttpClient> Clone for Api<C> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<C: HttpClient> Api<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self::with_debug(http, base_url, false)
    }

    /// Like [`Api::new`], logging every request and outcome when `debug` is set
    pub fn with_debug(http: C, base_url: impl Into<String>, debug: bool) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            session: Arc::new(Session {
                http,
                base_url,
                token: RwLock::new(None),
                last_status: AtomicU16::new(STATUS_UNSET),
                debug,
                hooks: HookRegistry::new(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.session.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.session.debug
    }

    /// Set or clear the bearer token used by every request built from now on
    pub fn set_token(&self, token: Option<String>) -> &Self {
        *self
            .session
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
        self
    }

    pub fn token(&self) -> Option<String> {
        self.session
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Status of the most recently received response, from any request.
    ///
    /// Concurrent requests overwrite each other here; prefer the status
    /// carried by [`ApiError::Application`] when it matters which call it
    /// belongs to.
    pub fn status_code(&self) -> Option<u16> {
        match self.session.last_status.load(Ordering::SeqCst) {
            STATUS_UNSET => None,
            status => Some(status),
        }
    }

    /// Install a hook that may add or overwrite outgoing headers
    pub fn set_headers_handler<F>(&self, handler: F)
    where
        F: Fn(&mut HeaderMap) + Send + Sync + 'static,
    {
        self.session.hooks.set_headers(Some(Arc::new(handler)));
    }

    pub fn clear_headers_handler(&self) {
        self.session.hooks.set_headers(None);
    }

    /// Install a hook that takes over 401 responses
    pub fn set_auth_error_handler<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.session.hooks.set_auth_error(Some(Arc::new(handler)));
    }

    pub fn clear_auth_error_handler(&self) {
        self.session.hooks.set_auth_error(None);
    }

    pub async fn get(
        &self,
        endpoint: &str,
        payload: impl Into<Payload>,
        fields: &[&str],
    ) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, endpoint, payload.into(), fields)
            .await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        payload: impl Into<Payload>,
        fields: &[&str],
    ) -> Result<Value, ApiError> {
        self.request(HttpMethod::Post, endpoint, payload.into(), fields)
            .await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        payload: impl Into<Payload>,
        fields: &[&str],
    ) -> Result<Value, ApiError> {
        self.request(HttpMethod::Put, endpoint, payload.into(), fields)
            .await
    }

    pub async fn patch(
        &self,
        endpoint: &str,
        payload: impl Into<Payload>,
        fields: &[&str],
    ) -> Result<Value, ApiError> {
        self.request(HttpMethod::Patch, endpoint, payload.into(), fields)
            .await
    }

    pub async fn delete(
        &self,
        endpoint: &str,
        payload: impl Into<Payload>,
        fields: &[&str],
    ) -> Result<Value, ApiError> {
        self.request(HttpMethod::Delete, endpoint, payload.into(), fields)
            .await
    }

    /// Dispatch a request and deserialize its `result` into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Payload,
        fields: &[&str],
    ) -> Result<T, ApiError> {
        let value = self.request(method, endpoint, payload, fields).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Build, send and classify one request.
    ///
    /// Resolves with the envelope's `result`. A 401 goes to the auth-error
    /// hook when one is installed and then fails with
    /// [`ApiError::AuthIntercepted`]; without a hook it fails like any other
    /// server-reported error.
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Payload,
        fields: &[&str],
    ) -> Result<Value, ApiError> {
        let session = &self.session;
        session.last_status.store(STATUS_UNSET, Ordering::SeqCst);

        let encoded = payload::encode(&session.base_url, method, endpoint, payload, fields)
            .map_err(|e| self.log_failure(method, endpoint, e))?;
        let headers = self
            .build_headers(encoded.is_json)
            .map_err(|e| self.log_failure(method, endpoint, e))?;

        if session.debug {
            debug!(
                method = %method,
                endpoint = strip_query(endpoint),
                payload = %encoded.snapshot,
                "request"
            );
        }

        let request = HttpRequest {
            method,
            url: encoded.url,
            headers,
            body: encoded.body,
        };

        let response = session.http.send(request).await.map_err(|e| {
            if let Some(status) = e.status {
                session.last_status.store(status, Ordering::SeqCst);
            }
            let error = if e.invalid_request {
                ApiError::Encode(e.message)
            } else {
                ApiError::Transport(e)
            };
            self.log_failure(method, endpoint, error)
        })?;

        session.last_status.store(response.status, Ordering::SeqCst);

        match classify(response.status, &response.body) {
            Outcome::Success(result) => {
                if session.debug {
                    debug!(
                        method = %method,
                        endpoint = strip_query(endpoint),
                        status = response.status,
                        result = %result,
                        "result"
                    );
                }
                Ok(result)
            }
            Outcome::ApplicationError { status, message } => {
                Err(self.log_failure(method, endpoint, ApiError::Application { status, message }))
            }
            Outcome::AuthError { message } => {
                let error = if session.hooks.notify_auth_error() {
                    ApiError::AuthIntercepted
                } else {
                    ApiError::Application {
                        status: UNAUTHORIZED,
                        message,
                    }
                };
                Err(self.log_failure(method, endpoint, error))
            }
            Outcome::TransportError { status, reason } => Err(self.log_failure(
                method,
                endpoint,
                ApiError::MalformedResponse { status, reason },
            )),
        }
    }

    /// Defaults first, then the host's headers hook
    fn build_headers(&self, is_json: bool) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        if is_json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        }
        if let Some(token) = self.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Encode(format!("invalid bearer token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        self.session.hooks.apply_headers(&mut headers);
        Ok(headers)
    }

    fn log_failure(&self, method: HttpMethod, endpoint: &str, error: ApiError) -> ApiError {
        if self.session.debug {
            warn!(
                method = %method,
                endpoint = strip_query(endpoint),
                code = error.code(),
                error = %error,
                "request failed"
            );
        }
        error
    }
}

impl<C: HttpClient> std::fmt::Debug for Api<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.session.base_url)
            .field("debug", &self.session.debug)
            .field("hooks", &self.session.hooks)
            .finish_non_exhaustive()
    }
}

fn strip_query(endpoint: &str) -> &str {
    endpoint.split('?').next().unwrap_or(endpoint)
}

/// Dispatcher plus lazily built resource groups
pub struct RestClient<C: HttpClient> {
    api: Api<C>,
    resources: Arc<ResourceRegistry>,
}

impl<C: HttpClient> Clone for RestClient<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            resources: Arc::clone(&self.resources),
        }
    }
}

impl<C: HttpClient> RestClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self::from_api(Api::new(http, base_url))
    }

    pub fn with_debug(http: C, base_url: impl Into<String>, debug: bool) -> Self {
        Self::from_api(Api::with_debug(http, base_url, debug))
    }

    pub fn from_api(api: Api<C>) -> Self {
        Self {
            api,
            resources: Arc::new(ResourceRegistry::new()),
        }
    }

    pub fn api(&self) -> &Api<C> {
        &self.api
    }

    /// The sub-client for `R`, built on first access and shared afterwards
    pub fn resource<R: Resource<C>>(&self) -> Arc<R> {
        self.resources.get_or_init::<C, R>(&self.api)
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }
}

impl<C: HttpClient> std::ops::Deref for RestClient<C> {
    type Target = Api<C>;

    fn deref(&self) -> &Self::Target {
        &self.api
    }
}
