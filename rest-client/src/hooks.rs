// rest-client/src/hooks.rs
use http::HeaderMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Called with the outgoing headers after the defaults are set
pub type HeadersHook = Arc<dyn Fn(&mut HeaderMap) + Send + Sync>;

/// Called when a request comes back with 401
pub type AuthErrorHook = Arc<dyn Fn() + Send + Sync>;

/// Host-level side-effect injection: at most one hook of each kind
#[derive(Default)]
pub struct HookRegistry {
    headers: RwLock<Option<HeadersHook>>,
    auth_error: RwLock<Option<AuthErrorHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_headers(&self, hook: Option<HeadersHook>) {
        *self.headers.write().unwrap_or_else(PoisonError::into_inner) = hook;
    }

    pub fn set_auth_error(&self, hook: Option<AuthErrorHook>) {
        *self.auth_error.write().unwrap_or_else(PoisonError::into_inner) = hook;
    }

    pub fn has_auth_error(&self) -> bool {
        self.auth_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Let the headers hook edit `headers`. Returns whether a hook ran.
    ///
    /// The hook is cloned out first so it may call back into the client.
    pub fn apply_headers(&self, headers: &mut HeaderMap) -> bool {
        let hook = self
            .headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match hook {
            Some(hook) => {
                hook(headers);
                true
            }
            None => false,
        }
    }

    /// Fire the auth-error hook. Returns whether a hook ran.
    pub fn notify_auth_error(&self) -> bool {
        let hook = self
            .auth_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match hook {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers = self
            .headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("HookRegistry")
            .field("headers", &headers)
            .field("auth_error", &self.has_auth_error())
            .finish()
    }
}
