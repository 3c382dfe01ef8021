// rest-client/src/error.rs
use crate::http::HttpError;
use thiserror::Error;

/// Code reported for failures that never produced a response
pub const NETWORK_FAILURE_CODE: i32 = -1;

/// Code reported when the response body was not a readable envelope
pub const MALFORMED_RESPONSE_CODE: i32 = -2;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an `error` envelope
    #[error("{message}")]
    Application { status: u16, message: String },

    /// A 401 was handed to the registered auth-error hook instead of the caller
    #[error("request rejected as unauthorized; handled by the auth-error hook")]
    AuthIntercepted,

    /// The request never got a response
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The body was not JSON or carried neither `result` nor `error`
    #[error("malformed response (HTTP {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error("failed to encode request: {0}")]
    Encode(String),

    /// `result` did not match the type the caller asked for
    #[error("failed to decode result: {0}")]
    Decode(String),
}

impl ApiError {
    /// Numeric code: the HTTP status for server-reported errors, negative
    /// sentinels for transport-level failures, `0` otherwise.
    pub fn code(&self) -> i32 {
        match self {
            ApiError::Application { status, .. } => i32::from(*status),
            ApiError::AuthIntercepted => 401,
            ApiError::Transport(_) => NETWORK_FAILURE_CODE,
            ApiError::MalformedResponse { .. } => MALFORMED_RESPONSE_CODE,
            ApiError::Encode(_) | ApiError::Decode(_) => 0,
        }
    }

    /// True when the server could not be reached or understood
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::MalformedResponse { .. }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::AuthIntercepted | ApiError::Application { status: 401, .. }
        )
    }
}
