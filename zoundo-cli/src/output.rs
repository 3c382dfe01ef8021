// zoundo-cli/src/output.rs
use serde::Serialize;
use std::io::IsTerminal;
use zoundo_client::ApiError;

/// Output format option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Auto-detect based on TTY
    Auto,
    /// Force JSON output
    Json,
    /// Force human-readable output
    Human,
}

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format as JSON string
    fn to_json(&self) -> String;

    /// Format as human-readable string
    fn to_human(&self) -> String;
}

/// Format output based on the specified format
pub fn format_output<T: Formattable>(data: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => data.to_json(),
        OutputFormat::Human => data.to_human(),
        OutputFormat::Auto => {
            if std::io::stdout().is_terminal() {
                data.to_human()
            } else {
                data.to_json()
            }
        }
    }
}

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> Formattable for Response<T> {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({
                "ok": false,
                "error": { "type": "internal", "message": e.to_string() },
            })
            .to_string()
        })
    }

    fn to_human(&self) -> String {
        match (&self.result, &self.error) {
            (_, Some(error)) => format!("Error ({}): {}", error.type_, error.message),
            (Some(result), None) => serde_json::to_string_pretty(result).unwrap_or_default(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<i32>,
    retryable: bool,
}

impl ErrorResponse {
    pub fn from_api(error: &ApiError) -> Self {
        let (type_, retryable) = match error {
            ApiError::Transport(_) | ApiError::MalformedResponse { .. } => ("transport", true),
            ApiError::AuthIntercepted | ApiError::Application { status: 401, .. } => {
                ("unauthorized", false)
            }
            ApiError::Application { .. } => ("application", false),
            ApiError::Encode(_) | ApiError::Decode(_) => ("client", false),
        };
        Self {
            type_,
            message: error.to_string(),
            status: Some(error.code()),
            retryable,
        }
    }

    pub fn other(message: String) -> Self {
        Self {
            type_: "error",
            message,
            status: None,
            retryable: false,
        }
    }
}

/// Exit codes for scripts driving the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    TransientError = 1,
    PermanentError = 2,
    AuthRequired = 3,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn for_error(error: &ApiError) -> Self {
        if error.is_transport() {
            Self::TransientError
        } else if error.is_unauthorized() {
            Self::AuthRequired
        } else {
            Self::PermanentError
        }
    }
}

// Print response to stdout
pub fn print_response<T: Serialize>(resp: &Response<T>, format: OutputFormat) {
    println!("{}", format_output(resp, format));
}

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("✓").green(), message));
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Warning:").yellow(), message));
}
