// rest-client/src/classify.rs
use serde_json::Value;

/// Status routed to the auth-error path regardless of body
pub const UNAUTHORIZED: u16 = 401;

const DEFAULT_AUTH_MESSAGE: &str = "unauthorized";

/// Wire envelope: `{"result": ...}` or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Result(Value),
    Error(String),
}

impl Envelope {
    /// Parse a response body. A set `error` wins over `result`; `null`,
    /// `false`, `0` and `""` count as unset.
    pub fn parse(body: &[u8]) -> Result<Self, String> {
        let value: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        let Value::Object(mut map) = value else {
            return Err("response body is not a JSON object".to_string());
        };
        if let Some(error) = map.remove("error").filter(is_set) {
            let message = match error {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Ok(Envelope::Error(message));
        }
        match map.remove("result") {
            Some(result) => Ok(Envelope::Result(result)),
            None => Err("response envelope has neither `result` nor `error`".to_string()),
        }
    }
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Terminal state of one request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    ApplicationError { status: u16, message: String },
    AuthError { message: String },
    TransportError { status: u16, reason: String },
}

/// Classify a received response. Status is checked before body shape.
pub fn classify(status: u16, body: &[u8]) -> Outcome {
    let envelope = Envelope::parse(body);

    if status == UNAUTHORIZED {
        let message = match envelope {
            Ok(Envelope::Error(message)) => message,
            _ => DEFAULT_AUTH_MESSAGE.to_string(),
        };
        return Outcome::AuthError { message };
    }

    match envelope {
        Ok(Envelope::Result(value)) => Outcome::Success(value),
        Ok(Envelope::Error(message)) => Outcome::ApplicationError { status, message },
        Err(reason) => Outcome::TransportError { status, reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_envelope_is_success() {
        assert_eq!(classify(200, br#"{"result": 42}"#), Outcome::Success(json!(42)));
        assert_eq!(classify(200, br#"{"result": null}"#), Outcome::Success(Value::Null));
    }

    #[test]
    fn test_error_envelope_is_application_error() {
        assert_eq!(
            classify(400, br#"{"error": "bad"}"#),
            Outcome::ApplicationError {
                status: 400,
                message: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_error_wins_over_result() {
        assert_eq!(
            classify(200, br#"{"result": 1, "error": "nope"}"#),
            Outcome::ApplicationError {
                status: 200,
                message: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_unset_error_falls_through_to_result() {
        assert_eq!(
            classify(200, br#"{"result": 5, "error": null}"#),
            Outcome::Success(json!(5))
        );
        assert_eq!(
            classify(200, br#"{"error": "", "result": [1]}"#),
            Outcome::Success(json!([1]))
        );
        assert_eq!(
            classify(200, br#"{"error": false, "result": "x"}"#),
            Outcome::Success(json!("x"))
        );
        assert!(matches!(
            classify(200, br#"{"error": null}"#),
            Outcome::TransportError { .. }
        ));
    }

    #[test]
    fn test_non_string_error_is_rendered_as_json() {
        assert_eq!(
            classify(422, br#"{"error": {"field": "email"}}"#),
            Outcome::ApplicationError {
                status: 422,
                message: r#"{"field":"email"}"#.to_string()
            }
        );
    }

    #[test]
    fn test_401_beats_body_shape() {
        assert_eq!(
            classify(401, br#"{"result": true}"#),
            Outcome::AuthError {
                message: "unauthorized".to_string()
            }
        );
        assert_eq!(
            classify(401, br#"{"error": "token expired"}"#),
            Outcome::AuthError {
                message: "token expired".to_string()
            }
        );
        assert!(matches!(classify(401, b"<html>"), Outcome::AuthError { .. }));
    }

    #[test]
    fn test_unparsable_bodies_are_transport_errors() {
        assert!(matches!(
            classify(200, b"not json"),
            Outcome::TransportError { status: 200, .. }
        ));
        assert!(matches!(
            classify(502, b""),
            Outcome::TransportError { status: 502, .. }
        ));
        assert!(matches!(
            classify(200, b"[1, 2]"),
            Outcome::TransportError { .. }
        ));
        assert!(matches!(
            classify(200, br#"{"data": 1}"#),
            Outcome::TransportError { .. }
        ));
    }

    #[test]
    fn test_server_error_with_result_envelope_still_succeeds() {
        assert_eq!(classify(500, br#"{"result": "ok"}"#), Outcome::Success(json!("ok")));
    }
}
