// rest-client/src/payload.rs
//! Turns a method, endpoint, payload and fields list into the URL and body
//! that go on the wire.
//!
//! JSON payloads always gain a `fields` array. For `GET` the whole object
//! travels as one URL-encoded JSON blob under `__payload`; every other verb
//! sends it as the body. Forms gain a comma-joined `fields` text part and
//! are sent as the body as-is.

use crate::error::ApiError;
use crate::form::Form;
use crate::http::{Body, HttpMethod};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{Map, Value};

/// Query parameter carrying the JSON payload of `GET` requests
pub const PAYLOAD_QUERY_PARAM: &str = "__payload";

/// Property (or form field) carrying the requested field groups
pub const FIELDS_KEY: &str = "fields";

/// URI component escaping: spaces become `%20`, never `+`
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Request payload, resolved once into structured or binary
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Plain object, sent as JSON
    Json(Map<String, Value>),
    /// Binary form, sent as multipart
    Form(Form),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Json(Map::new())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Json(map)
    }
}

impl From<Form> for Payload {
    fn from(form: Form) -> Self {
        Payload::Form(form)
    }
}

impl Payload {
    /// Build a JSON payload from any serializable request struct.
    ///
    /// The value must serialize to an object; `null` and `()` become `{}`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))? {
            Value::Object(map) => Ok(Payload::Json(map)),
            Value::Null => Ok(Payload::default()),
            other => Err(ApiError::Encode(format!(
                "payload must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Transport-ready URL and body
#[derive(Debug, Clone)]
pub struct EncodedRequest {
    pub url: String,
    pub body: Option<Body>,
    /// Whether the body (or query blob) is JSON; decides `content-type`
    pub is_json: bool,
    /// Copy of the payload as sent, for diagnostics
    pub snapshot: Value,
}

/// Encode `payload` for `method` against `base_url + endpoint`
pub fn encode(
    base_url: &str,
    method: HttpMethod,
    endpoint: &str,
    payload: Payload,
    fields: &[&str],
) -> Result<EncodedRequest, ApiError> {
    let url = format!("{}{}", base_url, endpoint);

    match payload {
        Payload::Json(mut map) => {
            let list = fields.iter().map(|f| Value::String(f.to_string())).collect();
            map.insert(FIELDS_KEY.to_string(), Value::Array(list));
            let object = Value::Object(map);
            let encoded =
                serde_json::to_string(&object).map_err(|e| ApiError::Encode(e.to_string()))?;

            if method == HttpMethod::Get {
                let separator = if endpoint.contains('?') { '&' } else { '?' };
                let query = utf8_percent_encode(&encoded, COMPONENT_ENCODE_SET);
                Ok(EncodedRequest {
                    url: format!("{}{}{}={}", url, separator, PAYLOAD_QUERY_PARAM, query),
                    body: None,
                    is_json: true,
                    snapshot: object,
                })
            } else {
                Ok(EncodedRequest {
                    url,
                    body: Some(Body::Json(encoded.into_bytes())),
                    is_json: true,
                    snapshot: object,
                })
            }
        }
        Payload::Form(mut form) => {
            if method == HttpMethod::Get {
                return Err(ApiError::Encode(
                    "form payloads cannot be sent with GET".to_string(),
                ));
            }
            form.append_text(FIELDS_KEY, fields.join(","));
            let snapshot = form.summary();
            Ok(EncodedRequest {
                url,
                body: Some(Body::Form(form)),
                is_json: false,
                snapshot,
            })
        }
    }
}

/// Decode the `__payload` blob of a URL produced by [`encode`]
pub fn decode_query_payload(url: &str) -> Option<Value> {
    let query = url.split_once('?')?.1;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == PAYLOAD_QUERY_PARAM)
        .and_then(|(_, value)| serde_json::from_str(&value).ok())
}
