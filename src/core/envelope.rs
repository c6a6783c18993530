//! API response normalization.
//!
//! The backend answers in one of three shapes, checked in this order:
//!
//! | Shape     | Recognized by                       | Payload        |
//! |-----------|-------------------------------------|----------------|
//! | Wrapped   | object with a `data` key            | `body.data`    |
//! | Paginated | object with `items` and `total` keys | the body       |
//! | Plain     | anything else (including `null`)    | the body       |
//!
//! Failure is decided from the body's `statusCode` and `success` fields
//! before the payload is extracted.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::{
    DEFAULT_API_ERROR_MESSAGE, EMPTY_ERROR_MESSAGE, GENERIC_ERROR_MESSAGE,
    UNEXPECTED_PAYLOAD_MESSAGE,
};
use crate::core::error::ApiError;

/// Envelope shape of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    Wrapped,
    Paginated,
    Plain,
}

impl EnvelopeShape {
    /// Classify a body. `data` takes priority over `items`/`total`.
    pub fn of(body: &Value) -> Self {
        match body {
            Value::Object(map) if map.contains_key("data") => Self::Wrapped,
            Value::Object(map) if map.contains_key("items") && map.contains_key("total") => {
                Self::Paginated
            }
            _ => Self::Plain,
        }
    }
}

/// Normalize a response into its JSON payload.
///
/// Accepts either a bare body or a transport response (`{ data, status }`),
/// which is unwrapped one level first.
pub fn normalize_value(input: Value) -> Result<Value, ApiError> {
    let body = unwrap_transport(input);

    if let Some(err) = failure_of(&body) {
        return Err(err);
    }

    Ok(into_payload(body))
}

/// Normalize a response and decode its payload into `T`.
pub fn normalize<T: DeserializeOwned>(input: Value) -> Result<T, ApiError> {
    let payload = normalize_value(input)?;
    serde_json::from_value(payload).map_err(|e| {
        ApiError::new(
            UNEXPECTED_PAYLOAD_MESSAGE,
            None,
            Some(Value::String(e.to_string())),
        )
    })
}

/// Best-effort variant of [`normalize`]: any failure yields `fallback`.
pub fn normalize_or<T: DeserializeOwned>(input: Value, fallback: T) -> T {
    normalize(input).unwrap_or(fallback)
}

/// Human-readable message for any error, for toasts and inline alerts.
pub fn error_message(err: &(dyn std::error::Error + 'static)) -> String {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return if api.message.is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            api.message.clone()
        };
    }

    let message = err.to_string();
    if message.is_empty() {
        EMPTY_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Human-readable message for an untyped error value (e.g. a raw JSON body).
pub fn value_message(value: &Value) -> String {
    match value.as_object().and_then(|map| map.get("message")) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(message) if is_truthy(message) => message.to_string(),
        Some(_) => EMPTY_ERROR_MESSAGE.to_string(),
        None => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

// =============================================================================
// Internals
// =============================================================================

fn unwrap_transport(input: Value) -> Value {
    match input {
        Value::Object(mut map) if map.contains_key("data") && map.contains_key("status") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn failure_of(body: &Value) -> Option<ApiError> {
    let map = body.as_object()?;

    let status_code = map.get("statusCode").and_then(as_status_code);
    let success = map.get("success").and_then(Value::as_bool);
    let message = map.get("message").and_then(Value::as_str);

    let failed = match (status_code, success) {
        (Some(code), _) if code >= 400 => true,
        (_, Some(false)) => true,
        _ => false,
    };
    if !failed {
        return None;
    }

    Some(ApiError::new(
        message.unwrap_or(DEFAULT_API_ERROR_MESSAGE),
        status_code,
        error_details(map),
    ))
}

fn error_details(map: &Map<String, Value>) -> Option<Value> {
    map.get("error").or_else(|| map.get("errors")).cloned()
}

fn into_payload(body: Value) -> Value {
    match (EnvelopeShape::of(&body), body) {
        (EnvelopeShape::Wrapped, Value::Object(mut map)) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        (_, body) => body,
    }
}

fn as_status_code(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|code| code as i64))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
