//! Read-only API client with timeout support.
//!
//! Every response body goes through the envelope normalizer, so callers get
//! either the decoded payload or an [`ApiError`].

use js_sys::{Array, Promise};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response, Window};

use crate::config::{API_BASE_URL, BUSINESS_UNIT_HEADER, FETCH_TIMEOUT_MS};
use crate::core::envelope::{normalize, normalize_value, value_message};
use crate::core::error::{ApiError, FetchError};
use crate::core::session::{self, LocalStorageTokens, TokenReader};
use crate::utils::dom;

/// `GET` an API path and decode its payload.
///
/// `path` is appended to [`API_BASE_URL`]. The access token and business unit
/// are attached when present.
pub async fn api_get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let (status, text) = send_get(path)
        .await
        .inspect_err(|e| leptos::logging::warn!("GET {} failed: {}", path, e))?;

    interpret_response(status, &text).inspect_err(|e| {
        leptos::logging::warn!(
            "GET {} returned {} ({:?}): {}",
            path,
            ApiError::NAME,
            e.status_code,
            e
        )
    })
}

async fn send_get(path: &str) -> Result<(u16, String), FetchError> {
    let window = dom::window().ok_or(FetchError::NoWindow)?;

    let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
    let pairs = request_headers(
        LocalStorageTokens.access_token(),
        session::business_unit_id(),
    );
    for (name, value) in &pairs {
        headers
            .set(name, value)
            .map_err(|_| FetchError::RequestCreationFailed)?;
    }

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_headers(&headers);

    let url = format!("{}{}", API_BASE_URL, path);
    let request =
        Request::new_with_str_and_init(&url, &opts).map_err(|_| FetchError::RequestCreationFailed)?;

    let resp = fetch_with_timeout(&window, &request).await?;
    let status = resp.status();

    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;

    Ok((status, text.as_string().unwrap_or_default()))
}

/// Headers sent with every API request.
fn request_headers(token: Option<String>, business_unit: Option<String>) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("Accept", "application/json".to_string())];
    if let Some(token) = token {
        pairs.push(("Authorization", format!("Bearer {}", token)));
    }
    if let Some(unit) = business_unit {
        pairs.push((BUSINESS_UNIT_HEADER, unit));
    }
    pairs
}

/// Fetch `request`, failing with [`FetchError::Timeout`] after `FETCH_TIMEOUT_MS`.
async fn fetch_with_timeout(window: &Window, request: &Request) -> Result<Response, FetchError> {
    // The timer promise resolves to `undefined`, a fetch never does.
    let timer = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, FETCH_TIMEOUT_MS);
    });
    let contenders = Array::of2(&window.fetch_with_request(request), &timer);

    let settled = JsFuture::from(Promise::race(&contenders))
        .await
        .map_err(|e| FetchError::NetworkError(e.as_string().unwrap_or_else(|| format!("{:?}", e))))?;

    if settled.is_undefined() {
        return Err(FetchError::Timeout);
    }
    settled.dyn_into().map_err(|_| FetchError::ResponseReadFailed)
}

/// Turn a raw HTTP status and body into a decoded payload.
///
/// An empty body reads as `null`; a body that is not JSON is kept as a string.
fn interpret_response<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    let body = parse_body(text);

    if !(200..300).contains(&status) {
        // Prefer the backend's own failure description when the envelope has one.
        normalize_value(json!({ "data": body.clone(), "status": status }))?;

        let message = if body.get("message").is_some() {
            value_message(&body)
        } else {
            format!("Request failed with status code {}", status)
        };
        let details = (!body.is_null()).then_some(body);
        return Err(ApiError::new(message, Some(i64::from(status)), details));
    }

    normalize(json!({ "data": body, "status": status }))
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;

    #[test]
    fn test_request_headers() {
        assert_eq!(
            request_headers(None, None),
            vec![("Accept", "application/json".to_string())]
        );
        assert_eq!(
            request_headers(Some("tok".into()), Some("bu-7".into())),
            vec![
                ("Accept", "application/json".to_string()),
                ("Authorization", "Bearer tok".to_string()),
                (BUSINESS_UNIT_HEADER, "bu-7".to_string()),
            ]
        );
    }

    #[test]
    fn test_success_payload() {
        let user: SessionUser =
            interpret_response(200, r#"{"success":true,"data":{"name":"Ana"}}"#).unwrap();
        assert_eq!(user.name.as_deref(), Some("Ana"));

        let page: Value = interpret_response(200, r#"{"items":[],"total":0}"#).unwrap();
        assert_eq!(page, json!({"items": [], "total": 0}));
    }

    #[test]
    fn test_empty_and_text_bodies() {
        let empty: Option<SessionUser> = interpret_response(204, "").unwrap();
        assert_eq!(empty, None);

        let text: String = interpret_response(200, "pong").unwrap();
        assert_eq!(text, "pong");
    }

    #[test]
    fn test_envelope_failure_keeps_backend_message() {
        let err = interpret_response::<Value>(
            404,
            r#"{"statusCode":404,"message":"Plan not found","error":"Not Found"}"#,
        )
        .unwrap_err();
        assert_eq!(err.message, "Plan not found");
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.details, Some(json!("Not Found")));
    }

    #[test]
    fn test_http_failure_without_envelope() {
        let err = interpret_response::<Value>(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.message, "Request failed with status code 502");
        assert_eq!(err.status_code, Some(502));
        assert_eq!(err.details, Some(json!("Bad Gateway")));

        let err = interpret_response::<Value>(500, "").unwrap_err();
        assert_eq!(err.details, None);

        let err = interpret_response::<Value>(401, r#"{"message":"Unauthorized"}"#).unwrap_err();
        assert_eq!(err.message, "Unauthorized");
        assert_eq!(err.status_code, Some(401));
    }

    #[test]
    fn test_success_flag_on_ok_status() {
        let err = interpret_response::<Value>(200, r#"{"success":false,"message":"Nope"}"#)
            .unwrap_err();
        assert_eq!(err.message, "Nope");
        assert_eq!(err.status_code, None);
    }
}
