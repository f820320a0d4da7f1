//! Request and response logging with automatic secret redaction.
//!
//! The API token travels in the `Fastly-Key` header and some logging
//! endpoints carry credentials (`secret_key`, `token`) in form bodies and in
//! the JSON replies echoing them, so headers, form fields and reply fields
//! are all scrubbed before they reach a log sink.

use crate::constants;
use reqwest::header::HeaderMap;
use tracing::{debug, info, trace};

/// Form fields whose values never appear in logs.
const SECRET_FIELDS: &[&str] = &["secret_key", "access_key", "token", "tls_ca_cert"];

/// Redacts sensitive values from strings
#[must_use]
pub fn redact_sensitive_value(value: &str) -> String {
    if value.is_empty() {
        value.to_string()
    } else {
        "[REDACTED]".to_string()
    }
}

/// Checks if a header name should be redacted
#[must_use]
pub fn should_redact_header(header_name: &str) -> bool {
    let lower = header_name.to_lowercase();
    matches!(
        lower.as_str(),
        "fastly-key" | "authorization" | "cookie" | "set-cookie" | "x-api-key" | "token"
    )
}

/// Redacts secret fields from a urlencoded form body.
#[must_use]
pub fn redact_form_body(body: &str) -> String {
    body.split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if SECRET_FIELDS.contains(&key) => {
                format!("{key}={}", redact_sensitive_value(value))
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Replaces secret fields anywhere in a JSON document.
fn redact_json_value(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SECRET_FIELDS.contains(&key.as_str()) {
                    if let serde_json::Value::String(secret) = field {
                        *secret = redact_sensitive_value(secret);
                    } else if !field.is_null() {
                        *field = serde_json::Value::String("[REDACTED]".to_string());
                    }
                } else {
                    redact_json_value(field);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(redact_json_value),
        _ => {}
    }
}

/// Redacts secret fields from a JSON reply. Bodies that are not JSON are
/// returned unchanged.
#[must_use]
pub fn redact_json_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(mut value) => {
            redact_json_value(&mut value);
            value.to_string()
        }
        Err(_) => body.to_string(),
    }
}

/// Header map rendered as `name: value` pairs, secrets replaced.
#[must_use]
pub fn redacted_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if should_redact_header(name.as_str()) {
                "[REDACTED]".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            format!("{name}: {shown}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Logs an outgoing API request. Headers appear at debug, the form body at
/// trace.
pub fn log_request(method: &str, url: &str, headers: &HeaderMap, body: Option<&str>) {
    info!(target: "fastly::api", %method, %url, "request");
    debug!(target: "fastly::api", headers = %redacted_headers(headers), "request headers");
    if let Some(body) = body {
        trace!(target: "fastly::api", body = %redact_form_body(body), "request body");
    }
}

/// Logs an API response, truncating the body to `max_body_len` bytes.
pub fn log_response(
    status: u16,
    elapsed_ms: u128,
    headers: &HeaderMap,
    body: &str,
    max_body_len: usize,
) {
    info!(target: "fastly::api", status, elapsed_ms, "response");
    debug!(target: "fastly::api", headers = %redacted_headers(headers), "response headers");

    let body = redact_json_body(body);
    if body.len() > max_body_len {
        let cut = floor_char_boundary(&body, max_body_len);
        trace!(target: "fastly::api", body = &body[..cut], truncated_at = max_body_len, "response body");
    } else {
        trace!(target: "fastly::api", body = body.as_str(), "response body");
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|i| s.is_char_boundary(*i))
        .unwrap_or(0)
}

/// Gets the maximum body length from `FASTLY_LOG_MAX_BODY`
#[must_use]
pub fn get_max_body_len() -> usize {
    std::env::var(constants::ENV_LOG_MAX_BODY)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(constants::DEFAULT_LOG_MAX_BODY)
}
