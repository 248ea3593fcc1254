use lambda_http::Request;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use crate::models::errors::GatewayError;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Extracts the JSON body from a request.
pub fn extract_body(event: &Request) -> Value {
    serde_json::from_slice(event.body().as_ref()).unwrap_or_else(|_| json!({}))
}

/// Extracts the shared secret header. Header names are matched case-insensitively.
pub fn extract_api_key(event: &Request) -> Option<&str> {
    event.headers()
        .get(API_KEY_HEADER)
        .and_then(|header| header.to_str().ok())
}

/// Parses a JSON body into a request type, ignoring unknown fields.
pub fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, GatewayError> {
    // A non-object body carries none of the expected fields.
    let body = if body.is_object() { body } else { json!({}) };
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidInput(format!("invalid request: {}", e)))
}

/// Returns the value of a required string field, rejecting absent and empty values.
pub fn require_non_empty(value: Option<String>, error: impl FnOnce() -> GatewayError) -> Result<String, GatewayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(error()),
    }
}
