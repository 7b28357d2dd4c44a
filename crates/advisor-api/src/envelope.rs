//! Response envelope convention shared by every endpoint.
//!
//! A call fails when the status is not 2xx, when the body carries a non-null
//! `error`, or when it says `ok: false`. A successful payload is either wrapped
//! as `{ "ok": true, "data": {...} }` or is the body itself.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Decide success or failure and return the payload on success
pub fn interpret(status: u16, body: &str) -> Result<Value, ApiError> {
    let success = (200..300).contains(&status);

    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) if success => return Err(ApiError::Decode(e.to_string())),
            Err(_) => return Err(ApiError::Backend { status, message: None }),
        }
    };

    let flagged = value.get("error").map(|e| !e.is_null()).unwrap_or(false)
        || value.get("ok").and_then(Value::as_bool) == Some(false);

    if !success || flagged {
        return Err(ApiError::Backend {
            status,
            message: error_message(&value),
        });
    }

    match value.get("data") {
        Some(data) if data.is_object() => Ok(data.clone()),
        _ => Ok(value),
    }
}

/// Interpret the envelope and deserialize the payload
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let payload = match interpret(status, body)? {
        Value::Null => Value::Object(Default::default()),
        payload => payload,
    };
    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

fn error_message(value: &Value) -> Option<String> {
    match value.get("error") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
