use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::Pagination;

/// `{success, data, message}` wrapper returned by every endpoint. Error
/// responses raised by the backend framework carry `detail` instead.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Unwrapped payload of a successful read.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    fn failure_message(&self, fallback: &str) -> String {
        if let Some(msg) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return msg.to_string();
        }
        if let Some(detail) = self.detail.as_ref().and_then(detail_text) {
            return detail;
        }
        fallback.to_string()
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

/// Interpret a response. Returns the envelope only when both the HTTP
/// status and the `success` flag say so; otherwise the most specific
/// message the server gave, falling back to `fallback`.
pub fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    fallback: &str,
) -> Result<Envelope<T>, String> {
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(e) => {
            if status.is_success() {
                return Err(format!("Malformed response: {e}"));
            }
            // Maybe a well-formed error body whose `data` did not match T.
            if let Ok(env) = serde_json::from_str::<Envelope<Value>>(body) {
                return Err(env.failure_message(fallback));
            }
            let body = body.trim();
            return Err(if body.is_empty() {
                status.to_string()
            } else {
                format!("{status}: {body}")
            });
        }
    };

    if !status.is_success() || !envelope.success {
        return Err(envelope.failure_message(fallback));
    }

    Ok(envelope)
}

/// Like [`parse_envelope`] but requires a `data` payload.
pub fn parse_payload<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    fallback: &str,
) -> Result<Fetched<T>, String> {
    let envelope = parse_envelope::<T>(status, body, fallback)?;
    let pagination = envelope.pagination;
    let data = envelope
        .data
        .ok_or_else(|| "Response is missing data".to_string())?;
    Ok(Fetched { data, pagination })
}
