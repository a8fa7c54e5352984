//! Request body variants for streamed exchanges.
//!
//! The body shape decides the content-type: JSON bodies are serialized and
//! tagged `application/json`; multipart bodies leave the content-type to
//! reqwest so the form boundary is generated at send time.

use serde::Serialize;
use serde_json::Value;

/// Tagged request body.
#[derive(Debug)]
pub enum RequestPayload {
    /// JSON-serialized body, sent as `application/json`.
    Json(Value),
    /// Multipart form body (file uploads); boundary chosen by the transport.
    Multipart(reqwest::multipart::Form),
}

impl RequestPayload {
    /// Serialize any `Serialize` value into a JSON payload.
    pub fn json<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        Ok(RequestPayload::Json(serde_json::to_value(body)?))
    }

    /// Wrap a prepared multipart form.
    pub fn multipart(form: reqwest::multipart::Form) -> Self {
        RequestPayload::Multipart(form)
    }
}

impl From<Value> for RequestPayload {
    fn from(value: Value) -> Self {
        RequestPayload::Json(value)
    }
}

impl From<reqwest::multipart::Form> for RequestPayload {
    fn from(form: reqwest::multipart::Form) -> Self {
        RequestPayload::Multipart(form)
    }
}
