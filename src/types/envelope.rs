use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Uniform response envelope: `{status: "success"|"error", message?, data?}`.
/// Shared by every endpoint, error responses included.
#[derive(Debug, Serialize)]
pub struct Envelope<T = Value> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            message: None,
            data: Some(data),
        })
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            message: Some(message.into()),
            data: Some(data),
        })
    }
}

impl Envelope<Value> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
            data: None,
        }
    }
}
