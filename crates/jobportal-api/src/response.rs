//! Response envelope shared by all handlers.
//!
//! Success bodies are `{success, message, count?, result?}`; error bodies
//! carry `{success: false, message}` and are produced by
//! [`crate::error::ApiError`].

use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope carrying a single result.
    pub fn with_result(message: impl Into<String>, result: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            count: None,
            result: Some(result),
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Envelope carrying a list and its count.
    pub fn with_list(message: impl Into<String>, result: Vec<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            count: Some(result.len()),
            result: Some(result),
        }
    }
}

/// Bare acknowledgement (`{success: true}`), used by the auth endpoints.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
