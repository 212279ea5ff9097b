use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("request to {path} failed: {message}")]
    Network { path: String, message: String },

    #[error("{path} returned HTTP {status}{}", detail_suffix(.detail))]
    Status {
        path: String,
        status: u16,
        detail: Option<String>,
    },

    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Build a status error from a non-2xx body. FastAPI puts the reason in a
    /// top-level `detail` string; anything else leaves `detail` empty.
    pub fn from_status(path: &str, status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
        ApiError::Status {
            path: path.to_string(),
            status,
            detail,
        }
    }

    /// Server-supplied reason, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The message a page shows: `detail` when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn path(&self) -> &str {
        match self {
            ApiError::Network { path, .. }
            | ApiError::Status { path, .. }
            | ApiError::Decode { path, .. } => path,
        }
    }
}
