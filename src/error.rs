//! Error types shared by the API client, the services and the session.
//!
//! Every service call returns [`Result`]. Whether a failure is shown to the
//! user or only logged is decided by the caller, never inside the client.

use std::collections::BTreeMap;
use thiserror::Error;

/// Type alias for Result using the API error type.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of a round trip to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// 401 / 403: bad credentials or an expired session.
    #[error("Authentication failed: {}", .detail.as_deref().unwrap_or("unauthorized"))]
    Unauthorized { detail: Option<String> },

    /// 400 with field-level messages.
    #[error("Validation failed: {0}")]
    Validation(ErrorBody),

    /// Any other non-2xx status.
    #[error("HTTP {status}: {}", .body.detail.as_deref().unwrap_or("request failed"))]
    Status { status: u16, body: ErrorBody },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Credentials could not be written to local storage.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        match status {
            400 => ApiError::Validation(parsed),
            401 | 403 => ApiError::Unauthorized {
                detail: parsed.detail,
            },
            _ => ApiError::Status {
                status,
                body: parsed,
            },
        }
    }

    /// Server-provided `detail` message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } => detail.as_deref(),
            ApiError::Validation(body) | ApiError::Status { body, .. } => body.detail.as_deref(),
            _ => None,
        }
    }

    /// First validation message attached to `field`.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            ApiError::Validation(body) | ApiError::Status { body, .. } => body.first(field),
            _ => None,
        }
    }

    /// First message found when checking `fields` in order.
    pub fn first_field_message(&self, fields: &[&str]) -> Option<&str> {
        fields.iter().find_map(|field| self.field_message(field))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Parsed JSON error payload of a failed request.
///
/// The backend answers either `{"detail": "..."}` or a map of field name to
/// a list of messages (sometimes a bare string).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub detail: Option<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body)
        else {
            return ErrorBody::default();
        };

        let mut parsed = ErrorBody::default();
        for (key, value) in map {
            let messages: Vec<String> = match value {
                serde_json::Value::String(s) => vec![s],
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            if key == "detail" || key == "error" {
                if parsed.detail.is_none() {
                    parsed.detail = messages.into_iter().next();
                }
            } else if !messages.is_empty() {
                parsed.fields.insert(key, messages);
            }
        }
        parsed
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(detail) = &self.detail {
            return write!(f, "{}", detail);
        }
        let joined = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Failure of the client-local key/value store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Local storage is not available")]
    Unavailable,

    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}
