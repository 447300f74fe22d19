// src/error.rs
//! Application error types with structured error handling.
//!
//! Every failure the server can produce is one variant of [`AppError`].
//! Remote rejections carry the HTTP status and the raw body; transport
//! failures carry no status at all, so callers can tell the two apart by
//! matching instead of probing for fields.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Substring present in every write-disabled error message.
pub const WRITE_DISABLED_MARKER: &str = "Write operations are disabled";

/// HTTP status classes the BookStack API reports, as a typed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401: token missing, invalid or expired
    Unauthorized,
    /// 403: token lacks permission for this resource or the API
    Forbidden,
    /// 404: the requested entity does not exist or is not visible
    NotFound,
    /// 422: request parameters failed BookStack's validation
    Validation,
    /// 429: API rate limit exceeded
    RateLimited,
    /// 5xx
    Server,
    /// Any other non-2xx status
    Other(u16),
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::Validation,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            other => Self::Other(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "validation_error"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::Server => write!(f, "server_error"),
            Self::Other(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The remote API answered with a non-2xx status.
    #[error("BookStack API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // Keep the prefix in sync with WRITE_DISABLED_MARKER.
    #[error("Write operations are disabled. Set BOOKSTACK_ENABLE_WRITE=true to allow '{operation}'.")]
    WriteDisabled { operation: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export of {entity} as {format} returned no content")]
    EmptyExport { entity: String, format: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Builds a remote rejection from a status and raw body.
    ///
    /// The message comes from the body's `message` field, then BookStack's
    /// `error.message`, then the raw body itself.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.clone()
            }
        });
        AppError::Api {
            status,
            message,
            body,
        }
    }

    pub fn write_disabled(operation: impl Into<String>) -> Self {
        AppError::WriteDisabled {
            operation: operation.into(),
        }
    }

    /// HTTP status of a remote rejection; `None` for every local failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ApiErrorKind> {
        self.status().map(ApiErrorKind::from_status)
    }

    /// Whether the failure happened before or outside any HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::NetworkFailure(_)
                | AppError::Transport(_)
                | AppError::Timeout(_)
                | AppError::MalformedResponse(_)
        )
    }

    pub fn is_write_disabled(&self) -> bool {
        matches!(self, AppError::WriteDisabled { .. })
    }

    /// Human-readable validation detail from a 422 body, if present.
    pub fn validation_detail(&self) -> Option<String> {
        let AppError::Api { body, .. } = self else {
            return None;
        };
        let json: serde_json::Value = serde_json::from_str(body).ok()?;
        let validation = json
            .get("error")
            .and_then(|e| e.get("validation"))
            .or_else(|| json.get("errors"))
            .and_then(|v| v.as_object())?;

        let details: Vec<String> = validation
            .iter()
            .map(|(field, problems)| {
                let problems = match problems {
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    other => other.to_string(),
                };
                format!("{}: {}", field, problems)
            })
            .collect();

        if details.is_empty() {
            None
        } else {
            Some(details.join("; "))
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(|m| m.as_str())
        .or_else(|| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
        })
        .map(str::to_string)
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
