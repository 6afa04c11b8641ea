//! Error types for the Mediascope task client.

use telemars_filters::FilterError;
use thiserror::Error;

/// Errors reported by the task service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP-level error with status code.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication failure.
    #[error("Auth error: {message}")]
    Auth { message: String },

    /// Rate limit exceeded.
    #[error("{}", rate_limit_message(.retry_after))]
    RateLimit { retry_after: Option<u64> },

    /// Resource not found.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The service rejected the task document.
    #[error("{}", validation_message(.field, .message))]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service accepted the task but could not compute it.
    #[error("task {id} failed: {message}")]
    TaskFailed { id: String, message: String },

    /// The task was still running when the wait expired.
    #[error("task {id} did not finish within {waited_secs} seconds")]
    Timeout { id: String, waited_secs: u64 },
}

fn rate_limit_message(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("Rate limited, retry after {secs} seconds"),
        None => "Rate limited".to_string(),
    }
}

fn validation_message(field: &Option<String>, message: &str) -> String {
    match field {
        Some(name) => format!("Validation error on {name}: {message}"),
        None => format!("Validation error: {message}"),
    }
}

impl ApiError {
    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Network { .. } => 3,
            ApiError::RateLimit { .. } => 4,
            ApiError::Timeout { .. } => 6,
            _ => 2,
        }
    }
}

/// A task that cannot be submitted as built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The task is missing a required part or combines incompatible ones.
    #[error("invalid task: {0}")]
    Invalid(String),
}

impl TaskError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TaskError::Invalid(message.into())
    }
}

/// Top-level error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by the service.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport error from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON in a response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A filter in the task failed validation.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The task itself is invalid.
    #[error(transparent)]
    Task(#[from] TaskError),
}

impl Error {
    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(api) => api.exit_code(),
            Error::Http(e) if e.is_connect() || e.is_timeout() => 3,
            Error::Http(_) => 2,
            Error::Json(_) => 2,
            Error::Filter(_) | Error::Task(_) => 1,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
