//! Error handling module for the DSS admin client.
//!
//! `ApiError` describes what went wrong on the wire. `AppError` is the workflow
//! taxonomy surfaced to callers: fetch, validation, submission and
//! authorization failures, plus a few local conditions.

use std::fmt;

use crate::validation::ValidationErrors;

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const FETCH_FAILED: &str = "FETCH_FAILED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const SUBMISSION_FAILED: &str = "SUBMISSION_FAILED";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const UNKNOWN_OPTION: &str = "UNKNOWN_OPTION";
    pub const UPLOAD_FAILED: &str = "UPLOAD_FAILED";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Reference data sources fetched when an editing session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Tags,
    OwnPosts,
    AllPosts,
}

impl FetchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchTarget::Tags => "tags",
            FetchTarget::OwnPosts => "own posts",
            FetchTarget::AllPosts => "all posts",
        }
    }
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure talking to the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection-level failure
    Transport(String),
    /// The request exceeded the configured timeout
    Timeout,
    /// Non-success HTTP status without a readable envelope
    Status { status: u16, body: String },
    /// Body could not be decoded
    Decode(String),
    /// Envelope arrived but did not report success
    Rejected { message: String },
    /// Malformed endpoint URL
    Url(String),
}

impl ApiError {
    /// Message to show the user. Server messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message } => message.clone(),
            ApiError::Transport(msg) => format!("Network error: {}", msg),
            ApiError::Timeout => "The request timed out".to_string(),
            ApiError::Status { status, .. } => format!("Unexpected response status {}", status),
            ApiError::Decode(msg) => format!("Unreadable response: {}", msg),
            ApiError::Url(msg) => format!("Invalid endpoint: {}", msg),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { status, body } => write!(f, "http {}: {}", status, body),
            other => f.write_str(&other.user_message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Url(err.to_string())
    }
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A reference-data load did not report success
    Fetch { target: FetchTarget, message: String },
    /// Required field missing or cross-field check failed
    Validation(ValidationErrors),
    /// A create/update call did not report success
    Submission(String),
    /// Session lacks a required role or has expired
    Authorization(String),
    /// Operation not allowed in the current session phase
    InvalidState(String),
    /// Selection refers to a value that is not among the loaded options
    UnknownOption { field: &'static str, value: String },
    /// Image upload was refused
    Upload(String),
    /// Configuration could not be loaded
    Config(String),
    /// Local file access failed
    Io(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Fetch { .. } => codes::FETCH_FAILED,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Submission(_) => codes::SUBMISSION_FAILED,
            AppError::Authorization(_) => codes::UNAUTHORIZED,
            AppError::InvalidState(_) => codes::INVALID_STATE,
            AppError::UnknownOption { .. } => codes::UNKNOWN_OPTION,
            AppError::Upload(_) => codes::UPLOAD_FAILED,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Io(_) => codes::IO_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Fetch { message, .. } => message.clone(),
            AppError::Validation(errors) => errors.to_string(),
            AppError::Submission(msg) => msg.clone(),
            AppError::Authorization(msg) => msg.clone(),
            AppError::InvalidState(msg) => msg.clone(),
            AppError::UnknownOption { field, value } => {
                format!("'{}' is not an available {} option", value, field)
            }
            AppError::Upload(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Io(msg) => msg.clone(),
        }
    }

    /// Wrap an API failure for one of the reference data sources.
    pub fn fetch(target: FetchTarget, err: ApiError) -> Self {
        tracing::warn!("Failed to fetch {}: {}", target, err);
        AppError::Fetch {
            target,
            message: err.user_message(),
        }
    }

    /// Wrap an API failure for a create/update call.
    pub fn submission(err: ApiError) -> Self {
        tracing::warn!("Submission rejected: {}", err);
        AppError::Submission(err.user_message())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("IO error: {:?}", err);
        AppError::Io(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Io(format!("JSON error: {}", err))
    }
}
