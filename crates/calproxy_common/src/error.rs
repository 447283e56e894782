use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The error type shared by all calproxy crates.
///
/// Every variant maps to an HTTP status through [`HttpStatusCode`] and is
/// rendered to the caller as an [`ErrorBody`].
#[derive(Error, Debug)]
pub enum CalproxyError {
    /// The outbound request itself failed (connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// A required input was missing or invalid; raised before any upstream call
    #[error("{0}")]
    ValidationError(String),

    /// The inbound request could not be decoded (body, content type, query)
    #[error("{message}")]
    RequestRejected {
        status: u16,
        message: String,
        details: String,
    },

    /// The upstream service answered with a non-success status
    #[error("{message}")]
    UpstreamError {
        status: u16,
        message: String,
        details: String,
    },

    /// The upstream answered successfully but without the fields we rely on
    #[error("{0}")]
    InvalidResponseFormat(String),

    /// The requested host or profile does not exist upstream
    #[error("{0}")]
    NotFoundError(String),

    /// The profile page could not be parsed
    #[error("Failed to parse HTML response")]
    ProfileParseError { username: String, details: String },

    /// An upstream body was not valid JSON
    #[error("Failed to parse upstream response: {0}")]
    ParseError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Anything else
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CalproxyError {
    fn status_code(&self) -> u16 {
        match self {
            CalproxyError::HttpError(_) => 500,
            CalproxyError::ValidationError(_) => 400,
            CalproxyError::RequestRejected { status, .. } => *status,
            CalproxyError::UpstreamError { status, .. } => *status,
            CalproxyError::InvalidResponseFormat(_) => 502,
            CalproxyError::NotFoundError(_) => 404,
            CalproxyError::ProfileParseError { .. } => 500,
            CalproxyError::ParseError(_) => 500,
            CalproxyError::ConfigError(_) => 500,
            CalproxyError::InternalError(_) => 500,
        }
    }
}

/// JSON body returned to the caller for every error.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl CalproxyError {
    /// Builds the caller-facing body for this error.
    pub fn body(&self) -> ErrorBody {
        match self {
            CalproxyError::HttpError(details) => ErrorBody {
                error: "Internal server error".to_string(),
                details: Some(details.clone()),
                username: None,
            },
            CalproxyError::UpstreamError {
                message, details, ..
            } => ErrorBody {
                error: message.clone(),
                details: (!details.is_empty()).then(|| details.clone()),
                username: None,
            },
            CalproxyError::RequestRejected {
                message, details, ..
            } => ErrorBody {
                error: message.clone(),
                details: Some(details.clone()),
                username: None,
            },
            CalproxyError::ProfileParseError { username, details } => ErrorBody {
                error: self.to_string(),
                details: Some(details.clone()),
                username: Some(username.clone()),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
                username: None,
            },
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, CalproxyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, CalproxyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, CalproxyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| CalproxyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CalproxyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| CalproxyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for CalproxyError {
    fn from(err: reqwest::Error) -> Self {
        CalproxyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CalproxyError {
    fn from(err: serde_json::Error) -> Self {
        CalproxyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for CalproxyError {
    fn from(err: std::io::Error) -> Self {
        CalproxyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CalproxyError {
    CalproxyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> CalproxyError {
    CalproxyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CalproxyError {
    CalproxyError::NotFoundError(message.to_string())
}

pub fn invalid_response_format<T: fmt::Display>(message: T) -> CalproxyError {
    CalproxyError::InvalidResponseFormat(message.to_string())
}

pub fn upstream_error<T: fmt::Display>(status: u16, message: T, details: String) -> CalproxyError {
    CalproxyError::UpstreamError {
        status,
        message: message.to_string(),
        details,
    }
}
