// --- File: crates/shayari_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the Shayari crates.
///
/// Crate-specific errors convert into this type at the HTTP boundary so every
/// handler answers with the same error body.
#[derive(Error, Debug)]
pub enum ShayariError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict with work already in progress
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ShayariError {
    fn status_code(&self) -> u16 {
        match self {
            ShayariError::HttpError(_) => 500,
            ShayariError::ParseError(_) => 400,
            ShayariError::ConfigError(_) => 500,
            ShayariError::ValidationError(_) => 400,
            ShayariError::DatabaseError(_) => 500,
            ShayariError::ExternalServiceError { .. } => 502,
            ShayariError::ConflictError(_) => 409,
            ShayariError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, ShayariError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, ShayariError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, ShayariError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| ShayariError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ShayariError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| ShayariError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for ShayariError {
    fn from(err: reqwest::Error) -> Self {
        ShayariError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ShayariError {
    fn from(err: serde_json::Error) -> Self {
        ShayariError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ShayariError {
    fn from(err: std::io::Error) -> Self {
        ShayariError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> ShayariError {
    ShayariError::ValidationError(message.to_string())
}

pub fn database_error<T: fmt::Display>(message: T) -> ShayariError {
    ShayariError::DatabaseError(message.to_string())
}
