// --- File: crates/shayari_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Data structures shared between crates

// Re-export error types and utilities for easier access
pub use error::{database_error, validation_error, Context, HttpStatusCode, ShayariError};

// Re-export HTTP utilities for easier access
pub use http::client::HTTP_CLIENT;

// Re-export logging utilities for easier access
pub use logging::{init, log_result};

pub use models::{DeviceToken, PoemRecord, DEFAULT_POEM_TEXT};
