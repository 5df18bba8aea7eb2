//! Repository modules for database access
//!
//! This module contains repository traits and SQL implementations for the
//! device registry and the content store.

pub mod device_token;
pub mod device_token_sql;
pub mod factory;
pub mod poem;
pub mod poem_sql;

// Re-export the repositories and factories for ease of use
pub use device_token::DeviceTokenRepository;
pub use device_token_sql::SqlDeviceTokenRepository;
pub use factory::{DeviceTokenRepositoryFactory, PoemRepositoryFactory};
pub use poem::PoemRepository;
pub use poem_sql::SqlPoemRepository;

use chrono::{DateTime, Utc};

/// Timestamps are stored as RFC 3339 text because `Any` can't decode `DateTime<Utc>`.
pub(crate) fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|value| DateTime::parse_from_rfc3339(&value).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
