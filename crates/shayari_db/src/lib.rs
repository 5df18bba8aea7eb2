//! Database integration for the Shayari backend
//!
//! This crate provides a database client built on SQLx's `Any` driver and the
//! repositories the notification pipeline reads from:
//!
//! - the **content store** of poems (read-only for the dispatcher)
//! - the **device registry** of FCM tokens (upserted on registration,
//!   pruned by the dispatcher)
//!
//! The schema targets SQLite.
//!
//! # Example
//!
//! ```rust,no_run
//! use shayari_db::{DbClient, DeviceTokenRepository, SqlDeviceTokenRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite://data/shayari.db").await?;
//!     let tokens = SqlDeviceTokenRepository::new(db_client);
//!     tokens.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod repository;

// Re-export the client and repository traits for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use repository::RepositoryFactory;

pub use repositories::{
    DeviceTokenRepository, DeviceTokenRepositoryFactory, PoemRepository, PoemRepositoryFactory,
    SqlDeviceTokenRepository, SqlPoemRepository,
};
