//! Repository for device tokens
//!
//! This module defines the interface of the device registry: the set of FCM
//! tokens the dispatcher fans out to.

use crate::error::DbError;

pub use shayari_common::models::DeviceToken;

/// Repository for device tokens
///
/// Tokens are unique; every operation is keyed on the token value.
pub trait DeviceTokenRepository {
    /// Initialize the database schema
    ///
    /// Creates the `device_tokens` table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Register a device token
    ///
    /// Inserts the token, or refreshes `last_updated_at` when it is already known.
    /// A supplied `user_id` replaces the stored one; `None` keeps it.
    ///
    /// # Returns
    ///
    /// The stored device token
    fn upsert_token(
        &self,
        token: &str,
        user_id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<DeviceToken, DbError>> + Send;

    /// Find all registered device tokens
    fn find_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<DeviceToken>, DbError>> + Send;

    /// Delete a device token
    ///
    /// Deleting a token that is not registered is not an error.
    ///
    /// # Returns
    ///
    /// `true` if a token was deleted, `false` if it was already absent
    fn delete_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
