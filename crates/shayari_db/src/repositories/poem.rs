//! Repository for poems
//!
//! The content store the dispatcher picks from. Poems are written by whatever
//! fills the `poems` table; the notification pipeline only reads.

use crate::error::DbError;

pub use shayari_common::models::PoemRecord;

/// Repository for poems
pub trait PoemRepository {
    /// Initialize the database schema
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a poem and return it with its assigned ID
    fn insert_poem(
        &self,
        text: Option<&str>,
    ) -> impl std::future::Future<Output = Result<PoemRecord, DbError>> + Send;

    /// Find all poems, ordered by ID
    ///
    /// Records without text come back with the default text applied.
    fn find_all(&self)
        -> impl std::future::Future<Output = Result<Vec<PoemRecord>, DbError>> + Send;
}
