//! Repository factory trait
//!
//! Lets callers build repositories from a client without knowing the concrete
//! SQL implementation.

/// A trait for database repository factories
///
/// It is generic over the repository type and the configuration type.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
