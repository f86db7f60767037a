//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the short-link store.
///
/// Code uniqueness is a property of the store itself (a unique index), not
/// of the caller: two concurrent inserts of the same code must never both
/// commit. Callers treat a duplicate as a retryable conflict.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link as a single durable write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] when the code is already taken
    /// (unique-constraint violation), [`AppError::Database`] on other
    /// storage errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;
}
