//! Repository trait for the redirect event log.

use chrono::{DateTime, Utc};

use crate::domain::entities::{NewRedirectEvent, RedirectEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only redirect event log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteEventRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectEventRepository: Send + Sync {
    /// Appends one redirect event stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn record(&self, event: NewRedirectEvent) -> Result<RedirectEvent, AppError>;

    /// Lists events that occurred at or after `since`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<RedirectEvent>, AppError>;
}
