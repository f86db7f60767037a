//! Redirect event entity: one resolution of a short code.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An append-only record of a short-code resolution.
///
/// Distinct from link creation: a row exists only when the code was
/// actually resolved. `user_id` is the originating user of the link when
/// known, carried over for the operator report.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectEvent {
    pub id: i64,
    pub code: String,
    pub user_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Input data for appending a redirect event.
#[derive(Debug, Clone)]
pub struct NewRedirectEvent {
    pub code: String,
    pub user_id: Option<String>,
}
