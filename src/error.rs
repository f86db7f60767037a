//! Application error taxonomy and HTTP response mapping.
//!
//! Per-request errors are contained to the request that raised them; the
//! service as a whole stays up. User-visible failures are always plain
//! messages, never raw error codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::channel::messages;

/// All failure modes of the quiz engine and the redirect service.
#[derive(Debug, Error)]
pub enum AppError {
    /// An inbound event that is not valid in the session's current state.
    /// Swallowed by the caller: logged, never surfaced to the user.
    #[error("event not valid in current session state: {details}")]
    InvalidTransition { details: String },

    /// An option code that does not belong to the current question.
    /// The user is re-prompted with the same question.
    #[error("unknown option `{code}` for question {question}")]
    UnknownOption { question: usize, code: String },

    /// A completed questionnaire whose combination has no catalog entry.
    /// The user sees the fallback message, not an error.
    #[error("no catalog entry for combination `{key}`")]
    CombinationNotFound { key: String },

    /// Insert hit the UNIQUE constraint on `code`. Internal: drives the
    /// create retry loop and is never returned to a caller outside it.
    #[error("short code `{code}` already exists")]
    DuplicateCode { code: String },

    /// Collision retry budget exhausted. Operational, fatal to the single
    /// request only.
    #[error("short code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    /// Short-code lookup miss.
    #[error("short link not found")]
    LinkNotFound,

    /// Catalog source could not be read or parsed.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Report sink rejected a delivery.
    #[error("report sink unavailable: {0}")]
    SinkUnavailable(String),

    /// Outbound messaging-channel delivery failed or timed out.
    #[error("messaging channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// Underlying storage failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::LinkNotFound => (StatusCode::NOT_FOUND, messages::LINK_NOT_FOUND.to_string()),
            AppError::UnknownOption { .. } | AppError::InvalidTransition { .. } => {
                (StatusCode::BAD_REQUEST, "Некорректный запрос".to_string())
            }
            AppError::CodeSpaceExhausted { attempts } => {
                tracing::error!(attempts, "short code space exhausted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Сервис временно недоступен".to_string(),
                )
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Сервис временно недоступен".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}

/// Maps a sqlx insert error to [`AppError::DuplicateCode`] when it is a
/// UNIQUE-constraint violation, [`AppError::Database`] otherwise.
pub fn map_insert_error(e: sqlx::Error, code: &str) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::DuplicateCode {
            code: code.to_string(),
        };
    }

    AppError::Database(e)
}
