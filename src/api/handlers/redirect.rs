//! Handlers for short link creation and resolution.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters of the link creation endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateRedirectParams {
    pub item: String,
    pub user_id: Option<String>,
}

/// Creates a short link for a product article.
///
/// # Endpoint
///
/// `GET /redirect?item=<article>&user_id=<uid>`
///
/// Responds `302 Found` with `Location: /<code>`, so the caller sees the
/// short path in the redirect response. Creation is the side effect; the
/// click is counted only when the short code is later resolved.
///
/// # Errors
///
/// Returns 500 when the link cannot be persisted (including an exhausted
/// code space).
pub async fn create_redirect_handler(
    State(state): State<AppState>,
    Query(params): Query<CreateRedirectParams>,
) -> Result<Response, AppError> {
    let link = state
        .links
        .create_short_link(&params.item, params.user_id.as_deref())
        .await?;

    Ok(found(&format!("/{}", link.code)))
}

/// Resolves a short code to its stored target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds `302 Found` to the target URL after the redirect event has
/// been appended. An unknown code yields a plain-text 404.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target_url = state.links.resolve(&code).await?;

    Ok(found(&target_url))
}

/// A `302 Found` response with the given location.
fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
