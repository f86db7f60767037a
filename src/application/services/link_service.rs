//! Short link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewRedirectEvent, NewShortLink, ShortLink};
use crate::domain::repositories::{RedirectEventRepository, ShortLinkRepository};
use crate::error::AppError;
use crate::stats::StatsRegistry;
use crate::utils::codegen::generate_code;
use crate::utils::wildberries;

/// Collision retry budget for code generation.
const MAX_ATTEMPTS: usize = 10;

/// Service for issuing tracked short links and resolving short codes.
///
/// Uniqueness is delegated to the store: creation inserts a candidate code
/// and retries on conflict instead of checking first, so concurrent
/// creations can never commit the same code.
pub struct LinkService<L: ShortLinkRepository, E: RedirectEventRepository> {
    links: Arc<L>,
    events: Arc<E>,
    stats: Arc<StatsRegistry>,
    base_url: String,
}

impl<L: ShortLinkRepository, E: RedirectEventRepository> LinkService<L, E> {
    /// Creates a new link service. `base_url` is the public prefix short
    /// URLs are built from.
    pub fn new(links: Arc<L>, events: Arc<E>, stats: Arc<StatsRegistry>, base_url: &str) -> Self {
        Self {
            links,
            events,
            stats,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link for a product article.
    ///
    /// The target URL is derived from the article; the code is sampled from
    /// the fixed alphabet and re-sampled on conflict, up to [`MAX_ATTEMPTS`]
    /// times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeSpaceExhausted`] when the retry budget runs
    /// out, [`AppError::Database`] on storage errors.
    pub async fn create_short_link(
        &self,
        item: &str,
        user_id: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        let target_url = wildberries::detail_url(item);

        for attempt in 1..=MAX_ATTEMPTS {
            let new_link = NewShortLink {
                code: generate_code(),
                item: item.to_string(),
                user_id: user_id.map(str::to_string),
                target_url: target_url.clone(),
            };

            match self.links.insert(new_link).await {
                Ok(link) => {
                    tracing::info!(code = %link.code, item, "short link created");
                    return Ok(link);
                }
                Err(AppError::DuplicateCode { code }) => {
                    tracing::debug!(%code, attempt, "short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Resolves a short code to its target URL, logging the click.
    ///
    /// The redirect event is appended once the target is confirmed to
    /// exist. A failed append is logged but does not turn a confirmed
    /// redirect into a user-visible failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkNotFound`] on a lookup miss,
    /// [`AppError::Database`] on lookup errors.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or(AppError::LinkNotFound)?;

        let event = NewRedirectEvent {
            code: link.code.clone(),
            user_id: link.user_id.clone(),
        };
        if let Err(e) = self.events.record(event).await {
            tracing::error!(code, error = %e, "failed to append redirect event");
        }

        self.stats.record_click(&link.code);

        Ok(link.target_url)
    }

    /// Builds the publicly addressable short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
