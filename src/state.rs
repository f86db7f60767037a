//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::application::services::{LinkService, QuizService};
use crate::catalog::CatalogIndex;
use crate::channel::ChannelEvent;
use crate::infrastructure::persistence::{SqliteEventRepository, SqliteLinkRepository};

/// Link service over the SQLite repositories.
pub type AppLinkService = LinkService<SqliteLinkRepository, SqliteEventRepository>;

/// Quiz service over the SQLite repositories.
pub type AppQuizService = QuizService<SqliteLinkRepository, SqliteEventRepository>;

/// State shared by all HTTP handlers.
///
/// `event_tx` is the inbound seam for the chat transport: whoever receives
/// chat updates pushes [`ChannelEvent`]s into it.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub links: Arc<AppLinkService>,
    pub catalog: Arc<CatalogIndex>,
    pub event_tx: mpsc::Sender<ChannelEvent>,
}
