//! # Quizlink
//!
//! A questionnaire bot core with tracked short links, built with Axum and
//! SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities (including the per-user
//!   session state machine), the fixed question set, and repository traits
//! - **Application Layer** ([`application`]) - The quiz engine, the
//!   short-link service, and the report pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and
//!   the report sink
//! - **API Layer** ([`api`]) - Redirect HTTP handlers
//! - **Channel Layer** ([`channel`]) - The messaging-transport seam:
//!   inbound event queue, outbound renderables
//!
//! ## Features
//!
//! - Fixed six-question questionnaire resolving to a product article
//! - Collision-free short codes with per-click redirect tracking
//! - In-process usage statistics with periodic operator reports
//! - Per-user session serialization under concurrent chat events
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export OPERATOR_CHAT_ID="123456"
//! export CATALOG_PATH="catalog.csv"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod catalog;
pub mod channel;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod stats;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, QuizService, ReportService};
    pub use crate::catalog::CatalogIndex;
    pub use crate::channel::{ChannelEvent, EventKind, MessagingChannel, Renderable};
    pub use crate::domain::entities::{Session, SessionPhase, ShortLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::stats::{StatsRegistry, StatsSnapshot};
}
