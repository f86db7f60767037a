//! HTTP server initialization and runtime setup.
//!
//! Handles database setup, catalog loading, worker spawning, and the Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::mpsc;

use crate::application::services::{LinkService, QuizService, ReportService};
use crate::application::services::report_service::run_report_scheduler;
use crate::catalog::CatalogIndex;
use crate::channel::worker::run_event_worker;
use crate::channel::{LoggingChannel, MessagingChannel, Renderable};
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteEventRepository, SqliteLinkRepository};
use crate::infrastructure::sink::CsvReportSink;
use crate::routes::app_router;
use crate::state::AppState;
use crate::stats::StatsRegistry;

/// Runs the service with the given configuration.
///
/// Initializes:
/// - SQLite connection pool (database file created if missing)
/// - Migrations
/// - Catalog index
/// - Inbound event worker and report scheduler
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the database cannot be opened, migrations fail, or
/// the server cannot bind. A missing catalog is NOT fatal: the operator is
/// alerted and the service starts with an empty index.
pub async fn run(config: Config) -> Result<()> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL '{}'", config.database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
        .context("failed to open database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to migrate")?;

    // The default channel traces outbound messages; a real chat transport
    // replaces it at this one spot.
    let channel: Arc<dyn MessagingChannel> = Arc::new(LoggingChannel);

    let catalog = match CatalogIndex::load_from_csv(&config.catalog_path) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!(error = %e, "catalog load failed, starting with empty index");
            let alert = Renderable::Text {
                body: format!("Каталог не загружен: {e}"),
            };
            if let Err(notify_err) = channel.send(&config.operator_chat_id, alert).await {
                tracing::warn!(error = %notify_err, "operator notification failed");
            }
            Arc::new(CatalogIndex::empty())
        }
    };

    let stats = Arc::new(StatsRegistry::new());

    let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
    let event_repository = Arc::new(SqliteEventRepository::new(pool.clone()));

    let links = Arc::new(LinkService::new(
        link_repository,
        Arc::clone(&event_repository),
        Arc::clone(&stats),
        &config.base_url,
    ));

    let quiz = Arc::new(QuizService::new(
        Arc::clone(&catalog),
        Arc::clone(&links),
        Arc::clone(&stats),
        config.images_dir.clone(),
    ));

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    tokio::spawn(run_event_worker(
        event_rx,
        Arc::clone(&quiz),
        Arc::clone(&channel),
        Duration::from_secs(config.channel_timeout_secs),
    ));
    tracing::info!("Event worker started");

    let sink = Arc::new(CsvReportSink::new(
        &config.report_dir,
        Arc::clone(&channel),
        config.operator_chat_id.as_str(),
    ));
    let reports = Arc::new(ReportService::new(
        event_repository,
        Arc::clone(&stats),
        sink,
        Arc::clone(&channel),
        config.operator_chat_id.as_str(),
    ));
    tokio::spawn(run_report_scheduler(
        reports,
        Duration::from_secs(config.report_interval_min * 60),
    ));
    tracing::info!("Report scheduler started");

    if config.session_idle_secs > 0 {
        let quiz = Arc::clone(&quiz);
        let horizon = chrono::Duration::seconds(config.session_idle_secs as i64);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(60));
            loop {
                ticker.tick().await;
                quiz.evict_idle(horizon);
            }
        });
        tracing::info!("Idle session eviction started");
    }

    let state = AppState {
        db: pool,
        links,
        catalog,
        event_tx,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
