#![allow(dead_code)]

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use quizlink::application::services::{LinkService, QuizService};
use quizlink::catalog::CatalogIndex;
use quizlink::domain::entities::CatalogEntry;
use quizlink::infrastructure::persistence::{SqliteEventRepository, SqliteLinkRepository};
use quizlink::state::{AppLinkService, AppQuizService, AppState};
use quizlink::stats::StatsRegistry;

pub const BASE_URL: &str = "http://localhost:5000";

/// Option codes answering every question of the matching combination.
pub const MATCHING_CODES: [&str; 6] = ["frap", "room", "bed", "fashion", "cat", "rain"];

/// The canonical key the matching codes join into.
pub const MATCHING_KEY: &str = "Фраппучино + Игровая комната с компом и техникой + Кровать + \
                                Модная дорогая одежда + Кошка + Дождь";

pub const MATCHING_ARTICLE: &str = "12345";

/// A two-entry catalog: the matching combination plus one more.
pub fn test_catalog() -> Arc<CatalogIndex> {
    Arc::new(CatalogIndex::from_entries([
        (
            MATCHING_KEY.to_string(),
            CatalogEntry {
                article: MATCHING_ARTICLE.to_string(),
                target_url: format!(
                    "https://www.wildberries.ru/catalog/{MATCHING_ARTICLE}/detail.aspx"
                ),
                image_url: Some("https://example.com/photo.webp".to_string()),
            },
        ),
        (
            "Ром + Тусовка в ночном клубе + Море + Спортивный стиль с худи + Собака + Пляж"
                .to_string(),
            CatalogEntry {
                article: "67890".to_string(),
                target_url: "https://www.wildberries.ru/catalog/67890/detail.aspx".to_string(),
                image_url: None,
            },
        ),
    ]))
}

pub fn create_link_service(pool: SqlitePool, stats: Arc<StatsRegistry>) -> Arc<AppLinkService> {
    let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
    let event_repository = Arc::new(SqliteEventRepository::new(pool));

    Arc::new(LinkService::new(
        link_repository,
        event_repository,
        stats,
        BASE_URL,
    ))
}

/// Builds a quiz engine backed by real SQLite repositories.
pub fn create_quiz(pool: SqlitePool) -> (Arc<AppQuizService>, Arc<AppLinkService>, Arc<StatsRegistry>) {
    let stats = Arc::new(StatsRegistry::new());
    let links = create_link_service(pool, Arc::clone(&stats));
    let quiz = Arc::new(QuizService::new(
        test_catalog(),
        Arc::clone(&links),
        Arc::clone(&stats),
        None,
    ));

    (quiz, links, stats)
}

/// Builds the HTTP handler state over real SQLite repositories.
pub fn create_test_state(pool: SqlitePool) -> AppState {
    let stats = Arc::new(StatsRegistry::new());
    let links = create_link_service(pool.clone(), stats);
    let (event_tx, event_rx) = mpsc::channel(100);
    // Keep the receiver alive so the channel stays open for the duration of the
    // test; without a live worker nothing else holds it.
    std::mem::forget(event_rx);

    AppState {
        db: pool,
        links,
        catalog: test_catalog(),
        event_tx,
    }
}

pub async fn count_short_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_redirect_events(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM redirect_events")
        .fetch_one(pool)
        .await
        .unwrap()
}
