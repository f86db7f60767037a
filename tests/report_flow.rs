use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use quizlink::application::services::ReportService;
use quizlink::channel::LoggingChannel;
use quizlink::domain::entities::NewRedirectEvent;
use quizlink::domain::repositories::RedirectEventRepository;
use quizlink::infrastructure::persistence::SqliteEventRepository;
use quizlink::infrastructure::sink::CsvReportSink;
use quizlink::stats::StatsRegistry;

fn report_service(
    pool: SqlitePool,
    report_dir: &std::path::Path,
) -> ReportService<SqliteEventRepository> {
    let channel = Arc::new(LoggingChannel);
    let sink = Arc::new(CsvReportSink::new(report_dir, channel.clone(), "admin"));

    ReportService::new(
        Arc::new(SqliteEventRepository::new(pool)),
        Arc::new(StatsRegistry::new()),
        sink,
        channel,
        "admin",
    )
}

fn report_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

#[sqlx::test]
async fn test_report_over_empty_window(pool: SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let service = report_service(pool, dir.path());

    service.generate_and_deliver().await.unwrap();

    let files = report_files(dir.path());
    assert_eq!(files.len(), 1);

    let contents = std::fs::read_to_string(&files[0]).unwrap();
    assert_eq!(contents.trim(), "code,user_id,clicked_at");
}

#[sqlx::test]
async fn test_report_includes_window_events(pool: SqlitePool) {
    let events = SqliteEventRepository::new(pool.clone());
    events
        .record(NewRedirectEvent {
            code: "aB3xY9".to_string(),
            user_id: Some("777".to_string()),
        })
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let service = report_service(pool, dir.path());

    service.generate_and_deliver().await.unwrap();

    let files = report_files(dir.path());
    let contents = std::fs::read_to_string(&files[0]).unwrap();
    assert!(contents.contains("aB3xY9,777,"));
}

#[sqlx::test]
async fn test_report_excludes_events_outside_window(pool: SqlitePool) {
    // An event older than the 7-day window, inserted directly.
    let stale = Utc::now() - Duration::days(30);
    sqlx::query("INSERT INTO redirect_events (code, user_id, occurred_at) VALUES (?1, ?2, ?3)")
        .bind("old111")
        .bind(Option::<String>::None)
        .bind(stale)
        .execute(&pool)
        .await
        .unwrap();

    let events = SqliteEventRepository::new(pool.clone());
    events
        .record(NewRedirectEvent {
            code: "new222".to_string(),
            user_id: None,
        })
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let service = report_service(pool, dir.path());

    service.generate_and_deliver().await.unwrap();

    let files = report_files(dir.path());
    let contents = std::fs::read_to_string(&files[0]).unwrap();
    assert!(contents.contains("new222"));
    assert!(!contents.contains("old111"));
}

#[sqlx::test]
async fn test_list_since_orders_newest_first(pool: SqlitePool) {
    let events = SqliteEventRepository::new(pool);

    for code in ["first1", "second"] {
        events
            .record(NewRedirectEvent {
                code: code.to_string(),
                user_id: None,
            })
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let listed = events
        .list_since(Utc::now() - Duration::days(7))
        .await
        .unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].code, "second");
    assert_eq!(listed[1].code, "first1");
}
