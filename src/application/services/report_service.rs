//! Periodic operator reporting.
//!
//! On a fixed interval, queries the redirect event log for the trailing
//! window, pairs it with a counter snapshot, and hands both to the report
//! sink. Failures are reported to the operator channel and never crash the
//! process; the next interval simply retries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::channel::{MessagingChannel, Renderable, messages};
use crate::domain::repositories::RedirectEventRepository;
use crate::error::AppError;
use crate::infrastructure::sink::{Report, ReportSink};
use crate::stats::StatsRegistry;

/// Trailing window of redirect events included in every report.
pub const REPORT_WINDOW_DAYS: i64 = 7;

/// Builds reports and delivers them through the sink.
pub struct ReportService<E: RedirectEventRepository> {
    events: Arc<E>,
    stats: Arc<StatsRegistry>,
    sink: Arc<dyn ReportSink>,
    channel: Arc<dyn MessagingChannel>,
    operator_chat_id: String,
}

impl<E: RedirectEventRepository> ReportService<E> {
    pub fn new(
        events: Arc<E>,
        stats: Arc<StatsRegistry>,
        sink: Arc<dyn ReportSink>,
        channel: Arc<dyn MessagingChannel>,
        operator_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            events,
            stats,
            sink,
            channel,
            operator_chat_id: operator_chat_id.into(),
        }
    }

    /// Builds one report over the trailing window and delivers it.
    ///
    /// An event-log query failure and a sink delivery failure are reported
    /// to the operator as distinct messages.
    ///
    /// # Errors
    ///
    /// Propagates the underlying failure after notifying the operator.
    pub async fn generate_and_deliver(&self) -> Result<(), AppError> {
        let since = Utc::now() - chrono::Duration::days(REPORT_WINDOW_DAYS);

        let events = match self.events.list_since(since).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(error = %e, "report query failed");
                self.notify_operator(format!("{}\nОшибка запроса: {e}", messages::REPORT_FAILURE))
                    .await;
                return Err(e);
            }
        };

        let report = Report {
            generated_at: Utc::now(),
            snapshot: self.stats.snapshot(),
            events,
        };

        if let Err(e) = self.sink.deliver(&report).await {
            tracing::error!(error = %e, "report delivery failed");
            self.notify_operator(format!("{}\nОшибка доставки: {e}", messages::REPORT_FAILURE))
                .await;
            return Err(e);
        }

        Ok(())
    }

    async fn notify_operator(&self, body: String) {
        if let Err(e) = self
            .channel
            .send(&self.operator_chat_id, Renderable::Text { body })
            .await
        {
            tracing::warn!(error = %e, "operator notification failed");
        }
    }
}

/// Runs report generation on a fixed interval until the process stops.
///
/// Runs as an independent task: a slow or failing report never blocks
/// inbound event handling.
pub async fn run_report_scheduler<E: RedirectEventRepository>(
    service: Arc<ReportService<E>>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; reports start one interval in.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if service.generate_and_deliver().await.is_err() {
            tracing::warn!("report run failed, retrying next interval");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MockMessagingChannel;
    use crate::domain::entities::RedirectEvent;
    use crate::domain::repositories::MockRedirectEventRepository;
    use crate::infrastructure::sink::MockReportSink;

    fn stats() -> Arc<StatsRegistry> {
        Arc::new(StatsRegistry::new())
    }

    #[tokio::test]
    async fn test_generate_and_deliver_success() {
        let mut mock_events = MockRedirectEventRepository::new();
        mock_events.expect_list_since().times(1).returning(|_| {
            Ok(vec![RedirectEvent {
                id: 1,
                code: "aB3xY9".to_string(),
                user_id: None,
                occurred_at: Utc::now(),
            }])
        });

        let mut mock_sink = MockReportSink::new();
        mock_sink
            .expect_deliver()
            .withf(|report| report.events.len() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let mut mock_channel = MockMessagingChannel::new();
        mock_channel.expect_send().times(0);

        let service = ReportService::new(
            Arc::new(mock_events),
            stats(),
            Arc::new(mock_sink),
            Arc::new(mock_channel),
            "admin",
        );

        assert!(service.generate_and_deliver().await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_window_yields_zero_totals() {
        let mut mock_events = MockRedirectEventRepository::new();
        mock_events
            .expect_list_since()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut mock_sink = MockReportSink::new();
        mock_sink
            .expect_deliver()
            .withf(|report| {
                report.events.is_empty()
                    && report.snapshot.total_starts == 0
                    && report.snapshot.clicks.is_empty()
                    && report
                        .snapshot
                        .reached
                        .iter()
                        .all(|r| r.percent_of_starts == 0.0)
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = ReportService::new(
            Arc::new(mock_events),
            stats(),
            Arc::new(mock_sink),
            Arc::new(MockMessagingChannel::new()),
            "admin",
        );

        assert!(service.generate_and_deliver().await.is_ok());
    }

    #[tokio::test]
    async fn test_query_failure_notifies_operator() {
        let mut mock_events = MockRedirectEventRepository::new();
        mock_events
            .expect_list_since()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let mut mock_sink = MockReportSink::new();
        mock_sink.expect_deliver().times(0);

        let mut mock_channel = MockMessagingChannel::new();
        mock_channel
            .expect_send()
            .withf(|user_id, message| {
                user_id == "admin"
                    && matches!(
                        message,
                        Renderable::Text { body } if body.contains(messages::REPORT_FAILURE)
                            && body.contains("Ошибка запроса")
                    )
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ReportService::new(
            Arc::new(mock_events),
            stats(),
            Arc::new(mock_sink),
            Arc::new(mock_channel),
            "admin",
        );

        assert!(service.generate_and_deliver().await.is_err());
    }

    #[tokio::test]
    async fn test_sink_failure_notifies_operator_distinctly() {
        let mut mock_events = MockRedirectEventRepository::new();
        mock_events
            .expect_list_since()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut mock_sink = MockReportSink::new();
        mock_sink
            .expect_deliver()
            .times(1)
            .returning(|_| Err(AppError::SinkUnavailable("disk full".to_string())));

        let mut mock_channel = MockMessagingChannel::new();
        mock_channel
            .expect_send()
            .withf(|_, message| {
                matches!(
                    message,
                    Renderable::Text { body } if body.contains("Ошибка доставки")
                )
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ReportService::new(
            Arc::new(mock_events),
            stats(),
            Arc::new(mock_sink),
            Arc::new(mock_channel),
            "admin",
        );

        let err = service.generate_and_deliver().await.unwrap_err();
        assert!(matches!(err, AppError::SinkUnavailable(_)));
    }

    #[tokio::test]
    async fn test_operator_notification_failure_is_swallowed() {
        let mut mock_events = MockRedirectEventRepository::new();
        mock_events
            .expect_list_since()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let mut mock_channel = MockMessagingChannel::new();
        mock_channel
            .expect_send()
            .times(1)
            .returning(|_, _| Err(AppError::ChannelUnavailable("offline".to_string())));

        let service = ReportService::new(
            Arc::new(mock_events),
            stats(),
            Arc::new(MockReportSink::new()),
            Arc::new(mock_channel),
            "admin",
        );

        // The original failure is still propagated, not replaced.
        let err = service.generate_and_deliver().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
