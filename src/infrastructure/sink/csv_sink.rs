//! CSV file report sink.
//!
//! Renders the trailing-window redirect events to a timestamped CSV file
//! and notifies the operator over the messaging channel with the report
//! summary and file location.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::channel::{MessagingChannel, Renderable};
use crate::error::AppError;

use super::service::{Report, ReportSink};

/// Report sink writing one CSV file per report into a fixed directory.
pub struct CsvReportSink {
    dir: PathBuf,
    channel: Arc<dyn MessagingChannel>,
    operator_chat_id: String,
}

impl CsvReportSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        channel: Arc<dyn MessagingChannel>,
        operator_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            channel,
            operator_chat_id: operator_chat_id.into(),
        }
    }

    fn write_csv(&self, report: &Report) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::SinkUnavailable(format!("{}: {e}", self.dir.display())))?;

        let filename = format!("report-{}.csv", report.generated_at.format("%Y%m%d-%H%M%S"));
        let path = self.dir.join(filename);

        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| AppError::SinkUnavailable(format!("{}: {e}", path.display())))?;

        let io_err = |e: csv::Error| AppError::SinkUnavailable(format!("{}: {e}", path.display()));

        writer
            .write_record(["code", "user_id", "clicked_at"])
            .map_err(io_err)?;
        for event in &report.events {
            writer
                .write_record([
                    event.code.as_str(),
                    event.user_id.as_deref().unwrap_or(""),
                    &event.occurred_at.to_rfc3339(),
                ])
                .map_err(io_err)?;
        }
        writer.flush().map_err(|e| {
            AppError::SinkUnavailable(format!("{}: {e}", path.display()))
        })?;

        Ok(path)
    }
}

#[async_trait]
impl ReportSink for CsvReportSink {
    async fn deliver(&self, report: &Report) -> Result<(), AppError> {
        let path = self.write_csv(report)?;

        let total_clicks: u64 = report.snapshot.clicks.iter().map(|c| c.count).sum();
        let caption = format!(
            "Отчёт за последние 7 дней ({})\nСтартов: {}, кликов: {}\n{}",
            report.generated_at.format("%d.%m %H:%M"),
            report.snapshot.total_starts,
            total_clicks,
            path.display(),
        );

        self.channel
            .send(&self.operator_chat_id, Renderable::Text { body: caption })
            .await?;

        tracing::info!(path = %path.display(), events = report.events.len(), "report delivered");
        Ok(())
    }
}
