//! Report sink trait and the payload it receives.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::RedirectEvent;
use crate::error::AppError;
use crate::stats::StatsSnapshot;

/// One periodic report: the counter snapshot plus the raw redirect events
/// of the trailing window.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub snapshot: StatsSnapshot,
    pub events: Vec<RedirectEvent>,
}

/// Destination for periodic reports.
///
/// Rendering and delivery are the sink's concern; the scheduler only hands
/// over the aggregated rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Renders and delivers one report.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SinkUnavailable`] when the report cannot be
    /// written, [`AppError::ChannelUnavailable`] when the operator
    /// notification fails. Both are recoverable; the next interval retries.
    async fn deliver(&self, report: &Report) -> Result<(), AppError>;
}
