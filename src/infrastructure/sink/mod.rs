//! Report sink: the outward seam that receives aggregated statistics.

pub mod csv_sink;
pub mod service;

pub use csv_sink::CsvReportSink;
pub use service::{Report, ReportSink};

#[cfg(test)]
pub use service::MockReportSink;
