//! Business services orchestrating domain entities and repositories.
//!
//! - [`LinkService`] - short link creation and resolution with click logging
//! - [`QuizService`] - the per-user questionnaire state machine
//! - [`ReportService`] - periodic operator reporting

pub mod link_service;
pub mod quiz_service;
pub mod report_service;

pub use link_service::LinkService;
pub use quiz_service::QuizService;
pub use report_service::{ReportService, run_report_scheduler};
