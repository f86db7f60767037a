//! Messaging channel seam.
//!
//! The chat transport itself is an external collaborator: the core consumes
//! inbound `(user, event)` pairs and emits `(user, renderable)` pairs. The
//! transport delivers inbound events through the bounded queue drained by
//! [`worker::run_event_worker`] and implements [`MessagingChannel`] for the
//! outbound direction. Delivery is best effort; the core never depends on
//! confirmation.

pub mod messages;
pub mod worker;

use async_trait::async_trait;

use crate::error::AppError;

/// One answer-option button: what the user sees and the code sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub code: String,
}

impl Button {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }
}

/// Outbound message payloads the transport knows how to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renderable {
    /// Plain text prompt.
    Text { body: String },
    /// Text (optionally with an image) plus an ordered button list.
    Question {
        body: String,
        image: Option<String>,
        buttons: Vec<Button>,
    },
    /// Final purchase message carrying the tracked short URL.
    Purchase {
        body: String,
        url: String,
        image: Option<String>,
    },
}

/// Inbound event kinds accepted from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Start,
    Answer { code: String },
    RestartChoice { retry: bool },
}

/// One inbound user event.
#[derive(Debug, Clone)]
pub struct ChannelEvent {
    pub user_id: String,
    pub kind: EventKind,
}

/// Outbound delivery interface implemented by the chat transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingChannel: Send + Sync {
    /// Delivers one renderable to a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ChannelUnavailable`] when delivery fails. The
    /// caller treats this as recoverable.
    async fn send(&self, user_id: &str, message: Renderable) -> Result<(), AppError>;
}

/// Fallback channel that traces outbound messages instead of sending them.
///
/// Lets the service run end to end before a real transport is wired in.
#[derive(Debug, Default)]
pub struct LoggingChannel;

#[async_trait]
impl MessagingChannel for LoggingChannel {
    async fn send(&self, user_id: &str, message: Renderable) -> Result<(), AppError> {
        tracing::info!(user_id, ?message, "outbound message (no transport wired)");
        Ok(())
    }
}
