//! Inbound event worker.
//!
//! Drains the bounded queue of chat events and spawns one handler task per
//! event, so users are served concurrently; events for one user still
//! serialize on that user's session lock. Each handler dispatches to the
//! quiz engine and delivers the resulting renderables through the
//! messaging channel. Delivery is bounded by a timeout and treated as
//! recoverable: an undelivered message is logged and dropped, never fatal.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::application::services::QuizService;
use crate::domain::repositories::{RedirectEventRepository, ShortLinkRepository};

use super::{ChannelEvent, EventKind, MessagingChannel};

/// Processes inbound events until the sender side is dropped, then waits
/// for in-flight handlers to finish.
pub async fn run_event_worker<L, E>(
    mut rx: mpsc::Receiver<ChannelEvent>,
    quiz: Arc<QuizService<L, E>>,
    channel: Arc<dyn MessagingChannel>,
    delivery_timeout: Duration,
) where
    L: ShortLinkRepository + 'static,
    E: RedirectEventRepository + 'static,
{
    let mut handlers = JoinSet::new();

    while let Some(event) = rx.recv().await {
        // Reap finished handlers so the set does not grow unbounded.
        while handlers.try_join_next().is_some() {}

        handlers.spawn(handle_event(
            event,
            Arc::clone(&quiz),
            Arc::clone(&channel),
            delivery_timeout,
        ));
    }

    while handlers.join_next().await.is_some() {}
    tracing::info!("event worker stopped");
}

/// Dispatches one event and delivers the replies.
async fn handle_event<L, E>(
    event: ChannelEvent,
    quiz: Arc<QuizService<L, E>>,
    channel: Arc<dyn MessagingChannel>,
    delivery_timeout: Duration,
) where
    L: ShortLinkRepository + 'static,
    E: RedirectEventRepository + 'static,
{
    let user_id = event.user_id;

    let replies = match event.kind {
        EventKind::Start => quiz.start_session(&user_id),
        EventKind::Answer { code } => quiz.submit_answer(&user_id, &code).await,
        EventKind::RestartChoice { retry } => quiz.submit_restart_choice(&user_id, retry).await,
    };

    for message in replies {
        match tokio::time::timeout(delivery_timeout, channel.send(&user_id, message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(user_id, error = %e, "outbound delivery failed");
            }
            Err(_) => {
                tracing::warn!(user_id, "outbound delivery timed out");
            }
        }
    }
}
