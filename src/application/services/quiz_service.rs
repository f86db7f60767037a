//! The questionnaire conversation controller.
//!
//! Owns every [`Session`] record, keyed by user identifier, one active
//! session per user. Concurrent events for the same user serialize on a
//! per-user mutex held across the whole transition, so a double-tap
//! observes the state left by the first event instead of interleaving.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::catalog::CatalogIndex;
use crate::channel::{Button, Renderable, messages};
use crate::domain::entities::session::{Progress, Session};
use crate::domain::questions::{self, QUESTIONS};
use crate::domain::repositories::{RedirectEventRepository, ShortLinkRepository};
use crate::error::AppError;
use crate::stats::StatsRegistry;

use super::LinkService;

/// Per-user questionnaire state machine.
///
/// Every operation returns the renderables produced by the transition;
/// delivery is the caller's concern. Events that are not valid in the
/// current state produce no renderables and are only logged. The user
/// never sees a transition error, except an unknown option which re-emits
/// the current question.
pub struct QuizService<L: ShortLinkRepository, E: RedirectEventRepository> {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
    catalog: Arc<CatalogIndex>,
    links: Arc<LinkService<L, E>>,
    stats: Arc<StatsRegistry>,
    images_dir: Option<String>,
}

impl<L: ShortLinkRepository, E: RedirectEventRepository> QuizService<L, E> {
    pub fn new(
        catalog: Arc<CatalogIndex>,
        links: Arc<LinkService<L, E>>,
        stats: Arc<StatsRegistry>,
        images_dir: Option<String>,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            catalog,
            links,
            stats,
            images_dir,
        }
    }

    /// Starts (or restarts) a session: any existing record for the user is
    /// replaced, the start counter is incremented, and the greeting plus
    /// the first question are emitted.
    pub fn start_session(&self, user_id: &str) -> Vec<Renderable> {
        self.begin(user_id);
        vec![
            Renderable::Text {
                body: messages::GREETING.to_string(),
            },
            self.question_payload(0),
        ]
    }

    /// Records the answer for the user's current question.
    ///
    /// On success the next question is emitted, or, after the last
    /// question, the combination is resolved. An unknown option re-emits
    /// the current question; an event outside a question state is a no-op.
    pub async fn submit_answer(&self, user_id: &str, code: &str) -> Vec<Renderable> {
        let Some(handle) = self.session_handle(user_id) else {
            tracing::debug!(user_id, code, "answer without an active session, ignoring");
            return Vec::new();
        };
        let mut session = handle.lock().await;

        match session.record_answer(code) {
            Ok(Progress::NextQuestion(next)) => {
                self.stats.record_step(next - 1);
                vec![self.question_payload(next)]
            }
            Ok(Progress::Completed) => {
                self.stats.record_step(QUESTIONS.len() - 1);
                self.resolve(user_id, &session).await
            }
            Err(AppError::UnknownOption { question, code }) => {
                tracing::warn!(user_id, question, %code, "unknown option, re-prompting");
                vec![self.question_payload(question)]
            }
            Err(e) => {
                tracing::debug!(user_id, error = %e, "ignoring answer event");
                Vec::new()
            }
        }
    }

    /// Handles the restart decision after a completed questionnaire.
    ///
    /// `retry` begins a fresh run; declining emits the goodbye and discards
    /// the session record.
    pub async fn submit_restart_choice(&self, user_id: &str, retry: bool) -> Vec<Renderable> {
        let Some(handle) = self.session_handle(user_id) else {
            tracing::debug!(user_id, "restart choice without an active session, ignoring");
            return Vec::new();
        };
        let mut session = handle.lock().await;

        if let Err(e) = session.accept_restart_choice() {
            tracing::debug!(user_id, error = %e, "ignoring restart choice");
            return Vec::new();
        }

        if retry {
            self.begin(user_id);
            vec![
                Renderable::Text {
                    body: messages::RESTARTING.to_string(),
                },
                self.question_payload(0),
            ]
        } else {
            session.terminate();
            drop(session);
            self.sessions.remove(user_id);
            vec![Renderable::Text {
                body: messages::GOODBYE.to_string(),
            }]
        }
    }

    /// Evicts sessions idle for longer than `max_idle`. Sessions currently
    /// processing an event are left alone. Returns the eviction count.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let horizon = Utc::now() - max_idle;
        let before = self.sessions.len();

        self.sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => !session.idle_since(horizon),
            Err(_) => true,
        });

        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "idle sessions evicted");
        }
        evicted
    }

    /// Number of live session records.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Replaces the user's session with a fresh one and counts the start.
    fn begin(&self, user_id: &str) {
        self.sessions
            .insert(user_id.to_string(), Arc::new(Mutex::new(Session::new())));
        self.stats.record_start();
    }

    fn session_handle(&self, user_id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(user_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Resolves the completed combination against the catalog.
    async fn resolve(&self, user_id: &str, session: &Session) -> Vec<Renderable> {
        let key = questions::combination_key(session.answers());

        let Some(entry) = self.catalog.lookup(&key) else {
            let e = AppError::CombinationNotFound { key };
            tracing::info!(user_id, error = %e, "questionnaire resolved to fallback");
            return vec![
                Renderable::Text {
                    body: messages::NO_MATCH.to_string(),
                },
                restart_prompt(),
            ];
        };

        match self.links.create_short_link(&entry.article, Some(user_id)).await {
            Ok(link) => vec![
                Renderable::Purchase {
                    body: messages::PURCHASE_CAPTION.to_string(),
                    url: self.links.short_url(&link.code),
                    image: entry.image_url.clone(),
                },
                restart_prompt(),
            ],
            Err(e) => {
                tracing::error!(user_id, %key, error = %e, "short link creation failed");
                vec![
                    Renderable::Text {
                        body: messages::SERVICE_UNAVAILABLE.to_string(),
                    },
                    restart_prompt(),
                ]
            }
        }
    }

    fn question_payload(&self, index: usize) -> Renderable {
        let question = &QUESTIONS[index];

        Renderable::Question {
            body: question.text.to_string(),
            image: self
                .images_dir
                .as_ref()
                .map(|dir| format!("{}/q{}.png", dir.trim_end_matches('/'), index + 1)),
            buttons: question
                .options
                .iter()
                .map(|(label, code)| Button::new(*label, *code))
                .collect(),
        }
    }
}

fn restart_prompt() -> Renderable {
    Renderable::Question {
        body: messages::RESTART_PROMPT.to_string(),
        image: None,
        buttons: vec![
            Button::new(messages::RESTART_RETRY_LABEL, messages::RESTART_RETRY_CODE),
            Button::new(messages::RESTART_END_LABEL, messages::RESTART_END_CODE),
        ],
    }
}
