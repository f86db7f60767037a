//! Per-user questionnaire session and its state machine.

use chrono::{DateTime, Utc};

use crate::domain::questions::{self, QUESTION_COUNT};
use crate::error::AppError;

/// Closed set of session states.
///
/// `Idle` has no representation: a user with no session record is idle.
/// The resolved state is transient; completing the last answer moves the
/// session straight to `AwaitingRestart` once resolution has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the answer to question `i` (0-based).
    Question(usize),
    /// Questionnaire finished; waiting for the restart decision.
    AwaitingRestart,
    /// User declined a restart; the record may be discarded.
    Terminated,
}

/// Outcome of a successfully recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Advance to question `i`.
    NextQuestion(usize),
    /// All questions answered; the combination is ready to resolve.
    Completed,
}

/// The live state of one user's questionnaire run.
///
/// Mutated only under the owning user's lock; see
/// [`crate::application::services::QuizService`].
#[derive(Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    answers: Vec<&'static str>,
    last_activity: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh session positioned at the first question.
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Question(0),
            answers: Vec::with_capacity(QUESTION_COUNT),
            last_activity: Utc::now(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Index of the question currently awaiting an answer, if any.
    pub fn current_question(&self) -> Option<usize> {
        match self.phase {
            SessionPhase::Question(i) => Some(i),
            _ => None,
        }
    }

    /// Answer labels collected so far, in question order.
    pub fn answers(&self) -> &[&'static str] {
        &self.answers
    }

    /// Records the answer for the current question and advances the phase.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidTransition`] when the session is not in a
    ///   question state.
    /// - [`AppError::UnknownOption`] when `code` is not a valid option of
    ///   the current question. The session is left unchanged.
    pub fn record_answer(&mut self, code: &str) -> Result<Progress, AppError> {
        let index = match self.phase {
            SessionPhase::Question(i) => i,
            other => {
                return Err(AppError::InvalidTransition {
                    details: format!("answer `{code}` received in {other:?}"),
                });
            }
        };

        let label = questions::option_label(index, code).ok_or_else(|| AppError::UnknownOption {
            question: index,
            code: code.to_string(),
        })?;

        self.answers.push(label);
        self.touch();

        if index + 1 < QUESTION_COUNT {
            self.phase = SessionPhase::Question(index + 1);
            Ok(Progress::NextQuestion(index + 1))
        } else {
            self.phase = SessionPhase::AwaitingRestart;
            Ok(Progress::Completed)
        }
    }

    /// Validates that a restart decision is acceptable right now.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidTransition`] unless the session is in
    /// `AwaitingRestart`.
    pub fn accept_restart_choice(&mut self) -> Result<(), AppError> {
        if self.phase != SessionPhase::AwaitingRestart {
            return Err(AppError::InvalidTransition {
                details: format!("restart choice received in {:?}", self.phase),
            });
        }

        self.touch();
        Ok(())
    }

    /// Marks the session terminated after a declined restart.
    pub fn terminate(&mut self) {
        self.phase = SessionPhase::Terminated;
        self.touch();
    }

    /// Refreshes the activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// True when the session has seen no activity since `horizon`.
    pub fn idle_since(&self, horizon: DateTime<Utc>) -> bool {
        self.last_activity < horizon
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_session_starts_at_first_question() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Question(0));
        assert_eq!(session.current_question(), Some(0));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_record_answer_advances_question() {
        let mut session = Session::new();
        let progress = session.record_answer("frap").unwrap();

        assert_eq!(progress, Progress::NextQuestion(1));
        assert_eq!(session.phase(), SessionPhase::Question(1));
        assert_eq!(session.answers(), &["Фраппучино"]);
    }

    #[test]
    fn test_record_answer_unknown_option_leaves_state() {
        let mut session = Session::new();
        let err = session.record_answer("bogus").unwrap_err();

        assert!(matches!(err, AppError::UnknownOption { question: 0, .. }));
        assert_eq!(session.phase(), SessionPhase::Question(0));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_record_answer_code_from_other_question_rejected() {
        let mut session = Session::new();
        // "bed" is valid for question 2, not question 0
        let err = session.record_answer("bed").unwrap_err();

        assert!(matches!(err, AppError::UnknownOption { .. }));
    }

    #[test]
    fn test_full_run_completes_with_all_answers() {
        let mut session = Session::new();
        let codes = ["frap", "room", "bed", "fashion", "cat", "rain"];

        for (i, code) in codes.iter().enumerate() {
            let progress = session.record_answer(code).unwrap();
            if i + 1 < QUESTION_COUNT {
                assert_eq!(progress, Progress::NextQuestion(i + 1));
            } else {
                assert_eq!(progress, Progress::Completed);
            }
        }

        assert_eq!(session.phase(), SessionPhase::AwaitingRestart);
        assert_eq!(session.answers().len(), QUESTION_COUNT);
        assert_eq!(
            questions::combination_key(session.answers()),
            "Фраппучино + Игровая комната с компом и техникой + Кровать + \
             Модная дорогая одежда + Кошка + Дождь"
        );
    }

    #[test]
    fn test_answer_after_completion_is_invalid_transition() {
        let mut session = Session::new();
        for code in ["frap", "room", "bed", "fashion", "cat", "rain"] {
            session.record_answer(code).unwrap();
        }

        let err = session.record_answer("frap").unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
        assert_eq!(session.phase(), SessionPhase::AwaitingRestart);
        assert_eq!(session.answers().len(), QUESTION_COUNT);
    }

    #[test]
    fn test_restart_choice_only_when_awaiting() {
        let mut session = Session::new();
        assert!(matches!(
            session.accept_restart_choice(),
            Err(AppError::InvalidTransition { .. })
        ));

        for code in ["frap", "room", "bed", "fashion", "cat", "rain"] {
            session.record_answer(code).unwrap();
        }

        assert!(session.accept_restart_choice().is_ok());
    }

    #[test]
    fn test_terminate() {
        let mut session = Session::new();
        session.terminate();
        assert_eq!(session.phase(), SessionPhase::Terminated);
    }

    #[test]
    fn test_idle_since() {
        let session = Session::new();
        assert!(!session.idle_since(Utc::now() - Duration::hours(1)));
        assert!(session.idle_since(Utc::now() + Duration::hours(1)));
    }
}
