use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{AnswerEngine, AnswerEvent, Question};

/// One question on screen: its answer engine plus when it was shown.
///
/// Sessions are never reused; a new question gets a new session. A session
/// cannot be cloned, so one question has exactly one engine:
///
/// ```compile_fail
/// # use quiz_core::model::QuestionDraft;
/// # use services::QuestionSession;
/// let question = QuestionDraft::new("Q", ["a", "b"], 0).validate().unwrap();
/// let session = QuestionSession::new(question, chrono::Utc::now());
/// let _copy = session.clone();
/// ```
pub struct QuestionSession {
    engine: AnswerEngine,
    shown_at: DateTime<Utc>,
    unrecorded: Option<AnswerEvent>,
}

impl QuestionSession {
    #[must_use]
    pub fn new(question: Question, shown_at: DateTime<Utc>) -> Self {
        Self {
            engine: AnswerEngine::new(question),
            shown_at,
            unrecorded: None,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &AnswerEngine {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut AnswerEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        self.engine.question()
    }

    #[must_use]
    pub fn shown_at(&self) -> DateTime<Utc> {
        self.shown_at
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.engine.is_locked()
    }

    /// The locked-in answer's event when the history store has not taken it yet.
    #[must_use]
    pub fn unrecorded(&self) -> Option<&AnswerEvent> {
        self.unrecorded.as_ref()
    }

    pub(crate) fn hold_unrecorded(&mut self, event: AnswerEvent) {
        self.unrecorded = Some(event);
    }

    pub(crate) fn clear_unrecorded(&mut self) {
        self.unrecorded = None;
    }
}

impl fmt::Debug for QuestionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionSession")
            .field("prompt", &self.engine.question().prompt())
            .field("state", &self.engine.state())
            .field("shown_at", &self.shown_at)
            .field("unrecorded", &self.unrecorded.is_some())
            .finish_non_exhaustive()
    }
}
