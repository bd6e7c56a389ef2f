use std::sync::Arc;

use quiz_core::model::{AnswerError, AnswerEvent, Question, QuestionDraft};
use tracing::{debug, warn};

use crate::Clock;
use crate::error::QuizError;
use crate::history::HistoryStore;
use crate::question_session::QuestionSession;

/// Result of a selection on a question session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// The locked-in option, which is the first selection made.
    pub selected_index: usize,
    pub is_correct: bool,
    /// The event written to history, only for the selection that locked in.
    pub event: Option<AnswerEvent>,
}

impl AnswerOutcome {
    #[must_use]
    pub fn recorded(&self) -> bool {
        self.event.is_some()
    }
}

/// Hosts single questions and forwards their answers to the history store.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    history: Arc<dyn HistoryStore>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, history: Arc<dyn HistoryStore>) -> Self {
        Self { clock, history }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn history(&self) -> Arc<dyn HistoryStore> {
        Arc::clone(&self.history)
    }

    /// Show `question`, starting its answer timer.
    #[must_use]
    pub fn start(&self, question: Question) -> QuestionSession {
        QuestionSession::new(question, self.clock.now())
    }

    /// Validate `draft` and show it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Question` if the draft is not a valid question.
    pub fn start_draft(&self, draft: QuestionDraft) -> Result<QuestionSession, QuizError> {
        Ok(self.start(draft.validate()?))
    }

    /// Select `index` on `session`.
    ///
    /// The first selection locks the question in and records one answer event;
    /// later selections change nothing and record nothing. If recording fails,
    /// the event stays on the session and the next call writes it, whatever
    /// index that call passes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Answer` for an out-of-range index and
    /// `QuizError::History` if the event cannot be recorded.
    pub async fn answer(
        &self,
        session: &mut QuestionSession,
        index: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        let Some(verdict) = session.engine_mut().select(index)? else {
            let engine = session.engine();
            let selected_index = engine
                .selected_index()
                .ok_or(AnswerError::NotAnswered)?;
            let is_correct = engine.is_correct()?;

            if let Some(event) = session.unrecorded().cloned() {
                self.write(session, &event).await?;
                return Ok(AnswerOutcome {
                    selected_index,
                    is_correct,
                    event: Some(event),
                });
            }

            warn!(
                requested = index,
                locked = selected_index,
                "question already answered, selection ignored"
            );
            return Ok(AnswerOutcome {
                selected_index,
                is_correct,
                event: None,
            });
        };

        let elapsed_ms = self.clock.millis_since(session.shown_at());
        let event = AnswerEvent::from_verdict(session.question().subject(), verdict, elapsed_ms);
        session.hold_unrecorded(event.clone());
        self.write(session, &event).await?;

        Ok(AnswerOutcome {
            selected_index: verdict.index,
            is_correct: verdict.is_correct,
            event: Some(event),
        })
    }

    async fn write(
        &self,
        session: &mut QuestionSession,
        event: &AnswerEvent,
    ) -> Result<(), QuizError> {
        if let Err(err) = self.history.record(event).await {
            warn!(
                subject = %event.subject,
                error = %err,
                "answer not recorded, kept for retry"
            );
            return Err(err.into());
        }
        session.clear_unrecorded();
        debug!(
            subject = %event.subject,
            correct = event.is_correct,
            elapsed_ms = event.elapsed_ms,
            "answer recorded"
        );
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
