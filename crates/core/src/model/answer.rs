use std::fmt;

use thiserror::Error;

use crate::model::question::{Question, option_letter};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("question has not been answered yet")]
    NotAnswered,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a single question. `Answered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Answered { index: usize },
}

impl AnswerState {
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, AnswerState::Answered { .. })
    }

    #[must_use]
    pub fn selected_index(self) -> Option<usize> {
        match self {
            AnswerState::Unanswered => None,
            AnswerState::Answered { index } => Some(index),
        }
    }
}

/// Result of the lock-in transition, handed to the host to build an answer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub index: usize,
    pub is_correct: bool,
}

/// How a single option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionPresentation {
    /// Pre-lock, not focused.
    Neutral,
    /// Pre-lock, currently focused.
    SelectedPendingLock,
    /// Post-lock, the correct option.
    Correct,
    /// Post-lock, the chosen option when it was wrong.
    IncorrectSelected,
    /// Post-lock, every other option.
    Dimmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => f.write_str("✓ Correct!"),
            Feedback::Incorrect => f.write_str("✗ Incorrect"),
        }
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Single-shot answering for one question.
///
/// The first `select` locks the question in; every later `select` is a no-op.
/// A new question gets a new engine.
///
/// # Examples
///
/// ```
/// # use quiz_core::model::{AnswerEngine, QuestionDraft};
/// let question = QuestionDraft::new("Which is 'a'?", ["あ", "い", "う"], 0).validate()?;
/// let mut engine = AnswerEngine::new(question);
///
/// let verdict = engine.select(1)?.expect("first selection locks in");
/// assert!(!verdict.is_correct);
///
/// // Later selections are ignored.
/// assert_eq!(engine.select(0)?, None);
/// assert!(!engine.is_correct()?);
/// # Ok::<(), quiz_core::Error>(())
/// ```
///
/// An engine belongs to one question view and is not `Clone`, so a lock-in
/// cannot be forked into a second, unanswered copy:
///
/// ```compile_fail
/// use quiz_core::model::{AnswerEngine, QuestionDraft};
///
/// let question = QuestionDraft::new("Q", ["a", "b"], 0).validate().unwrap();
/// let engine = AnswerEngine::new(question);
/// let _copy = engine.clone();
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct AnswerEngine {
    question: Question,
    state: AnswerState,
    focused: Option<usize>,
}

impl AnswerEngine {
    #[must_use]
    pub fn new(question: Question) -> Self {
        Self {
            question,
            state: AnswerState::Unanswered,
            focused: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn state(&self) -> AnswerState {
        self.state
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected_index()
    }

    /// Lock in `index` as the answer.
    ///
    /// Returns `Some(verdict)` for the first selection and `None` afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OptionOutOfRange` for an index that is not an
    /// option, before or after lock-in. State is left untouched.
    pub fn select(&mut self, index: usize) -> Result<Option<Verdict>, AnswerError> {
        self.check_index(index)?;
        if self.is_locked() {
            return Ok(None);
        }

        self.state = AnswerState::Answered { index };
        self.focused = None;
        Ok(Some(Verdict {
            index,
            is_correct: index == self.question.correct_index(),
        }))
    }

    /// Highlight `index` without locking it in. Ignored once answered.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OptionOutOfRange` for an index that is not an option.
    pub fn focus(&mut self, index: usize) -> Result<(), AnswerError> {
        self.check_index(index)?;
        if !self.is_locked() {
            self.focused = Some(index);
        }
        Ok(())
    }

    /// Whether the locked-in answer is the correct option.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::NotAnswered` before lock-in.
    pub fn is_correct(&self) -> Result<bool, AnswerError> {
        self.selected_index()
            .map(|index| index == self.question.correct_index())
            .ok_or(AnswerError::NotAnswered)
    }

    /// Presentation of the option at `index` for the current state.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OptionOutOfRange` for an index that is not an option.
    pub fn option_presentation(&self, index: usize) -> Result<OptionPresentation, AnswerError> {
        self.check_index(index)?;
        let correct = self.question.correct_index();

        let presentation = match self.state {
            AnswerState::Unanswered if self.focused == Some(index) => {
                OptionPresentation::SelectedPendingLock
            }
            AnswerState::Unanswered => OptionPresentation::Neutral,
            AnswerState::Answered { .. } if index == correct => OptionPresentation::Correct,
            AnswerState::Answered { index: selected } if selected == index => {
                OptionPresentation::IncorrectSelected
            }
            AnswerState::Answered { .. } => OptionPresentation::Dimmed,
        };
        Ok(presentation)
    }

    /// Presentation of every option, in option order.
    #[must_use]
    pub fn presentations(&self) -> Vec<OptionPresentation> {
        (0..self.question.option_count())
            .filter_map(|index| self.option_presentation(index).ok())
            .collect()
    }

    /// Whether `index` is the locked-in answer.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index() == Some(index)
    }

    /// Per-option flag marking the correct option.
    #[must_use]
    pub fn correct_flags(&self) -> Vec<bool> {
        let correct = self.question.correct_index();
        (0..self.question.option_count())
            .map(|index| index == correct)
            .collect()
    }

    #[must_use]
    pub fn option_letter(&self, index: usize) -> Option<char> {
        (index < self.question.option_count())
            .then(|| option_letter(index))
            .flatten()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.is_correct().ok().map(|correct| {
            if correct {
                Feedback::Correct
            } else {
                Feedback::Incorrect
            }
        })
    }

    #[must_use]
    pub fn is_explanation_visible(&self) -> bool {
        self.is_locked() && self.question.explanation().is_some()
    }

    /// Explanation text, only once the question is answered.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        if self.is_locked() {
            self.question.explanation()
        } else {
            None
        }
    }

    fn check_index(&self, index: usize) -> Result<(), AnswerError> {
        let len = self.question.option_count();
        if index < len {
            Ok(())
        } else {
            Err(AnswerError::OptionOutOfRange { index, len })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    fn kana_engine() -> AnswerEngine {
        let question = QuestionDraft::new("Which is 'a'?", ["あ", "い", "う"], 0)
            .with_explanation("あ (a) is the first hiragana character.")
            .validate()
            .unwrap();
        AnswerEngine::new(question)
    }

    #[test]
    fn fresh_engine_shows_nothing_evaluated() {
        let engine = kana_engine();

        assert_eq!(engine.state(), AnswerState::Unanswered);
        assert!(!engine.is_explanation_visible());
        assert_eq!(engine.explanation(), None);
        assert_eq!(engine.feedback(), None);
        assert!(
            engine
                .presentations()
                .iter()
                .all(|p| *p == OptionPresentation::Neutral)
        );
    }

    #[test]
    fn is_correct_before_lock_is_an_error() {
        let engine = kana_engine();
        assert_eq!(engine.is_correct(), Err(AnswerError::NotAnswered));
    }

    #[test]
    fn selecting_the_correct_option() {
        let mut engine = kana_engine();
        let verdict = engine.select(0).unwrap().unwrap();

        assert_eq!(verdict, Verdict { index: 0, is_correct: true });
        assert_eq!(engine.is_correct(), Ok(true));
        assert_eq!(engine.correct_flags(), vec![true, false, false]);
        assert!(engine.is_selected(0));
        assert_eq!(engine.feedback(), Some(Feedback::Correct));
    }

    #[test]
    fn selecting_a_wrong_option() {
        let mut engine = kana_engine();
        let verdict = engine.select(1).unwrap().unwrap();

        assert!(!verdict.is_correct);
        assert_eq!(engine.is_correct(), Ok(false));
        assert_eq!(engine.feedback(), Some(Feedback::Incorrect));
        assert_eq!(
            engine.presentations(),
            vec![
                OptionPresentation::Correct,
                OptionPresentation::IncorrectSelected,
                OptionPresentation::Dimmed,
            ]
        );
    }

    #[test]
    fn correct_choice_dims_the_rest() {
        let mut engine = kana_engine();
        engine.select(0).unwrap();
        assert_eq!(
            engine.presentations(),
            vec![
                OptionPresentation::Correct,
                OptionPresentation::Dimmed,
                OptionPresentation::Dimmed,
            ]
        );
    }

    #[test]
    fn first_selection_wins() {
        let mut engine = kana_engine();
        engine.select(2).unwrap();

        for index in [0, 1, 2, 0, 0] {
            assert_eq!(engine.select(index).unwrap(), None);
        }

        assert_eq!(engine.selected_index(), Some(2));
        assert_eq!(engine.is_correct(), Ok(false));
    }

    #[test]
    fn out_of_range_selection_leaves_state_alone() {
        let mut engine = kana_engine();
        let err = engine.select(3).unwrap_err();
        assert_eq!(err, AnswerError::OptionOutOfRange { index: 3, len: 3 });
        assert_eq!(engine.state(), AnswerState::Unanswered);

        engine.select(1).unwrap();
        assert!(engine.select(9).is_err());
        assert_eq!(engine.selected_index(), Some(1));
    }

    #[test]
    fn explanation_appears_only_after_lock() {
        let mut engine = kana_engine();
        engine.select(1).unwrap();
        assert!(engine.is_explanation_visible());
        assert_eq!(
            engine.explanation(),
            Some("あ (a) is the first hiragana character.")
        );
    }

    #[test]
    fn no_explanation_means_never_visible() {
        let question = QuestionDraft::new("Q", ["a", "b"], 1).validate().unwrap();
        let mut engine = AnswerEngine::new(question);
        engine.select(1).unwrap();
        assert!(!engine.is_explanation_visible());
    }

    #[test]
    fn focus_highlights_without_locking() {
        let mut engine = kana_engine();
        engine.focus(2).unwrap();

        assert!(!engine.is_locked());
        assert_eq!(
            engine.option_presentation(2),
            Ok(OptionPresentation::SelectedPendingLock)
        );
        assert_eq!(engine.option_presentation(0), Ok(OptionPresentation::Neutral));

        engine.select(1).unwrap();
        engine.focus(0).unwrap();
        assert_eq!(engine.option_presentation(2), Ok(OptionPresentation::Dimmed));
    }

    #[test]
    fn option_letters_are_bounded_by_options() {
        let engine = kana_engine();
        assert_eq!(engine.option_letter(1), Some('B'));
        assert_eq!(engine.option_letter(3), None);
    }

    #[test]
    fn feedback_text() {
        assert_eq!(Feedback::Correct.to_string(), "✓ Correct!");
        assert_eq!(Feedback::Incorrect.to_string(), "✗ Incorrect");
    }
}
