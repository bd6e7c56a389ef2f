//! Quiz files: `{ "questions": [ { "prompt", "options", "answer", ... } ] }`.

use std::path::Path;

use quiz_core::model::{Question, QuestionDraft};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizFile {
    pub questions: Vec<QuestionDraft>,
}

/// Parse and validate every question in a quiz file body.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed JSON, `LoadError::Empty` when the
/// file lists no questions and `LoadError::InvalidQuestion` for the first
/// question that fails validation (1-based position).
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, LoadError> {
    let file: QuizFile = serde_json::from_str(raw)?;
    if file.questions.is_empty() {
        return Err(LoadError::Empty);
    }

    file.questions
        .into_iter()
        .enumerate()
        .map(|(i, draft)| {
            draft.validate().map_err(|source| LoadError::InvalidQuestion {
                position: i + 1,
                source,
            })
        })
        .collect()
}

/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, otherwise as `parse_questions`.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let questions = parse_questions(&raw)?;
    tracing::debug!(path = %path.display(), count = questions.len(), "quiz file loaded");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;

    #[test]
    fn parses_questions_in_order() {
        let raw = r#"{
            "questions": [
                { "prompt": "Which is 'a'?", "options": ["あ", "い"], "answer": 0 },
                { "prompt": "Which is 'ki'?", "options": ["か", "き"], "answer": 1,
                  "explanation": "き is ki.", "subject": "き" }
            ]
        }"#;

        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].explanation(), Some("き is ki."));
    }

    #[test]
    fn reports_position_of_invalid_question() {
        let raw = r#"{ "questions": [
            { "prompt": "ok", "options": ["a", "b"], "answer": 1 },
            { "prompt": "bad", "options": ["a", "b"], "answer": 5 }
        ] }"#;

        let err = parse_questions(raw).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidQuestion {
                position: 2,
                source: QuestionError::AnswerOutOfRange { index: 5, len: 2 }
            }
        ));
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = parse_questions(r#"{ "questions": [] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_questions("{"), Err(LoadError::Parse(_))));
    }
}
