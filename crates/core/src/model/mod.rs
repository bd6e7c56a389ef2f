mod answer;
mod history;
mod ids;
mod question;

pub use ids::CharacterId;

pub use answer::{AnswerEngine, AnswerError, AnswerState, Feedback, OptionPresentation, Verdict};
pub use history::{AnswerEvent, CharacterScore, CharacterScores, HistorySnapshot};
pub use question::{Question, QuestionDraft, QuestionError, option_letter};
