#![forbid(unsafe_code)]

pub mod dashboard;
pub mod error;
pub mod history;
pub mod loader;
pub mod question_session;
pub mod quiz_service;
pub mod stats_service;

pub use quiz_core::Clock;

pub use dashboard::{DashboardVm, StatCardVm, StatRowVm};
pub use error::{HistoryError, LoadError, QuizError};
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use loader::{QuizFile, load_questions, parse_questions};
pub use question_session::QuestionSession;
pub use quiz_service::{AnswerOutcome, QuizService};
pub use stats_service::StatsService;
