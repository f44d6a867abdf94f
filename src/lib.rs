pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod interceptors;
pub mod json_utils;
pub mod normalize;
pub mod prompt;
pub mod question;
pub mod repair;
pub mod session;
pub mod shuffle;
pub mod terminal;
pub mod ui;

// Convenient re-exports
pub use crate::core::{question_from_raw, LowLevelClient, QuestionGenerator};
pub use error::{ExtractionError, GenerationError, MalformedQuestionError, ModelCallError};
pub use prompt::{Difficulty, ExamTrack, QuestionRequest};
pub use question::{Label, QuestionRecord};
pub use session::{AnswerOutcome, HistoryEntry, SessionState};
