//! Score and history for one quiz session.
//!
//! The `answered` flag is the only guard against double scoring: UI layers may
//! deliver the same selection several times (redraws, repeated clicks) and
//! every delivery after the first is ignored until a new question arrives.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use crate::prompt::Difficulty;
use crate::question::{Label, QuestionRecord};

/// Immutable record of one answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question: QuestionRecord,
    pub chosen: Label,
    pub is_correct: bool,
    pub elapsed: Option<Duration>,
    pub answered_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn correct_label(&self) -> Label {
        self.question.correct_label()
    }

    pub fn explanation(&self) -> &str {
        self.question.explanation()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoQuestion,
    QuestionPending,
    QuestionAnswered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    NoQuestion,
    AlreadyAnswered,
}

/// What a call to [`SessionState::register_answer`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded { is_correct: bool, correct_label: Label },
    Ignored(IgnoredReason),
}

impl AnswerOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AnswerOutcome::Recorded { .. })
    }
}

#[derive(Debug, Clone)]
struct CurrentQuestion {
    question: QuestionRecord,
    topic: String,
    difficulty: Difficulty,
    shown_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Option<CurrentQuestion>,
    answered: bool,
    score: u32,
    total: u32,
    history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `question` current and start its clock.
    #[instrument(target = "exam_quiz::session", skip(self, question, topic), fields(correct = %question.correct_label()))]
    pub fn register_question(&mut self, question: QuestionRecord, topic: impl Into<String>, difficulty: Difficulty) {
        self.current = Some(CurrentQuestion {
            question,
            topic: topic.into(),
            difficulty,
            shown_at: Instant::now(),
        });
        self.answered = false;
        debug!(target: "exam_quiz::session", "question registered");
    }

    /// Grade the first selection for the current question; later calls are no-ops.
    #[instrument(target = "exam_quiz::session", skip(self))]
    pub fn register_answer(&mut self, label: Label) -> AnswerOutcome {
        if self.answered {
            debug!(target: "exam_quiz::session", "answer already registered; ignoring");
            return AnswerOutcome::Ignored(IgnoredReason::AlreadyAnswered);
        }
        let Some(current) = self.current.as_ref() else {
            debug!(target: "exam_quiz::session", "no current question; ignoring");
            return AnswerOutcome::Ignored(IgnoredReason::NoQuestion);
        };

        let is_correct = current.question.is_correct(label);
        let correct_label = current.question.correct_label();
        let entry = HistoryEntry {
            topic: current.topic.clone(),
            difficulty: current.difficulty,
            question: current.question.clone(),
            chosen: label,
            is_correct,
            elapsed: Some(current.shown_at.elapsed()),
            answered_at: Utc::now(),
        };

        self.answered = true;
        self.total += 1;
        if is_correct {
            self.score += 1;
        }
        self.history.push(entry);

        info!(target: "exam_quiz::session", is_correct, score = self.score, total = self.total, "answer recorded");
        AnswerOutcome::Recorded { is_correct, correct_label }
    }

    /// Back to an empty session, history included.
    pub fn reset(&mut self) {
        *self = Self::default();
        info!(target: "exam_quiz::session", "session reset");
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.current, self.answered) {
            (None, _) => SessionPhase::NoQuestion,
            (Some(_), false) => SessionPhase::QuestionPending,
            (Some(_), true) => SessionPhase::QuestionAnswered,
        }
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.current.as_ref().map(|c| &c.question)
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage correct, 0 for an empty session.
    pub fn score_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.score) * 100.0 / f64::from(self.total)
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}
