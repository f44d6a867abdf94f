mod test_utils;

use exam_quiz::session::{IgnoredReason, SessionPhase};
use exam_quiz::{AnswerOutcome, Difficulty, Label, SessionState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::test_utils::{answered_session, sample_question};

#[test]
fn correct_answer_scores_once() {
    let mut session = SessionState::new();
    session.register_question(sample_question(Label::C), "Integration", Difficulty::Easy);

    let first = session.register_answer(Label::C);
    assert_eq!(first, AnswerOutcome::Recorded { is_correct: true, correct_label: Label::C });
    assert_eq!((session.score(), session.total(), session.history().len()), (1, 1, 1));

    let second = session.register_answer(Label::A);
    assert_eq!(second, AnswerOutcome::Ignored(IgnoredReason::AlreadyAnswered));
    assert_eq!((session.score(), session.total(), session.history().len()), (1, 1, 1));
}

#[test]
fn repeated_same_answer_counts_once() {
    let mut session = SessionState::new();
    session.register_question(sample_question(Label::B), "Risk", Difficulty::Hard);
    session.register_answer(Label::D);
    session.register_answer(Label::D);
    assert_eq!(session.total(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn answer_without_question_is_ignored() {
    let mut session = SessionState::new();
    assert_eq!(session.register_answer(Label::A), AnswerOutcome::Ignored(IgnoredReason::NoQuestion));
    assert_eq!(session.total(), 0);
    assert!(session.history().is_empty());
}

#[test]
fn phases_follow_the_cycle() {
    let mut session = SessionState::new();
    assert_eq!(session.phase(), SessionPhase::NoQuestion);

    session.register_question(sample_question(Label::A), "Scope", Difficulty::Moderate);
    assert_eq!(session.phase(), SessionPhase::QuestionPending);

    session.register_answer(Label::A);
    assert_eq!(session.phase(), SessionPhase::QuestionAnswered);

    session.register_question(sample_question(Label::B), "Scope", Difficulty::Moderate);
    assert_eq!(session.phase(), SessionPhase::QuestionPending);
    assert!(session.register_answer(Label::B).is_recorded());
    assert_eq!(session.total(), 2);

    session.reset();
    assert_eq!(session.phase(), SessionPhase::NoQuestion);
}

#[test]
fn reset_clears_everything() {
    let mut session = answered_session(&[(Label::A, Label::A), (Label::B, Label::C)]);
    session.reset();
    assert_eq!((session.score(), session.total()), (0, 0));
    assert!(session.history().is_empty());
    assert!(session.current_question().is_none());
    assert!(!session.is_answered());
    assert_eq!(session.score_percent(), 0.0);
}

#[test]
fn history_entry_snapshots_the_answer() {
    let mut session = SessionState::new();
    session.register_question(sample_question(Label::D), "Closing", Difficulty::Hard);
    session.register_answer(Label::B);

    let entry = &session.history()[0];
    assert_eq!(entry.topic, "Closing");
    assert_eq!(entry.difficulty, Difficulty::Hard);
    assert_eq!(entry.chosen, Label::B);
    assert_eq!(entry.correct_label(), Label::D);
    assert!(!entry.is_correct);
    assert!(entry.elapsed.is_some());
    assert_eq!(entry.explanation(), "Chartering happens first.");
}

#[test]
fn score_never_exceeds_total() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = SessionState::new();
    for _ in 0..500 {
        match rng.gen_range(0..3) {
            0 => {
                let correct = Label::ALL[rng.gen_range(0..4)];
                session.register_question(sample_question(correct), "t", Difficulty::Easy);
            }
            _ => {
                session.register_answer(Label::ALL[rng.gen_range(0..4)]);
            }
        }
        assert!(session.score() <= session.total());
        assert_eq!(session.history().len(), session.total() as usize);
    }
}

#[test]
fn score_percent_reflects_history() {
    let session = answered_session(&[(Label::A, Label::A), (Label::B, Label::B), (Label::C, Label::A), (Label::D, Label::D)]);
    assert_eq!(session.score(), 3);
    assert_eq!(session.total(), 4);
    assert!((session.score_percent() - 75.0).abs() < f64::EPSILON);
}
