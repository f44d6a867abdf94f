#![allow(dead_code)]

use exam_quiz::{Difficulty, Label, QuestionRecord, SessionState};

/// Valid model output in the list + index encoding.
pub const LIST_BLOCK: &str =
    r#"{"question":"Q1","choices":["Opt1","Opt2","Opt3","Opt4"],"answer":1,"explanation":"E"}"#;

pub fn texts(options: [&str; 4]) -> [String; 4] {
    options.map(str::to_string)
}

pub fn sample_question(correct: Label) -> QuestionRecord {
    QuestionRecord::new(
        "Which process produces the project charter?",
        texts(["Develop Project Charter", "Plan Scope Management", "Define Activities", "Close Project"]),
        correct,
        "Chartering happens first.",
        texts(["Right process.", "Later process.", "Schedule process.", "Final process."]),
    )
    .expect("sample question is valid")
}

/// Session with `answers.len()` answered questions; each pair is (correct, chosen).
pub fn answered_session(answers: &[(Label, Label)]) -> SessionState {
    let mut session = SessionState::new();
    for (i, (correct, chosen)) in answers.iter().enumerate() {
        session.register_question(sample_question(*correct), format!("topic {}", i), Difficulty::Moderate);
        session.register_answer(*chosen);
    }
    session
}
