//! The display/input collaborator and the generate -> answer -> feedback cycle.

use tracing::debug;

use crate::core::{LowLevelClient, QuestionGenerator};
use crate::error::GenerationError;
use crate::prompt::QuestionRequest;
use crate::question::{Label, QuestionRecord};
use crate::session::{AnswerOutcome, SessionState};

/// Anything that can show a question, collect one choice and show feedback.
pub trait QuizUi {
    fn show_question(&mut self, question: &QuestionRecord, session: &SessionState);

    /// The next selection event; `None` when the user abandons the question.
    fn collect_choice(&mut self) -> Option<Label>;

    fn show_feedback(&mut self, outcome: &AnswerOutcome, question: &QuestionRecord, session: &SessionState);

    fn show_error(&mut self, error: &GenerationError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Answered { is_correct: bool },
    Abandoned,
}

/// One full round against `session`.
///
/// A failed generation is shown through `ui`, returned, and leaves `session`
/// as it was. Exactly one selection is collected per round; repeated answers
/// to the same question are absorbed by `SessionState::register_answer`.
pub async fn run_round<C, U>(
    generator: &QuestionGenerator<C>,
    session: &mut SessionState,
    request: &QuestionRequest,
    ui: &mut U,
) -> Result<RoundOutcome, GenerationError>
where
    C: LowLevelClient,
    U: QuizUi + ?Sized,
{
    if let Err(e) = generator.generate_into(session, request).await {
        ui.show_error(&e);
        return Err(e);
    }

    let Some(question) = session.current_question().cloned() else {
        return Ok(RoundOutcome::Abandoned);
    };
    ui.show_question(&question, session);

    let Some(label) = ui.collect_choice() else {
        debug!(target: "exam_quiz::session", "question left unanswered");
        return Ok(RoundOutcome::Abandoned);
    };
    let outcome = session.register_answer(label);
    ui.show_feedback(&outcome, &question, session);
    match outcome {
        AnswerOutcome::Recorded { is_correct, .. } => Ok(RoundOutcome::Answered { is_correct }),
        AnswerOutcome::Ignored(_) => Ok(RoundOutcome::Abandoned),
    }
}
