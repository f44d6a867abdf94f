//! Random re-ordering of answer options.
//!
//! Options move as whole units: text, rationale and the "is correct" mark all
//! follow the content to its new position, and labels A-D are then reassigned
//! by the new order. Correctness is tracked by the source position of the
//! content, so duplicated option texts cannot confuse it.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::question::{Label, QuestionRecord};

/// Shuffle with the thread-local RNG.
pub fn shuffle(question: QuestionRecord) -> QuestionRecord {
    shuffle_with(question, &mut rand::thread_rng())
}

/// Shuffle with a caller-supplied RNG (seeded RNGs give reproducible orders).
pub fn shuffle_with<R: Rng + ?Sized>(question: QuestionRecord, rng: &mut R) -> QuestionRecord {
    let mut order: [usize; 4] = [0, 1, 2, 3];
    order.shuffle(rng);
    permute(question, order)
}

/// `order[new_position] = old_position`.
pub(crate) fn permute(question: QuestionRecord, order: [usize; 4]) -> QuestionRecord {
    let (options, rationales, correct, prompt_text, explanation) = question.into_parts();

    let mut new_options: [String; 4] = Default::default();
    let mut new_rationales: [String; 4] = Default::default();
    let mut new_correct = correct;
    for (new_pos, &old_pos) in order.iter().enumerate() {
        new_options[new_pos] = options[old_pos].clone();
        new_rationales[new_pos] = rationales[old_pos].clone();
        if old_pos == correct.index() {
            if let Some(label) = Label::from_index(new_pos) {
                new_correct = label;
            }
        }
    }
    trace!(target: "exam_quiz::shuffle", ?order, from = %correct, to = %new_correct, "shuffled options");

    QuestionRecord::from_validated(prompt_text, new_options, new_correct, explanation, new_rationales)
}
