//! Coercing an extracted JSON block into a `QuestionRecord`.
//!
//! Accepted encodings:
//! - options under `choices` (preferred) or `options`, as a list (labelled by
//!   position, truncated to four) or as a map keyed by letter (only A-D kept,
//!   always re-ordered A, B, C, D);
//! - the answer under `correct` (preferred) or `answer`, as an index 0-3 or a
//!   single letter with optional trailing punctuation ("b", "C)", "D.");
//! - optional `explanation` and `rationales` (list or letter-keyed map).
//!
//! Missing or invalid required fields are reported, never guessed.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::MalformedQuestionError;
use crate::question::{Label, QuestionRecord};
use crate::repair::repair_json_text;

type Fields = Map<String, Value>;

fn label_prefix_regex() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^\(?[A-Da-d](?:\.(?:\s+|$)|\)\s*)").expect("static label-prefix pattern"))
}

/// Drop a leading "A." / "B)" / "(C)" label so the record owns labelling.
///
/// The `.` form needs whitespace after it so "A.I." stays intact.
pub fn strip_label_prefix(text: &str) -> String {
    let trimmed = text.trim();
    label_prefix_regex().replace(trimmed, "").trim().to_string()
}

/// Normalize an extracted block into a validated question.
#[instrument(target = "exam_quiz::normalize", skip(block), fields(block_len = block.len()))]
pub fn normalize(block: &str) -> Result<QuestionRecord, MalformedQuestionError> {
    let text = repair_json_text(block);
    let value: Value = serde_json::from_str(&text).map_err(|e| {
        warn!(target: "exam_quiz::normalize", error = %e, "block does not parse after repair");
        MalformedQuestionError::Parse(e.to_string())
    })?;

    let fields = top_level_object(value)?;
    let record = normalize_fields(&fields)?;
    debug!(target: "exam_quiz::normalize", correct = %record.correct_label(), "normalized question");
    Ok(record)
}

/// An object, or the first object inside a top-level array.
fn top_level_object(value: Value) -> Result<Fields, MalformedQuestionError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) => items
            .into_iter()
            .find_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .ok_or(MalformedQuestionError::NotAnObject),
        _ => Err(MalformedQuestionError::NotAnObject),
    }
}

fn normalize_fields(fields: &Fields) -> Result<QuestionRecord, MalformedQuestionError> {
    let question = match fields.get("question") {
        None | Some(Value::Null) => return Err(MalformedQuestionError::MissingField("question")),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => {
            return Err(MalformedQuestionError::WrongType { field: "question", expected: "a string" })
        }
    };

    let (choices_field, choices) = first_present(fields, &["choices", "options"])
        .ok_or(MalformedQuestionError::MissingField("choices"))?;
    let options = normalize_choices(choices_field, choices)?;

    let (_, correct) = first_present(fields, &["correct", "answer"])
        .ok_or(MalformedQuestionError::MissingField("correct"))?;
    let correct_label = normalize_correct(correct)?;

    let explanation = match fields.get("explanation") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => {
            return Err(MalformedQuestionError::WrongType { field: "explanation", expected: "a string" })
        }
    };

    let rationales = match fields.get("rationales") {
        None | Some(Value::Null) => Default::default(),
        Some(value) => normalize_rationales(value)?,
    };

    QuestionRecord::new(question, options, correct_label, explanation, rationales)
}

fn first_present<'a>(fields: &'a Fields, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter().find_map(|key| match fields.get(*key) {
        None | Some(Value::Null) => None,
        Some(value) => Some((*key, value)),
    })
}

/// Text of a scalar option value; numbers and booleans are stringified.
fn scalar_text(field: &'static str, value: &Value) -> Result<String, MalformedQuestionError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(MalformedQuestionError::WrongType { field, expected: "text options" }),
    }
}

/// Letter key of a map entry ("A", "b", " C ").
fn key_label(key: &str) -> Option<Label> {
    let mut chars = key.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Label::from_char(c),
        _ => None,
    }
}

fn normalize_choices(field: &'static str, value: &Value) -> Result<[String; 4], MalformedQuestionError> {
    match value {
        Value::Array(items) => {
            if items.len() < 4 {
                return Err(MalformedQuestionError::TooFewOptions { found: items.len() });
            }
            if items.len() > 4 {
                debug!(target: "exam_quiz::normalize", found = items.len(), "truncating options to four");
            }
            let mut options: [String; 4] = Default::default();
            for (slot, item) in options.iter_mut().zip(items) {
                *slot = strip_label_prefix(&scalar_text(field, item)?);
            }
            Ok(options)
        }
        Value::Object(map) => {
            let mut options: [Option<String>; 4] = Default::default();
            for (key, item) in map {
                match key_label(key) {
                    Some(label) if options[label.index()].is_none() => {
                        options[label.index()] = Some(strip_label_prefix(&scalar_text(field, item)?));
                    }
                    Some(label) => {
                        debug!(target: "exam_quiz::normalize", %label, "duplicate option key ignored");
                    }
                    None => {
                        debug!(target: "exam_quiz::normalize", key = %key, "non A-D option key dropped");
                    }
                }
            }
            let found = options.iter().filter(|o| o.is_some()).count();
            match options {
                [Some(a), Some(b), Some(c), Some(d)] => Ok([a, b, c, d]),
                _ => Err(MalformedQuestionError::TooFewOptions { found }),
            }
        }
        _ => Err(MalformedQuestionError::WrongType { field, expected: "a list or a letter-keyed map" }),
    }
}

fn normalize_correct(value: &Value) -> Result<Label, MalformedQuestionError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(Label::from_index)
            .ok_or_else(|| MalformedQuestionError::InvalidAnswer(n.to_string())),
        Value::String(s) => s.parse::<Label>(),
        _ => Err(MalformedQuestionError::WrongType {
            field: "correct",
            expected: "a letter A-D or an index 0-3",
        }),
    }
}

fn rationale_text(value: &Value) -> Result<String, MalformedQuestionError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(MalformedQuestionError::WrongType { field: "rationales", expected: "text entries" }),
    }
}

/// Missing entries default to empty text.
fn normalize_rationales(value: &Value) -> Result<[String; 4], MalformedQuestionError> {
    let mut rationales: [String; 4] = Default::default();
    match value {
        Value::Array(items) => {
            for (slot, item) in rationales.iter_mut().zip(items) {
                *slot = rationale_text(item)?;
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                if let Some(label) = key_label(key) {
                    rationales[label.index()] = rationale_text(item)?;
                }
            }
        }
        _ => {
            return Err(MalformedQuestionError::WrongType {
                field: "rationales",
                expected: "a list or a letter-keyed map",
            })
        }
    }
    Ok(rationales)
}
