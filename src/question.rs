//! Canonical question model.
//!
//! A `QuestionRecord` always carries exactly four options labelled A-D in
//! presentation order. The fixed-size arrays make the four-option invariant
//! structural: there is no way to build a record with a missing or duplicated label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MalformedQuestionError;

/// One of the four fixed option identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
    C,
    D,
}

impl Label {
    pub const ALL: [Label; 4] = [Label::A, Label::B, Label::C, Label::D];

    /// Zero-based position of this label (A = 0).
    pub fn index(self) -> usize {
        match self {
            Label::A => 0,
            Label::B => 1,
            Label::C => 2,
            Label::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_char(self) -> char {
        match self {
            Label::A => 'A',
            Label::B => 'B',
            Label::C => 'C',
            Label::D => 'D',
        }
    }

    /// Case-insensitive single-letter match.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Label::A),
            'B' => Some(Label::B),
            'C' => Some(Label::C),
            'D' => Some(Label::D),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Label {
    type Err = MalformedQuestionError;

    /// Accepts "b", "B", "B.", "b)" and similar; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_end_matches(|c: char| matches!(c, '.' | ')' | ':' | ','))
            .trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Label::from_char(c).ok_or_else(|| MalformedQuestionError::InvalidAnswer(s.to_string()))
            }
            _ => Err(MalformedQuestionError::InvalidAnswer(s.to_string())),
        }
    }
}

/// A validated four-option question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    prompt_text: String,
    options: [String; 4],
    correct_label: Label,
    explanation: String,
    rationales: [String; 4],
}

impl QuestionRecord {
    /// Build a record, rejecting an empty stem or empty option text.
    pub fn new(
        prompt_text: impl Into<String>,
        options: [String; 4],
        correct_label: Label,
        explanation: impl Into<String>,
        rationales: [String; 4],
    ) -> Result<Self, MalformedQuestionError> {
        let prompt_text = prompt_text.into().trim().to_string();
        if prompt_text.is_empty() {
            return Err(MalformedQuestionError::EmptyQuestion);
        }
        for label in Label::ALL {
            if options[label.index()].trim().is_empty() {
                return Err(MalformedQuestionError::EmptyOption(label));
            }
        }
        Ok(Self {
            prompt_text,
            options,
            correct_label,
            explanation: explanation.into(),
            rationales,
        })
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn option(&self, label: Label) -> &str {
        &self.options[label.index()]
    }

    /// Options in presentation order.
    pub fn options(&self) -> impl Iterator<Item = (Label, &str)> + '_ {
        Label::ALL.into_iter().map(move |label| (label, self.option(label)))
    }

    pub fn correct_label(&self) -> Label {
        self.correct_label
    }

    pub fn correct_text(&self) -> &str {
        self.option(self.correct_label)
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Per-option rationale; empty when the model supplied none.
    pub fn rationale(&self, label: Label) -> &str {
        &self.rationales[label.index()]
    }

    pub fn is_correct(&self, label: Label) -> bool {
        label == self.correct_label
    }

    /// Reassemble a record whose parts came from an already validated one.
    pub(crate) fn from_validated(
        prompt_text: String,
        options: [String; 4],
        correct_label: Label,
        explanation: String,
        rationales: [String; 4],
    ) -> Self {
        Self { prompt_text, options, correct_label, explanation, rationales }
    }

    pub(crate) fn into_parts(self) -> ([String; 4], [String; 4], Label, String, String) {
        (self.options, self.rationales, self.correct_label, self.prompt_text, self.explanation)
    }
}
