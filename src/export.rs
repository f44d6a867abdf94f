//! Flat tabular view of a session's history, plus CSV serialization.

use serde::Serialize;
use std::io::Write;

use crate::error::ExportError;
use crate::question::Label;
use crate::session::HistoryEntry;

/// One answered question as a flat record. Field names are the column headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub topic: String,
    pub difficulty: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub chosen: String,
    pub correct: String,
    pub is_correct: bool,
    /// Seconds, rounded to a tenth; empty when not captured.
    pub elapsed_seconds: Option<f64>,
    pub explanation: String,
}

impl From<&HistoryEntry> for ExportRow {
    fn from(entry: &HistoryEntry) -> Self {
        let q = &entry.question;
        Self {
            topic: entry.topic.clone(),
            difficulty: entry.difficulty.to_string(),
            question: q.prompt_text().to_string(),
            option_a: q.option(Label::A).to_string(),
            option_b: q.option(Label::B).to_string(),
            option_c: q.option(Label::C).to_string(),
            option_d: q.option(Label::D).to_string(),
            chosen: entry.chosen.to_string(),
            correct: q.correct_label().to_string(),
            is_correct: entry.is_correct,
            elapsed_seconds: entry.elapsed.map(|d| (d.as_secs_f64() * 10.0).round() / 10.0),
            explanation: entry.explanation().to_string(),
        }
    }
}

/// One row per history entry, in insertion order.
pub fn to_rows(history: &[HistoryEntry]) -> Vec<ExportRow> {
    history.iter().map(ExportRow::from).collect()
}

const HEADERS: [&str; 12] = [
    "topic",
    "difficulty",
    "question",
    "option_a",
    "option_b",
    "option_c",
    "option_d",
    "chosen",
    "correct",
    "is_correct",
    "elapsed_seconds",
    "explanation",
];

/// Write `rows` as CSV with a header line (header only when `rows` is empty).
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(buf)
}
