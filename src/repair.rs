//! Best-effort textual repair applied before structural parsing.
//!
//! Exactly three stages, applied cumulatively in this order:
//! 1. commas directly before a closing `}` or `]` are dropped;
//! 2. typographic ("smart") quotes become straight quotes;
//! 3. if the block contains single quotes and no double quotes at all, single
//!    quotes become double quotes.
//!
//! The text is re-parsed after every stage and the first parseable result is
//! returned, so a later stage never touches text an earlier one already fixed.
//! Nothing else is attempted. Text that already parses is returned untouched.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

fn trailing_comma_regex() -> &'static Regex {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    TRAILING.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("static trailing-comma pattern"))
}

fn parses(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

pub fn normalize_smart_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            other => other,
        })
        .collect()
}

pub fn strip_trailing_commas(text: &str) -> String {
    trailing_comma_regex().replace_all(text, "$1").into_owned()
}

/// Rewrites `'` to `"` only for blocks written entirely in single quotes.
pub fn single_to_double_quotes(text: &str) -> Option<String> {
    (text.contains('\'') && !text.contains('"')).then(|| text.replace('\'', "\""))
}

/// Apply the repair pass; borrowed when the input already parses.
pub fn repair_json_text(block: &str) -> Cow<'_, str> {
    if parses(block) {
        return Cow::Borrowed(block);
    }

    let mut repaired = strip_trailing_commas(block);
    if parses(&repaired) {
        debug!(target: "exam_quiz::normalize", stage = "trailing_commas", "applied text repair");
        return Cow::Owned(repaired);
    }

    repaired = normalize_smart_quotes(&repaired);
    if parses(&repaired) {
        debug!(target: "exam_quiz::normalize", stage = "smart_quotes", "applied text repair");
        return Cow::Owned(repaired);
    }

    if let Some(rewritten) = single_to_double_quotes(&repaired) {
        repaired = rewritten;
    }
    debug!(target: "exam_quiz::normalize", stage = "single_quotes", parses = parses(&repaired), "applied text repair");
    Cow::Owned(repaired)
}
