//! Locating the JSON payload inside free-form model output.
//!
//! Models wrap the requested JSON in prose ("Here is your question:"), in
//! markdown code fences, or both. Extraction strips the fences and then takes
//! the span from the first `{` to the last `}`. The greedy span tolerates a
//! preamble or postamble sentence around the payload. It is not a parser: a
//! stray `}` in trailing prose or a `{` in leading prose widens the span and
//! the normalizer will then reject the block. That limitation is accepted.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::error::ExtractionError;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // An opening fence may carry a language tag (```json, ```JSON5 ...).
    FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("static fence pattern"))
}

/// Remove triple-backtick fences, keeping what was inside them.
pub fn strip_code_fences(raw: &str) -> String {
    fence_regex().replace_all(raw, "").into_owned()
}

/// Greedy `open`..`close` span, or `None` when the pair does not occur in order.
fn greedy_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Pull the candidate JSON block out of raw model output.
///
/// Objects are preferred; a bare top-level array is accepted when no object
/// span exists.
#[instrument(target = "exam_quiz::extract", skip(raw), fields(raw_len = raw.len()))]
pub fn extract(raw: &str) -> Result<String, ExtractionError> {
    if raw.trim().is_empty() {
        warn!(target: "exam_quiz::extract", "empty model response");
        return Err(ExtractionError::EmptyResponse);
    }

    let stripped = strip_code_fences(raw);
    let block = greedy_span(&stripped, '{', '}').or_else(|| greedy_span(&stripped, '[', ']'));

    match block {
        Some(block) => {
            debug!(target: "exam_quiz::extract", block_len = block.len(), "extracted JSON block");
            Ok(block.to_string())
        }
        None => {
            warn!(target: "exam_quiz::extract", "no JSON-shaped region in model output");
            Err(ExtractionError::NoJsonRegion { raw: raw.to_string() })
        }
    }
}
