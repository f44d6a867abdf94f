//! Instruction text sent to the model for one question.

use rand::Rng;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }

    fn guidance(self) -> &'static str {
        match self {
            Difficulty::Easy => "Test recall of a single well-known concept.",
            Difficulty::Moderate => "Use a short scenario that requires applying a concept.",
            Difficulty::Hard => "Use a nuanced scenario where two options look correct and only one is best.",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" | "medium" => Ok(Self::Moderate),
            "hard" => Ok(Self::Hard),
            _ => Err(format!("Unknown difficulty: '{}'. Supported: easy, moderate, hard", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExamTrack {
    #[default]
    Pmp,
    Capm,
    Dasm,
    PmiAcp,
}

impl ExamTrack {
    pub fn name(self) -> &'static str {
        match self {
            ExamTrack::Pmp => "PMP",
            ExamTrack::Capm => "CAPM",
            ExamTrack::Dasm => "DASM",
            ExamTrack::PmiAcp => "PMI-ACP",
        }
    }
}

impl fmt::Display for ExamTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExamTrack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pmp" => Ok(Self::Pmp),
            "capm" => Ok(Self::Capm),
            "dasm" => Ok(Self::Dasm),
            "pmiacp" | "acp" => Ok(Self::PmiAcp),
            _ => Err(format!("Unknown exam track: '{}'. Supported: pmp, capm, dasm, pmi-acp", s)),
        }
    }
}

/// Shape the model is asked to produce.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Exam Question", description = "One multiple-choice exam question")]
pub struct QuestionSchema {
    /// The question stem
    pub question: String,
    /// Exactly four options keyed by the letters A, B, C and D
    pub choices: BTreeMap<String, String>,
    /// The letter of the single correct option
    pub correct: String,
    /// Why the correct option is correct, without naming its letter
    pub explanation: String,
    /// Optional one-sentence justification per option letter
    pub rationales: Option<BTreeMap<String, String>>,
}

const EXAMPLE_SHAPE: &str = r#"{
  "question": "Question text here",
  "choices": {"A": "option one", "B": "option two", "C": "option three", "D": "option four"},
  "correct": "B",
  "explanation": "Why the correct option is correct.",
  "rationales": {"A": "why A is wrong", "B": "why B is right", "C": "why C is wrong", "D": "why D is wrong"}
}"#;

/// Everything that varies between generation requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub track: ExamTrack,
}

impl QuestionRequest {
    pub fn new(topic: impl Into<String>, difficulty: Difficulty, track: ExamTrack) -> Self {
        Self { topic: topic.into(), difficulty, track }
    }
}

/// Build the prompt with a fresh random nonce.
pub fn build_prompt(request: &QuestionRequest) -> String {
    let nonce: u32 = rand::thread_rng().gen();
    build_prompt_with_nonce(request, &format!("{:08x}", nonce))
}

/// Pure variant of [`build_prompt`]; the nonce only makes requests distinct.
pub fn build_prompt_with_nonce(request: &QuestionRequest, nonce: &str) -> String {
    let track = request.track.name();
    let topic = if request.topic.trim().is_empty() {
        format!("a random {} domain", track)
    } else {
        request.topic.trim().to_string()
    };

    let schema = schema_for!(QuestionSchema);
    let schema_json = serde_json::to_string_pretty(&schema)
        .unwrap_or_else(|_| "Schema serialization failed".to_string());

    format!(
        "Generate one {track} exam-style multiple choice question.\n\
         Topic: {topic}.\n\
         Difficulty: {difficulty}. {guidance}\n\
         Request id: {nonce}\n\n\
         Write the output as strict JSON ONLY, with exactly this shape:\n\
         {example}\n\n\
         Rules:\n\
         - Provide exactly four options, keyed A, B, C and D, without letter prefixes in the option text.\n\
         - `correct` is just the letter A-D of the single best option.\n\
         - Make the distractors plausible and the explanation concise and accurate.\n\
         - Do not reveal or mention the correct letter inside the explanation or the rationales.\n\n\
         ## Response Format\n\
         The JSON must match this schema:\n\
         ```json\n{schema}\n```",
        track = track,
        topic = topic,
        difficulty = request.difficulty,
        guidance = request.difficulty.guidance(),
        nonce = nonce,
        example = EXAMPLE_SHAPE,
        schema = schema_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_topic_uses_random_domain() {
        let prompt = build_prompt_with_nonce(&QuestionRequest::new("  ", Difficulty::Easy, ExamTrack::Capm), "n1");
        assert!(prompt.contains("Topic: a random CAPM domain."));
    }

    #[test]
    fn same_inputs_same_prompt() {
        let request = QuestionRequest::new("Risk", Difficulty::Hard, ExamTrack::Pmp);
        assert_eq!(build_prompt_with_nonce(&request, "x"), build_prompt_with_nonce(&request, "x"));
    }

    #[test]
    fn track_and_difficulty_parse_loosely() {
        assert_eq!("PMI-ACP".parse::<ExamTrack>(), Ok(ExamTrack::PmiAcp));
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Moderate));
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
