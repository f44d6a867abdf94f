use thiserror::Error;

use crate::question::Label;

/// Any failure of a single question-generation attempt.
///
/// Every variant leaves the session untouched; the user may simply retry.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Model call failed: {0}")]
    ModelCall(#[from] ModelCallError),
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Malformed question: {0}")]
    Malformed(#[from] MalformedQuestionError),
}

impl GenerationError {
    /// Short message suitable for showing to the person taking the quiz.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::ModelCall(_) => "Could not reach the question generator.".to_string(),
            GenerationError::Extraction(_) => "Could not parse model output.".to_string(),
            GenerationError::Malformed(e) => format!("Generated question was incomplete: {}", e),
        }
    }

    /// Raw model text, when the failure happened after a response was received.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            GenerationError::Extraction(ExtractionError::NoJsonRegion { raw }) => Some(raw.as_str()),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ModelCallError {
    #[error("Groq API error: {0}")]
    Groq(ChatApiError),
    #[error("DeepSeek API error: {0}")]
    DeepSeek(ChatApiError),
    #[error("primary model failed ({primary}); fallback model failed ({fallback})")]
    Fallback {
        primary: Box<ModelCallError>,
        fallback: Box<ModelCallError>,
    },
    #[error("API key missing: set {0}")]
    MissingApiKey(&'static str),
    #[error("Mock error: {0}")]
    Mock(String),
}

/// Failure modes shared by OpenAI-compatible chat-completions endpoints.
#[derive(Error, Debug)]
pub enum ChatApiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
    #[error("No choices in response")]
    EmptyChoices,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("no JSON object found in model output")]
    NoJsonRegion { raw: String },
}

/// Structurally parseable (or nearly so) output that violates the question schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedQuestionError {
    #[error("not valid JSON: {0}")]
    Parse(String),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("question text is empty")]
    EmptyQuestion,
    #[error("expected 4 options, found {found}")]
    TooFewOptions { found: usize },
    #[error("option {0} is empty")]
    EmptyOption(Label),
    #[error("correct answer `{0}` is not one of A-D")]
    InvalidAnswer(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
