//! Generation pipeline: wraps a low-level model client and turns one request
//! into a validated, shuffled question.
//!
//! prompt -> `ask_raw` -> extract -> normalize -> shuffle
//!
//! Any failure aborts the whole attempt. `generate_into` only touches the
//! session once a complete question exists.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{GenerationError, ModelCallError};
use crate::interceptors::Interceptor;
use crate::prompt::{build_prompt, QuestionRequest};
use crate::question::QuestionRecord;
use crate::session::SessionState;
use crate::{json_utils, normalize, shuffle};

/// Low-level model client abstraction.
///
/// Implementors execute a prompt and return the raw model text. Retrying with
/// another model, timeouts and transport concerns all live behind this trait.
#[async_trait]
pub trait LowLevelClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn ask_raw(&self, prompt: String) -> Result<String, ModelCallError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn LowLevelClient>;
}

// Implement Clone for Box<dyn LowLevelClient>
impl Clone for Box<dyn LowLevelClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl LowLevelClient for Box<dyn LowLevelClient> {
    async fn ask_raw(&self, prompt: String) -> Result<String, ModelCallError> {
        self.as_ref().ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        self.as_ref().clone_box()
    }
}

/// Turns raw model text into a question ready for display.
pub fn question_from_raw(raw: &str) -> Result<QuestionRecord, GenerationError> {
    let block = json_utils::extract(raw)?;
    let question = normalize::normalize(&block)?;
    Ok(shuffle::shuffle(question))
}

#[derive(Clone)]
pub struct QuestionGenerator<C: LowLevelClient> {
    client: C,
    interceptor: Option<Arc<dyn Interceptor>>,
}

impl<C: LowLevelClient> QuestionGenerator<C> {
    pub fn new(client: C) -> Self {
        info!(target: "exam_quiz::generator", "Creating new QuestionGenerator");
        Self { client, interceptor: None }
    }

    /// Record every prompt/response pair through `interceptor`.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// One generation attempt, with no side effects on any session.
    #[instrument(target = "exam_quiz::generator", skip(self), fields(topic = %request.topic, difficulty = %request.difficulty))]
    pub async fn generate(&self, request: &QuestionRequest) -> Result<QuestionRecord, GenerationError> {
        let prompt = build_prompt(request);
        let raw = self.client.ask_raw(prompt.clone()).await.map_err(|e| {
            warn!(target: "exam_quiz::generator", error = %e, "model call failed");
            e
        })?;
        info!(target: "exam_quiz::generator", response_len = raw.len(), "received model response");

        if let Some(interceptor) = &self.interceptor {
            if let Err(e) = interceptor.save(&prompt, &raw).await {
                warn!(target: "exam_quiz::generator", error = %e, "failed to save transcript");
            }
        }

        let question = question_from_raw(&raw).map_err(|e| {
            warn!(target: "exam_quiz::generator", error = %e, "model output rejected");
            e
        })?;
        info!(target: "exam_quiz::generator", "question generated");
        Ok(question)
    }

    /// Generate and, only on success, make the question current in `session`.
    pub async fn generate_into(
        &self,
        session: &mut SessionState,
        request: &QuestionRequest,
    ) -> Result<(), GenerationError> {
        let question = self.generate(request).await?;
        session.register_question(question, request.topic.clone(), request.difficulty);
        Ok(())
    }
}

impl<C: LowLevelClient> Debug for QuestionGenerator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionGenerator")
            .field("client", &self.client)
            .field("interceptor", &self.interceptor.is_some())
            .finish()
    }
}
