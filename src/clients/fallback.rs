use crate::core::LowLevelClient;
use crate::error::ModelCallError;
use async_trait::async_trait;
use tracing::{info, warn};

/// Tries `primary`, then `fallback` (typically a smaller model) if it fails.
#[derive(Debug, Clone)]
pub struct FallbackClient {
    primary: Box<dyn LowLevelClient>,
    fallback: Box<dyn LowLevelClient>,
}

impl FallbackClient {
    pub fn new(primary: Box<dyn LowLevelClient>, fallback: Box<dyn LowLevelClient>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl LowLevelClient for FallbackClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, ModelCallError> {
        let primary_error = match self.primary.ask_raw(prompt.clone()).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };
        warn!(target: "exam_quiz::clients", error = %primary_error, "primary model failed; trying fallback");

        match self.fallback.ask_raw(prompt).await {
            Ok(text) => {
                info!(target: "exam_quiz::clients", "fallback model succeeded");
                Ok(text)
            }
            Err(fallback_error) => Err(ModelCallError::Fallback {
                primary: Box::new(primary_error),
                fallback: Box::new(fallback_error),
            }),
        }
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
