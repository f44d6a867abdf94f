pub mod models;

use crate::clients::chat::{post_chat_completion, ChatMessage, ChatRequest};
use crate::config::{KeyFromEnv, QuizConfig};
use crate::core::LowLevelClient;
use crate::error::ModelCallError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};

pub use models::GroqModel;

const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Configuration for Groq client
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: GroqModel,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: GroqClient::find_key().unwrap_or_default(),
            model: GroqModel::default(),
            max_tokens: 1024,
            temperature: 0.9,
            timeout: Duration::from_secs(60),
        }
    }
}

impl GroqConfig {
    /// Settings for `model` taken from the process configuration.
    pub fn for_model(config: &QuizConfig, model: &str) -> Self {
        Self {
            model: GroqModel::from(model),
            temperature: config.temperature,
            timeout: config.timeout,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroqClient {
    config: GroqConfig,
    http: Client,
}

impl KeyFromEnv for GroqClient {
    const KEY_NAME: &'static str = "GROQ_API_KEY";
    const KEY_ALIASES: &'static [&'static str] = &["GROK_API_KEY"];
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        info!(target: "exam_quiz::clients", model = %config.model.id(), "Creating new Groq client");
        Self { config, http: Client::new() }
    }
}

#[async_trait]
impl LowLevelClient for GroqClient {
    #[instrument(target = "exam_quiz::clients", skip(self, prompt), fields(prompt_len = prompt.len(), model = %self.config.model.id()))]
    async fn ask_raw(&self, prompt: String) -> Result<String, ModelCallError> {
        if self.config.api_key.trim().is_empty() {
            return Err(ModelCallError::MissingApiKey(Self::KEY_NAME));
        }

        let request = ChatRequest {
            model: self.config.model.id(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let text = post_chat_completion(&self.http, GROQ_ENDPOINT, &self.config.api_key, self.config.timeout, &request)
            .await
            .map_err(ModelCallError::Groq)?;
        info!(target: "exam_quiz::clients", response_len = text.len(), "Successfully received Groq response");
        Ok(text)
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
