pub mod models;

use crate::clients::chat::{post_chat_completion, ChatMessage, ChatRequest};
use crate::config::{KeyFromEnv, QuizConfig};
use crate::core::LowLevelClient;
use crate::error::ModelCallError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};

pub use models::DeepSeekModel;

const DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Configuration for DeepSeek client
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    pub api_key: String,
    pub model: DeepSeekModel,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: DeepSeekClient::find_key().unwrap_or_default(),
            model: DeepSeekModel::default(),
            max_tokens: 1024,
            temperature: 0.9,
            timeout: Duration::from_secs(60),
        }
    }
}

impl DeepSeekConfig {
    /// Settings taken from the process configuration.
    pub fn from_quiz_config(config: &QuizConfig) -> Self {
        Self {
            model: DeepSeekModel::from(config.deepseek_model.as_str()),
            temperature: config.temperature,
            timeout: config.timeout,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    config: DeepSeekConfig,
    http: Client,
}

impl KeyFromEnv for DeepSeekClient {
    const KEY_NAME: &'static str = "DEEPSEEK_API_KEY";
}

impl DeepSeekClient {
    /// Create a new DeepSeek client with full configuration
    pub fn new(config: DeepSeekConfig) -> Self {
        info!(target: "exam_quiz::clients", model = %config.model.id(), "Creating new DeepSeek client");
        Self { config, http: Client::new() }
    }
}

#[async_trait]
impl LowLevelClient for DeepSeekClient {
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

        let text = post_chat_completion(&self.http, DEEPSEEK_ENDPOINT, &self.config.api_key, self.config.timeout, &request)
            .await
            .map_err(ModelCallError::DeepSeek)?;
        info!(target: "exam_quiz::clients", response_len = text.len(), "Successfully received DeepSeek response");
        Ok(text)
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
