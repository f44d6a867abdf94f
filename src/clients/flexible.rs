use crate::clients::{DeepSeekClient, DeepSeekConfig, FallbackClient, GroqClient, GroqConfig, SampleClient};
use crate::config::{KeyFromEnv, QuizConfig};
use crate::core::LowLevelClient;
use crate::error::ModelCallError;
use async_trait::async_trait;
use std::str::FromStr;
use tracing::info;

/// Which model-call collaborator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Groq,
    DeepSeek,
    /// Built-in sample questions, no network
    Mock,
}

impl Default for ClientType {
    /// Pick based on available API keys, in order of preference
    fn default() -> Self {
        if GroqClient::has_key() {
            Self::Groq
        } else if DeepSeekClient::has_key() {
            Self::DeepSeek
        } else {
            Self::Mock
        }
    }
}

impl FromStr for ClientType {
    type Err = String;

    /// Parse client type from string (case insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "deepseek" => Ok(Self::DeepSeek),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown client type: '{}'. Supported: groq, deepseek, mock", s)),
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::Groq => write!(f, "Groq"),
            ClientType::DeepSeek => write!(f, "DeepSeek"),
            ClientType::Mock => write!(f, "Mock"),
        }
    }
}

/// Client chosen at runtime, wrapping any boxed `LowLevelClient`
#[derive(Debug, Clone)]
pub struct FlexibleClient {
    inner: Box<dyn LowLevelClient>,
}

impl FlexibleClient {
    /// Create a new FlexibleClient wrapping the given client
    pub fn new(client: Box<dyn LowLevelClient>) -> Self {
        Self { inner: client }
    }

    /// Build the client for `client_type`; Groq gets a fallback model when configured.
    pub fn from_config(client_type: ClientType, config: &QuizConfig) -> Self {
        info!(target: "exam_quiz::clients", client = %client_type, "Creating flexible client");
        match client_type {
            ClientType::Groq => {
                let primary = GroqClient::new(GroqConfig::for_model(config, &config.primary_model));
                match &config.fallback_model {
                    Some(model) if *model != config.primary_model => {
                        let fallback = GroqClient::new(GroqConfig::for_model(config, model));
                        Self::new(Box::new(FallbackClient::new(Box::new(primary), Box::new(fallback))))
                    }
                    _ => Self::new(Box::new(primary)),
                }
            }
            ClientType::DeepSeek => Self::new(Box::new(DeepSeekClient::new(DeepSeekConfig::from_quiz_config(config)))),
            ClientType::Mock => Self::new(Box::new(SampleClient::default())),
        }
    }
}

#[async_trait]
impl LowLevelClient for FlexibleClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, ModelCallError> {
        self.inner.ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
