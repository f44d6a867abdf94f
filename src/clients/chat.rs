//! Wire format shared by OpenAI-compatible chat-completions endpoints.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::error::ChatApiError;

/// Longest error body kept in an `Api` error.
const MAX_ERROR_BODY: usize = 500;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        Self { role: "user", content }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// POST `request` and return the first choice's text.
pub(crate) async fn post_chat_completion(
    http: &Client,
    endpoint: &str,
    api_key: &str,
    timeout: Duration,
    request: &ChatRequest<'_>,
) -> Result<String, ChatApiError> {
    debug!(target: "exam_quiz::clients", endpoint, model = request.model, "sending chat completion request");

    let response = http
        .post(endpoint)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(request)
        .send()
        .await
        .map_err(|e| {
            error!(target: "exam_quiz::clients", error = %e, "HTTP request failed");
            ChatApiError::Http(e.to_string())
        })?;

    let status = response.status();
    debug!(target: "exam_quiz::clients", status = %status, "received chat completion response");

    if status == 429 {
        warn!(target: "exam_quiz::clients", "rate limit exceeded");
        return Err(ChatApiError::RateLimit);
    }
    if status == 401 {
        error!(target: "exam_quiz::clients", "authentication failed");
        return Err(ChatApiError::Authentication);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        let body: String = body.chars().take(MAX_ERROR_BODY).collect();
        error!(target: "exam_quiz::clients", status = %status, error = %body, "chat completion API error");
        return Err(ChatApiError::Api { status: status.as_u16(), body });
    }

    let parsed: ChatResponse = response.json().await.map_err(|e| {
        error!(target: "exam_quiz::clients", error = %e, "failed to parse chat completion JSON");
        ChatApiError::Http(e.to_string())
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ChatApiError::EmptyChoices)
}
