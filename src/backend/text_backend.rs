//! Completion backend for hosted LLM APIs
//! Supports OpenAI API compatible chat endpoints (OpenAI, Groq, OpenRouter, vLLM, etc.)

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::{settings::resolve_credential, LlmConfig};
use crate::error::{AppError, Result};
use crate::problem::prompt::SYSTEM_PROMPT;

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request (OpenAI compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat completion response, reduced to the fields the relay reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if it is non-blank
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Trait for text completion backends
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Send a single user prompt and return the model's text
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI API compatible completion backend
pub struct OpenAICompatibleBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl OpenAICompatibleBackend {
    /// Create a backend, resolving the API key from configuration or environment
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = resolve_credential(config.api_key.as_deref(), &config.api_key_env);
        Self::with_api_key(config, api_key)
    }

    /// Create a backend with an explicit (possibly absent) API key
    pub fn with_api_key(config: &LlmConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get headers with authentication
    fn get_headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::InvalidRequest("LLM API key contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, value);

        Ok(headers)
    }
}

#[async_trait]
impl CompletionBackend for OpenAICompatibleBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let token = self.api_key.as_deref().ok_or_else(|| {
            AppError::MissingCredential(format!(
                "LLM API key is not configured (set {})",
                self.api_key_env
            ))
        })?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.endpoint);
        debug!(model = %self.model, url = %url, prompt_len = prompt.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .headers(self.get_headers(token)?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "LLM API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let result = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!(model = %self.model, error = %e, "Failed to parse chat completion response");
            AppError::Upstream(format!("Failed to parse LLM response: {}", e))
        })?;

        let text = result.first_text().ok_or(AppError::EmptyCompletion)?;

        debug!(
            model = result.model.as_deref().unwrap_or(&self.model),
            finish_reason = result.choices.first().and_then(|c| c.finish_reason.as_deref()).unwrap_or("unknown"),
            "Chat completion received"
        );

        Ok(text.trim().to_string())
    }
}
