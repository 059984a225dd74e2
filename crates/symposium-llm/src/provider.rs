//! LLM Provider trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from LLM providers
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Request timed out")]
    Timeout,
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),
    #[error("Unknown provider '{name}'. Registered: {registered}")]
    UnknownProvider { name: String, registered: String },
}

impl LlmError {
    /// Map a transport error from reqwest onto the provider error taxonomy
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::ConnectionFailed(err.to_string())
        }
    }

    /// Build an error from a non-success HTTP status
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            LlmError::RateLimited
        } else {
            LlmError::RequestFailed(format!("Status: {}, Body: {}", status, body))
        }
    }
}

/// A request to an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// Optional system prompt; debate prompts carry their own framing
    pub system: Option<String>,
    /// User message
    pub prompt: String,
    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl LlmRequest {
    /// Default sampling temperature for debate turns
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    /// Default completion budget
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;

    /// Create a simple request with default settings
    pub fn simple(prompt: &str) -> Self {
        Self {
            system: None,
            prompt: prompt.to_string(),
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Response from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text
    pub content: String,
    /// Model used
    pub model: String,
    /// Tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Time taken in milliseconds
    pub latency_ms: u64,
}

/// Trait for LLM providers
///
/// This is the completion port the debate engine consumes. One call is one
/// round-trip; retries and backoff are not part of the contract.
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Generate a completion
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Generate with a simple prompt (convenience method)
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.complete(LlmRequest::simple(prompt)).await?;
        Ok(response.content)
    }
}
