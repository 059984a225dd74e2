//! Configuration management for completion providers
//!
//! Handles API keys, endpoints and request timeouts.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI API key (env: OPENAI_API_KEY)
    pub openai_api_key: Option<String>,
    /// Anthropic API key (env: ANTHROPIC_API_KEY)
    pub anthropic_api_key: Option<String>,
    /// Mistral API key (env: MISTRAL_API_KEY)
    pub mistral_api_key: Option<String>,
    /// Ollama base URL (default: http://localhost:11434)
    pub ollama_url: String,
    /// Per-request timeout for remote providers, in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            mistral_api_key: None,
            ollama_url: "http://localhost:11434".to_string(),
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
            mistral_api_key: non_empty_var("MISTRAL_API_KEY"),
            ollama_url: env::var("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            timeout_secs: env::var("SYMPOSIUM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Check the loaded values for obvious mistakes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.ollama_url.trim().is_empty() {
            return Err(ConfigError::Invalid("ollama_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Request timeout for hosted APIs
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Local inference is slower; it gets twice the hosted timeout
    pub fn local_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.saturating_mul(2))
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        match provider.to_lowercase().as_str() {
            "openai" => self.openai_api_key.as_deref(),
            "anthropic" => self.anthropic_api_key.as_deref(),
            "mistral" => self.mistral_api_key.as_deref(),
            _ => None,
        }
    }

    /// Check if a provider is configured
    pub fn is_configured(&self, provider: &str) -> bool {
        match provider.to_lowercase().as_str() {
            "openai" | "anthropic" | "mistral" => self.api_key(provider).is_some(),
            "local" | "ollama" | "mock" => true, // No key needed
            _ => false,
        }
    }

    /// List available providers
    pub fn available_providers(&self) -> Vec<&str> {
        let mut providers = vec!["mock", "local"];
        if self.openai_api_key.is_some() {
            providers.push("openai");
        }
        if self.anthropic_api_key.is_some() {
            providers.push("anthropic");
        }
        if self.mistral_api_key.is_some() {
            providers.push("mistral");
        }
        providers
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
