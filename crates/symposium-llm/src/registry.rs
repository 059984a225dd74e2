//! Provider registry: resolves a provider identifier and model into a
//! ready-to-use completion backend.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::anthropic::AnthropicProvider;
use crate::config::LlmConfig;
use crate::mistral::MistralProvider;
use crate::mock::MockProvider;
use crate::ollama::OllamaProvider;
use crate::openai::OpenAIProvider;
use crate::provider::{LlmError, LlmProvider};

/// Known provider identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
    Mistral,
    /// Ollama or any server speaking its chat API
    Local,
    Mock,
}

impl ProviderKind {
    /// Every registered identifier, in display order
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::OpenAI,
        ProviderKind::Anthropic,
        ProviderKind::Mistral,
        ProviderKind::Local,
        ProviderKind::Mock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Local => "local",
            ProviderKind::Mock => "mock",
        }
    }

    /// Whether this provider needs an API key
    pub fn requires_key(&self) -> bool {
        matches!(
            self,
            ProviderKind::OpenAI | ProviderKind::Anthropic | ProviderKind::Mistral
        )
    }

    fn registered() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "mistral" => Ok(ProviderKind::Mistral),
            "local" | "ollama" => Ok(ProviderKind::Local),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(LlmError::UnknownProvider {
                name: s.to_string(),
                registered: Self::registered(),
            }),
        }
    }
}

/// Builds completion backends from a provider identifier and model
///
/// The debate engine only depends on this trait, so tests can hand out
/// pre-built mocks while the CLI resolves real providers.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, provider: &str, model: &str) -> Result<Arc<dyn LlmProvider>, LlmError>;
}

/// Environment-configured registry of the built-in providers
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    config: LlmConfig,
}

impl ProviderRegistry {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    /// Registry configured from environment variables
    pub fn from_env() -> Self {
        Self::new(LlmConfig::from_env())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn key_for(&self, kind: ProviderKind) -> Result<&str, LlmError> {
        self.config
            .api_key(kind.as_str())
            .ok_or_else(|| LlmError::MissingApiKey(kind.to_string()))
    }
}

impl ProviderFactory for ProviderRegistry {
    fn create(&self, provider: &str, model: &str) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let kind: ProviderKind = provider.parse()?;
        let timeout = self.config.request_timeout();

        let backend: Arc<dyn LlmProvider> = match kind {
            ProviderKind::OpenAI => {
                Arc::new(OpenAIProvider::new(self.key_for(kind)?, model).with_timeout(timeout))
            }
            ProviderKind::Anthropic => {
                Arc::new(AnthropicProvider::new(self.key_for(kind)?, model).with_timeout(timeout))
            }
            ProviderKind::Mistral => {
                Arc::new(MistralProvider::new(self.key_for(kind)?, model).with_timeout(timeout))
            }
            ProviderKind::Local => Arc::new(
                OllamaProvider::with_url(&self.config.ollama_url, model)
                    .with_timeout(self.config.local_timeout()),
            ),
            ProviderKind::Mock => Arc::new(MockProvider::smart()),
        };

        tracing::debug!(provider = %kind, model, "Resolved completion provider");
        Ok(backend)
    }
}
