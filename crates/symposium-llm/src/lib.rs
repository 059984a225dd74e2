//! # Symposium LLM
//!
//! Completion providers for debate agents.
//!
//! ## Supported Backends
//!
//! | Identifier | Type | Key Required |
//! |------------|------|--------------|
//! | `openai` | API | `OPENAI_API_KEY` |
//! | `anthropic` | API | `ANTHROPIC_API_KEY` |
//! | `mistral` | API | `MISTRAL_API_KEY` |
//! | `local` | Ollama | None (`OLLAMA_URL`) |
//! | `mock` | Testing | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use symposium_llm::{LlmProvider, MockProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockProvider::constant("The sky is blue (Rayleigh 1871).");
//!     let response = llm.ask("Why is the sky blue?").await.unwrap();
//!     assert!(response.contains("Rayleigh"));
//! }
//! ```
//!
//! ## Resolving providers by name
//!
//! ```rust,ignore
//! use symposium_llm::{ProviderFactory, ProviderRegistry};
//!
//! let registry = ProviderRegistry::from_env();
//! let llm = registry.create("anthropic", "claude-3-haiku-20240307")?;
//! let answer = llm.ask("Explain Bayesian updating").await?;
//! ```

pub mod anthropic;
pub mod config;
pub mod mistral;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod registry;

pub use anthropic::AnthropicProvider;
pub use config::{ConfigError, LlmConfig};
pub use mistral::MistralProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};
pub use registry::{ProviderFactory, ProviderKind, ProviderRegistry};
