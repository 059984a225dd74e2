//! Error types for the debate engine

use symposium_llm::LlmError;
use thiserror::Error;

use crate::types::Phase;

/// Errors surfaced by the orchestrator, session codec and store
#[derive(Debug, Error)]
pub enum DebateError {
    /// An agent's completion call failed; the phase was not advanced
    #[error("{phase} phase failed for agent '{agent}': {source}")]
    Completion {
        agent: String,
        phase: Phase,
        #[source]
        source: LlmError,
    },

    /// The judge's completion call failed; the defense phase was not advanced
    #[error("Judge '{judge}' failed to render a verdict: {source}")]
    Judge {
        judge: String,
        #[source]
        source: LlmError,
    },

    /// A provider could not be constructed for an agent or the judge
    #[error("Cannot build provider for '{participant}': {source}")]
    Provider {
        participant: String,
        #[source]
        source: LlmError,
    },

    #[error("Invalid debate configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid session document: {0}")]
    InvalidSession(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DebateError {
    /// Transport failures leave the orchestrator untouched, so the same
    /// `advance` call can simply be repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DebateError::Completion { .. } | DebateError::Judge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_is_retryable() {
        let err = DebateError::Completion {
            agent: "Alice".to_string(),
            phase: Phase::Critique,
            source: LlmError::RateLimited,
        };
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "critique phase failed for agent 'Alice': Rate limited"
        );
    }

    #[test]
    fn test_config_error_is_not_retryable() {
        let err = DebateError::InvalidConfig("no agents".to_string());
        assert!(!err.is_retryable());
    }
}
