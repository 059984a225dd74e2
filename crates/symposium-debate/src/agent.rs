//! Debating agent: a completion backend plus the transcript of its turns

use std::fmt;
use std::sync::Arc;

use symposium_llm::{LlmError, LlmProvider};
use uuid::Uuid;

use crate::config::AgentSpec;
use crate::types::{Phase, Turn};

/// Unique identifier for an agent
pub type AgentId = Uuid;

/// A debating agent
///
/// The transcript is append-only and kept in chronological order. Replies
/// are recorded verbatim, including empty ones.
pub struct DebateAgent {
    /// Unique identifier
    pub id: AgentId,
    /// Display name
    pub name: String,
    /// Provider identifier the backend was built from
    pub provider_name: String,
    /// Model identifier the backend was built from
    pub model: String,
    llm: Arc<dyn LlmProvider>,
    transcript: Vec<Turn>,
}

impl DebateAgent {
    pub fn new(spec: &AgentSpec, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: spec.name.clone(),
            provider_name: spec.provider_name.clone(),
            model: spec.model.clone(),
            llm,
            transcript: Vec::new(),
        }
    }

    /// Ask the backend once and record the reply
    ///
    /// Nothing is recorded when the completion fails.
    pub async fn speak(
        &mut self,
        prompt: &str,
        phase: Phase,
        round: u32,
    ) -> Result<String, LlmError> {
        let reply = self.respond(prompt).await?;
        self.record(phase, round, reply.clone());
        Ok(reply)
    }

    /// The I/O half of `speak`: one completion round-trip, no state change
    pub async fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::debug!(agent = %self.name, prompt_len = prompt.len(), "Requesting completion");
        self.llm.ask(prompt).await
    }

    /// The commit half of `speak`
    pub fn record(&mut self, phase: Phase, round: u32, content: String) {
        self.transcript.push(Turn::new(phase, round, content));
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// The most recent turn, if the agent has spoken
    pub fn latest(&self) -> Option<&Turn> {
        self.transcript.last()
    }

    /// Replace the transcript wholesale (session restore)
    pub(crate) fn restore_transcript(&mut self, transcript: Vec<Turn>) {
        self.transcript = transcript;
    }
}

impl fmt::Debug for DebateAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebateAgent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider", &self.llm.name())
            .field("model", &self.model)
            .field("turns", &self.transcript.len())
            .finish()
    }
}
