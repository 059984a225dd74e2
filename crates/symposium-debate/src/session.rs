//! Session codec: the serialized form of an orchestrator
//!
//! A session document carries the configuration, every agent's transcript,
//! the verdict history and (in documents written by this crate) an explicit
//! cursor. Documents without a cursor fall back to [`infer_cursor`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use symposium_llm::ProviderFactory;

use crate::config::DebateConfig;
use crate::error::DebateError;
use crate::orchestrator::{Cursor, DebateOrchestrator, StopReason};
use crate::types::{Phase, Turn};
use crate::verdict::{Verdict, VerdictRecord};

/// One entry of the verdict history as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedVerdict {
    pub round: u32,
    pub verdict: Value,
}

/// A debater's identity and transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub transcript: Vec<Turn>,
}

/// Explicit phase/round cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub round: u32,
    #[serde(default)]
    pub stopped: bool,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

/// Serialized orchestrator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    pub config: DebateConfig,
    #[serde(default)]
    pub history: Vec<SavedVerdict>,
    #[serde(default)]
    pub agents: Vec<SavedAgent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SessionState>,
}

impl SessionDocument {
    /// Snapshot an orchestrator
    pub fn capture(orchestrator: &DebateOrchestrator) -> Self {
        let history = orchestrator
            .history()
            .iter()
            .map(|record| SavedVerdict {
                round: record.round,
                verdict: Value::Object(record.verdict.document()),
            })
            .collect();

        let agents = orchestrator
            .agents()
            .iter()
            .map(|agent| SavedAgent {
                name: agent.name.clone(),
                provider: agent.provider_name.clone(),
                model: agent.model.clone(),
                transcript: agent.transcript().to_vec(),
            })
            .collect();

        Self {
            config: orchestrator.config().clone(),
            history,
            agents,
            state: Some(SessionState {
                phase: orchestrator.phase(),
                round: orchestrator.round(),
                stopped: orchestrator.is_stopped(),
                topic: orchestrator.topic().map(str::to_string),
                stop_reason: orchestrator.stop_reason(),
            }),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DebateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DebateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild an orchestrator from this document
    ///
    /// Transcripts are matched to the configured agents by position; saved
    /// agents beyond the configured count are ignored. Verdicts are
    /// re-classified with the configured debate type.
    pub fn restore(self, factory: &dyn ProviderFactory) -> Result<DebateOrchestrator, DebateError> {
        let mut orchestrator = DebateOrchestrator::new(self.config, factory)?;
        let debate_type = orchestrator.config().debate_type;

        let history = self
            .history
            .into_iter()
            .map(|saved| match saved.verdict {
                Value::Object(document) => Ok(VerdictRecord {
                    round: saved.round,
                    verdict: Verdict::from_document(document, debate_type),
                }),
                other => Err(DebateError::InvalidSession(format!(
                    "verdict for round {} is not an object: {}",
                    saved.round, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let configured = orchestrator.agents().len();
        if self.agents.len() > configured {
            tracing::warn!(
                saved = self.agents.len(),
                configured,
                "Ignoring saved agents beyond the configured list"
            );
        }
        for (agent, saved) in orchestrator.agents().iter().zip(&self.agents) {
            if agent.name != saved.name {
                tracing::warn!(
                    configured = %agent.name,
                    saved = %saved.name,
                    "Saved transcript belongs to a differently named agent"
                );
            }
        }

        // Agents missing from the document start with empty transcripts
        let mut transcripts: Vec<Vec<Turn>> = self
            .agents
            .into_iter()
            .take(configured)
            .map(|saved| saved.transcript)
            .collect();
        transcripts.resize_with(configured, Vec::new);

        let cursor = match self.state {
            Some(state) => Cursor {
                phase: state.phase,
                round: state.round,
                stopped: state.stopped,
                stop_reason: state.stop_reason,
                topic: state.topic,
            },
            None => {
                let (phase, round) = infer_cursor(&transcripts, &history);
                tracing::debug!(
                    phase = %phase,
                    round,
                    "No saved cursor, inferred from transcripts"
                );
                Cursor {
                    phase,
                    round,
                    stopped: false,
                    stop_reason: None,
                    topic: None,
                }
            }
        };

        orchestrator.restore(transcripts, history, cursor);
        Ok(orchestrator)
    }
}

/// Best-effort cursor for documents saved without one
///
/// The round comes from the last verdict; the next phase follows the first
/// agent's last turn. Empty or inconsistent transcripts yield
/// `(Position, 0)`.
pub fn infer_cursor(transcripts: &[Vec<Turn>], history: &[VerdictRecord]) -> (Phase, u32) {
    let Some(first) = transcripts.first() else {
        return (Phase::Position, 0);
    };
    let Some(last) = first.last() else {
        return (Phase::Position, 0);
    };

    let consistent = transcripts.iter().all(|t| {
        t.len() == first.len() && t.last().map(|turn| turn.phase) == Some(last.phase)
    });
    if !consistent {
        return (Phase::Position, 0);
    }

    let round = history.last().map(|record| record.round).unwrap_or(0);
    match last.phase {
        Phase::Position => (Phase::Critique, round),
        Phase::Critique => (Phase::Defense, round),
        Phase::Defense => (Phase::Position, round + 1),
    }
}
