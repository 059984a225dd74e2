//! Subcommands and the helpers they share

pub mod providers;
pub mod resume;
pub mod run;
pub mod show;
pub mod stop;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use symposium_debate::{Advance, DebateOrchestrator, SessionStore};
use symposium_llm::{LlmError, LlmProvider, MockProvider, ProviderFactory};

use crate::display;

/// Default phase budget for auto mode (three full rounds)
pub const DEFAULT_MAX_PHASES: usize = 9;

/// Prepend injected evidence to the topic so every agent sees it next phase
pub fn with_evidence(topic: &str, evidence: Option<&str>) -> String {
    match evidence.map(str::trim).filter(|e| !e.is_empty()) {
        Some(evidence) => format!("{}\n\n{}", evidence, topic),
        None => topic.to_string(),
    }
}

/// Stands in for every backend so sessions open without API keys
///
/// Only for commands that never advance the debate.
pub struct Offline;

impl ProviderFactory for Offline {
    fn create(&self, _provider: &str, _model: &str) -> Result<Arc<dyn LlmProvider>, LlmError> {
        Ok(Arc::new(MockProvider::constant("")))
    }
}

/// Advance once, or in auto mode until the debate stops or the budget is spent
///
/// Returns the number of phases executed.
pub async fn drive(
    debate: &mut DebateOrchestrator,
    topic: &str,
    max_phases: usize,
) -> Result<usize> {
    let budget = if debate.config().auto { max_phases } else { 1 };

    let mut executed = 0;
    while executed < budget {
        let (phase, round) = (debate.phase(), debate.round());
        let outcome = debate
            .advance(topic)
            .await
            .with_context(|| format!("{} phase of round {} failed", phase, round))?;

        match outcome {
            Advance::Halted => break,
            Advance::PhaseCompleted { phase, round } => display::print_phase(debate, phase, round),
            Advance::RoundJudged {
                round,
                verdict_index,
                ..
            } => {
                display::print_phase(debate, phase, round);
                if let Some(record) = debate.history().get(verdict_index) {
                    display::print_verdict(record);
                }
            }
        }
        executed += 1;
    }
    Ok(executed)
}

/// Write the session, defaulting to a timestamped file in the working directory
pub async fn save(debate: &DebateOrchestrator, path: Option<&Path>) -> Result<PathBuf> {
    let store = SessionStore::current_dir();
    let written = match path {
        Some(path) => store.save(path, debate).await,
        None => store.save_new(debate).await,
    }
    .context("Failed to save session")?;
    Ok(written)
}

/// Write a two-agent mock debate that has finished its position phase
#[cfg(test)]
pub(crate) async fn write_sample_session(dir: &Path) -> PathBuf {
    use symposium_debate::{AgentSpec, DebateConfig, JudgeSpec};
    use symposium_llm::{LlmConfig, ProviderRegistry};

    let config = DebateConfig::new(
        vec![
            AgentSpec::new("Ada", "mock", "m1"),
            AgentSpec::new("Grace", "mock", "m2"),
        ],
        JudgeSpec::new("mock", "judge"),
    );
    let mut debate =
        DebateOrchestrator::new(config, &ProviderRegistry::new(LlmConfig::default())).unwrap();
    debate.advance("Is remote work better?").await.unwrap();

    SessionStore::new(dir)
        .save("session.json", &debate)
        .await
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use symposium_debate::{AgentSpec, DebateConfig, JudgeSpec, Phase};

    fn mock_debate(config: DebateConfig) -> DebateOrchestrator {
        DebateOrchestrator::with_providers(
            config,
            vec![
                Arc::new(MockProvider::smart()),
                Arc::new(MockProvider::smart()),
            ],
            Arc::new(MockProvider::smart()),
        )
        .unwrap()
    }

    fn two_agents() -> DebateConfig {
        DebateConfig::new(
            vec![
                AgentSpec::new("Ada", "mock", "m1"),
                AgentSpec::new("Grace", "mock", "m2"),
            ],
            JudgeSpec::new("mock", "judge"),
        )
    }

    #[tokio::test]
    async fn test_drive_runs_one_phase_without_auto() {
        let mut debate = mock_debate(two_agents());
        assert_eq!(drive(&mut debate, "topic", 9).await.unwrap(), 1);
        assert_eq!(debate.phase(), Phase::Critique);
    }

    #[tokio::test]
    async fn test_drive_auto_stops_at_round_limit() {
        let mut debate = mock_debate(two_agents().with_auto(true).with_max_rounds(1));
        assert_eq!(drive(&mut debate, "topic", 9).await.unwrap(), 3);
        assert!(debate.is_stopped());
        assert_eq!(debate.history().len(), 1);
    }

    #[test]
    fn test_evidence_is_prepended() {
        assert_eq!(
            with_evidence("Is coffee healthy?", Some("New meta-analysis (2024).")),
            "New meta-analysis (2024).\n\nIs coffee healthy?"
        );
    }

    #[test]
    fn test_blank_evidence_is_ignored() {
        assert_eq!(with_evidence("topic", Some("   ")), "topic");
        assert_eq!(with_evidence("topic", None), "topic");
    }
}
