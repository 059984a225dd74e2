//! The adjudicating agent and the debate snapshot it is shown

use serde::Serialize;
use std::sync::Arc;

use symposium_llm::LlmProvider;

use crate::agent::DebateAgent;
use crate::config::{AgentSpec, JudgeSpec};
use crate::error::DebateError;
use crate::prompts;
use crate::types::{DebateType, Phase, Stance, Turn};
use crate::verdict::Verdict;

/// Debate settings visible to the judge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeViewConfig {
    pub debate_type: DebateType,
    pub opposition_mode: bool,
}

/// One debater as the judge sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub name: String,
    pub transcript: Vec<Turn>,
    pub stance: Stance,
}

/// Snapshot of the debate handed to the judge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeView {
    pub round: u32,
    pub phase: Phase,
    pub config: JudgeViewConfig,
    pub agents: Vec<AgentView>,
}

/// An agent that renders verdicts instead of debating
#[derive(Debug)]
pub struct Judge {
    agent: DebateAgent,
}

impl Judge {
    pub fn new(spec: &JudgeSpec, llm: Arc<dyn LlmProvider>) -> Self {
        let agent_spec = AgentSpec::new(&spec.name, &spec.provider_name, &spec.model);
        Self {
            agent: DebateAgent::new(&agent_spec, llm),
        }
    }

    pub fn name(&self) -> &str {
        &self.agent.name
    }

    pub fn agent(&self) -> &DebateAgent {
        &self.agent
    }

    /// Ask for a verdict on `view`
    ///
    /// Only transport failures are errors; a reply without usable JSON
    /// becomes a fallback verdict. The reply is not added to the judge's
    /// transcript.
    pub async fn verdict(&self, view: &JudgeView) -> Result<Verdict, DebateError> {
        let debate_type = view.config.debate_type;
        let state_json = serde_json::to_string_pretty(view)?;
        let prompt = prompts::judge_prompt(debate_type, &state_json);

        let raw = self
            .agent
            .respond(&prompt)
            .await
            .map_err(|source| DebateError::Judge {
                judge: self.agent.name.clone(),
                source,
            })?;

        let verdict = Verdict::parse(&raw, debate_type);
        metrics::counter!("symposium_verdicts_total").increment(1);
        if verdict.is_fallback() {
            metrics::counter!("symposium_verdict_fallbacks_total").increment(1);
        }

        tracing::info!(
            judge = %self.agent.name,
            round = view.round,
            leader = verdict.leader().unwrap_or("-"),
            fallback = verdict.is_fallback(),
            "Verdict rendered"
        );

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symposium_llm::MockProvider;

    fn view(debate_type: DebateType) -> JudgeView {
        JudgeView {
            round: 2,
            phase: Phase::Defense,
            config: JudgeViewConfig {
                debate_type,
                opposition_mode: false,
            },
            agents: vec![AgentView {
                name: "Alice".to_string(),
                transcript: vec![Turn::new(Phase::Position, 2, "Tea is fine.")],
                stance: Stance::Neutral,
            }],
        }
    }

    #[tokio::test]
    async fn test_verdict_embeds_view_and_leaves_transcript_alone() {
        let mock = Arc::new(MockProvider::constant(
            r#"{"most_correct_agent": "Alice", "correctness_scores": {"Alice": 0.9}, "key_facts": [], "explanation": "ok"}"#,
        ));
        let judge = Judge::new(&JudgeSpec::new("mock", "judge"), mock.clone());

        let verdict = judge.verdict(&view(DebateType::Binary)).await.unwrap();
        assert_eq!(verdict.leader(), Some("Alice"));
        assert!(judge.agent().transcript().is_empty());

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("correctness score"));
        assert!(prompt.contains("\"debate_type\": \"binary\""));
        assert!(prompt.contains("\"round\": \"position\""));
        assert!(prompt.contains("Tea is fine."));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_not_an_error() {
        let mock = Arc::new(MockProvider::constant("I refuse to answer in JSON."));
        let judge = Judge::new(&JudgeSpec::new("mock", "judge"), mock);

        let verdict = judge.verdict(&view(DebateType::NonBinary)).await.unwrap();
        assert_eq!(verdict.explanation(), Some("I refuse to answer in JSON."));
        assert!(verdict.is_fallback());
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_judge_error() {
        let mock = MockProvider::constant("{}");
        mock.set_failing(true);
        let judge = Judge::new(&JudgeSpec::new("mock", "judge"), Arc::new(mock));

        let err = judge.verdict(&view(DebateType::NonBinary)).await.unwrap_err();
        assert!(matches!(err, DebateError::Judge { ref judge, .. } if judge == "Judge"));
        assert!(err.is_retryable());
    }
}
