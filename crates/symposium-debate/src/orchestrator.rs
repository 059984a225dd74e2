//! Orchestrator - drives the position/critique/defense cycle
//!
//! Each call to [`DebateOrchestrator::advance`] runs exactly one phase. All
//! agents are asked concurrently, and nothing is committed until every reply
//! (and, after a defense phase, the judge's verdict) is in hand. A failed
//! call therefore leaves the orchestrator exactly as it was.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use symposium_llm::{LlmProvider, ProviderFactory};

use crate::agent::DebateAgent;
use crate::config::DebateConfig;
use crate::error::DebateError;
use crate::judge::{AgentView, Judge, JudgeView, JudgeViewConfig};
use crate::prompts::{self, Statement};
use crate::types::{Phase, Stance, Turn};
use crate::verdict::VerdictRecord;

/// Why a debate stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The judge reported agreement at or above the consensus threshold
    Consensus,
    /// `max_rounds` full rounds were judged
    RoundLimit,
    /// The caller stopped the debate
    Manual,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::Consensus => "consensus",
            StopReason::RoundLimit => "round_limit",
            StopReason::Manual => "manual",
        };
        f.write_str(s)
    }
}

/// Outcome of a single `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The debate was already stopped; nothing happened
    Halted,
    /// A position or critique phase was recorded
    PhaseCompleted { phase: Phase, round: u32 },
    /// A defense phase was recorded and judged
    RoundJudged {
        round: u32,
        verdict_index: usize,
        stopped: bool,
    },
}

/// Cursor restored from a session document
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cursor {
    pub phase: Phase,
    pub round: u32,
    pub stopped: bool,
    pub stop_reason: Option<StopReason>,
    pub topic: Option<String>,
}

/// Multi-agent debate state machine
#[derive(Debug)]
pub struct DebateOrchestrator {
    config: DebateConfig,
    /// Debaters, in speaking order
    agents: Vec<DebateAgent>,
    /// Effective stances, index-aligned with `agents`
    stances: Vec<Stance>,
    judge: Judge,
    phase: Phase,
    round_num: u32,
    stopped: bool,
    stop_reason: Option<StopReason>,
    history: Vec<VerdictRecord>,
    topic: Option<String>,
}

impl DebateOrchestrator {
    /// Build an orchestrator, resolving every backend through `factory`
    pub fn new(config: DebateConfig, factory: &dyn ProviderFactory) -> Result<Self, DebateError> {
        config.validate()?;

        let agent_llms = config
            .agents_cfg
            .iter()
            .map(|spec| {
                factory
                    .create(&spec.provider_name, &spec.model)
                    .map_err(|source| DebateError::Provider {
                        participant: spec.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let judge_cfg = &config.judge_cfg;
        let judge_llm = factory
            .create(&judge_cfg.provider_name, &judge_cfg.model)
            .map_err(|source| DebateError::Provider {
                participant: judge_cfg.name.clone(),
                source,
            })?;

        Self::with_providers(config, agent_llms, judge_llm)
    }

    /// Build an orchestrator from ready-made backends, index-aligned with
    /// `config.agents_cfg`
    pub fn with_providers(
        config: DebateConfig,
        agent_llms: Vec<Arc<dyn LlmProvider>>,
        judge_llm: Arc<dyn LlmProvider>,
    ) -> Result<Self, DebateError> {
        config.validate()?;
        if agent_llms.len() != config.agents_cfg.len() {
            return Err(DebateError::InvalidConfig(format!(
                "{} agents configured but {} providers supplied",
                config.agents_cfg.len(),
                agent_llms.len()
            )));
        }
        let stances = config.resolve_stances()?;

        let agents = config
            .agents_cfg
            .iter()
            .zip(agent_llms)
            .map(|(spec, llm)| DebateAgent::new(spec, llm))
            .collect::<Vec<_>>();
        let judge = Judge::new(&config.judge_cfg, judge_llm);

        for (agent, stance) in agents.iter().zip(&stances) {
            tracing::debug!(agent = %agent.name, stance = %stance, "Agent stance resolved");
        }

        Ok(Self {
            config,
            agents,
            stances,
            judge,
            phase: Phase::Position,
            round_num: 0,
            stopped: false,
            stop_reason: None,
            history: Vec::new(),
            topic: None,
        })
    }

    /// Run the current phase for every agent and move the cursor on
    pub async fn advance(&mut self, topic: &str) -> Result<Advance, DebateError> {
        if self.stopped {
            return Ok(Advance::Halted);
        }

        let phase = self.phase;
        let round = self.round_num;

        let phase_prompts = self.compose_prompts(topic);
        let replies = self.collect_replies(&phase_prompts, phase).await?;

        let verdict = if phase == Phase::Defense {
            let view = self.view_with_pending(&replies);
            Some(self.judge.verdict(&view).await?)
        } else {
            None
        };

        // Nothing below can fail
        for (agent, reply) in self.agents.iter_mut().zip(replies) {
            agent.record(phase, round, reply);
        }
        self.topic = Some(topic.to_string());
        metrics::counter!("symposium_phases_total", "phase" => phase.as_str()).increment(1);

        let verdict_index = verdict.map(|verdict| {
            let consensus = verdict.reaches_consensus();
            self.history.push(VerdictRecord { round, verdict });
            if consensus {
                self.halt(StopReason::Consensus);
            }
            self.history.len() - 1
        });

        self.phase = phase.next();
        if phase.closes_round() {
            self.round_num += 1;
            if let Some(max_rounds) = self.config.max_rounds {
                if self.round_num >= max_rounds {
                    self.halt(StopReason::RoundLimit);
                }
            }
        }

        tracing::info!(
            phase = %phase,
            round,
            agents = self.agents.len(),
            stopped = self.stopped,
            "Phase completed"
        );

        Ok(match verdict_index {
            Some(verdict_index) => Advance::RoundJudged {
                round,
                verdict_index,
                stopped: self.stopped,
            },
            None => Advance::PhaseCompleted { phase, round },
        })
    }

    /// Advance until the debate stops or `max_phases` phases have run
    ///
    /// Returns the number of phases executed.
    pub async fn run(&mut self, topic: &str, max_phases: usize) -> Result<usize, DebateError> {
        let mut executed = 0;
        while executed < max_phases && !self.stopped {
            self.advance(topic).await?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Stop the debate; further `advance` calls are no-ops
    pub fn stop(&mut self) {
        self.halt(StopReason::Manual);
    }

    fn halt(&mut self, reason: StopReason) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.stop_reason = Some(reason);
        tracing::info!(reason = %reason, round = self.round_num, "Debate stopped");
    }

    fn compose_prompts(&self, topic: &str) -> Vec<String> {
        match self.phase {
            Phase::Position => self
                .stances
                .iter()
                .map(|stance| prompts::position_prompt(topic, *stance))
                .collect(),
            Phase::Critique => {
                let prompt = prompts::critique_prompt(&self.latest_statements());
                vec![prompt; self.agents.len()]
            }
            Phase::Defense => {
                let statements = self.latest_statements();
                (0..self.agents.len())
                    .map(|speaker| prompts::defense_prompt(&statements, speaker))
                    .collect()
            }
        }
    }

    fn latest_statements(&self) -> Vec<Statement<'_>> {
        self.agents
            .iter()
            .map(|agent| Statement::new(&agent.name, agent.latest().map(|t| t.content.as_str())))
            .collect()
    }

    /// Ask every agent concurrently; replies come back in agent order
    async fn collect_replies(
        &self,
        phase_prompts: &[String],
        phase: Phase,
    ) -> Result<Vec<String>, DebateError> {
        let calls = self
            .agents
            .iter()
            .zip(phase_prompts)
            .map(|(agent, prompt)| agent.respond(prompt));
        let results = join_all(calls).await;

        let mut replies = Vec::with_capacity(results.len());
        for (agent, result) in self.agents.iter().zip(results) {
            match result {
                Ok(reply) => replies.push(reply),
                Err(source) => {
                    metrics::counter!("symposium_completion_failures_total").increment(1);
                    tracing::warn!(
                        agent = %agent.name,
                        phase = %phase,
                        error = %source,
                        "Completion failed, phase not advanced"
                    );
                    return Err(DebateError::Completion {
                        agent: agent.name.clone(),
                        phase,
                        source,
                    });
                }
            }
        }
        Ok(replies)
    }

    /// Snapshot of the debate as the judge sees it
    pub fn judge_view(&self) -> JudgeView {
        self.build_view(None)
    }

    fn view_with_pending(&self, pending: &[String]) -> JudgeView {
        self.build_view(Some(pending))
    }

    fn build_view(&self, pending: Option<&[String]>) -> JudgeView {
        let agents = self
            .agents
            .iter()
            .zip(&self.stances)
            .enumerate()
            .map(|(i, (agent, stance))| {
                let mut transcript = agent.transcript().to_vec();
                if let Some(reply) = pending.and_then(|p| p.get(i)) {
                    transcript.push(Turn::new(self.phase, self.round_num, reply.clone()));
                }
                AgentView {
                    name: agent.name.clone(),
                    transcript,
                    stance: *stance,
                }
            })
            .collect();

        JudgeView {
            round: self.round_num,
            phase: self.phase,
            config: JudgeViewConfig {
                debate_type: self.config.debate_type,
                opposition_mode: self.config.opposition_mode,
            },
            agents,
        }
    }

    /// Install state loaded from a session document
    pub(crate) fn restore(
        &mut self,
        transcripts: Vec<Vec<Turn>>,
        history: Vec<VerdictRecord>,
        cursor: Cursor,
    ) {
        for (agent, transcript) in self.agents.iter_mut().zip(transcripts) {
            agent.restore_transcript(transcript);
        }
        self.history = history;
        self.phase = cursor.phase;
        self.round_num = cursor.round;
        self.stopped = cursor.stopped;
        self.stop_reason = if cursor.stopped {
            cursor.stop_reason
        } else {
            None
        };
        self.topic = cursor.topic;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round_num
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn history(&self) -> &[VerdictRecord] {
        &self.history
    }

    pub fn agents(&self) -> &[DebateAgent] {
        &self.agents
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// The topic of the last successful `advance`
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Effective stance of the named agent
    pub fn stance_of(&self, name: &str) -> Option<Stance> {
        self.agents
            .iter()
            .position(|agent| agent.name == name)
            .map(|i| self.stances[i])
    }
}
