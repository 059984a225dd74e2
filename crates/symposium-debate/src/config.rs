//! Debate configuration and its validation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::DebateError;
use crate::types::{DebateType, Stance};

/// A debating agent: who it is and which backend speaks for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Display name; also the identifier used by the stance lists
    pub name: String,
    /// Provider identifier understood by the provider factory
    #[serde(alias = "provider")]
    pub provider_name: String,
    /// Model identifier passed to the provider
    pub model: String,
    /// Explicit stance; only honoured in opposition mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance: Option<Stance>,
}

impl AgentSpec {
    pub fn new(name: &str, provider_name: &str, model: &str) -> Self {
        Self {
            name: name.to_string(),
            provider_name: provider_name.to_string(),
            model: model.to_string(),
            stance: None,
        }
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = Some(stance);
        self
    }
}

/// The judge's backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeSpec {
    #[serde(default = "default_judge_name")]
    pub name: String,
    #[serde(alias = "provider")]
    pub provider_name: String,
    pub model: String,
}

fn default_judge_name() -> String {
    "Judge".to_string()
}

impl JudgeSpec {
    pub fn new(provider_name: &str, model: &str) -> Self {
        Self {
            name: default_judge_name(),
            provider_name: provider_name.to_string(),
            model: model.to_string(),
        }
    }
}

/// Full configuration of a debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Debating agents, in speaking order
    pub agents_cfg: Vec<AgentSpec>,
    /// The adjudicating agent
    pub judge_cfg: JudgeSpec,
    /// Advance phases automatically instead of one per request
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub debate_type: DebateType,
    /// Assign affirmative/negative sides instead of neutral analysis
    #[serde(default)]
    pub opposition_mode: bool,
    #[serde(default)]
    pub affirmative_agents: Vec<String>,
    #[serde(default)]
    pub negative_agents: Vec<String>,
    /// Stop once this many full rounds have been judged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u32>,
}

impl DebateConfig {
    /// Minimum number of debaters
    pub const MIN_AGENTS: usize = 2;

    pub fn new(agents_cfg: Vec<AgentSpec>, judge_cfg: JudgeSpec) -> Self {
        Self {
            agents_cfg,
            judge_cfg,
            auto: false,
            debate_type: DebateType::default(),
            opposition_mode: false,
            affirmative_agents: Vec::new(),
            negative_agents: Vec::new(),
            max_rounds: None,
        }
    }

    pub fn with_debate_type(mut self, debate_type: DebateType) -> Self {
        self.debate_type = debate_type;
        self
    }

    /// Enable opposition mode with the given side assignments
    pub fn with_opposition(mut self, affirmative: &[&str], negative: &[&str]) -> Self {
        self.opposition_mode = true;
        self.affirmative_agents = affirmative.iter().map(|s| s.to_string()).collect();
        self.negative_agents = negative.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, DebateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DebateError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json_str(&content)
    }

    /// Check the structural invariants of the configuration
    pub fn validate(&self) -> Result<(), DebateError> {
        if self.max_rounds == Some(0) {
            return Err(DebateError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        self.resolve_stances().map(|_| ())
    }

    /// Resolve every agent's effective stance, index-aligned with `agents_cfg`
    ///
    /// Stance lists must only reference configured agents, an agent may sit on
    /// one side only, and an explicit `stance` must agree with the lists.
    /// Without opposition mode every agent is neutral.
    pub fn resolve_stances(&self) -> Result<Vec<Stance>, DebateError> {
        if self.agents_cfg.len() < Self::MIN_AGENTS {
            return Err(DebateError::InvalidConfig(format!(
                "a debate needs at least {} agents, got {}",
                Self::MIN_AGENTS,
                self.agents_cfg.len()
            )));
        }

        let mut names = HashSet::new();
        for spec in &self.agents_cfg {
            if spec.name.trim().is_empty() {
                return Err(DebateError::InvalidConfig(
                    "agent names must not be empty".to_string(),
                ));
            }
            if !names.insert(spec.name.as_str()) {
                return Err(DebateError::InvalidConfig(format!(
                    "duplicate agent name '{}'",
                    spec.name
                )));
            }
        }

        for (side, list) in [
            (Stance::Affirmative, &self.affirmative_agents),
            (Stance::Negative, &self.negative_agents),
        ] {
            if let Some(unknown) = list.iter().find(|id| !names.contains(id.as_str())) {
                return Err(DebateError::InvalidConfig(format!(
                    "{} list references unknown agent '{}'",
                    side, unknown
                )));
            }
        }

        if let Some(both) = self
            .affirmative_agents
            .iter()
            .find(|id| self.negative_agents.contains(*id))
        {
            return Err(DebateError::InvalidConfig(format!(
                "agent '{}' is assigned to both sides",
                both
            )));
        }

        if !self.opposition_mode {
            return Ok(vec![Stance::Neutral; self.agents_cfg.len()]);
        }

        let mut stances = Vec::with_capacity(self.agents_cfg.len());
        for spec in &self.agents_cfg {
            let listed = if self.affirmative_agents.contains(&spec.name) {
                Some(Stance::Affirmative)
            } else if self.negative_agents.contains(&spec.name) {
                Some(Stance::Negative)
            } else {
                None
            };

            let stance = match (spec.stance, listed) {
                (Some(explicit), Some(listed)) if explicit != listed => {
                    return Err(DebateError::InvalidConfig(format!(
                        "agent '{}' declares stance {} but is listed as {}",
                        spec.name, explicit, listed
                    )));
                }
                (Some(explicit), _) => explicit,
                (None, Some(listed)) => listed,
                (None, None) => {
                    tracing::debug!(agent = %spec.name, "No side assigned, debating as neutral");
                    Stance::Neutral
                }
            };
            stances.push(stance);
        }

        if stances.iter().all(|s| *s == Stance::Neutral) {
            return Err(DebateError::InvalidConfig(
                "opposition mode requires at least one affirmative or negative agent".to_string(),
            ));
        }

        Ok(stances)
    }
}
