//! Core vocabulary of a debate: phases, stances, debate types and turns

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stage within a debate round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Position,
    Critique,
    Defense,
}

impl Phase {
    /// The phase that follows this one; defense wraps around to position
    pub fn next(self) -> Phase {
        match self {
            Phase::Position => Phase::Critique,
            Phase::Critique => Phase::Defense,
            Phase::Defense => Phase::Position,
        }
    }

    /// Whether leaving this phase completes a round
    pub fn closes_round(self) -> bool {
        self == Phase::Defense
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Position => "position",
            Phase::Critique => "critique",
            Phase::Defense => "defense",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rhetorical side assigned to an agent in opposition mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Affirmative,
    Negative,
    #[default]
    Neutral,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Affirmative => "affirmative",
            Stance::Negative => "negative",
            Stance::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the judge evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DebateType {
    /// Objective correctness is judged
    #[serde(rename = "binary")]
    Binary,
    /// Exploratory insight is judged
    #[default]
    #[serde(rename = "non-binary")]
    NonBinary,
}

impl DebateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateType::Binary => "binary",
            DebateType::NonBinary => "non-binary",
        }
    }
}

impl fmt::Display for DebateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reply recorded in an agent's transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Phase the reply was produced in (serialized as `round` for
    /// compatibility with existing session files)
    #[serde(rename = "round")]
    pub phase: Phase,
    /// The reply text, stored verbatim
    pub content: String,
    /// Round number the reply belongs to
    #[serde(default)]
    pub round_num: u32,
}

impl Turn {
    pub fn new(phase: Phase, round_num: u32, content: impl Into<String>) -> Self {
        Self {
            phase,
            content: content.into(),
            round_num,
        }
    }
}
