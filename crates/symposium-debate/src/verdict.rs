//! Judge verdicts
//!
//! The judge answers in free-form text that is supposed to contain a JSON
//! object. [`Verdict::parse`] extracts it without ever failing: anything that
//! is not a usable object degrades to [`Verdict::Fallback`]. Structured arms
//! keep the judge's original object, so serializing a verdict reproduces it
//! exactly.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::types::DebateType;

/// A JSON object as returned by the judge
pub type Document = Map<String, Value>;

/// Number of characters of the raw reply kept by the fallback arm
pub const FALLBACK_EXCERPT_CHARS: usize = 200;

/// Agreement level at which a consensus-style verdict stops the debate
pub const CONSENSUS_THRESHOLD: f64 = 0.75;

const BINARY_KEYS: [&str; 2] = ["most_correct_agent", "correctness_scores"];
const NON_BINARY_KEYS: [&str; 2] = ["most_insightful_agent", "exploration_scores"];

/// Verdict of a factual (binary) debate
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryVerdict {
    pub most_correct_agent: Option<String>,
    pub correctness_scores: BTreeMap<String, f64>,
    pub key_facts: Vec<String>,
    pub explanation: Option<String>,
    document: Document,
}

impl BinaryVerdict {
    fn from_document(document: Document) -> Self {
        Self {
            most_correct_agent: string_field(&document, "most_correct_agent"),
            correctness_scores: score_map(&document, "correctness_scores"),
            key_facts: string_list(&document, "key_facts"),
            explanation: string_field(&document, "explanation"),
            document,
        }
    }
}

/// Verdict of an exploratory (non-binary) debate
#[derive(Debug, Clone, PartialEq)]
pub struct NonBinaryVerdict {
    pub most_insightful_agent: Option<String>,
    pub exploration_scores: BTreeMap<String, f64>,
    pub key_insights: Vec<String>,
    pub novel_connections: Vec<String>,
    pub explanation: Option<String>,
    document: Document,
}

impl NonBinaryVerdict {
    fn from_document(document: Document) -> Self {
        Self {
            most_insightful_agent: string_field(&document, "most_insightful_agent"),
            exploration_scores: score_map(&document, "exploration_scores"),
            key_insights: string_list(&document, "key_insights"),
            novel_connections: string_list(&document, "novel_connections"),
            explanation: string_field(&document, "explanation"),
            document,
        }
    }
}

/// Verdict of the simpler agreement protocol
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusVerdict {
    pub agreement: bool,
    pub mean_agreement: f64,
    pub explanation: Option<String>,
    document: Document,
}

/// A judge's assessment of one round
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Binary(BinaryVerdict),
    NonBinary(NonBinaryVerdict),
    Consensus(ConsensusVerdict),
    /// The reply held no usable JSON object
    Fallback { explanation: String },
}

impl Verdict {
    /// Extract a verdict from a raw judge reply. Never fails.
    ///
    /// The candidate span runs from the first `{` to the last `}`.
    pub fn parse(raw: &str, debate_type: DebateType) -> Verdict {
        let span = match (raw.find('{'), raw.rfind('}')) {
            (Some(start), Some(end)) if end > start => &raw[start..=end],
            _ => {
                tracing::warn!("Judge reply contains no JSON object, using fallback verdict");
                return Verdict::fallback_from(raw);
            }
        };

        match serde_json::from_str::<Value>(span) {
            Ok(Value::Object(document)) => Verdict::from_document(document, debate_type),
            Ok(_) => Verdict::fallback_from(raw),
            Err(e) => {
                tracing::warn!(error = %e, "Judge reply is not valid JSON, using fallback verdict");
                Verdict::fallback_from(raw)
            }
        }
    }

    /// Classify a JSON object into a verdict arm
    ///
    /// Marker keys win over the debate type; the debate type decides for
    /// objects that carry none.
    pub fn from_document(document: Document, debate_type: DebateType) -> Verdict {
        let has_any = |keys: &[&str]| keys.iter().any(|k| document.contains_key(*k));
        let binary_marked = has_any(&BINARY_KEYS);
        let non_binary_marked = has_any(&NON_BINARY_KEYS);

        if !binary_marked && !non_binary_marked {
            if let Some((agreement, mean_agreement)) = consensus_fields(&document) {
                return Verdict::Consensus(ConsensusVerdict {
                    agreement,
                    mean_agreement,
                    explanation: string_field(&document, "explanation"),
                    document,
                });
            }
            if document.len() == 1 {
                if let Some(Value::String(explanation)) = document.get("explanation") {
                    return Verdict::Fallback {
                        explanation: explanation.clone(),
                    };
                }
            }
        }

        let as_binary = match (binary_marked, non_binary_marked) {
            (true, false) => true,
            (false, true) => false,
            _ => debate_type == DebateType::Binary,
        };

        if as_binary {
            Verdict::Binary(BinaryVerdict::from_document(document))
        } else {
            Verdict::NonBinary(NonBinaryVerdict::from_document(document))
        }
    }

    fn fallback_from(raw: &str) -> Verdict {
        Verdict::Fallback {
            explanation: raw.chars().take(FALLBACK_EXCERPT_CHARS).collect(),
        }
    }

    /// The JSON object this verdict serializes to
    pub fn document(&self) -> Document {
        match self {
            Verdict::Binary(v) => v.document.clone(),
            Verdict::NonBinary(v) => v.document.clone(),
            Verdict::Consensus(v) => v.document.clone(),
            Verdict::Fallback { explanation } => {
                let mut document = Map::new();
                document.insert("explanation".to_string(), Value::String(explanation.clone()));
                document
            }
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Verdict::Binary(v) => v.explanation.as_deref(),
            Verdict::NonBinary(v) => v.explanation.as_deref(),
            Verdict::Consensus(v) => v.explanation.as_deref(),
            Verdict::Fallback { explanation } => Some(explanation),
        }
    }

    /// Name of the agent the judge ranked first, when the verdict names one
    pub fn leader(&self) -> Option<&str> {
        match self {
            Verdict::Binary(v) => v.most_correct_agent.as_deref(),
            Verdict::NonBinary(v) => v.most_insightful_agent.as_deref(),
            _ => None,
        }
    }

    /// Per-agent scores (correctness or exploration), when present
    pub fn scores(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            Verdict::Binary(v) => Some(&v.correctness_scores),
            Verdict::NonBinary(v) => Some(&v.exploration_scores),
            _ => None,
        }
    }

    /// `(agreement, mean_agreement)` when the judge reported both
    ///
    /// Scored verdicts normally omit them; such debates never stop on
    /// consensus.
    pub fn consensus(&self) -> Option<(bool, f64)> {
        match self {
            Verdict::Consensus(v) => Some((v.agreement, v.mean_agreement)),
            Verdict::Binary(v) => consensus_fields(&v.document),
            Verdict::NonBinary(v) => consensus_fields(&v.document),
            Verdict::Fallback { .. } => None,
        }
    }

    /// The stopping rule: agreement reported and mean agreement at or above threshold
    pub fn reaches_consensus(&self) -> bool {
        matches!(self.consensus(), Some((true, mean)) if mean >= CONSENSUS_THRESHOLD)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Verdict::Fallback { .. })
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document().serialize(serializer)
    }
}

/// A verdict together with the round it judged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictRecord {
    pub round: u32,
    pub verdict: Verdict,
}

fn consensus_fields(document: &Document) -> Option<(bool, f64)> {
    let agreement = document.get("agreement")?.as_bool()?;
    let mean_agreement = document.get("mean_agreement")?.as_f64()?;
    Some((agreement, mean_agreement))
}

fn string_field(document: &Document, key: &str) -> Option<String> {
    document.get(key).and_then(Value::as_str).map(str::to_string)
}

fn score_map(document: &Document, key: &str) -> BTreeMap<String, f64> {
    document
        .get(key)
        .and_then(Value::as_object)
        .map(|scores| {
            scores
                .iter()
                .filter_map(|(name, score)| score.as_f64().map(|s| (name.clone(), s)))
                .collect()
        })
        .unwrap_or_default()
}

fn string_list(document: &Document, key: &str) -> Vec<String> {
    document
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}
