//! # Symposium Debate
//!
//! Multi-agent debates adjudicated by a judge agent.
//!
//! Agents take a position on a topic, critique each other and defend
//! themselves. After every defense phase the judge scores the round and the
//! debate stops once the judge reports consensus, a round limit is reached,
//! or the caller stops it.
//!
//! ## Key Types
//!
//! - [`DebateOrchestrator`] - The phase/round state machine
//! - [`DebateAgent`] - A debater and its transcript
//! - [`Judge`] - Renders a [`Verdict`] after each round
//! - [`SessionDocument`] / [`SessionStore`] - Save and resume debates
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use symposium_debate::{AgentSpec, DebateConfig, DebateOrchestrator, JudgeSpec, Phase};
//! use symposium_llm::MockProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DebateConfig::new(
//!         vec![
//!             AgentSpec::new("Alice", "mock", "mock"),
//!             AgentSpec::new("Bob", "mock", "mock"),
//!         ],
//!         JudgeSpec::new("mock", "mock"),
//!     );
//!     let mut debate = DebateOrchestrator::with_providers(
//!         config,
//!         vec![Arc::new(MockProvider::smart()), Arc::new(MockProvider::smart())],
//!         Arc::new(MockProvider::smart()),
//!     )
//!     .unwrap();
//!
//!     debate.run("Is nuclear power green?", 3).await.unwrap();
//!     assert_eq!(debate.phase(), Phase::Position);
//!     assert_eq!(debate.round(), 1);
//!     assert_eq!(debate.history().len(), 1);
//! }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod judge;
pub mod orchestrator;
pub mod prompts;
pub mod session;
pub mod store;
pub mod types;
pub mod verdict;

pub use agent::{AgentId, DebateAgent};
pub use config::{AgentSpec, DebateConfig, JudgeSpec};
pub use error::DebateError;
pub use judge::{AgentView, Judge, JudgeView, JudgeViewConfig};
pub use orchestrator::{Advance, DebateOrchestrator, StopReason};
pub use session::{infer_cursor, SavedAgent, SavedVerdict, SessionDocument, SessionState};
pub use store::SessionStore;
pub use types::{DebateType, Phase, Stance, Turn};
pub use verdict::{
    BinaryVerdict, ConsensusVerdict, NonBinaryVerdict, Verdict, VerdictRecord,
    CONSENSUS_THRESHOLD,
};
