use std::collections::HashMap;
use std::sync::Arc;

use symposium_debate::{
    Advance, AgentSpec, DebateConfig, DebateError, DebateOrchestrator, DebateType, JudgeSpec,
    Phase, StopReason, Verdict,
};
use symposium_llm::{
    LlmConfig, LlmError, LlmProvider, MockProvider, ProviderFactory, ProviderRegistry,
};

const TOPIC: &str = "Should cities ban cars from their centers?";

/// Hands out pre-built mocks keyed by model name
struct MockFactory {
    providers: HashMap<String, Arc<MockProvider>>,
}

impl MockFactory {
    fn new(providers: Vec<(&str, Arc<MockProvider>)>) -> Self {
        Self {
            providers: providers
                .into_iter()
                .map(|(model, mock)| (model.to_string(), mock))
                .collect(),
        }
    }
}

impl ProviderFactory for MockFactory {
    fn create(&self, provider: &str, model: &str) -> Result<Arc<dyn LlmProvider>, LlmError> {
        self.providers
            .get(model)
            .map(|mock| mock.clone() as Arc<dyn LlmProvider>)
            .ok_or_else(|| LlmError::UnknownProvider {
                name: format!("{}/{}", provider, model),
                registered: self.providers.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }
}

struct Fixture {
    alice: Arc<MockProvider>,
    bob: Arc<MockProvider>,
    judge: Arc<MockProvider>,
}

impl Fixture {
    fn smart() -> Self {
        Self::with(MockProvider::smart(), MockProvider::smart(), MockProvider::smart())
    }

    fn with(alice: MockProvider, bob: MockProvider, judge: MockProvider) -> Self {
        Self {
            alice: Arc::new(alice),
            bob: Arc::new(bob),
            judge: Arc::new(judge),
        }
    }

    fn build(&self, config: DebateConfig) -> DebateOrchestrator {
        let factory = MockFactory::new(vec![
            ("alice", self.alice.clone()),
            ("bob", self.bob.clone()),
            ("judge", self.judge.clone()),
        ]);
        DebateOrchestrator::new(config, &factory).unwrap()
    }
}

fn config() -> DebateConfig {
    DebateConfig::new(
        vec![
            AgentSpec::new("Alice", "mock", "alice"),
            AgentSpec::new("Bob", "mock", "bob"),
        ],
        JudgeSpec::new("mock", "judge"),
    )
}

fn scripted(name: &str) -> MockProvider {
    MockProvider::new(vec![
        format!("{name}-position"),
        format!("{name}-critique"),
        format!("{name}-defense"),
    ])
}

#[tokio::test]
async fn test_two_agent_non_binary_full_cycle() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config());

    assert_eq!(
        debate.advance(TOPIC).await.unwrap(),
        Advance::PhaseCompleted {
            phase: Phase::Position,
            round: 0
        }
    );
    assert_eq!(debate.phase(), Phase::Critique);

    assert_eq!(
        debate.advance(TOPIC).await.unwrap(),
        Advance::PhaseCompleted {
            phase: Phase::Critique,
            round: 0
        }
    );
    assert_eq!(debate.phase(), Phase::Defense);

    assert_eq!(
        debate.advance(TOPIC).await.unwrap(),
        Advance::RoundJudged {
            round: 0,
            verdict_index: 0,
            stopped: false
        }
    );
    assert_eq!(debate.phase(), Phase::Position);
    assert_eq!(debate.round(), 1);
    assert!(!debate.is_stopped());

    for agent in debate.agents() {
        let phases: Vec<Phase> = agent.transcript().iter().map(|t| t.phase).collect();
        assert_eq!(phases, vec![Phase::Position, Phase::Critique, Phase::Defense]);
        assert!(agent.transcript().iter().all(|t| t.round_num == 0));
    }

    assert_eq!(debate.history().len(), 1);
    let record = &debate.history()[0];
    assert_eq!(record.round, 0);
    assert!(matches!(record.verdict, Verdict::NonBinary(_)));
    assert_eq!(record.verdict.explanation(), Some("Mock exploratory verdict."));

    assert_eq!(fixture.judge.call_count(), 1);
    assert_eq!(debate.topic(), Some(TOPIC));
}

#[tokio::test]
async fn test_rounds_only_increment_after_defense() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config());

    let mut cursors = Vec::new();
    for _ in 0..7 {
        debate.advance(TOPIC).await.unwrap();
        cursors.push((debate.phase(), debate.round()));
    }

    assert_eq!(
        cursors,
        vec![
            (Phase::Critique, 0),
            (Phase::Defense, 0),
            (Phase::Position, 1),
            (Phase::Critique, 1),
            (Phase::Defense, 1),
            (Phase::Position, 2),
            (Phase::Critique, 2),
        ]
    );

    let rounds: Vec<u32> = debate.history().iter().map(|r| r.round).collect();
    assert_eq!(rounds, vec![0, 1]);
}

#[tokio::test]
async fn test_critique_prompt_references_every_position() {
    let fixture = Fixture::with(scripted("alice"), scripted("bob"), MockProvider::smart());
    let mut debate = fixture.build(config());

    debate.advance(TOPIC).await.unwrap();
    debate.advance(TOPIC).await.unwrap();

    let alice_prompts = fixture.alice.prompts();
    let bob_prompts = fixture.bob.prompts();
    assert!(alice_prompts[0].contains(TOPIC));

    let critique = &alice_prompts[1];
    assert!(critique.contains("AGENT 1 (Alice):\nalice-position"));
    assert!(critique.contains("AGENT 2 (Bob):\nbob-position"));
    assert_eq!(critique, &bob_prompts[1]);
}

#[tokio::test]
async fn test_defense_prompt_excludes_own_critique() {
    let fixture = Fixture::with(scripted("alice"), scripted("bob"), MockProvider::smart());
    let mut debate = fixture.build(config());

    debate.run(TOPIC, 3).await.unwrap();

    let alice_defense = &fixture.alice.prompts()[2];
    assert!(alice_defense.contains("FROM Bob:\nbob-critique"));
    assert!(!alice_defense.contains("alice-critique"));

    let bob_defense = &fixture.bob.prompts()[2];
    assert!(bob_defense.contains("FROM Alice:\nalice-critique"));
    assert!(!bob_defense.contains("bob-critique"));

    // The judge sees the defense replies of the round it scores
    let judge_prompt = fixture.judge.last_prompt().unwrap();
    assert!(judge_prompt.contains("alice-defense"));
    assert!(judge_prompt.contains("bob-defense"));
}

#[tokio::test]
async fn test_critique_failure_commits_nothing() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config());
    debate.advance(TOPIC).await.unwrap();

    fixture.bob.set_failing(true);
    let err = debate.advance(TOPIC).await.unwrap_err();
    match &err {
        DebateError::Completion { agent, phase, .. } => {
            assert_eq!(agent, "Bob");
            assert_eq!(*phase, Phase::Critique);
        }
        other => panic!("expected completion error, got {:?}", other),
    }
    assert!(err.is_retryable());

    assert_eq!(debate.phase(), Phase::Critique);
    assert_eq!(debate.round(), 0);
    for agent in debate.agents() {
        assert_eq!(agent.transcript().len(), 1);
    }
    // Alice was still asked; her reply was discarded
    assert_eq!(fixture.alice.call_count(), 2);

    fixture.bob.set_failing(false);
    debate.advance(TOPIC).await.unwrap();
    assert_eq!(debate.phase(), Phase::Defense);
    for agent in debate.agents() {
        assert_eq!(agent.transcript().len(), 2);
    }
}

#[tokio::test]
async fn test_judge_failure_leaves_defense_uncommitted() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config());
    debate.run(TOPIC, 2).await.unwrap();

    fixture.judge.set_failing(true);
    let err = debate.advance(TOPIC).await.unwrap_err();
    assert!(matches!(err, DebateError::Judge { .. }));
    assert_eq!(debate.phase(), Phase::Defense);
    assert_eq!(debate.round(), 0);
    assert!(debate.history().is_empty());
    assert!(debate.agents().iter().all(|a| a.transcript().len() == 2));

    fixture.judge.set_failing(false);
    let outcome = debate.advance(TOPIC).await.unwrap();
    assert!(matches!(outcome, Advance::RoundJudged { round: 0, .. }));
    assert!(debate.agents().iter().all(|a| a.transcript().len() == 3));
}

#[tokio::test]
async fn test_consensus_stops_debate() {
    let fixture = Fixture::with(
        MockProvider::smart(),
        MockProvider::smart(),
        MockProvider::constant(
            r#"Verdict: {"agreement": true, "mean_agreement": 0.8, "explanation": "Both accept the data."}"#,
        ),
    );
    let mut debate = fixture.build(config());
    debate.run(TOPIC, 2).await.unwrap();

    assert_eq!(
        debate.advance(TOPIC).await.unwrap(),
        Advance::RoundJudged {
            round: 0,
            verdict_index: 0,
            stopped: true
        }
    );
    assert_eq!(debate.stop_reason(), Some(StopReason::Consensus));
    assert_eq!(debate.phase(), Phase::Position);
    assert_eq!(debate.round(), 1);

    let calls = fixture.alice.call_count();
    let before = (debate.phase(), debate.round(), debate.history().len());
    assert_eq!(debate.advance(TOPIC).await.unwrap(), Advance::Halted);
    assert_eq!(fixture.alice.call_count(), calls);
    assert_eq!((debate.phase(), debate.round(), debate.history().len()), before);
    assert!(debate.is_stopped());
}

#[tokio::test]
async fn test_stopped_mid_round_stays_put() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config());
    debate.run(TOPIC, 5).await.unwrap();
    debate.stop();

    let before = (debate.phase(), debate.round(), debate.history().to_vec());
    let turns: Vec<usize> = debate.agents().iter().map(|a| a.transcript().len()).collect();

    for _ in 0..3 {
        assert_eq!(debate.advance(TOPIC).await.unwrap(), Advance::Halted);
    }
    assert_eq!(debate.run(TOPIC, 4).await.unwrap(), 0);

    assert_eq!((debate.phase(), debate.round(), debate.history().to_vec()), before);
    let after: Vec<usize> = debate.agents().iter().map(|a| a.transcript().len()).collect();
    assert_eq!(after, turns);
    assert_eq!(debate.stop_reason(), Some(StopReason::Manual));
}

#[tokio::test]
async fn test_weak_agreement_keeps_debating() {
    let fixture = Fixture::with(
        MockProvider::smart(),
        MockProvider::smart(),
        MockProvider::constant(r#"{"agreement": true, "mean_agreement": 0.74}"#),
    );
    let mut debate = fixture.build(config());

    assert_eq!(debate.run(TOPIC, 6).await.unwrap(), 6);
    assert!(!debate.is_stopped());
    assert_eq!(debate.history().len(), 2);
}

#[tokio::test]
async fn test_round_limit_stops_debate() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config().with_max_rounds(2));

    let executed = debate.run(TOPIC, 100).await.unwrap();
    assert_eq!(executed, 6);
    assert!(debate.is_stopped());
    assert_eq!(debate.stop_reason(), Some(StopReason::RoundLimit));
    assert_eq!(debate.round(), 2);
    assert_eq!(debate.history().len(), 2);
}

#[tokio::test]
async fn test_manual_stop_before_any_phase() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(config());

    debate.stop();
    assert_eq!(debate.advance(TOPIC).await.unwrap(), Advance::Halted);
    assert_eq!(debate.run(TOPIC, 5).await.unwrap(), 0);
    assert_eq!(debate.stop_reason(), Some(StopReason::Manual));
    assert_eq!(fixture.alice.call_count(), 0);
    assert!(debate.agents().iter().all(|a| a.transcript().is_empty()));
}

#[tokio::test]
async fn test_commit_order_ignores_latency() {
    let fixture = Fixture::with(
        MockProvider::constant("slow alice").with_latency(60),
        MockProvider::constant("fast bob"),
        MockProvider::smart(),
    );
    let mut debate = fixture.build(config());

    debate.run(TOPIC, 2).await.unwrap();

    assert_eq!(debate.agents()[0].transcript()[0].content, "slow alice");
    assert_eq!(debate.agents()[1].transcript()[0].content, "fast bob");

    let critique = fixture.bob.prompts()[1].clone();
    let alice_at = critique.find("AGENT 1 (Alice):\nslow alice").unwrap();
    let bob_at = critique.find("AGENT 2 (Bob):\nfast bob").unwrap();
    assert!(alice_at < bob_at);
}

#[tokio::test]
async fn test_opposition_mode_prompts() {
    let fixture = Fixture::smart();
    let mut debate = fixture.build(
        config()
            .with_debate_type(DebateType::Binary)
            .with_opposition(&["Alice"], &["Bob"]),
    );
    debate.run(TOPIC, 3).await.unwrap();

    assert!(fixture.alice.prompts()[0].contains("AFFIRMATIVE"));
    assert!(fixture.bob.prompts()[0].contains("NEGATIVE"));

    let judge_prompt = fixture.judge.last_prompt().unwrap();
    assert!(judge_prompt.contains("correctness score"));
    assert!(judge_prompt.contains("\"stance\": \"affirmative\""));
    assert!(judge_prompt.contains("\"opposition_mode\": true"));
    assert!(matches!(debate.history()[0].verdict, Verdict::Binary(_)));
}

#[tokio::test]
async fn test_unparseable_verdict_does_not_fail_round() {
    let fixture = Fixture::with(
        MockProvider::smart(),
        MockProvider::smart(),
        MockProvider::constant("Both were fine, honestly."),
    );
    let mut debate = fixture.build(config());
    debate.run(TOPIC, 3).await.unwrap();

    assert_eq!(debate.round(), 1);
    assert_eq!(
        debate.history()[0].verdict,
        Verdict::Fallback {
            explanation: "Both were fine, honestly.".to_string()
        }
    );
}

#[tokio::test]
async fn test_invalid_config_fails_fast() {
    let fixture = Fixture::smart();
    let factory = MockFactory::new(vec![("alice", fixture.alice.clone())]);

    let bad = config().with_opposition(&["Alice"], &["Zed"]);
    let err = DebateOrchestrator::new(bad, &factory).unwrap_err();
    assert!(matches!(err, DebateError::InvalidConfig(_)));

    let err = DebateOrchestrator::new(config(), &factory).unwrap_err();
    match err {
        DebateError::Provider { participant, source } => {
            assert_eq!(participant, "Bob");
            assert!(matches!(source, LlmError::UnknownProvider { .. }));
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_registry_requires_api_keys() {
    let registry = ProviderRegistry::new(LlmConfig::default());
    let mut remote = config();
    remote.agents_cfg[0].provider_name = "openai".to_string();

    let err = DebateOrchestrator::new(remote, &registry).unwrap_err();
    assert!(matches!(
        err,
        DebateError::Provider {
            source: LlmError::MissingApiKey(_),
            ..
        }
    ));

    // Mock backends need no configuration
    let mut debate = DebateOrchestrator::new(config(), &registry).unwrap();
    debate.run(TOPIC, 3).await.unwrap();
    assert_eq!(debate.history().len(), 1);
}

#[tokio::test]
async fn test_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/debate.example.json");
    let config = DebateConfig::from_json_file(path).await.unwrap();

    let stances = config.resolve_stances().unwrap();
    assert_eq!(
        stances,
        vec![
            symposium_debate::Stance::Affirmative,
            symposium_debate::Stance::Negative,
            symposium_debate::Stance::Neutral
        ]
    );
    assert_eq!(config.max_rounds, Some(3));
}
