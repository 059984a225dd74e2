//! Mock LLM provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider that returns predefined responses
///
/// Every prompt it receives is captured so tests can assert on prompt
/// construction. Failures can be scheduled to exercise error paths.
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    /// Canned responses (cycles through them)
    responses: Vec<String>,
    /// Current response index
    index: AtomicUsize,
    /// Simulated latency in ms
    latency_ms: u64,
    /// Fail every call while set
    failing: AtomicBool,
    /// Fail every call once this many calls have succeeded
    fail_after: Option<usize>,
    /// Number of `complete` calls seen, successful or not
    calls: AtomicUsize,
    /// Prompts received, in call order
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create a new mock provider with given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: AtomicUsize::new(0),
            latency_ms: 0,
            failing: AtomicBool::new(false),
            fail_after: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a smart mock that responds based on prompt content
    pub fn smart() -> Self {
        Self {
            name: "smart-mock".to_string(),
            ..Self::new(Vec::new())
        }
    }

    /// Simulate network latency on every call
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Succeed for `calls` calls, then fail every call after that
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Toggle unconditional failure
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of completion calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }

    fn generate_smart_response(&self, request: &LlmRequest) -> String {
        let prompt = &request.prompt;

        if prompt.contains("adjudicator") {
            if prompt.contains("correctness score") {
                return r#"{"most_correct_agent": "unknown", "correctness_scores": {}, "key_facts": ["mock fact"], "explanation": "Mock binary verdict."}"#
                    .to_string();
            }
            return r#"{"most_insightful_agent": "unknown", "exploration_scores": {}, "key_insights": ["mock insight"], "novel_connections": [], "explanation": "Mock exploratory verdict."}"#
                .to_string();
        }

        if prompt.contains("[CRITIQUE ROUND") {
            return "Bullseye: the opponent overstates the evidence.\n\
                    1. The cited study is outdated. Damage: 5/10"
                .to_string();
        }

        if prompt.contains("[DEFENSE ROUND") {
            return "Counter: the study was replicated in 2021 (Smith 12). \
                    Fragility Index: 4 (unchanged). \
                    A larger replication would settle this. Until then the position stands."
                .to_string();
        }

        let excerpt: String = prompt.trim().chars().take(50).collect();
        format!(
            "Position on: \"{}\"\nThe evidence points one way (Doe 3).\nConfidence Index: 7",
            excerpt
        )
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }

        let scheduled_failure = self.fail_after.is_some_and(|limit| call >= limit);
        if self.failing.load(Ordering::SeqCst) || scheduled_failure {
            return Err(LlmError::ConnectionFailed(format!(
                "{} is configured to fail",
                self.name
            )));
        }

        let content = if self.responses.is_empty() {
            self.generate_smart_response(&request)
        } else {
            // Cycle through canned responses
            let idx = self.index.fetch_add(1, Ordering::Relaxed);
            self.responses[idx % self.responses.len()].clone()
        };

        Ok(LlmResponse {
            content,
            model: self.name.clone(),
            tokens_used: Some((request.prompt.len() / 4) as u32 + 100),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let mock = MockProvider::constant("Hello, world!");
        let response = mock.ask("test").await.unwrap();
        assert_eq!(response, "Hello, world!");
        assert_eq!(mock.last_prompt().as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_cycles_responses() {
        let mock = MockProvider::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(mock.ask("1").await.unwrap(), "a");
        assert_eq!(mock.ask("2").await.unwrap(), "b");
        assert_eq!(mock.ask("3").await.unwrap(), "a");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_fail_after() {
        let mock = MockProvider::constant("ok").fail_after(1);
        assert!(mock.ask("first").await.is_ok());
        assert!(matches!(
            mock.ask("second").await,
            Err(LlmError::ConnectionFailed(_))
        ));
        assert_eq!(mock.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_smart_mock_judge_reply_is_json() {
        let mock = MockProvider::smart();
        let response = mock
            .ask("You are the sole adjudicator of an exploratory debate")
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(parsed.get("most_insightful_agent").is_some());
    }
}
