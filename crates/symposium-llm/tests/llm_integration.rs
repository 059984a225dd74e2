//! Integration tests that require a real LLM API
//!
//! These tests are marked with #[ignore] and require environment variables:
//! - OPENAI_API_KEY for OpenAI tests
//! - ANTHROPIC_API_KEY for Anthropic tests
//!
//! Run with: cargo test -p symposium-llm --test llm_integration -- --ignored

use symposium_llm::{LlmProvider, LlmRequest, ProviderFactory, ProviderRegistry};

/// Test OpenAI provider with real API
#[tokio::test]
#[ignore = "Requires OPENAI_API_KEY"]
async fn test_openai_real_request() {
    let registry = ProviderRegistry::from_env();
    let provider = registry
        .create("openai", "gpt-4o-mini")
        .expect("OPENAI_API_KEY must be set for this test");

    let request = LlmRequest {
        system: Some("Be extremely concise.".to_string()),
        prompt: "What is 2 + 2? Answer with just the number.".to_string(),
        temperature: 0.0,
        max_tokens: 10,
    };

    let response = provider.complete(request).await;
    assert!(response.is_ok(), "Request should succeed: {:?}", response);

    let response = response.unwrap();
    assert!(response.content.contains('4'), "Response should contain '4'");
    println!("OpenAI response: {} ({}ms)", response.content, response.latency_ms);
}

/// Test Anthropic provider with real API
#[tokio::test]
#[ignore = "Requires ANTHROPIC_API_KEY"]
async fn test_anthropic_real_request() {
    let registry = ProviderRegistry::from_env();
    let provider = registry
        .create("anthropic", "claude-3-haiku-20240307")
        .expect("ANTHROPIC_API_KEY must be set for this test");

    let answer = provider
        .ask("What is the capital of France? One word.")
        .await
        .expect("Request should succeed");
    assert!(answer.to_lowercase().contains("paris"));
}

/// An unreachable local endpoint surfaces as a transport error, not a panic
#[tokio::test]
async fn test_unreachable_local_server_is_connection_error() {
    let registry = ProviderRegistry::new(symposium_llm::LlmConfig {
        ollama_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..Default::default()
    });
    let provider = registry.create("local", "llama3").unwrap();

    let result = provider.ask("hello").await;
    assert!(matches!(
        result,
        Err(symposium_llm::LlmError::ConnectionFailed(_)) | Err(symposium_llm::LlmError::Timeout)
    ));
}
