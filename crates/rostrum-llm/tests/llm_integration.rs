//! Integration tests that require a real LLM API
//!
//! These tests are marked with #[ignore] and require environment variables:
//! - OPENAI_API_KEY for OpenAI tests
//! - TOGETHER_API_KEY for TogetherAI tests
//!
//! Run with: cargo test -p rostrum-llm --test llm_integration -- --ignored

use rostrum_llm::{
    find_model, Credentials, HttpProviderFactory, LlmProvider, LlmRequest, MockProvider,
    ProviderFactory,
};

/// Test OpenAI provider with real API
#[tokio::test]
#[ignore = "Requires OPENAI_API_KEY"]
async fn test_openai_real_request() {
    let factory = HttpProviderFactory::new(Credentials::from_env());
    let provider = factory
        .provider(&find_model("GPT-3.5-turbo").unwrap())
        .expect("OPENAI_API_KEY must be set for this test");

    assert!(provider.is_available().await, "OpenAI should be available");

    let request = LlmRequest {
        system: Some("You are a helpful assistant. Be extremely concise.".to_string()),
        prompt: "What is 2 + 2? Answer with just the number.".to_string(),
        temperature: 0.0,
        max_tokens: Some(10),
    };

    let response = provider.complete(request).await;
    assert!(response.is_ok(), "Request should succeed: {:?}", response);

    let response = response.unwrap();
    assert!(response.content.contains('4'), "Response should contain '4'");
    assert!(response.latency_ms > 0, "Should have latency recorded");

    println!("OpenAI response: {}", response.content);
    println!("Tokens: {:?}", response.tokens_used);
}

/// Test TogetherAI provider with real API
#[tokio::test]
#[ignore = "Requires TOGETHER_API_KEY"]
async fn test_together_real_request() {
    let factory = HttpProviderFactory::new(Credentials::from_env());
    let provider = factory
        .provider(&find_model("Llama3-8B").unwrap())
        .expect("TOGETHER_API_KEY must be set for this test");

    let response = provider.ask("Say 'hello' in one word").await;
    assert!(response.is_ok(), "Request should succeed: {:?}", response);
    assert!(!response.unwrap().is_empty(), "Response should have content");
}

/// Test error handling with invalid API key
#[tokio::test]
#[ignore = "Makes real API call"]
async fn test_invalid_api_key() {
    let factory = HttpProviderFactory::new(
        Credentials::default().with_openai_key(Some("invalid-key-12345".to_string())),
    );
    let provider = factory.provider(&find_model("GPT-4o").unwrap()).unwrap();

    let response = provider.ask("Hello").await;
    assert!(response.is_err(), "Should fail with invalid key");
    println!("Expected error: {:?}", response.unwrap_err());
}

/// Missing keys are a configuration error, raised before any request
#[test]
fn test_missing_key_is_rejected_before_request() {
    let factory = HttpProviderFactory::new(Credentials::default());
    let err = factory
        .provider(&find_model("Mixtral 8x7B instruct").unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("TOGETHER_API_KEY"));
}

/// Test mock provider works correctly
#[tokio::test]
async fn test_mock_provider() {
    let mock = MockProvider::scripted().with_model("gpt-4o");

    let response = mock
        .complete(LlmRequest::simple("What is 2+2?"))
        .await
        .unwrap();
    assert!(!response.content.is_empty());
    assert_eq!(response.model, "gpt-4o");
}
