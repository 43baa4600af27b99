//! LLM Provider trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Sampling temperature used when a caller does not pick one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Errors from LLM providers
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Rate limited")]
    RateLimited,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A request to an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// System prompt (role/persona); omitted from the wire when `None`
    pub system: Option<String>,
    /// User message
    pub prompt: String,
    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,
    /// Maximum tokens to generate; provider default when `None`
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Create a single user-message request with default settings
    pub fn simple(prompt: &str) -> Self {
        Self {
            system: None,
            prompt: prompt.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    /// Create a request with a specific role
    pub fn with_role(system: &str, prompt: &str) -> Self {
        Self {
            system: Some(system.to_string()),
            ..Self::simple(prompt)
        }
    }
}

/// Response from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text
    pub content: String,
    /// Model used
    pub model: String,
    /// Tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Time taken in milliseconds
    pub latency_ms: u64,
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Model identifier sent to the endpoint
    fn model(&self) -> &str;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Generate a completion
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Generate with a simple prompt (convenience method)
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.complete(LlmRequest::simple(prompt)).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_request_has_no_system_prompt() {
        let request = LlmRequest::simple("Hello");
        assert!(request.system.is_none());
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert!(request.max_tokens.is_none());
    }

    #[test]
    fn test_with_role() {
        let request = LlmRequest::with_role("You are a judge.", "Score this");
        assert_eq!(request.system.as_deref(), Some("You are a judge."));
        assert_eq!(request.prompt, "Score this");
    }
}
