//! OpenAI-compatible chat completions provider
//!
//! Works against api.openai.com and any endpoint that speaks the same
//! `/chat/completions` protocol (TogetherAI, local gateways).

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::Connection;
use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

/// Chat completions request format
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Chat completions response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Provider for any OpenAI-compatible endpoint
#[derive(Debug)]
pub struct OpenAICompatibleProvider {
    /// Endpoint and credential
    connection: Connection,
    /// Model to use (e.g., "gpt-4o", "meta-llama/Llama-3-70b-chat-hf")
    model: String,
    /// HTTP client
    client: reqwest::Client,
}

impl OpenAICompatibleProvider {
    /// Create a new provider with its own HTTP client
    pub fn new(connection: Connection, model: &str) -> Self {
        Self::with_client(reqwest::Client::new(), connection, model)
    }

    /// Create a provider sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client, connection: Connection, model: &str) -> Self {
        Self {
            connection,
            model: model.to_string(),
            client,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.connection.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.connection.base_url.trim_end_matches('/'), path)
    }
}

fn status_error(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Unauthorized(format!("Status: {}, Body: {}", status, body))
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
        _ => LlmError::RequestFailed(format!("Status: {}, Body: {}", status, body)),
    }
}

#[async_trait]
impl LlmProvider for OpenAICompatibleProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(self.endpoint("models"))
            .bearer_auth(&self.connection.api_key)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        let url = self.endpoint("chat/completions");

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: request.prompt,
        });

        let chat_request = ChatRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(model = %self.model, url = %url, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.connection.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("No completion choices returned".to_string()))?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(model = %self.model, latency_ms, "Chat completion received");

        Ok(LlmResponse {
            content,
            model: api_response.model.unwrap_or_else(|| self.model.clone()),
            tokens_used: api_response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }
}
