//! Mock LLM provider for testing and offline runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::ModelProfile;
use crate::factory::ProviderFactory;
use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

/// Sub-score triples the scripted judge cycles through (all internally consistent)
const SCRIPTED_SCORES: [(u32, u32, u32); 3] = [(16, 32, 30), (18, 35, 34), (12, 22, 20)];

#[derive(Debug)]
enum Behavior {
    /// Cycle through canned responses
    Canned(Vec<String>),
    /// Answer according to which debate role the prompt addresses
    Scripted,
    /// Every call fails with this message
    Failing(String),
}

/// A mock LLM provider that returns predefined responses
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    /// Reported model identifier
    model: String,
    behavior: Behavior,
    /// Number of completed calls
    calls: AtomicUsize,
    /// Simulated latency in ms
    latency_ms: u64,
}

impl MockProvider {
    fn with_behavior(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            model: "mock-model".to_string(),
            behavior,
            calls: AtomicUsize::new(0),
            latency_ms: 0,
        }
    }

    /// Create a new mock provider with given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self::with_behavior("mock", Behavior::Canned(responses))
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock whose every call fails with a request error
    pub fn failing(message: &str) -> Self {
        Self::with_behavior("failing-mock", Behavior::Failing(message.to_string()))
    }

    /// Create a role-aware mock that plays moderator, participant or judge
    /// depending on the prompt it receives
    pub fn scripted() -> Self {
        Self::with_behavior("scripted-mock", Behavior::Scripted)
    }

    /// Report a different model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Simulate network latency
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn scripted_response(&self, prompt: &str, turn: usize) -> String {
        if prompt.contains("debate moderator") {
            let topic = quoted_after(prompt, "Based on the topic '").unwrap_or("the topic");
            return format!(
                "```json\n{{\n\t\"Proposition 1\": \"{topic} does more good than harm.\",\n\
                 \t\"Proposition 2\": \"Governments should adopt {topic} within the next decade.\",\n\
                 \t\"Proposition 3\": \"Is {topic} economically sustainable?\"\n}}\n```"
            );
        }

        if prompt.contains("participant in a multi-party debate") {
            let proposition =
                quoted_after(prompt, "following proposition; '").unwrap_or("the proposition");
            // Even-numbered participants take the opposing side
            let against = quoted_after(prompt, "Your name is 'Participant ")
                .and_then(|name| name.split_whitespace().next())
                .and_then(|n| n.parse::<u32>().ok())
                .is_some_and(|n| n % 2 == 0);
            let (marker, side) = if against {
                ("I argue against", "against")
            } else {
                ("I argue for", "in favour of")
            };
            return format!(
                "{marker} the proposition. Consider the claim \"{proposition}\". \
                 The strongest case {side} it rests on measurable outcomes, fairness and \
                 long-term stability. The evidence points one way, and so should the judges."
            );
        }

        // Participant prompts mention the judge too, so this check comes last
        if prompt.contains("debate judge") {
            let participant = judged_participant(prompt).unwrap_or("Participant");
            let (clarity, strategy, effectiveness) = SCRIPTED_SCORES[turn % SCRIPTED_SCORES.len()];
            let overall = clarity + strategy + effectiveness;
            let label = match overall {
                81..=100 => "Excellent",
                61..=80 => "Good",
                36..=60 => "Fair",
                _ => "Poor",
            };
            let stance = if prompt.contains("I argue against") {
                "Against"
            } else {
                "For"
            };
            return format!(
                "```json\n{{\n\
                 \t\"Participant Name\": \"{participant}\",\n\
                 \t\"For or Against\": \"{stance}\",\n\
                 \t\"Score for Organization & Clarity (out of 20)\": \"{clarity}\",\n\
                 \t\"Organization & Clarity Score Details\": \"Clear structure with a logical progression.\",\n\
                 \t\"Score for Strategy & Style (out of 40)\": \"{strategy}\",\n\
                 \t\"Strategy & Style Score Details\": \"Engaging rhetoric, occasionally repetitive.\",\n\
                 \t\"Score for Effectiveness of Argument, Evidence and Content (out of 40)\": \"{effectiveness}\",\n\
                 \t\"Effectiveness of Argument, Evidence and Content Score Details\": \"Relevant evidence with minor gaps.\",\n\
                 \t\"Overall Score (out of 100)\": \"{overall}\",\n\
                 \t\"Overall Assessment Label\": \"{label}\",\n\
                 \t\"Overall Assessment Summary\": \"A {label} argument overall. It would benefit from stronger sourcing.\"\n\
                 }}\n```"
            );
        }

        format!(
            "Mock response to: \"{}\"",
            prompt.chars().take(50).collect::<String>()
        )
    }
}

/// Text between `prefix` and the next single quote
fn quoted_after<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let start = text.find(prefix)? + prefix.len();
    let len = text[start..].find('\'')?;
    Some(&text[start..start + len])
}

/// Participant named in a judge prompt: "... '<proposition>'. <name> made the following argument"
fn judged_participant(prompt: &str) -> Option<&str> {
    let end = prompt.find(" made the following argument")?;
    let start = prompt[..end].rfind("'. ").map(|i| i + 3)?;
    Some(&prompt[start..end])
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        !matches!(self.behavior, Behavior::Failing(_))
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();

        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }

        let turn = self.calls.fetch_add(1, Ordering::Relaxed);

        let content = match &self.behavior {
            Behavior::Failing(message) => return Err(LlmError::RequestFailed(message.clone())),
            Behavior::Scripted => self.scripted_response(&request.prompt, turn),
            Behavior::Canned(responses) if responses.is_empty() => String::new(),
            Behavior::Canned(responses) => responses[turn % responses.len()].clone(),
        };

        Ok(LlmResponse {
            content,
            model: self.model.clone(),
            tokens_used: Some((request.prompt.len() / 4) as u32 + 100),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Factory handing out mocks: a fresh scripted mock per call unless overridden by display name
#[derive(Debug, Default)]
pub struct MockProviderFactory {
    overrides: HashMap<String, Arc<dyn LlmProvider>>,
}

impl MockProviderFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `provider` for every role using the model with this display name
    pub fn with_override(mut self, model_display_name: &str, provider: Arc<dyn LlmProvider>) -> Self {
        self.overrides
            .insert(model_display_name.to_string(), provider);
        self
    }
}

impl ProviderFactory for MockProviderFactory {
    fn provider(&self, profile: &ModelProfile) -> Result<Arc<dyn LlmProvider>, LlmError> {
        if let Some(provider) = self.overrides.get(&profile.name) {
            return Ok(provider.clone());
        }
        Ok(Arc::new(
            MockProvider::scripted().with_model(&profile.model_name),
        ))
    }
}
