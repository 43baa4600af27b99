//! Fixed catalog of selectable model configurations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which API family a model is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// api.openai.com (the default endpoint)
    OpenAI,
    /// api.together.xyz (alternate endpoint, own key)
    Together,
}

impl Endpoint {
    pub const ALL: [Endpoint; 2] = [Endpoint::OpenAI, Endpoint::Together];
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::OpenAI => write!(f, "OpenAI"),
            Endpoint::Together => write!(f, "TogetherAI"),
        }
    }
}

/// A named model configuration an operator can pick for any role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Display name, e.g. "GPT-4o"
    pub name: String,
    /// Model identifier sent to the endpoint
    pub model_name: String,
    /// Endpoint serving the model
    pub endpoint: Endpoint,
}

impl ModelProfile {
    pub fn new(name: &str, model_name: &str, endpoint: Endpoint) -> Self {
        Self {
            name: name.to_string(),
            model_name: model_name.to_string(),
            endpoint,
        }
    }
}

impl fmt::Display for ModelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The five built-in model configurations, in display order
pub fn builtin_models() -> Vec<ModelProfile> {
    vec![
        ModelProfile::new("GPT-3.5-turbo", "gpt-3.5-turbo", Endpoint::OpenAI),
        ModelProfile::new("GPT-4o", "gpt-4o", Endpoint::OpenAI),
        ModelProfile::new(
            "Llama3-70B",
            "meta-llama/Llama-3-70b-chat-hf",
            Endpoint::Together,
        ),
        ModelProfile::new(
            "Mixtral 8x7B instruct",
            "mistralai/Mixtral-8x7B-Instruct-v0.1",
            Endpoint::Together,
        ),
        ModelProfile::new(
            "Llama3-8B",
            "meta-llama/Llama-3-8b-chat-hf",
            Endpoint::Together,
        ),
    ]
}

/// Find a built-in model by 1-based index, display name or model identifier
pub fn find_model(query: &str) -> Option<ModelProfile> {
    let query = query.trim();
    let models = builtin_models();

    if let Ok(index) = query.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| models.get(i).cloned());
    }

    models.into_iter().find(|m| {
        m.name.eq_ignore_ascii_case(query) || m.model_name.eq_ignore_ascii_case(query)
    })
}

/// Model used for any role the operator leaves unset
pub fn default_model() -> ModelProfile {
    ModelProfile::new("GPT-3.5-turbo", "gpt-3.5-turbo", Endpoint::OpenAI)
}
