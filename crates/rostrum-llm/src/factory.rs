//! Building providers from catalog entries

use std::sync::Arc;

use crate::catalog::ModelProfile;
use crate::config::Credentials;
use crate::openai::OpenAICompatibleProvider;
use crate::provider::{LlmError, LlmProvider};

/// Turns an operator's model selection into a callable provider
pub trait ProviderFactory: Send + Sync {
    fn provider(&self, profile: &ModelProfile) -> Result<Arc<dyn LlmProvider>, LlmError>;
}

/// Factory producing HTTP providers from explicit credentials
#[derive(Debug, Clone)]
pub struct HttpProviderFactory {
    credentials: Credentials,
    client: reqwest::Client,
}

impl HttpProviderFactory {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn provider(&self, profile: &ModelProfile) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let connection = self.credentials.connection(profile.endpoint)?;
        tracing::debug!(
            model = %profile.model_name,
            endpoint = %profile.endpoint,
            "Building provider"
        );
        Ok(Arc::new(OpenAICompatibleProvider::with_client(
            self.client.clone(),
            connection,
            &profile.model_name,
        )))
    }
}
