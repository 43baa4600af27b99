pub mod info;
pub mod models;
pub mod propose;
pub mod render;
pub mod run;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;
use rostrum_llm::{
    builtin_models, find_model, Credentials, HttpProviderFactory, MockProviderFactory, ModelProfile,
    ProviderFactory,
};

/// Where model calls go
#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// TogetherAI API key
    #[arg(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    together_api_key: Option<String>,

    /// Use scripted offline models instead of the network
    #[arg(long)]
    offline: bool,
}

impl ProviderArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::from_env()
            .with_openai_key(self.openai_api_key.clone())
            .with_together_key(self.together_api_key.clone())
    }

    pub fn factory(&self) -> Arc<dyn ProviderFactory> {
        if self.offline {
            tracing::info!("Using offline scripted models");
            Arc::new(MockProviderFactory::new())
        } else {
            Arc::new(HttpProviderFactory::new(self.credentials()))
        }
    }
}

/// Resolve a `--moderator`/`--participant`/`--judge` value against the catalog
pub fn resolve_model(query: &str) -> Result<ModelProfile> {
    find_model(query).ok_or_else(|| {
        let names: Vec<String> = builtin_models().into_iter().map(|m| m.name).collect();
        anyhow!(
            "Unknown model '{}'. Choose one of: {} (see 'rostrum models')",
            query,
            names.join(", ")
        )
    })
}
