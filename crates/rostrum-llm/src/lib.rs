//! # Rostrum LLM
//!
//! Provider integrations and the model catalog for Rostrum debates.
//!
//! ## Supported Backends
//!
//! | Endpoint | Models | Key Required |
//! |----------|--------|--------------|
//! | OpenAI | GPT-3.5-turbo, GPT-4o | `OPENAI_API_KEY` |
//! | TogetherAI | Llama3-70B, Mixtral 8x7B instruct, Llama3-8B | `TOGETHER_API_KEY` |
//! | Mock | Testing / offline | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use rostrum_llm::{LlmProvider, MockProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockProvider::constant("Motion carried.");
//!     let response = llm.ask("Summarize the debate").await.unwrap();
//!     assert_eq!(response, "Motion carried.");
//! }
//! ```
//!
//! ## With a catalog model
//!
//! ```rust,ignore
//! use rostrum_llm::{find_model, Credentials, HttpProviderFactory, ProviderFactory};
//!
//! let factory = HttpProviderFactory::new(Credentials::from_env());
//! let llm = factory.provider(&find_model("GPT-4o").unwrap())?;
//! let response = llm.ask("Explain Rayleigh scattering").await?;
//! ```

pub mod catalog;
pub mod config;
pub mod factory;
pub mod mock;
pub mod openai;
pub mod provider;

pub use catalog::{builtin_models, default_model, find_model, Endpoint, ModelProfile};
pub use config::{ConfigError, Connection, Credentials, OPENAI_BASE_URL, TOGETHER_BASE_URL};
pub use factory::{HttpProviderFactory, ProviderFactory};
pub use mock::{MockProvider, MockProviderFactory};
pub use openai::OpenAICompatibleProvider;
pub use provider::{LlmError, LlmProvider, LlmRequest, LlmResponse, DEFAULT_TEMPERATURE};
