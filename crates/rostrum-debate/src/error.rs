//! Debate error types

use rostrum_llm::LlmError;
use thiserror::Error;

use crate::debate::DebatePhase;
use crate::schema::ExtractionError;

/// Everything that can stop a debate step
///
/// Remote failures and unreadable replies are kept apart for logging, but the
/// operator sees both the same way: a message, and the step can be retried.
#[derive(Debug, Error)]
pub enum DebateError {
    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Could not read the model's reply: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Prompt template placeholder '{0}' has no value")]
    Template(String),

    #[error("Invalid debate setup: {0}")]
    InvalidSetup(String),

    #[error("'{0}' is not a proposition; choose 1, 2 or 3")]
    InvalidProposition(String),

    #[error("Please select a proposition before running the debate")]
    PropositionNotSelected,

    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: DebatePhase,
    },
}

impl DebateError {
    /// True for failures of the remote call itself (network, auth, rate limit)
    pub fn is_remote(&self) -> bool {
        matches!(self, DebateError::Llm(_))
    }
}
