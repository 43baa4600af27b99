//! # Rostrum Debate
//!
//! Three-role debate orchestration: a moderator proposes, participants argue,
//! judges score against a fixed rubric.
//!
//! ## Key Types
//!
//! - [`DebateSession`]: the four-phase state machine an operator drives
//! - [`Moderator`], [`Participant`], [`Judge`]: one model call each
//! - [`ResponseSchema`]: asks the model for JSON and pulls the declared fields back out
//! - [`DebateReport`] / [`ResultsTable`]: aggregated scores
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rostrum_debate::{DebateSession, DebateSetup, PropositionKey};
//! use rostrum_llm::MockProviderFactory;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), rostrum_debate::DebateError> {
//! let mut session = DebateSession::new(DebateSetup::default(), Arc::new(MockProviderFactory::new()));
//!
//! session.generate_propositions("Universal basic income").await?;
//! session.select_proposition(PropositionKey::new(2).unwrap())?;
//! let report = session.run_debate().await?;
//!
//! assert_eq!(report.rows.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod debate;
pub mod error;
pub mod evaluation;
pub mod proposition;
pub mod results;
pub mod schema;
pub mod templates;

pub use agents::{Judge, Moderator, Participant};
pub use debate::{
    DebateObserver, DebatePhase, DebateSession, DebateSetup, MAX_JUDGES, MAX_PARTICIPANTS,
};
pub use error::DebateError;
pub use evaluation::{AssessmentLabel, Evaluation, SectionScore, Stance};
pub use proposition::{Argument, PropositionKey, PropositionSet};
pub use results::{DebateReport, ResultRow, ResultsTable, Standing};
pub use schema::{ExtractionError, ResponseField, ResponseSchema, StructuredReply};
pub use templates::{fill, ARGUMENT_WORD_LIMIT, JUDGING_CRITERIA};
