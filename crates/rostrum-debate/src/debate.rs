//! The debate session state machine
//!
//! A session moves through four phases:
//!
//! ```text
//! Idle ──generate──▶ PropositionsGenerated ──select──▶ PropositionSelected ──run──▶ DebateComplete
//!                                                              ▲                          │
//!                                                              └────────run again─────────┘
//! ```
//!
//! Generating propositions is accepted from any phase and starts a new run.
//! A completed debate can be run again on the same proposition.
//! Every model call is awaited before the next one is issued.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use rostrum_llm::{default_model, ModelProfile, ProviderFactory};
use serde::Serialize;
use uuid::Uuid;

use crate::agents::{Judge, Moderator, Participant};
use crate::error::DebateError;
use crate::evaluation::Evaluation;
use crate::proposition::{Argument, PropositionKey, PropositionSet};
use crate::results::{DebateReport, ResultRow};

pub const MAX_PARTICIPANTS: usize = 3;
pub const MAX_JUDGES: usize = 3;

/// Model selections for every role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateSetup {
    moderator: ModelProfile,
    participants: Vec<ModelProfile>,
    judges: Vec<ModelProfile>,
}

impl DebateSetup {
    /// Validate participant and judge counts (1 to 3 each)
    pub fn new(
        moderator: ModelProfile,
        participants: Vec<ModelProfile>,
        judges: Vec<ModelProfile>,
    ) -> Result<Self, DebateError> {
        if !(1..=MAX_PARTICIPANTS).contains(&participants.len()) {
            return Err(DebateError::InvalidSetup(format!(
                "need 1 to {} participants, got {}",
                MAX_PARTICIPANTS,
                participants.len()
            )));
        }
        if !(1..=MAX_JUDGES).contains(&judges.len()) {
            return Err(DebateError::InvalidSetup(format!(
                "need 1 to {} judges, got {}",
                MAX_JUDGES,
                judges.len()
            )));
        }
        Ok(Self {
            moderator,
            participants,
            judges,
        })
    }

    pub fn moderator(&self) -> &ModelProfile {
        &self.moderator
    }

    pub fn participants(&self) -> &[ModelProfile] {
        &self.participants
    }

    pub fn judges(&self) -> &[ModelProfile] {
        &self.judges
    }
}

impl Default for DebateSetup {
    /// Two participants and one judge, all on the default model
    fn default() -> Self {
        Self {
            moderator: default_model(),
            participants: vec![default_model(), default_model()],
            judges: vec![default_model()],
        }
    }
}

/// Where a session is in the debate flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DebatePhase {
    Idle,
    PropositionsGenerated,
    PropositionSelected,
    DebateComplete,
}

impl fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DebatePhase::Idle => "idle",
            DebatePhase::PropositionsGenerated => "propositions are awaiting selection",
            DebatePhase::PropositionSelected => "a proposition is selected",
            DebatePhase::DebateComplete => "the debate is complete",
        };
        write!(f, "{}", text)
    }
}

/// Receives results as a run produces them
pub trait DebateObserver {
    fn on_argument(&mut self, _argument: &Argument) {}
    fn on_evaluation(&mut self, _row: &ResultRow) {}
}

struct NoopObserver;

impl DebateObserver for NoopObserver {}

#[derive(Debug, Clone)]
enum SessionState {
    Idle,
    Generated {
        topic: String,
        propositions: PropositionSet,
    },
    Selected {
        topic: String,
        propositions: PropositionSet,
        key: PropositionKey,
    },
    Complete {
        propositions: PropositionSet,
        report: DebateReport,
    },
}

/// One operator-driven debate
pub struct DebateSession {
    setup: DebateSetup,
    factory: Arc<dyn ProviderFactory>,
    state: SessionState,
    /// Output of the latest run attempt, kept when it aborts
    arguments: Vec<Argument>,
    rows: Vec<ResultRow>,
}

impl fmt::Debug for DebateSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebateSession")
            .field("setup", &self.setup)
            .field("phase", &self.phase())
            .field("arguments", &self.arguments.len())
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl DebateSession {
    pub fn new(setup: DebateSetup, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            setup,
            factory,
            state: SessionState::Idle,
            arguments: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn setup(&self) -> &DebateSetup {
        &self.setup
    }

    /// Swap model selections; takes effect from the next operation
    pub fn configure(&mut self, setup: DebateSetup) {
        self.setup = setup;
    }

    pub fn phase(&self) -> DebatePhase {
        match self.state {
            SessionState::Idle => DebatePhase::Idle,
            SessionState::Generated { .. } => DebatePhase::PropositionsGenerated,
            SessionState::Selected { .. } => DebatePhase::PropositionSelected,
            SessionState::Complete { .. } => DebatePhase::DebateComplete,
        }
    }

    pub fn topic(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Generated { topic, .. } | SessionState::Selected { topic, .. } => Some(topic),
            SessionState::Complete { report, .. } => Some(&report.topic),
        }
    }

    pub fn propositions(&self) -> Option<&PropositionSet> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Generated { propositions, .. }
            | SessionState::Selected { propositions, .. }
            | SessionState::Complete { propositions, .. } => Some(propositions),
        }
    }

    /// The confirmed proposition and its text
    pub fn selected(&self) -> Option<(PropositionKey, &str)> {
        match &self.state {
            SessionState::Selected { propositions, key, .. } => Some((*key, propositions.get(*key))),
            SessionState::Complete { report, .. } => {
                Some((report.proposition_key, report.proposition.as_str()))
            }
            _ => None,
        }
    }

    /// Arguments from the latest run, complete or not
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Rows from the latest run, complete or not
    pub fn partial_rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn report(&self) -> Option<&DebateReport> {
        match &self.state {
            SessionState::Complete { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Ask the moderator for three propositions, starting a new run
    ///
    /// On failure the session keeps whatever state it had.
    pub async fn generate_propositions(&mut self, topic: &str) -> Result<PropositionSet, DebateError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DebateError::InvalidSetup("topic must not be empty".to_string()));
        }

        let profile = self.setup.moderator.clone();
        let llm = self.factory.provider(&profile)?;
        let propositions = Moderator::new(profile, llm).generate_propositions(topic).await?;

        tracing::info!(topic, "Propositions generated");
        self.arguments.clear();
        self.rows.clear();
        self.state = SessionState::Generated {
            topic: topic.to_string(),
            propositions: propositions.clone(),
        };
        Ok(propositions)
    }

    /// Confirm one of the generated propositions
    pub fn select_proposition(&mut self, key: PropositionKey) -> Result<&str, DebateError> {
        let (topic, propositions) = match &self.state {
            SessionState::Generated { topic, propositions } => (topic.clone(), propositions.clone()),
            _ => {
                return Err(DebateError::InvalidTransition {
                    action: "select a proposition",
                    phase: self.phase(),
                })
            }
        };

        tracing::info!(proposition = %key, "Proposition selected");
        self.state = SessionState::Selected {
            topic,
            propositions,
            key,
        };
        Ok(self.selected().map(|(_, text)| text).unwrap_or_default())
    }

    pub async fn run_debate(&mut self) -> Result<DebateReport, DebateError> {
        self.run_debate_with(&mut NoopObserver).await
    }

    /// Collect one argument per participant, each followed by every judge's
    /// evaluation of it
    ///
    /// Accepted once a proposition is selected, including after a completed
    /// run, which is repeated on the same proposition.
    ///
    /// Any failed call aborts the run. What was produced so far stays
    /// readable through [`arguments`](Self::arguments) and
    /// [`partial_rows`](Self::partial_rows), and the session is left in
    /// [`DebatePhase::PropositionSelected`].
    pub async fn run_debate_with(
        &mut self,
        observer: &mut dyn DebateObserver,
    ) -> Result<DebateReport, DebateError> {
        let (topic, propositions, key) = match &self.state {
            SessionState::Selected {
                topic,
                propositions,
                key,
            } => (topic.clone(), propositions.clone(), *key),
            SessionState::Complete {
                propositions,
                report,
            } => {
                tracing::info!(proposition = %report.proposition_key, "Repeating debate");
                (report.topic.clone(), propositions.clone(), report.proposition_key)
            }
            _ => {
                tracing::warn!(phase = %self.phase(), "Debate requested without a selected proposition");
                return Err(DebateError::PropositionNotSelected);
            }
        };
        let proposition = propositions.get(key).to_string();
        self.state = SessionState::Selected {
            topic: topic.clone(),
            propositions: propositions.clone(),
            key,
        };

        self.arguments.clear();
        self.rows.clear();
        let started_at = Utc::now();

        let participants = self.build_participants()?;
        let judges = self.build_judges()?;

        tracing::info!(
            proposition = %key,
            participants = participants.len(),
            judges = judges.len(),
            "Debate started"
        );

        for participant in &participants {
            let argument = participant.present_argument(&proposition).await.map_err(|e| {
                tracing::error!(participant = %participant.name(), error = %e, "Debate aborted");
                e
            })?;
            observer.on_argument(&argument);
            self.arguments.push(argument.clone());

            for judge in &judges {
                let evaluation: Evaluation = judge
                    .evaluate_argument(&proposition, &argument.participant, &argument.text)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            participant = %participant.name(),
                            judge = %judge.identity(),
                            error = %e,
                            "Debate aborted"
                        );
                        e
                    })?;
                let row = ResultRow {
                    participant: argument.participant.clone(),
                    judge: judge.identity().to_string(),
                    evaluation,
                };
                observer.on_evaluation(&row);
                self.rows.push(row);
            }
        }

        let report = DebateReport {
            id: Uuid::new_v4(),
            topic,
            proposition_key: key,
            proposition,
            arguments: self.arguments.clone(),
            rows: self.rows.clone(),
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(id = %report.id, rows = report.rows.len(), "Debate complete");

        self.state = SessionState::Complete {
            propositions,
            report: report.clone(),
        };
        Ok(report)
    }

    fn build_participants(&self) -> Result<Vec<Participant>, DebateError> {
        self.setup
            .participants
            .iter()
            .enumerate()
            .map(|(i, profile)| {
                let llm = self.factory.provider(profile)?;
                Ok(Participant::new(i + 1, profile.clone(), llm))
            })
            .collect()
    }

    fn build_judges(&self) -> Result<Vec<Judge>, DebateError> {
        self.setup
            .judges
            .iter()
            .map(|profile| {
                let llm = self.factory.provider(profile)?;
                Ok(Judge::new(profile.clone(), llm))
            })
            .collect()
    }
}
