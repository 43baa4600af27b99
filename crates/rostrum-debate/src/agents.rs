//! The three debate roles
//!
//! Each agent pairs one catalog model with one prompt template. Moderator and
//! Judge also carry a response schema and return structured records; the
//! Participant returns its reply as free text.

use std::sync::Arc;

use rostrum_llm::{LlmProvider, LlmRequest, ModelProfile};

use crate::error::DebateError;
use crate::evaluation::Evaluation;
use crate::proposition::{Argument, PropositionSet};
use crate::schema::{propositions_schema, scoring_schema, ExtractionError, ResponseSchema};
use crate::templates::{
    fill, ARGUMENT_WORD_LIMIT, JUDGE_TEMPLATE, JUDGING_CRITERIA, MODERATOR_TEMPLATE,
    PARTICIPANT_TEMPLATE,
};

/// Send a filled prompt as a single user message and return the reply text
async fn complete(llm: &dyn LlmProvider, prompt: String) -> Result<String, DebateError> {
    let response = llm.complete(LlmRequest::simple(&prompt)).await?;
    tracing::debug!(
        model = %response.model,
        latency_ms = response.latency_ms,
        tokens = ?response.tokens_used,
        "Model replied"
    );
    Ok(response.content)
}

/// Proposes debatable statements for a topic
#[derive(Debug, Clone)]
pub struct Moderator {
    profile: ModelProfile,
    llm: Arc<dyn LlmProvider>,
    schema: ResponseSchema,
}

impl Moderator {
    pub fn new(profile: ModelProfile, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            profile,
            llm,
            schema: propositions_schema(),
        }
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// Render the moderator prompt for a topic
    pub fn prompt(&self, topic: &str) -> Result<String, DebateError> {
        fill(
            MODERATOR_TEMPLATE,
            &[
                ("topic", topic),
                ("proposition_format_instructions", &self.schema.format_instructions()),
            ],
        )
    }

    /// Ask the model for exactly three propositions on `topic`
    pub async fn generate_propositions(&self, topic: &str) -> Result<PropositionSet, DebateError> {
        tracing::info!(model = %self.profile.model_name, topic, "Generating propositions");

        let reply = complete(self.llm.as_ref(), self.prompt(topic)?).await?;
        let structured = self.schema.extract(&reply)?;
        let propositions = PropositionSet::from_reply(&structured);

        if let Some((key, _)) = propositions.iter().find(|(_, text)| text.is_empty()) {
            return Err(ExtractionError::InvalidValue {
                field: key.name().to_string(),
                value: String::new(),
            }
            .into());
        }

        Ok(propositions)
    }
}

/// Argues one side of a proposition
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    profile: ModelProfile,
    llm: Arc<dyn LlmProvider>,
}

impl Participant {
    /// `position` is the 1-based seat number; the name becomes
    /// "Participant {position} ({model display name})"
    pub fn new(position: usize, profile: ModelProfile, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            name: format!("Participant {} ({})", position, profile.name),
            profile,
            llm,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    pub fn prompt(&self, proposition: &str) -> Result<String, DebateError> {
        fill(
            PARTICIPANT_TEMPLATE,
            &[("participant", &self.name), ("proposition", proposition)],
        )
    }

    /// Ask the model for a single stance-committed argument
    ///
    /// The word limit is an instruction to the model; longer replies are
    /// kept and logged.
    pub async fn present_argument(&self, proposition: &str) -> Result<Argument, DebateError> {
        tracing::info!(participant = %self.name, "Requesting argument");

        let text = complete(self.llm.as_ref(), self.prompt(proposition)?).await?;
        let argument = Argument {
            participant: self.name.clone(),
            model: self.profile.name.clone(),
            text: text.trim().to_string(),
        };

        let words = argument.word_count();
        if words > ARGUMENT_WORD_LIMIT {
            tracing::warn!(
                participant = %self.name,
                words,
                limit = ARGUMENT_WORD_LIMIT,
                "Argument exceeds the instructed word limit"
            );
        }

        Ok(argument)
    }
}

/// Scores arguments against the rubric
#[derive(Debug, Clone)]
pub struct Judge {
    profile: ModelProfile,
    llm: Arc<dyn LlmProvider>,
    schema: ResponseSchema,
    criteria: String,
}

impl Judge {
    pub fn new(profile: ModelProfile, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            profile,
            llm,
            schema: scoring_schema(),
            criteria: JUDGING_CRITERIA.to_string(),
        }
    }

    /// Replace the rubric text injected into every evaluation
    pub fn with_criteria(mut self, criteria: &str) -> Self {
        self.criteria = criteria.to_string();
        self
    }

    /// Identity shown in results: the underlying model name
    pub fn identity(&self) -> &str {
        &self.profile.model_name
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    pub fn prompt(&self, proposition: &str, participant: &str, argument: &str) -> Result<String, DebateError> {
        fill(
            JUDGE_TEMPLATE,
            &[
                ("proposition", proposition),
                ("participant", participant),
                ("participant_argument", argument),
                ("judging_criteria", &self.criteria),
                ("score_format_instructions", &self.schema.format_instructions()),
            ],
        )
    }

    /// Score one participant's argument
    ///
    /// Scores are taken as reported; inconsistencies with the rubric are
    /// logged but not corrected.
    pub async fn evaluate_argument(
        &self,
        proposition: &str,
        participant: &str,
        argument: &str,
    ) -> Result<Evaluation, DebateError> {
        tracing::info!(judge = %self.identity(), participant, "Requesting evaluation");

        let reply = complete(self.llm.as_ref(), self.prompt(proposition, participant, argument)?).await?;
        let evaluation = Evaluation::from_reply(self.schema.extract(&reply)?)?;

        for issue in evaluation.consistency_issues() {
            tracing::warn!(judge = %self.identity(), participant, issue = %issue, "Judge scoring inconsistency");
        }

        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostrum_llm::{default_model, find_model, MockProvider};

    #[tokio::test]
    async fn test_moderator_returns_three_propositions() {
        let moderator = Moderator::new(default_model(), Arc::new(MockProvider::scripted()));
        let propositions = moderator.generate_propositions("Remote work").await.unwrap();

        let names: Vec<&str> = propositions.iter().map(|(k, _)| k.name()).collect();
        assert_eq!(names, vec!["Proposition 1", "Proposition 2", "Proposition 3"]);
        assert!(propositions.iter().all(|(_, text)| text.contains("Remote work")));
    }

    #[tokio::test]
    async fn test_moderator_rejects_unstructured_reply() {
        let moderator = Moderator::new(
            default_model(),
            Arc::new(MockProvider::constant("Here are some ideas: taxes, schools.")),
        );
        let err = moderator.generate_propositions("Policy").await.unwrap_err();
        assert!(matches!(err, DebateError::Extraction(ExtractionError::NoJson)));
        assert!(!err.is_remote());
    }

    #[tokio::test]
    async fn test_moderator_rejects_blank_proposition() {
        let moderator = Moderator::new(
            default_model(),
            Arc::new(MockProvider::constant(
                r#"{"Proposition 1": "A", "Proposition 2": "  ", "Proposition 3": "C"}"#,
            )),
        );
        let err = moderator.generate_propositions("Policy").await.unwrap_err();
        assert!(matches!(
            err,
            DebateError::Extraction(ExtractionError::InvalidValue { ref field, .. }) if field == "Proposition 2"
        ));
    }

    #[test]
    fn test_prompts_embed_inputs() {
        let llm: Arc<dyn LlmProvider> = Arc::new(MockProvider::scripted());

        let moderator = Moderator::new(default_model(), llm.clone());
        let prompt = moderator.prompt("Space travel").unwrap();
        assert!(prompt.contains("Based on the topic 'Space travel'"));
        assert!(prompt.contains("\"Proposition 3\": string  // The Third Proposition based on the Topic."));

        let participant = Participant::new(2, find_model("GPT-4o").unwrap(), llm.clone());
        assert_eq!(participant.name(), "Participant 2 (GPT-4o)");
        let prompt = participant.prompt("Mars first").unwrap();
        assert!(prompt.contains("Your name is 'Participant 2 (GPT-4o).'"));
        assert!(prompt.contains("following proposition; 'Mars first'"));

        let judge = Judge::new(find_model("Llama3-70B").unwrap(), llm);
        assert_eq!(judge.identity(), "meta-llama/Llama-3-70b-chat-hf");
        let prompt = judge.prompt("Mars first", "Participant 2 (GPT-4o)", "We must {go}.").unwrap();
        assert!(prompt.contains("'Mars first'. Participant 2 (GPT-4o) made the following argument:'We must {go}.'"));
        assert!(prompt.contains(JUDGING_CRITERIA));
        assert!(prompt.contains("\"Overall Assessment Summary\": string"));
    }

    #[tokio::test]
    async fn test_participant_and_judge() {
        let llm: Arc<dyn LlmProvider> = Arc::new(MockProvider::scripted());
        let participant = Participant::new(2, default_model(), llm.clone());
        let argument = participant.present_argument("Cities should ban cars").await.unwrap();
        assert_eq!(argument.participant, "Participant 2 (GPT-3.5-turbo)");
        assert_eq!(argument.model, "GPT-3.5-turbo");
        assert!(!argument.text.is_empty());

        let judge = Judge::new(default_model(), llm);
        let evaluation = judge
            .evaluate_argument("Cities should ban cars", &argument.participant, &argument.text)
            .await
            .unwrap();
        assert_eq!(evaluation.participant_name, argument.participant);
        assert!(evaluation.overall_score.is_some_and(|s| (0..=100).contains(&s)));
        assert!(evaluation.expected_label().is_some());
        assert_eq!(evaluation.reported_label(), evaluation.expected_label());
        assert!(evaluation.consistency_issues().is_empty());
    }

    #[tokio::test]
    async fn test_judge_surfaces_remote_failure() {
        let judge = Judge::new(default_model(), Arc::new(MockProvider::failing("401 invalid key")));
        let err = judge.evaluate_argument("P", "Participant 1 (X)", "text").await.unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("401 invalid key"));
    }

    #[tokio::test]
    async fn test_long_argument_is_kept_whole() {
        let text = vec!["word"; ARGUMENT_WORD_LIMIT + 50].join(" ");
        let participant = Participant::new(1, default_model(), Arc::new(MockProvider::constant(&text)));

        let argument = participant.present_argument("Anything").await.unwrap();
        assert_eq!(argument.word_count(), ARGUMENT_WORD_LIMIT + 50);
        assert_eq!(argument.text, text);
    }

    #[test]
    fn test_custom_criteria_replace_rubric() {
        let judge = Judge::new(default_model(), Arc::new(MockProvider::scripted()))
            .with_criteria("Score brevity above all else.");
        let prompt = judge.prompt("P", "Participant 1 (X)", "Short.").unwrap();

        assert!(prompt.contains("Score brevity above all else."));
        assert!(!prompt.contains(JUDGING_CRITERIA));
    }

    #[tokio::test]
    async fn test_out_of_range_scores_are_reported() {
        let reply = r#"{
            "Participant Name": "Participant 1 (GPT-3.5-turbo)",
            "For or Against": "Pro",
            "Score for Organization & Clarity (out of 20)": 9999999999,
            "Organization & Clarity Score Details": "x",
            "Score for Strategy & Style (out of 40)": 9999999999,
            "Strategy & Style Score Details": "x",
            "Score for Effectiveness of Argument, Evidence and Content (out of 40)": "9999999999",
            "Effectiveness of Argument, Evidence and Content Score Details": "x",
            "Overall Score (out of 100)": "N/A",
            "Overall Assessment Label": "Excellent",
            "Overall Assessment Summary": "x"
        }"#;
        let judge = Judge::new(default_model(), Arc::new(MockProvider::constant(reply)));

        let evaluation = judge
            .evaluate_argument("P", "Participant 1 (GPT-3.5-turbo)", "text")
            .await
            .unwrap();
        assert_eq!(evaluation.section_total(), Some(29_999_999_997));
        assert_eq!(evaluation.overall_score, None);
        assert_eq!(evaluation.stance, crate::evaluation::Stance::For);

        let issues = evaluation.consistency_issues();
        assert!(issues.iter().any(|i| i.contains("outside 0-20")));
        assert!(issues.iter().any(|i| i.contains("'N/A' is not a number")));
    }
}
