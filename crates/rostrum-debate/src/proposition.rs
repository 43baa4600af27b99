//! Propositions produced by the moderator and arguments made about them

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::DebateError;
use crate::schema::{self, StructuredReply};

/// Addresses one of the three propositions by its 1-based number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PropositionKey(u8);

impl PropositionKey {
    pub const ALL: [PropositionKey; 3] = [PropositionKey(1), PropositionKey(2), PropositionKey(3)];

    /// Key for a 1-based number; `None` outside 1..=3
    pub fn new(number: u8) -> Option<Self> {
        (1..=3).contains(&number).then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// The field name the moderator uses, e.g. "Proposition 2"
    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => schema::PROPOSITION_1,
            2 => schema::PROPOSITION_2,
            _ => schema::PROPOSITION_3,
        }
    }
}

impl fmt::Display for PropositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PropositionKey {
    type Err = DebateError;

    /// Accepts "2" or "Proposition 2"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .get(..11)
            .filter(|prefix| prefix.eq_ignore_ascii_case("proposition"))
            .map(|_| trimmed[11..].trim())
            .unwrap_or(trimmed);

        digits
            .parse::<u8>()
            .ok()
            .and_then(PropositionKey::new)
            .ok_or_else(|| DebateError::InvalidProposition(trimmed.to_string()))
    }
}

/// The moderator's three candidate propositions for a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropositionSet {
    #[serde(rename = "Proposition 1")]
    first: String,
    #[serde(rename = "Proposition 2")]
    second: String,
    #[serde(rename = "Proposition 3")]
    third: String,
}

impl PropositionSet {
    pub fn new(first: &str, second: &str, third: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            third: third.to_string(),
        }
    }

    /// Build from a reply extracted with the propositions schema
    pub(crate) fn from_reply(reply: &StructuredReply) -> Self {
        let text = |key: &str| reply.text(key).unwrap_or_default().trim().to_string();
        Self {
            first: text(schema::PROPOSITION_1),
            second: text(schema::PROPOSITION_2),
            third: text(schema::PROPOSITION_3),
        }
    }

    pub fn get(&self, key: PropositionKey) -> &str {
        match key.number() {
            1 => &self.first,
            2 => &self.second,
            _ => &self.third,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropositionKey, &str)> {
        PropositionKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// One participant's argument on the selected proposition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Participant identity, e.g. "Participant 1 (GPT-4o)"
    pub participant: String,
    /// Display name of the model behind the participant
    pub model: String,
    pub text: String,
}

impl Argument {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
