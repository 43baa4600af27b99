//! Structured response contracts
//!
//! The model is asked to format its own reply as a fenced JSON block whose
//! keys are described in natural language. Extraction is best-effort: find
//! the block, parse it, and insist that every declared field is present.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// Why a reply could not be mapped onto a schema
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("reply contains no JSON object")]
    NoJson,
    #[error("reply JSON is malformed: {0}")]
    InvalidJson(String),
    #[error("reply JSON is not an object")]
    NotAnObject,
    #[error("reply is missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("field '{field}' has an unusable value: {value}")]
    InvalidValue { field: String, value: String },
}

/// One named field the model must produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseField {
    pub name: &'static str,
    pub description: &'static str,
}

impl ResponseField {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// An ordered list of fields describing the expected reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSchema {
    fields: Vec<ResponseField>,
}

fn fenced_json_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)```(?:json)?(.*?)```").expect("fence pattern is valid"))
}

impl ResponseSchema {
    pub fn new(fields: Vec<ResponseField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ResponseField] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Instructions appended to a prompt telling the model how to format its reply
    pub fn format_instructions(&self) -> String {
        let lines: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("\t\"{}\": string  // {}", f.name, f.description))
            .collect();

        format!(
            "The output should be a markdown code snippet formatted in the following schema, \
             including the leading and trailing \"```json\" and \"```\":\n\n\
             ```json\n{{\n{}\n}}\n```",
            lines.join("\n")
        )
    }

    /// Map a raw model reply onto this schema
    pub fn extract(&self, reply: &str) -> Result<StructuredReply, ExtractionError> {
        let candidate = json_candidate(reply).ok_or(ExtractionError::NoJson)?;

        let parsed: Value = serde_json::from_str(candidate)
            .map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;
        let Value::Object(mut object) = parsed else {
            return Err(ExtractionError::NotAnObject);
        };

        let missing: Vec<String> = self
            .field_names()
            .filter(|name| !object.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ExtractionError::MissingFields(missing));
        }

        let fields = self
            .field_names()
            .map(|name| {
                let value = object.remove(name).unwrap_or(Value::Null);
                (name.to_string(), value)
            })
            .collect();

        Ok(StructuredReply { fields })
    }
}

/// Locate the JSON text in a reply: a fenced block first, else the outermost braces
fn json_candidate(reply: &str) -> Option<&str> {
    if let Some(body) = fenced_json_pattern()
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
    {
        return Some(body);
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

/// Field values extracted from a reply, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredReply {
    fields: Vec<(String, Value)>,
}

impl StructuredReply {
    /// Raw JSON value of a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// A field rendered as display text
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(value_text)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for StructuredReply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Strings verbatim; everything else in its JSON form
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub const PROPOSITION_1: &str = "Proposition 1";
pub const PROPOSITION_2: &str = "Proposition 2";
pub const PROPOSITION_3: &str = "Proposition 3";

pub const PARTICIPANT_NAME: &str = "Participant Name";
pub const FOR_OR_AGAINST: &str = "For or Against";
pub const CLARITY_SCORE: &str = "Score for Organization & Clarity (out of 20)";
pub const CLARITY_DETAILS: &str = "Organization & Clarity Score Details";
pub const STRATEGY_SCORE: &str = "Score for Strategy & Style (out of 40)";
pub const STRATEGY_DETAILS: &str = "Strategy & Style Score Details";
pub const EFFECTIVENESS_SCORE: &str =
    "Score for Effectiveness of Argument, Evidence and Content (out of 40)";
pub const EFFECTIVENESS_DETAILS: &str =
    "Effectiveness of Argument, Evidence and Content Score Details";
pub const OVERALL_SCORE: &str = "Overall Score (out of 100)";
pub const OVERALL_LABEL: &str = "Overall Assessment Label";
pub const OVERALL_SUMMARY: &str = "Overall Assessment Summary";

/// Contract for the moderator's reply: three numbered propositions
pub fn propositions_schema() -> ResponseSchema {
    ResponseSchema::new(vec![
        ResponseField::new(PROPOSITION_1, "The First Proposition based on the Topic."),
        ResponseField::new(PROPOSITION_2, "The Second Proposition based on the Topic."),
        ResponseField::new(PROPOSITION_3, "The Third Proposition based on the Topic."),
    ])
}

/// Contract for a judge's reply: the full scored evaluation
pub fn scoring_schema() -> ResponseSchema {
    ResponseSchema::new(vec![
        ResponseField::new(PARTICIPANT_NAME, "The participant's name"),
        ResponseField::new(FOR_OR_AGAINST, "Whether argument was for or against"),
        ResponseField::new(
            CLARITY_SCORE,
            "The judge's score for the organization & clarity section of the assessment",
        ),
        ResponseField::new(
            CLARITY_DETAILS,
            "Details on the score for the organization & clarity section was determined",
        ),
        ResponseField::new(
            STRATEGY_SCORE,
            "The judge's score for the strategy & style section of the assessment",
        ),
        ResponseField::new(
            STRATEGY_DETAILS,
            "Details on how the score for the strategy & style section was determined",
        ),
        ResponseField::new(
            EFFECTIVENESS_SCORE,
            "The judge's score for the effectiveness of argument, evidence and content section of the assessment",
        ),
        ResponseField::new(
            EFFECTIVENESS_DETAILS,
            "Details on how the score for the effectiveness of argument, evidence and content section was determined",
        ),
        ResponseField::new(
            OVERALL_SCORE,
            "The judge's overall score for the assessment of the participant's argument",
        ),
        ResponseField::new(
            OVERALL_LABEL,
            "The one word label that corresponds to the total score",
        ),
        ResponseField::new(
            OVERALL_SUMMARY,
            "A 2 sentence overall assessment of the participant's argument",
        ),
    ])
}
