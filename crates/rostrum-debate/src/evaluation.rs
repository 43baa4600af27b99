//! A judge's scored evaluation of one argument

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::schema::{self, ExtractionError, StructuredReply};

/// Maximum points for Organization & Clarity
pub const CLARITY_MAX: u32 = 20;
/// Maximum points for Strategy & Style
pub const STRATEGY_MAX: u32 = 40;
/// Maximum points for Effectiveness of Argument, Evidence and Content
pub const EFFECTIVENESS_MAX: u32 = 40;
/// Maximum overall score
pub const OVERALL_MAX: u32 = 100;

/// Side a participant argued, as the judge read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Stance {
    For,
    Against,
    /// The judge's text named neither side, or both
    Unrecognized(String),
}

impl Stance {
    /// Lenient: "Against the proposition", "AGAINST" and "Con" all read as
    /// Against. Anything else is kept verbatim as `Unrecognized`.
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let against = words.iter().any(|w| {
            matches!(*w, "against" | "con" | "negative" | "opponent") || w.starts_with("oppos")
        });
        let for_ = words.iter().any(|w| {
            matches!(
                *w,
                "for" | "pro" | "favor" | "favour" | "support" | "supports" | "affirmative" | "proponent"
            )
        });

        match (for_, against) {
            (true, false) => Stance::For,
            (false, true) => Stance::Against,
            _ => Stance::Unrecognized(text.trim().to_string()),
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::For => write!(f, "For"),
            Stance::Against => write!(f, "Against"),
            Stance::Unrecognized(text) => write!(f, "{}", text),
        }
    }
}

/// Categorical quality label for an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssessmentLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AssessmentLabel {
    /// Label the rubric assigns to an overall score:
    /// 81-100 Excellent, 61-80 Good, 36-60 Fair, 0-35 Poor
    pub fn for_score(overall: u32) -> Self {
        match overall {
            81.. => AssessmentLabel::Excellent,
            61..=80 => AssessmentLabel::Good,
            36..=60 => AssessmentLabel::Fair,
            _ => AssessmentLabel::Poor,
        }
    }
}

impl fmt::Display for AssessmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssessmentLabel::Excellent => "Excellent",
            AssessmentLabel::Good => "Good",
            AssessmentLabel::Fair => "Fair",
            AssessmentLabel::Poor => "Poor",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AssessmentLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('.').to_lowercase().as_str() {
            "excellent" => Ok(AssessmentLabel::Excellent),
            "good" => Ok(AssessmentLabel::Good),
            "fair" => Ok(AssessmentLabel::Fair),
            "poor" => Ok(AssessmentLabel::Poor),
            _ => Err(()),
        }
    }
}

fn leading_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number pattern is valid"))
}

/// Read a score from a JSON number or text like "18", "18/20" or "18 points"
///
/// `None` when the value holds no number. Values are not range-checked here.
fn parse_score(reply: &StructuredReply, field: &str) -> Result<Option<i64>, ExtractionError> {
    let value = reply
        .get(field)
        .ok_or_else(|| ExtractionError::MissingFields(vec![field.to_string()]))?;

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number()
            .find(s)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        _ => None,
    }
    .filter(|n| n.is_finite());

    // Float to int casts saturate
    Ok(number.map(|n| n.round() as i64))
}

fn text_field(reply: &StructuredReply, field: &str) -> Result<String, ExtractionError> {
    reply
        .text(field)
        .ok_or_else(|| ExtractionError::MissingFields(vec![field.to_string()]))
}

/// One scored section of the rubric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionScore {
    /// Reported score; `None` when the judge gave no number
    pub score: Option<i64>,
    pub max: u32,
    pub details: String,
}

impl SectionScore {
    fn in_range(&self) -> bool {
        self.score
            .map_or(true, |s| (0..=i64::from(self.max)).contains(&s))
    }
}

/// A judge's evaluation of one participant's argument
///
/// Scores and label are what the judge reported. Nothing here corrects them;
/// use [`Evaluation::consistency_issues`] to see where the judge's arithmetic
/// or labelling disagrees with the rubric.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub participant_name: String,
    pub stance: Stance,
    pub organization_clarity: SectionScore,
    pub strategy_style: SectionScore,
    pub effectiveness: SectionScore,
    /// Reported overall score; `None` when the judge gave no number
    pub overall_score: Option<i64>,
    /// Label text as reported by the judge
    pub label: String,
    pub summary: String,
    /// The full record as extracted, in schema order
    pub raw: StructuredReply,
}

impl Evaluation {
    /// Build an evaluation from a reply already mapped onto the scoring schema
    ///
    /// Only a missing field fails. Values that cannot be interpreted are kept
    /// and show up in [`Evaluation::consistency_issues`].
    pub fn from_reply(reply: StructuredReply) -> Result<Self, ExtractionError> {
        Ok(Self {
            participant_name: text_field(&reply, schema::PARTICIPANT_NAME)?,
            stance: Stance::from_text(&text_field(&reply, schema::FOR_OR_AGAINST)?),
            organization_clarity: SectionScore {
                score: parse_score(&reply, schema::CLARITY_SCORE)?,
                max: CLARITY_MAX,
                details: text_field(&reply, schema::CLARITY_DETAILS)?,
            },
            strategy_style: SectionScore {
                score: parse_score(&reply, schema::STRATEGY_SCORE)?,
                max: STRATEGY_MAX,
                details: text_field(&reply, schema::STRATEGY_DETAILS)?,
            },
            effectiveness: SectionScore {
                score: parse_score(&reply, schema::EFFECTIVENESS_SCORE)?,
                max: EFFECTIVENESS_MAX,
                details: text_field(&reply, schema::EFFECTIVENESS_DETAILS)?,
            },
            overall_score: parse_score(&reply, schema::OVERALL_SCORE)?,
            label: text_field(&reply, schema::OVERALL_LABEL)?,
            summary: text_field(&reply, schema::OVERALL_SUMMARY)?,
            raw: reply,
        })
    }

    /// Sum of the three section scores, if all three are numbers
    pub fn section_total(&self) -> Option<i64> {
        [
            self.organization_clarity.score,
            self.strategy_style.score,
            self.effectiveness.score,
        ]
        .into_iter()
        .try_fold(0i64, |total, score| Some(total.saturating_add(score?)))
    }

    /// The reported label, if it is one of the four rubric labels
    pub fn reported_label(&self) -> Option<AssessmentLabel> {
        self.label.parse().ok()
    }

    /// The label the rubric assigns to the reported overall score
    pub fn expected_label(&self) -> Option<AssessmentLabel> {
        self.overall_score
            .map(|s| AssessmentLabel::for_score(s.clamp(0, i64::from(u32::MAX)) as u32))
    }

    /// A score as the judge wrote it: the number, or the raw text when there is none
    pub fn score_text(&self, score: Option<i64>, field: &str) -> String {
        score
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.raw.text(field).unwrap_or_default())
    }

    /// Places where the judge's reply disagrees with the rubric
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Stance::Unrecognized(text) = &self.stance {
            issues.push(format!("stance '{}' names neither side", text));
        }

        for (name, field, section) in [
            ("Organization & Clarity", schema::CLARITY_SCORE, &self.organization_clarity),
            ("Strategy & Style", schema::STRATEGY_SCORE, &self.strategy_style),
            ("Effectiveness", schema::EFFECTIVENESS_SCORE, &self.effectiveness),
        ] {
            match section.score {
                None => issues.push(format!(
                    "{} score '{}' is not a number",
                    name,
                    self.score_text(None, field)
                )),
                Some(score) if !section.in_range() => issues.push(format!(
                    "{} score {} is outside 0-{}",
                    name, score, section.max
                )),
                Some(_) => {}
            }
        }

        let Some(overall) = self.overall_score else {
            issues.push(format!(
                "overall score '{}' is not a number",
                self.score_text(None, schema::OVERALL_SCORE)
            ));
            return issues;
        };

        if !(0..=i64::from(OVERALL_MAX)).contains(&overall) {
            issues.push(format!("overall score {} is outside 0-{}", overall, OVERALL_MAX));
        }

        if let Some(total) = self.section_total() {
            if total != overall {
                issues.push(format!(
                    "overall score {} does not equal section total {}",
                    overall, total
                ));
            }
        }

        let expected = AssessmentLabel::for_score(overall.clamp(0, i64::from(u32::MAX)) as u32);
        match self.reported_label() {
            Some(label) if label == expected => {}
            Some(label) => issues.push(format!(
                "label {} does not match score {} (expected {})",
                label, overall, expected
            )),
            None => issues.push(format!("label '{}' is not a rubric label", self.label)),
        }

        issues
    }

    /// Every field of the record in display order
    pub fn detail(&self) -> Vec<(&'static str, String)> {
        [
            schema::PARTICIPANT_NAME,
            schema::OVERALL_SCORE,
            schema::OVERALL_LABEL,
            schema::FOR_OR_AGAINST,
            schema::OVERALL_SUMMARY,
            schema::CLARITY_SCORE,
            schema::CLARITY_DETAILS,
            schema::STRATEGY_SCORE,
            schema::STRATEGY_DETAILS,
            schema::EFFECTIVENESS_SCORE,
            schema::EFFECTIVENESS_DETAILS,
        ]
        .into_iter()
        .map(|key| (key, self.raw.text(key).unwrap_or_default()))
        .collect()
    }
}
