//! Aggregating evaluations into a results table

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::evaluation::Evaluation;
use crate::proposition::{Argument, PropositionKey};
use crate::schema;

/// One participant×judge scoring record
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    /// Participant identity, e.g. "Participant 1 (GPT-4o)"
    pub participant: String,
    /// Judge identity (model name)
    pub judge: String,
    pub evaluation: Evaluation,
}

impl ResultRow {
    /// Every evaluation field in display order
    pub fn detail(&self) -> Vec<(&'static str, String)> {
        self.evaluation.detail()
    }

    /// Heading for the row's drill-down view
    pub fn detail_title(&self) -> String {
        format!("Evaluation Details for {} by {}", self.participant, self.judge)
    }
}

/// Rectangular summary of a debate's scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsTable {
    pub rows: Vec<[String; 6]>,
}

impl ResultsTable {
    pub const COLUMNS: [&'static str; 6] = [
        "Participant",
        "Judge",
        "Organization & Clarity",
        "Strategy & Style",
        "Effectiveness of Argument, Evidence and Content",
        "Overall Score",
    ];

    /// One table row per result row, in generation order
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                let e = &row.evaluation;
                [
                    row.participant.clone(),
                    row.judge.clone(),
                    e.score_text(e.organization_clarity.score, schema::CLARITY_SCORE),
                    e.score_text(e.strategy_style.score, schema::STRATEGY_SCORE),
                    e.score_text(e.effectiveness.score, schema::EFFECTIVENESS_SCORE),
                    e.score_text(e.overall_score, schema::OVERALL_SCORE),
                ]
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Average overall score for one participant across all judges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub participant: String,
    pub average_score: f64,
    pub evaluations: usize,
}

/// Outcome of a completed debate run
#[derive(Debug, Clone, Serialize)]
pub struct DebateReport {
    pub id: Uuid,
    pub topic: String,
    pub proposition_key: PropositionKey,
    pub proposition: String,
    pub arguments: Vec<Argument>,
    /// Participant-major, judge-minor
    pub rows: Vec<ResultRow>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DebateReport {
    pub fn table(&self) -> ResultsTable {
        ResultsTable::from_rows(&self.rows)
    }

    /// Participants ranked by mean overall score, best first; ties keep seat order
    ///
    /// Evaluations without a numeric overall score are left out.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = Vec::new();

        for row in &self.rows {
            let Some(overall) = row.evaluation.overall_score else {
                continue;
            };
            let score = overall as f64;
            match standings.iter_mut().find(|s| s.participant == row.participant) {
                Some(s) => {
                    s.average_score += score;
                    s.evaluations += 1;
                }
                None => standings.push(Standing {
                    participant: row.participant.clone(),
                    average_score: score,
                    evaluations: 1,
                }),
            }
        }

        for s in &mut standings {
            s.average_score /= s.evaluations as f64;
        }
        standings.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::scoring_schema;
    use serde_json::json;

    fn row(participant: &str, judge: &str, scores: (u32, u32, u32)) -> ResultRow {
        let overall = scores.0 + scores.1 + scores.2;
        row_with_overall(participant, judge, scores, json!(overall))
    }

    fn row_with_overall(
        participant: &str,
        judge: &str,
        scores: (u32, u32, u32),
        overall: serde_json::Value,
    ) -> ResultRow {
        let reply = json!({
            "Participant Name": participant,
            "For or Against": "Against",
            "Score for Organization & Clarity (out of 20)": scores.0,
            "Organization & Clarity Score Details": "ok",
            "Score for Strategy & Style (out of 40)": scores.1,
            "Strategy & Style Score Details": "ok",
            "Score for Effectiveness of Argument, Evidence and Content (out of 40)": scores.2,
            "Effectiveness of Argument, Evidence and Content Score Details": "ok",
            "Overall Score (out of 100)": overall,
            "Overall Assessment Label": "Good",
            "Overall Assessment Summary": "Fine.",
        });
        let extracted = scoring_schema().extract(&reply.to_string()).unwrap();
        ResultRow {
            participant: participant.to_string(),
            judge: judge.to_string(),
            evaluation: Evaluation::from_reply(extracted).unwrap(),
        }
    }

    fn report(rows: Vec<ResultRow>) -> DebateReport {
        DebateReport {
            id: Uuid::new_v4(),
            topic: "Topic".to_string(),
            proposition_key: PropositionKey::new(1).unwrap(),
            proposition: "P".to_string(),
            arguments: Vec::new(),
            rows,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_table_columns_and_order() {
        let rows = vec![
            row("Participant 1 (GPT-4o)", "gpt-4o", (15, 30, 30)),
            row("Participant 1 (GPT-4o)", "gpt-3.5-turbo", (10, 20, 20)),
            row("Participant 2 (Llama3-8B)", "gpt-4o", (20, 40, 40)),
        ];
        let table = ResultsTable::from_rows(&rows);

        assert_eq!(ResultsTable::COLUMNS.len(), 6);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.rows[0],
            [
                "Participant 1 (GPT-4o)".to_string(),
                "gpt-4o".to_string(),
                "15".to_string(),
                "30".to_string(),
                "30".to_string(),
                "75".to_string()
            ]
        );
        assert_eq!(table.rows[1][1], "gpt-3.5-turbo");
        assert_eq!(table.rows[2][5], "100");
    }

    #[test]
    fn test_empty_table() {
        assert!(ResultsTable::from_rows(&[]).is_empty());
    }

    #[test]
    fn test_standings() {
        let report = report(vec![
            row("Participant 1 (A)", "j1", (10, 20, 20)),
            row("Participant 1 (A)", "j2", (10, 20, 30)),
            row("Participant 2 (B)", "j1", (20, 30, 30)),
            row("Participant 2 (B)", "j2", (20, 30, 30)),
        ]);
        let standings = report.standings();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].participant, "Participant 2 (B)");
        assert_eq!(standings[0].average_score, 80.0);
        assert_eq!(standings[1].average_score, 55.0);
        assert_eq!(standings[1].evaluations, 2);
    }

    #[test]
    fn test_unreadable_overall_score() {
        let rows = vec![
            row_with_overall("Participant 1 (A)", "j1", (10, 20, 20), json!("N/A")),
            row("Participant 2 (B)", "j1", (10, 10, 10)),
        ];
        let table = ResultsTable::from_rows(&rows);
        assert_eq!(table.rows[0][5], "N/A");
        assert_eq!(table.rows[0][2], "10");

        let standings = report(rows).standings();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].participant, "Participant 2 (B)");
    }

    #[test]
    fn test_detail_title() {
        let r = row("Participant 1 (A)", "gpt-4o", (1, 1, 1));
        assert_eq!(r.detail_title(), "Evaluation Details for Participant 1 (A) by gpt-4o");
        assert_eq!(r.detail()[3], ("For or Against", "Against".to_string()));
    }
}
