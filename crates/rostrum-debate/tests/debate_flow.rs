use std::sync::Arc;

use rostrum_debate::{
    DebateError, DebatePhase, DebateSession, DebateSetup, PropositionKey, ResultsTable, Stance,
};
use rostrum_llm::{default_model, find_model, MockProvider, MockProviderFactory};

fn key(n: u8) -> PropositionKey {
    PropositionKey::new(n).unwrap()
}

#[tokio::test]
async fn test_universal_basic_income_debate() {
    let mut session = DebateSession::new(DebateSetup::default(), Arc::new(MockProviderFactory::new()));

    let propositions = session.generate_propositions("Universal basic income").await.unwrap();
    let chosen = propositions.get(key(2)).to_string();

    session.select_proposition(key(2)).unwrap();
    let report = session.run_debate().await.unwrap();

    assert_eq!(report.topic, "Universal basic income");
    assert_eq!(report.proposition, chosen);
    assert_eq!(report.arguments.len(), 2);
    assert_eq!(report.rows.len(), 2);
    assert!(report.rows.iter().all(|r| r.judge == "gpt-3.5-turbo"));
    assert_eq!(report.rows[0].participant, "Participant 1 (GPT-3.5-turbo)");
    assert_eq!(report.rows[1].participant, "Participant 2 (GPT-3.5-turbo)");

    // The scripted participants take opposite sides
    assert_eq!(report.rows[0].evaluation.stance, Stance::For);
    assert_eq!(report.rows[1].evaluation.stance, Stance::Against);
}

#[tokio::test]
async fn test_rows_are_participant_major() {
    let p = vec![
        find_model("GPT-4o").unwrap(),
        find_model("Llama3-8B").unwrap(),
        find_model("Mixtral 8x7B instruct").unwrap(),
    ];
    let j = vec![
        find_model("GPT-3.5-turbo").unwrap(),
        find_model("GPT-4o").unwrap(),
        find_model("Llama3-70B").unwrap(),
    ];
    let setup = DebateSetup::new(default_model(), p, j).unwrap();
    let mut session = DebateSession::new(setup, Arc::new(MockProviderFactory::new()));

    session.generate_propositions("Nuclear power").await.unwrap();
    session.select_proposition(key(1)).unwrap();
    let report = session.run_debate().await.unwrap();

    let order: Vec<(String, String)> = report
        .rows
        .iter()
        .map(|r| (r.participant.clone(), r.judge.clone()))
        .collect();
    let participants = [
        "Participant 1 (GPT-4o)",
        "Participant 2 (Llama3-8B)",
        "Participant 3 (Mixtral 8x7B instruct)",
    ];
    let judges = ["gpt-3.5-turbo", "gpt-4o", "meta-llama/Llama-3-70b-chat-hf"];
    let expected: Vec<(String, String)> = participants
        .iter()
        .flat_map(|p| judges.iter().map(move |j| (p.to_string(), j.to_string())))
        .collect();
    assert_eq!(order, expected);

    let table = report.table();
    assert_eq!(table.len(), 9);
    assert_eq!(ResultsTable::COLUMNS[0], "Participant");
    assert_eq!(table.rows[4][0], "Participant 2 (Llama3-8B)");
    assert_eq!(table.rows[4][1], "gpt-4o");
}

#[tokio::test]
async fn test_run_without_selection_is_rejected() {
    let mut session = DebateSession::new(DebateSetup::default(), Arc::new(MockProviderFactory::new()));

    let err = session.run_debate().await.unwrap_err();
    assert!(matches!(err, DebateError::PropositionNotSelected));
    assert_eq!(session.phase(), DebatePhase::Idle);

    session.generate_propositions("Space exploration").await.unwrap();
    let err = session.run_debate().await.unwrap_err();
    assert!(matches!(err, DebateError::PropositionNotSelected));
    assert_eq!(session.phase(), DebatePhase::PropositionsGenerated);
    assert!(session.partial_rows().is_empty());
}

#[tokio::test]
async fn test_failed_generation_keeps_state() {
    let factory = MockProviderFactory::new()
        .with_override("GPT-4o", Arc::new(MockProvider::failing("connection reset")));
    let mut session = DebateSession::new(DebateSetup::default(), Arc::new(factory));

    session.generate_propositions("Water rights").await.unwrap();
    session.select_proposition(key(3)).unwrap();

    let setup = DebateSetup::new(
        find_model("GPT-4o").unwrap(),
        vec![default_model()],
        vec![default_model()],
    )
    .unwrap();
    session.configure(setup);

    let err = session.generate_propositions("Something else").await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(session.phase(), DebatePhase::PropositionSelected);
    assert_eq!(session.topic(), Some("Water rights"));
    assert_eq!(session.selected().unwrap().0, key(3));
}

#[tokio::test]
async fn test_aborted_run_keeps_partial_results() {
    let factory = MockProviderFactory::new()
        .with_override("Llama3-8B", Arc::new(MockProvider::failing("rate limited")));
    let setup = DebateSetup::new(
        default_model(),
        vec![default_model(), find_model("Llama3-8B").unwrap()],
        vec![default_model()],
    )
    .unwrap();
    let mut session = DebateSession::new(setup, Arc::new(factory));

    session.generate_propositions("Four-day work week").await.unwrap();
    session.select_proposition(key(1)).unwrap();

    let err = session.run_debate().await.unwrap_err();
    assert!(err.to_string().contains("rate limited"));
    assert_eq!(session.phase(), DebatePhase::PropositionSelected);
    assert!(session.report().is_none());

    assert_eq!(session.arguments().len(), 1);
    assert_eq!(session.partial_rows().len(), 1);
    assert_eq!(session.partial_rows()[0].participant, "Participant 1 (GPT-3.5-turbo)");
}

#[tokio::test]
async fn test_unreadable_judge_reply_aborts_run() {
    let factory = MockProviderFactory::new()
        .with_override("GPT-4o", Arc::new(MockProvider::constant("I'd rather not score this.")));
    let setup = DebateSetup::new(
        default_model(),
        vec![default_model()],
        vec![find_model("GPT-4o").unwrap()],
    )
    .unwrap();
    let mut session = DebateSession::new(setup, Arc::new(factory));

    session.generate_propositions("Public transit").await.unwrap();
    session.select_proposition(key(2)).unwrap();

    let err = session.run_debate().await.unwrap_err();
    assert!(matches!(err, DebateError::Extraction(_)));
    assert!(!err.is_remote());
    assert_eq!(session.arguments().len(), 1);
    assert!(session.partial_rows().is_empty());
}

#[tokio::test]
async fn test_report_serializes() {
    let mut session = DebateSession::new(DebateSetup::default(), Arc::new(MockProviderFactory::new()));
    session.generate_propositions("Open source funding").await.unwrap();
    session.select_proposition(key(1)).unwrap();
    let report = session.run_debate().await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["topic"], "Open source funding");
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    assert!(json["rows"][0]["evaluation"]["overall_score"].is_u64());
}

#[tokio::test]
async fn test_repeated_runs_stay_within_rubric() {
    let judge = Arc::new(MockProvider::scripted().with_model("gpt-4o"));
    let factory = MockProviderFactory::new().with_override("GPT-4o", judge.clone());
    let setup = DebateSetup::new(
        default_model(),
        vec![default_model()],
        vec![find_model("GPT-4o").unwrap()],
    )
    .unwrap();
    let mut session = DebateSession::new(setup, Arc::new(factory));

    session.generate_propositions("Carbon tax").await.unwrap();
    session.select_proposition(key(3)).unwrap();

    for _ in 0..3 {
        let report = session.run_debate().await.unwrap();
        assert_eq!(report.proposition_key, key(3));
        assert_eq!(report.rows.len(), 1);
        for row in &report.rows {
            let evaluation = &row.evaluation;
            assert!(evaluation.overall_score.is_some_and(|s| (0..=100).contains(&s)));
            assert!(evaluation.expected_label().is_some());
            assert_eq!(evaluation.reported_label(), evaluation.expected_label());
            assert!(evaluation.consistency_issues().is_empty());
        }
    }
    assert_eq!(judge.call_count(), 3);
    assert_eq!(session.phase(), DebatePhase::DebateComplete);
}
