//! Run command - Stage a complete debate
//!
//! Usage:
//! ```bash
//! rostrum run --topic "Universal basic income"
//! rostrum run --topic "Remote work" --select 2 --participant GPT-4o --participant Llama3-8B --judge GPT-4o
//! rostrum run --topic "Remote work" --select 1 --json report.json --offline
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use rostrum_debate::{
    schema, Argument, DebateObserver, DebateSession, DebateSetup, PropositionKey, ResultRow,
};
use rostrum_llm::{default_model, ModelProfile};

use super::render::{print_argument, print_propositions, print_row_detail, results_table};
use super::{resolve_model, ProviderArgs};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Debate topic
    #[arg(long, short = 't')]
    topic: String,

    /// Moderator model (catalog number or name)
    #[arg(long, short = 'm')]
    moderator: Option<String>,

    /// Participant model; repeat for up to three participants
    #[arg(long = "participant", short = 'p', value_name = "MODEL")]
    participants: Vec<String>,

    /// Judge model; repeat for up to three judges
    #[arg(long = "judge", short = 'j', value_name = "MODEL")]
    judges: Vec<String>,

    /// Proposition to debate (1-3); prompts when omitted
    #[arg(long, short = 's')]
    select: Option<PropositionKey>,

    /// Write the full report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    #[command(flatten)]
    providers: ProviderArgs,
}

/// Prints arguments and scoring progress as the debate runs
struct Progress;

impl DebateObserver for Progress {
    fn on_argument(&mut self, argument: &Argument) {
        print_argument(argument);
    }

    fn on_evaluation(&mut self, row: &ResultRow) {
        let e = &row.evaluation;
        println!(
            "  {} {} scored {} ({})",
            "•".cyan(),
            row.judge.dimmed(),
            row.participant,
            e.score_text(e.overall_score, schema::OVERALL_SCORE).green()
        );
        println!();
    }
}

/// Run the run command
pub async fn run(args: RunArgs) -> Result<()> {
    let setup = build_setup(&args)?;
    let mut session = DebateSession::new(setup, args.providers.factory());

    println!("{}", "Rostrum Debate".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    let propositions = session.generate_propositions(&args.topic).await?;
    print_propositions(args.topic.trim(), &propositions);

    let key = match args.select {
        Some(key) => key,
        None => prompt_for_proposition()?,
    };
    let proposition = session.select_proposition(key)?.to_string();
    crate::print_info(&format!("Debating {}: {}", key, proposition));
    println!();

    let report = match session.run_debate_with(&mut Progress).await {
        Ok(report) => report,
        Err(e) => {
            if !session.partial_rows().is_empty() {
                crate::print_warning("Debate aborted; scores collected so far:");
                println!("{}", results_table(session.partial_rows()));
            }
            return Err(e.into());
        }
    };

    println!("{}", "Results".bold().cyan());
    println!("{}", results_table(&report.rows));
    println!();

    for standing in report.standings() {
        println!(
            "  {} {} averaged {:.1}",
            "•".cyan(),
            standing.participant,
            standing.average_score
        );
    }
    println!();

    for row in &report.rows {
        print_row_detail(row);
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        crate::print_success(&format!("Report written to {}", path.display()));
    }

    crate::print_success("Debate complete");
    Ok(())
}

fn build_setup(args: &RunArgs) -> Result<DebateSetup> {
    let moderator = match &args.moderator {
        Some(query) => resolve_model(query)?,
        None => default_model(),
    };
    let participants = resolve_all(&args.participants, 2)?;
    let judges = resolve_all(&args.judges, 1)?;
    Ok(DebateSetup::new(moderator, participants, judges)?)
}

/// Resolve every flag value, or `default_count` copies of the default model
fn resolve_all(queries: &[String], default_count: usize) -> Result<Vec<ModelProfile>> {
    if queries.is_empty() {
        return Ok(vec![default_model(); default_count]);
    }
    queries.iter().map(|q| resolve_model(q)).collect()
}

fn prompt_for_proposition() -> Result<PropositionKey> {
    let stdin = io::stdin();
    loop {
        print!("Select a proposition [1-3]: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(anyhow!("No proposition selected"));
        }
        match line.parse::<PropositionKey>() {
            Ok(key) => return Ok(key),
            Err(e) => crate::print_error(&e.to_string()),
        }
    }
}
