//! Propose command - Generate propositions for a topic
//!
//! Usage:
//! ```bash
//! rostrum propose --topic "Universal basic income"
//! rostrum propose --topic "Remote work" --moderator GPT-4o
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rostrum_debate::{DebateSession, DebateSetup};
use rostrum_llm::default_model;

use super::render::print_propositions;
use super::{resolve_model, ProviderArgs};

/// Arguments for the propose command
#[derive(Args)]
pub struct ProposeArgs {
    /// Debate topic
    #[arg(long, short = 't')]
    topic: String,

    /// Moderator model (catalog number or name)
    #[arg(long, short = 'm')]
    moderator: Option<String>,

    #[command(flatten)]
    providers: ProviderArgs,
}

/// Run the propose command
pub async fn run(args: ProposeArgs) -> Result<()> {
    let moderator = match &args.moderator {
        Some(query) => resolve_model(query)?,
        None => default_model(),
    };
    let setup = DebateSetup::new(moderator.clone(), vec![default_model()], vec![default_model()])?;
    let mut session = DebateSession::new(setup, args.providers.factory());

    println!("{} Asking {} for propositions...", "⚙".blue(), moderator.name.green());
    println!();

    let propositions = session.generate_propositions(&args.topic).await?;
    print_propositions(args.topic.trim(), &propositions);

    crate::print_success("Propositions generated");
    Ok(())
}
