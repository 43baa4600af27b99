//! Info command - Show version and provider configuration
//!
//! Usage:
//! ```bash
//! rostrum info
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rostrum_debate::{ARGUMENT_WORD_LIMIT, MAX_JUDGES, MAX_PARTICIPANTS};
use rostrum_llm::{builtin_models, Endpoint};

use super::ProviderArgs;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    providers: ProviderArgs,
}

/// Run the info command
pub fn run(args: InfoArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let credentials = args.providers.credentials();

    println!("{}", "Rostrum - LLM Debate Simulator".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    println!("{}", "Version Information:".bold());
    println!("  {} {}", "CLI Version:".dimmed(), version.green());
    println!();

    println!("{}", "Debate Limits:".bold());
    println!("  {} 1-{}", "Participants:".dimmed(), MAX_PARTICIPANTS);
    println!("  {} 1-{}", "Judges:".dimmed(), MAX_JUDGES);
    println!("  {} {} words (instructed)", "Argument length:".dimmed(), ARGUMENT_WORD_LIMIT);
    println!();

    println!("{}", "Providers:".bold());
    for endpoint in Endpoint::ALL {
        let models = builtin_models()
            .into_iter()
            .filter(|m| m.endpoint == endpoint)
            .count();
        match credentials.connection(endpoint) {
            Ok(connection) => println!(
                "  {} {} ({} models) at {}",
                "✓".green(),
                endpoint,
                models,
                connection.base_url
            ),
            Err(e) => println!("  {} {} ({} models): {}", "✗".red(), endpoint, models, e),
        }
    }
    println!();

    if credentials.available_endpoints().is_empty() {
        crate::print_info("No API keys found; use --offline to try a scripted debate");
    }

    Ok(())
}
