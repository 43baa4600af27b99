//! Rostrum CLI - Run multi-party LLM debates from the terminal
//!
//! # Usage
//!
//! ```bash
//! # List the model catalog
//! rostrum models
//!
//! # Ask the moderator for propositions
//! rostrum propose --topic "Universal basic income"
//!
//! # Full debate: pick proposition 2, three participants, two judges
//! rostrum run --topic "Universal basic income" --select 2 \
//!     --participant GPT-4o --participant Llama3-70B --participant Llama3-8B \
//!     --judge GPT-4o --judge "Mixtral 8x7B instruct"
//!
//! # Same flow without network access
//! rostrum run --topic "Universal basic income" --offline
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

use commands::{info, models, propose, run};

/// Rostrum - LLM debate simulator
///
/// A moderator model proposes debatable statements, participant models argue
/// the one you pick, and judge models score every argument.
#[derive(Parser)]
#[command(
    name = "rostrum",
    version,
    about = "Rostrum - multi-party LLM debate simulator",
    long_about = "Rostrum stages a debate between language models.\n\n\
                  A moderator proposes three propositions on a topic, participants\n\
                  argue the selected one, and judges score each argument\n\
                  against a fixed rubric."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the models available for every role
    #[command(name = "models")]
    Models(models::ModelsArgs),

    /// Generate three propositions for a topic
    #[command(name = "propose")]
    Propose(propose::ProposeArgs),

    /// Run a complete debate
    #[command(name = "run")]
    Run(run::RunArgs),

    /// Show version and configured providers
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let result: Result<()> = match cli.command {
        Commands::Models(args) => models::run(args),
        Commands::Propose(args) => propose::run(args).await,
        Commands::Run(args) => run::run(args).await,
        Commands::Info(args) => info::run(args),
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print a success message with a checkmark
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message with an X
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}
