//! Models command - Show the model catalog
//!
//! Usage:
//! ```bash
//! rostrum models
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use rostrum_llm::{builtin_models, Credentials};

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs;

/// Run the models command
pub fn run(_args: ModelsArgs) -> Result<()> {
    let credentials = Credentials::from_env();

    println!("{}", "Rostrum Model Catalog".bold().cyan());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Model").fg(Color::Cyan),
            Cell::new("Endpoint").fg(Color::Cyan),
            Cell::new("Key").fg(Color::Cyan),
        ]);

    for (i, model) in builtin_models().iter().enumerate() {
        let key = if credentials.is_configured(model.endpoint) {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&model.name).fg(Color::Green),
            Cell::new(&model.model_name),
            Cell::new(model.endpoint.to_string()),
            key,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "Pick a model by number or name: {}",
        "rostrum run --topic <T> --judge GPT-4o".green()
    );

    Ok(())
}
