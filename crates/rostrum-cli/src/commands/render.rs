//! Terminal rendering shared by the debate commands

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use rostrum_debate::{Argument, PropositionSet, ResultRow, ResultsTable};

const WRAP_WIDTH: usize = 100;

pub fn print_propositions(topic: &str, propositions: &PropositionSet) {
    println!("{} {}", "Topic:".bold(), topic);
    println!();
    for (key, text) in propositions.iter() {
        println!("  {} {}", format!("[{}]", key.number()).cyan().bold(), text);
    }
    println!();
}

pub fn print_argument(argument: &Argument) {
    println!("{}", argument.participant.bold().green());
    for line in textwrap::wrap(&argument.text, WRAP_WIDTH) {
        println!("  {}", line);
    }
    println!();
}

pub fn results_table(rows: &[ResultRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            ResultsTable::COLUMNS
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );

    for row in ResultsTable::from_rows(rows).rows {
        let mut cells: Vec<Cell> = row.iter().map(Cell::new).collect();
        if let Some(overall) = cells.pop() {
            cells.push(overall.fg(Color::Green));
        }
        table.add_row(cells);
    }
    table
}

/// Every field of one evaluation, wrapped
pub fn print_row_detail(row: &ResultRow) {
    println!("{}", row.detail_title().bold().cyan());
    for (label, value) in row.detail() {
        println!("  {}", format!("{}:", label).dimmed());
        for line in textwrap::wrap(&value, WRAP_WIDTH - 4) {
            println!("    {}", line);
        }
    }
    for issue in row.evaluation.consistency_issues() {
        crate::print_warning(&issue);
    }
    println!();
}
