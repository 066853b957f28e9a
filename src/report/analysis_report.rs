//! Hypothesis verdict rendering and JSON export

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{AnalysisRun, GroupSummary, TestOutcome};

/// Render the verdict table and, when present, the post-hoc group ranking.
pub fn display_analysis(run: &AnalysisRun) {
    println!();
    println!(
        "    {} {}",
        style("🔬").cyan(),
        style("HYPOTHESIS VERDICTS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Test").add_attribute(Attribute::Bold),
        Cell::new("Statistic").add_attribute(Attribute::Bold),
        Cell::new("p-value").add_attribute(Attribute::Bold),
        Cell::new("Verdict").add_attribute(Attribute::Bold),
    ]);

    for outcome in &run.outcomes {
        match outcome {
            TestOutcome::Evaluated(v) => {
                let (label, color) = if v.accepted {
                    ("ACCEPTED", Color::Green)
                } else {
                    ("REJECTED", Color::Red)
                };
                table.add_row(vec![
                    Cell::new(&v.test_name),
                    Cell::new(format!("{:.4}", v.statistic)),
                    Cell::new(format!("{:.4}", v.p_value)),
                    Cell::new(label).fg(color).add_attribute(Attribute::Bold),
                ]);
            }
            TestOutcome::Skipped { test_name, .. } => {
                table.add_row(vec![
                    Cell::new(test_name),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("SKIPPED").fg(Color::Yellow),
                ]);
            }
        }
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    println!();
    for outcome in &run.outcomes {
        match outcome {
            TestOutcome::Evaluated(v) => {
                println!("      {} {}", style("•").dim(), v.narrative);
            }
            TestOutcome::Skipped { test_name, reason } => {
                println!(
                    "      {} {}: skipped - {}",
                    style("•").dim(),
                    style(test_name).yellow(),
                    reason
                );
            }
        }
    }

    if let Some(ranking) = &run.group_ranking {
        display_group_ranking(ranking);
    }
}

/// Render the post-hoc group ranking, ordered by descending mean.
fn display_group_ranking(ranking: &[GroupSummary]) {
    println!();
    println!(
        "    {} {}",
        style("🏆").cyan(),
        style("GENRE RANKING (by mean popularity)").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Std Dev").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
    ]);

    for (rank, summary) in ranking.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&summary.group),
            Cell::new(format!("{:.2}", summary.mean)),
            Cell::new(format!("{:.2}", summary.std_dev)),
            Cell::new(summary.count),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Write the full analysis run (verdicts plus ranking) as pretty JSON.
pub fn export_json(run: &AnalysisRun, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("Failed to serialize analysis run")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    Ok(())
}
