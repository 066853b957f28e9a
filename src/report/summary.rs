//! Dataset summary rendering

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::stats::{mean, std_dev};
use crate::pipeline::MissingReport;

/// Descriptive summary for one numeric measure.
#[derive(Debug, Clone)]
pub struct MeasureSummary {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute per-measure descriptives over present values.
pub fn describe_measures(df: &DataFrame, numeric_columns: &[String]) -> Vec<MeasureSummary> {
    numeric_columns
        .iter()
        .filter_map(|name| {
            let values: Vec<f64> = df
                .column(name)
                .ok()?
                .cast(&DataType::Float64)
                .ok()?
                .f64()
                .ok()?
                .into_iter()
                .flatten()
                .collect();

            if values.is_empty() {
                return None;
            }

            Some(MeasureSummary {
                name: name.clone(),
                mean: mean(&values),
                std_dev: std_dev(&values),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            })
        })
        .collect()
}

/// Render the per-measure descriptive table.
pub fn display_measures(summaries: &[MeasureSummary]) {
    if summaries.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Measure").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Std Dev").add_attribute(Attribute::Bold),
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(format!("{:.3}", s.mean)),
            Cell::new(format!("{:.3}", s.std_dev)),
            Cell::new(format!("{:.3}", s.min)),
            Cell::new(format!("{:.3}", s.max)),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Render the per-column missing-value report produced by the resolver.
pub fn display_missing_report(reports: &[MissingReport]) {
    if reports.is_empty() {
        println!("      No absent values found");
        return;
    }

    for report in reports {
        println!(
            "      {} {}: {} absent ({:.1}%)",
            style("•").dim(),
            style(&report.column).yellow(),
            report.absent,
            report.pct
        );
    }
}
