//! Tracklab: Music-Track Statistical Analysis CLI
//!
//! Loads a tabular music-track dataset, resolves missing values, derives
//! categorical band features, and runs the hypothesis battery, rendering a
//! styled terminal report.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use tracklab::cli::Cli;
use tracklab::pipeline::{
    classify_columns, dataset_stats, derive_features, load_dataset, resolve_missing_values,
    run_battery,
};
use tracklab::report::{describe_measures, display_analysis, display_measures,
    display_missing_report, export_json};
use tracklab::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.hypothesis_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, config.alpha, config.min_group_size, config.max_groups);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let mut df = load_dataset(&cli.input, cli.infer_schema_length)?;
    let stats = dataset_stats(&df);
    finish_with_success(&spinner, "Dataset loaded");
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", stats.rows);
    println!("      Columns: {}", stats.cols);
    println!("      Estimated memory: {:.2} MB", stats.memory_mb);
    print_step_time(step_start.elapsed());

    // Step 2: Classify columns
    print_step_header(2, "Column Classification");
    let step_start = Instant::now();
    let roles = classify_columns(&df);
    print_success(&format!(
        "Tagged {} numeric and {} categorical column(s)",
        roles.numeric.len(),
        roles.categorical.len()
    ));
    print_step_time(step_start.elapsed());

    // Step 3: Resolve missing values
    print_step_header(3, "Missing Value Resolution");
    let step_start = Instant::now();
    let missing = resolve_missing_values(&mut df, &roles)?;
    display_missing_report(&missing);
    if missing.is_empty() {
        print_info("Dataset already complete");
    } else {
        print_success(&format!(
            "Resolved absent values in {} column(s)",
            missing.len()
        ));
    }
    print_step_time(step_start.elapsed());

    // Step 4: Derive features
    print_step_header(4, "Feature Derivation");
    let step_start = Instant::now();
    let derived = derive_features(&mut df)?;
    if derived.is_empty() {
        print_info("No recognized source columns - nothing derived");
    } else {
        print_success(&format!("Derived: {}", derived.join(", ")));
    }
    let measures = describe_measures(&df, &roles.numeric);
    display_measures(&measures);
    print_step_time(step_start.elapsed());

    // Step 5: Hypothesis battery
    print_step_header(5, "Hypothesis Tests");
    let step_start = Instant::now();
    let run = run_battery(&df, &config);
    display_analysis(&run);
    print_step_time(step_start.elapsed());

    if let Some(path) = &cli.report_json {
        export_json(&run, path)?;
        print_success(&format!("JSON report written to {}", path.display()));
    }

    print_completion();

    Ok(())
}
