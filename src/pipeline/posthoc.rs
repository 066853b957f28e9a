//! Descriptive post-hoc ranking of group means
//!
//! Runs only after the group-mean test rejects its null. No multiplicity
//! correction is applied; the ranking complements the omnibus verdict with
//! a descriptive ordering.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::stats::{mean, std_dev};

/// Mean, spread, and size for one group, recomputed on each invocation.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// Summarize `value_column` for each listed group and rank by descending mean.
pub fn rank_group_means(
    df: &DataFrame,
    group_column: &str,
    value_column: &str,
    groups: &[String],
) -> Result<Vec<GroupSummary>> {
    let group_col = df.column(group_column)?.cast(&DataType::String)?;
    let value_col = df.column(value_column)?.cast(&DataType::Float64)?;

    let labels = group_col.str()?;
    let values = value_col.f64()?;

    let mut summaries: Vec<GroupSummary> = groups
        .iter()
        .map(|group| {
            let members: Vec<f64> = labels
                .into_iter()
                .zip(values)
                .filter_map(|(label, value)| match (label, value) {
                    (Some(label), Some(value)) if label == group => Some(value),
                    _ => None,
                })
                .collect();

            GroupSummary {
                group: group.clone(),
                mean: mean(&members),
                std_dev: std_dev(&members),
                count: members.len(),
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(std::cmp::Ordering::Equal));

    Ok(summaries)
}
