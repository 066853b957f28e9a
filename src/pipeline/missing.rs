//! Missing value detection and resolution

use anyhow::Result;
use polars::prelude::*;

use super::schema::ColumnRoles;

/// Sentinel label substituted for absent categorical values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Per-column record of absent values found before resolution.
#[derive(Debug, Clone)]
pub struct MissingReport {
    pub column: String,
    pub absent: usize,
    pub pct: f64,
}

/// Fill absent values in place using the classifier's tags.
///
/// Numeric columns receive the column median computed over present values
/// only; categorical columns receive the `"Unknown"` sentinel. Columns with
/// zero absent values are untouched, so running twice on an already-resolved
/// dataset is a no-op.
///
/// Returns one report entry per affected column (count and percentage of
/// absent values found before the fill), sorted by percentage descending.
pub fn resolve_missing_values(
    df: &mut DataFrame,
    roles: &ColumnRoles,
) -> Result<Vec<MissingReport>> {
    let height = df.height();
    if height == 0 {
        return Ok(Vec::new());
    }

    let mut reports: Vec<MissingReport> = Vec::new();

    for name in &roles.numeric {
        let column = df.column(name)?;
        let absent = column.null_count();
        if absent == 0 {
            continue;
        }

        let float_col = column.cast(&DataType::Float64)?;
        let ca = float_col.f64()?;
        // Median over present values, taken before any substitution
        let Some(median) = ca.median() else {
            // Every value absent - no median exists, leave the column as-is
            continue;
        };

        let filled: Vec<f64> = ca.into_iter().map(|v| v.unwrap_or(median)).collect();
        df.with_column(Column::new(name.as_str().into(), filled))?;

        reports.push(MissingReport {
            column: name.clone(),
            absent,
            pct: absent as f64 / height as f64 * 100.0,
        });
    }

    for name in &roles.categorical {
        let column = df.column(name)?;
        let absent = column.null_count();
        if absent == 0 {
            continue;
        }

        let filled: Vec<String> = column
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or(UNKNOWN_LABEL).to_string())
            .collect();
        df.with_column(Column::new(name.as_str().into(), filled))?;

        reports.push(MissingReport {
            column: name.clone(),
            absent,
            pct: absent as f64 / height as f64 * 100.0,
        });
    }

    reports.sort_by(|a, b| b.pct.partial_cmp(&a.pct).unwrap_or(std::cmp::Ordering::Equal));

    Ok(reports)
}
