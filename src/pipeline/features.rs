//! Derived feature computation: duration minutes and ordinal bands
//!
//! Each derived column is declared as a `FeatureSpec` naming the source
//! columns it needs; specs whose sources are absent from the schema are
//! skipped rather than failed, so adding a feature is a data change, not a
//! control-flow change.

use std::fmt;

use anyhow::Result;
use polars::prelude::*;

use super::stats::percentile;

pub const MS_PER_MINUTE: f64 = 60_000.0;

/// Ordinal band labels, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Medium => "Medium",
            Band::High => "High",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a continuous column was partitioned into three bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandingScheme {
    /// Equal-population tertiles recomputed from the current distribution
    Quantile,
    /// Three equal-width bins over the observed range
    EqualWidth,
}

/// A derived-column declaration: the source columns it requires plus the
/// derivation to run when they are all present.
struct FeatureSpec {
    name: &'static str,
    requires: &'static [&'static str],
    derive: fn(&DataFrame) -> Result<Column>,
}

const FEATURE_SPECS: &[FeatureSpec] = &[
    FeatureSpec {
        name: "duration_minutes",
        requires: &["duration_milliseconds"],
        derive: derive_duration_minutes,
    },
    FeatureSpec {
        name: "popularity_band",
        requires: &["popularity"],
        derive: derive_popularity_band,
    },
    FeatureSpec {
        name: "danceability_band",
        requires: &["danceability"],
        derive: derive_danceability_band,
    },
    FeatureSpec {
        name: "energy_band",
        requires: &["energy"],
        derive: derive_energy_band,
    },
];

/// Add derived columns to the dataset.
///
/// Specs whose source columns are absent are skipped. Returns the names of
/// the columns actually added, in declaration order.
pub fn derive_features(df: &mut DataFrame) -> Result<Vec<String>> {
    let schema_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut added = Vec::new();
    for spec in FEATURE_SPECS {
        let satisfied = spec
            .requires
            .iter()
            .all(|c| schema_cols.iter().any(|s| s == c));
        if !satisfied {
            continue;
        }

        let column = (spec.derive)(df)?;
        df.with_column(column)?;
        added.push(spec.name.to_string());
    }

    Ok(added)
}

/// Fixed-edge danceability band: < 0.4 Low, [0.4, 0.7] Medium, > 0.7 High.
pub fn danceability_band(value: f64) -> Band {
    if value < 0.4 {
        Band::Low
    } else if value <= 0.7 {
        Band::Medium
    } else {
        Band::High
    }
}

/// Fixed-edge energy band: < 0.3 Low, [0.3, 0.7) Medium, >= 0.7 High.
///
/// The conditions are exhaustive for finite input; NaN falls through to
/// Medium as the defined default.
pub fn energy_band(value: f64) -> Band {
    if value < 0.3 {
        Band::Low
    } else if (0.3..0.7).contains(&value) {
        Band::Medium
    } else if value >= 0.7 {
        Band::High
    } else {
        Band::Medium
    }
}

fn derive_duration_minutes(df: &DataFrame) -> Result<Column> {
    let ms = df.column("duration_milliseconds")?.cast(&DataType::Float64)?;
    let minutes: Vec<Option<f64>> = ms
        .f64()?
        .into_iter()
        .map(|v| v.map(|ms| ms / MS_PER_MINUTE))
        .collect();
    Ok(Column::new("duration_minutes".into(), minutes))
}

fn derive_danceability_band(df: &DataFrame) -> Result<Column> {
    fixed_band_column(df, "danceability", "danceability_band", danceability_band)
}

fn derive_energy_band(df: &DataFrame) -> Result<Column> {
    fixed_band_column(df, "energy", "energy_band", energy_band)
}

fn fixed_band_column(
    df: &DataFrame,
    source: &str,
    name: &str,
    band: fn(f64) -> Band,
) -> Result<Column> {
    let col = df.column(source)?.cast(&DataType::Float64)?;
    let labels: Vec<Option<&str>> = col
        .f64()?
        .into_iter()
        .map(|v| v.map(|x| band(x).label()))
        .collect();
    Ok(Column::new(name.into(), labels))
}

/// Popularity band: equal-population tertiles when the column has at least
/// 3 distinct values and the computed edges do not collapse; otherwise
/// three equal-width bins over the observed range.
fn derive_popularity_band(df: &DataFrame) -> Result<Column> {
    let col = df.column("popularity")?.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = col.f64()?.into_iter().collect();
    let (labels, _) = band_by_distribution(&values);
    Ok(Column::new("popularity_band".into(), labels))
}

/// Assign each present value to a three-level band and report which
/// partitioning scheme was used.
pub fn band_by_distribution(values: &[Option<f64>]) -> (Vec<Option<&'static str>>, BandingScheme) {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut distinct = present.clone();
    distinct.dedup();

    if distinct.len() >= 3 {
        let lo_edge = percentile(&present, 1.0 / 3.0);
        let hi_edge = percentile(&present, 2.0 / 3.0);
        // Heavy ties can collapse the tertile edges; fall back rather than fail
        if lo_edge < hi_edge {
            let labels = values
                .iter()
                .map(|v| {
                    v.map(|x| {
                        if x <= lo_edge {
                            Band::Low.label()
                        } else if x <= hi_edge {
                            Band::Medium.label()
                        } else {
                            Band::High.label()
                        }
                    })
                })
                .collect();
            return (labels, BandingScheme::Quantile);
        }
    }

    let lo = present.first().copied().unwrap_or(0.0);
    let hi = present.last().copied().unwrap_or(0.0);
    let width = (hi - lo) / 3.0;

    let labels = values
        .iter()
        .map(|v| {
            v.map(|x| {
                if width <= 0.0 {
                    // Zero observed range - no ordering to express
                    return Band::Medium.label();
                }
                let idx = (((x - lo) / width).floor() as i64).clamp(0, 2);
                match idx {
                    0 => Band::Low.label(),
                    1 => Band::Medium.label(),
                    _ => Band::High.label(),
                }
            })
        })
        .collect();

    (labels, BandingScheme::EqualWidth)
}
