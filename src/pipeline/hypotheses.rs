//! Hypothesis battery: correlation, group-mean comparison, and normality
//!
//! Each test runs independently and ends in exactly one terminal state:
//! `Evaluated` with a verdict, or `Skipped` with the reason the
//! precondition failed. No failure aborts the battery.

use std::collections::HashMap;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use super::posthoc::{rank_group_means, GroupSummary};
use super::stats;

/// Default significance threshold shared by all tests.
pub const DEFAULT_ALPHA: f64 = 0.05;

pub const CORRELATION_TEST: &str = "danceability_energy_correlation";
pub const GROUP_MEAN_TEST: &str = "popularity_by_genre_anova";
pub const NORMALITY_TEST: &str = "popularity_normality";

/// Why a test could not be evaluated.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("required column '{0}' is not present in the dataset")]
    MissingColumn(String),
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("computation failed: {0}")]
    ComputationFailure(String),
}

/// Tunable thresholds for the battery.
#[derive(Debug, Clone)]
pub struct HypothesisConfig {
    /// Significance threshold applied to every test.
    pub alpha: f64,
    /// Minimum observations a genre needs to enter the group-mean comparison.
    pub min_group_size: usize,
    /// Cap on the number of most-frequent genres compared.
    pub max_groups: usize,
    /// Row count above which the normality test works on a subsample.
    pub sample_cap: usize,
    /// Seed for the normality subsample, fixed so repeated runs on the
    /// same dataset produce identical verdicts.
    pub seed: u64,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            min_group_size: 10,
            max_groups: 5,
            sample_cap: 5000,
            seed: 42,
        }
    }
}

/// Final verdict for an evaluated test, immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub test_name: String,
    pub statistic: f64,
    pub p_value: f64,
    pub alpha: f64,
    pub accepted: bool,
    pub narrative: String,
}

/// Terminal state of a single test.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum TestOutcome {
    Evaluated(Verdict),
    Skipped { test_name: String, reason: String },
}

impl TestOutcome {
    pub fn test_name(&self) -> &str {
        match self {
            TestOutcome::Evaluated(v) => &v.test_name,
            TestOutcome::Skipped { test_name, .. } => test_name,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TestOutcome::Skipped { .. })
    }
}

/// Results of the full battery, plus the post-hoc group ranking when the
/// group-mean test rejected its null.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    pub outcomes: Vec<TestOutcome>,
    pub group_ranking: Option<Vec<GroupSummary>>,
}

/// Descriptive label for the magnitude of a correlation coefficient.
pub fn correlation_strength(r: f64) -> &'static str {
    let magnitude = r.abs();
    if magnitude >= 0.9 {
        "very strong"
    } else if magnitude >= 0.7 {
        "strong"
    } else if magnitude >= 0.5 {
        "moderate"
    } else if magnitude >= 0.3 {
        "weak"
    } else {
        "very weak"
    }
}

/// Run the three-test battery against a resolved dataset.
///
/// A test that cannot meet its preconditions degrades to `Skipped`; the
/// battery itself never fails.
pub fn run_battery(df: &DataFrame, config: &HypothesisConfig) -> AnalysisRun {
    let mut outcomes = Vec::with_capacity(3);
    let mut group_ranking = None;

    outcomes.push(outcome_of(CORRELATION_TEST, correlation_test(df, config)));

    match group_mean_test(df, config) {
        Ok((verdict, survivors)) => {
            if verdict.accepted {
                group_ranking = rank_group_means(df, "genre", "popularity", &survivors).ok();
            }
            outcomes.push(TestOutcome::Evaluated(verdict));
        }
        Err(e) => outcomes.push(TestOutcome::Skipped {
            test_name: GROUP_MEAN_TEST.to_string(),
            reason: e.to_string(),
        }),
    }

    outcomes.push(outcome_of(NORMALITY_TEST, normality_test(df, config)));

    AnalysisRun {
        outcomes,
        group_ranking,
    }
}

fn outcome_of(name: &str, result: Result<Verdict, AnalysisError>) -> TestOutcome {
    match result {
        Ok(verdict) => TestOutcome::Evaluated(verdict),
        Err(e) => TestOutcome::Skipped {
            test_name: name.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Pearson correlation between danceability and energy.
///
/// Accepted only when the correlation is both significant and positive;
/// a significant negative correlation is still a rejection.
fn correlation_test(
    df: &DataFrame,
    config: &HypothesisConfig,
) -> Result<Verdict, AnalysisError> {
    let dance = numeric_column(df, "danceability")?;
    let energy = numeric_column(df, "energy")?;

    let (xs, ys): (Vec<f64>, Vec<f64>) = dance
        .iter()
        .zip(energy.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();

    if xs.len() < 3 {
        return Err(AnalysisError::InsufficientData(format!(
            "correlation needs at least 3 paired rows, found {}",
            xs.len()
        )));
    }

    let result = stats::pearson(&xs, &ys).ok_or_else(|| {
        AnalysisError::ComputationFailure(
            "zero variance in danceability or energy".to_string(),
        )
    })?;

    let significant = result.p_value < config.alpha;
    let accepted = significant && result.r > 0.0;
    let strength = correlation_strength(result.r);

    let narrative = if accepted {
        format!(
            "{} positive correlation between danceability and energy (r = {:.3}, p = {:.4}, n = {})",
            strength, result.r, result.p_value, result.n
        )
    } else if significant {
        format!(
            "significant but non-positive correlation (r = {:.3}, p = {:.4}, n = {})",
            result.r, result.p_value, result.n
        )
    } else {
        format!(
            "no significant correlation (r = {:.3}, p = {:.4}, n = {})",
            result.r, result.p_value, result.n
        )
    };

    Ok(Verdict {
        test_name: CORRELATION_TEST.to_string(),
        statistic: result.r,
        p_value: result.p_value,
        alpha: config.alpha,
        accepted,
        narrative,
    })
}

/// One-way ANOVA of popularity across genres.
///
/// Genres need at least `min_group_size` observations to enter the
/// comparison, capped at the `max_groups` most frequent. Returns the
/// verdict and the surviving genre list for the post-hoc ranking.
fn group_mean_test(
    df: &DataFrame,
    config: &HypothesisConfig,
) -> Result<(Verdict, Vec<String>), AnalysisError> {
    let genres = string_column(df, "genre")?;
    let popularity = numeric_column(df, "popularity")?;

    let mut by_genre: HashMap<String, Vec<f64>> = HashMap::new();
    for (genre, value) in genres.iter().zip(popularity.iter()) {
        if let (Some(genre), Some(value)) = (genre, value) {
            by_genre.entry(genre.clone()).or_default().push(*value);
        }
    }

    if by_genre.len() < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "group comparison needs at least 2 distinct genres, found {}",
            by_genre.len()
        )));
    }

    let mut eligible: Vec<(String, Vec<f64>)> = by_genre
        .into_iter()
        .filter(|(_, values)| values.len() >= config.min_group_size)
        .collect();
    // Most frequent first; name breaks ties so the selection is deterministic
    eligible.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
    eligible.truncate(config.max_groups);

    if eligible.len() < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "fewer than 2 genres reach {} observations",
            config.min_group_size
        )));
    }

    let survivors: Vec<String> = eligible.iter().map(|(genre, _)| genre.clone()).collect();
    let groups: Vec<Vec<f64>> = eligible.into_iter().map(|(_, values)| values).collect();

    let result = stats::one_way_anova(&groups).ok_or_else(|| {
        AnalysisError::ComputationFailure(
            "degenerate groups for variance analysis".to_string(),
        )
    })?;

    let accepted = result.p_value < config.alpha;
    let narrative = if accepted {
        format!(
            "mean popularity differs across {} genres (F = {:.3}, p = {:.4})",
            survivors.len(),
            result.f_statistic,
            result.p_value
        )
    } else {
        format!(
            "no evidence that mean popularity differs across {} genres (F = {:.3}, p = {:.4})",
            survivors.len(),
            result.f_statistic,
            result.p_value
        )
    };

    let verdict = Verdict {
        test_name: GROUP_MEAN_TEST.to_string(),
        statistic: result.f_statistic,
        p_value: result.p_value,
        alpha: config.alpha,
        accepted,
        narrative,
    };

    Ok((verdict, survivors))
}

/// Kolmogorov-Smirnov goodness-of-fit of popularity to a normal shape.
///
/// The decision direction is inverted relative to the other tests:
/// failing to reject the null (p > alpha) is the acceptance condition.
fn normality_test(df: &DataFrame, config: &HypothesisConfig) -> Result<Verdict, AnalysisError> {
    let values: Vec<f64> = numeric_column(df, "popularity")?
        .into_iter()
        .flatten()
        .collect();

    if values.len() < 3 {
        return Err(AnalysisError::InsufficientData(format!(
            "normality test needs at least 3 rows, found {}",
            values.len()
        )));
    }

    let sample: Vec<f64> = if values.len() > config.sample_cap {
        let mut rng = StdRng::seed_from_u64(config.seed);
        rand::seq::index::sample(&mut rng, values.len(), config.sample_cap)
            .into_iter()
            .map(|i| values[i])
            .collect()
    } else {
        values
    };
    let n = sample.len();

    let standardized = stats::standardize(&sample).ok_or_else(|| {
        AnalysisError::ComputationFailure("popularity has zero variance".to_string())
    })?;

    let result = stats::ks_test_standard_normal(&standardized).ok_or_else(|| {
        AnalysisError::ComputationFailure("empty sample for goodness-of-fit".to_string())
    })?;

    let accepted = result.p_value > config.alpha;
    let narrative = if accepted {
        format!(
            "popularity is consistent with a normal distribution (D = {:.4}, p = {:.4}, n = {})",
            result.statistic, result.p_value, n
        )
    } else {
        format!(
            "popularity deviates from a normal distribution (D = {:.4}, p = {:.4}, n = {})",
            result.statistic, result.p_value, n
        )
    };

    Ok(Verdict {
        test_name: NORMALITY_TEST.to_string(),
        statistic: result.statistic,
        p_value: result.p_value,
        alpha: config.alpha,
        accepted,
        narrative,
    })
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
    let column = df
        .column(name)
        .map_err(|_| AnalysisError::MissingColumn(name.to_string()))?;
    let column = column
        .cast(&DataType::Float64)
        .map_err(|e| AnalysisError::ComputationFailure(e.to_string()))?;
    let ca = column
        .f64()
        .map_err(|e| AnalysisError::ComputationFailure(e.to_string()))?;
    Ok(ca.into_iter().collect())
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, AnalysisError> {
    let column = df
        .column(name)
        .map_err(|_| AnalysisError::MissingColumn(name.to_string()))?;
    let column = column
        .cast(&DataType::String)
        .map_err(|e| AnalysisError::ComputationFailure(e.to_string()))?;
    let ca = column
        .str()
        .map_err(|e| AnalysisError::ComputationFailure(e.to_string()))?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}
