//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use statrs::distribution::{ContinuousCDF, Normal as NormalDist};
use std::path::PathBuf;
use tempfile::TempDir;

/// Five-row track table exercising the full pipeline end to end:
/// two genres (neither reaching 10 observations), strongly correlated
/// danceability/energy, and popularity spanning all three bands.
pub fn create_track_dataframe() -> DataFrame {
    df! {
        "popularity" => [10i32, 50, 50, 90, 95],
        "genre" => ["pop", "pop", "rock", "rock", "rock"],
        "danceability" => [0.1f64, 0.5, 0.6, 0.8, 0.9],
        "energy" => [0.2f64, 0.5, 0.55, 0.85, 0.95],
    }
    .unwrap()
}

/// Track table with absent values in both numeric and categorical columns.
pub fn create_track_dataframe_with_missing() -> DataFrame {
    df! {
        "popularity" => [Some(10.0f64), None, Some(50.0), Some(90.0), None],
        "genre" => [Some("pop"), Some("rock"), None, Some("rock"), Some("pop")],
        "danceability" => [0.1f64, 0.5, 0.6, 0.8, 0.9],
    }
    .unwrap()
}

/// Genre dataset built from (name, count, base popularity) triples.
/// A small deterministic jitter keeps within-group variance non-zero.
pub fn create_genre_dataset(groups: &[(&str, usize, f64)]) -> DataFrame {
    let mut genres: Vec<String> = Vec::new();
    let mut popularity: Vec<f64> = Vec::new();
    for (name, count, base) in groups {
        for i in 0..*count {
            genres.push((*name).to_string());
            popularity.push(base + (i % 5) as f64);
        }
    }
    df! {
        "genre" => genres,
        "popularity" => popularity,
    }
    .unwrap()
}

/// Seeded random draw from N(mean, std).
pub fn normal_sample(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(mean, std).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Deterministic stratified normal sample via inverse-CDF quantiles.
/// Matches the normal shape as closely as a sample of size n can.
pub fn normal_quantile_sample(n: usize, mean: f64, std: f64) -> Vec<f64> {
    let dist = NormalDist::new(mean, std).unwrap();
    (0..n)
        .map(|i| dist.inverse_cdf((i as f64 + 0.5) / n as f64))
        .collect()
}

/// Seeded bimodal draw: two well-separated normal modes.
pub fn bimodal_sample(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let lo = Normal::new(-4.0, 1.0).unwrap();
    let hi = Normal::new(4.0, 1.0).unwrap();
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                lo.sample(&mut rng)
            } else {
                hi.sample(&mut rng)
            }
        })
        .collect()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("tracks.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("tracks.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Extract a string column as a Vec for assertions
pub fn string_values(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

/// Extract a float column as a Vec for assertions
pub fn float_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}
