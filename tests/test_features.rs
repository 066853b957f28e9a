//! Unit tests for derived feature computation

use polars::prelude::*;
use tracklab::pipeline::{band_by_distribution, derive_features, BandingScheme};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_duration_minutes_no_rounding() {
    let mut df = df! {
        "duration_milliseconds" => [60000i64, 90000, 210500],
    }
    .unwrap();

    let added = derive_features(&mut df).unwrap();
    assert_eq!(added, vec!["duration_minutes"]);

    let minutes = common::float_values(&df, "duration_minutes");
    assert_eq!(minutes, vec![1.0, 1.5, 210500.0 / 60000.0]);
}

#[test]
fn test_danceability_band_boundary_pins() {
    let mut df = df! {
        "danceability" => [0.39f64, 0.40, 0.70, 0.71],
    }
    .unwrap();

    derive_features(&mut df).unwrap();

    let bands = common::string_values(&df, "danceability_band");
    assert_eq!(bands, vec!["Low", "Medium", "Medium", "High"]);
}

#[test]
fn test_energy_band_boundaries() {
    let mut df = df! {
        "energy" => [0.0f64, 0.29, 0.30, 0.69, 0.70, 1.0],
    }
    .unwrap();

    derive_features(&mut df).unwrap();

    let bands = common::string_values(&df, "energy_band");
    assert_eq!(bands, vec!["Low", "Low", "Medium", "Medium", "High", "High"]);
}

#[test]
fn test_popularity_band_labels_are_exactly_three_levels() {
    let mut df = df! {
        "popularity" => (0..100).map(|i| i as f64).collect::<Vec<_>>(),
    }
    .unwrap();

    derive_features(&mut df).unwrap();

    let bands = common::string_values(&df, "popularity_band");
    assert!(bands
        .iter()
        .all(|b| b == "Low" || b == "Medium" || b == "High"));
}

#[test]
fn test_popularity_band_monotonic_in_value() {
    let mut df = df! {
        "popularity" => (0..60).map(|i| i as f64).collect::<Vec<_>>(),
    }
    .unwrap();

    derive_features(&mut df).unwrap();

    let ranks: Vec<u8> = common::string_values(&df, "popularity_band")
        .iter()
        .map(|b| match b.as_str() {
            "Low" => 0,
            "Medium" => 1,
            _ => 2,
        })
        .collect();
    assert!(
        ranks.windows(2).all(|w| w[0] <= w[1]),
        "a larger popularity value mapped to a lower band"
    );
}

#[test]
fn test_quantile_bands_have_equal_population() {
    let values: Vec<Option<f64>> = (1..=30).map(|i| Some(i as f64)).collect();
    let (labels, scheme) = band_by_distribution(&values);
    assert_eq!(scheme, BandingScheme::Quantile);

    let count = |l: &str| labels.iter().filter(|v| **v == Some(l)).count();
    assert_eq!(count("Low"), 10);
    assert_eq!(count("Medium"), 10);
    assert_eq!(count("High"), 10);
}

#[test]
fn test_equal_width_fallback_on_two_distinct_values() {
    let values = vec![Some(0.0), Some(0.0), Some(9.0), Some(9.0)];
    let (labels, scheme) = band_by_distribution(&values);
    assert_eq!(scheme, BandingScheme::EqualWidth);
    assert_eq!(labels[0], Some("Low"));
    assert_eq!(labels[3], Some("High"));
}

#[test]
fn test_absent_source_columns_are_skipped_not_failed() {
    let mut df = df! {
        "valence" => [0.5f64, 0.6],
        "tempo" => [120.0f64, 98.0],
    }
    .unwrap();

    let added = derive_features(&mut df).unwrap();
    assert!(added.is_empty(), "no recognized sources, nothing derived");
}

#[test]
fn test_partial_schema_derives_only_available_features() {
    let mut df = df! {
        "danceability" => [0.2f64, 0.5, 0.8],
        "valence" => [0.1f64, 0.2, 0.3],
    }
    .unwrap();

    let added = derive_features(&mut df).unwrap();
    assert_eq!(added, vec!["danceability_band"]);
}

#[test]
fn test_full_track_schema_derivation_order() {
    let mut df = common::create_track_dataframe();

    let added = derive_features(&mut df).unwrap();
    assert_eq!(
        added,
        vec!["popularity_band", "danceability_band", "energy_band"]
    );
    common::assert_has_columns(&df, &["popularity_band", "danceability_band", "energy_band"]);
}
