//! Unit tests for column classification

use polars::prelude::*;
use tracklab::pipeline::classify_columns;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_classify_track_dataframe() {
    let df = common::create_track_dataframe();
    let roles = classify_columns(&df);

    assert_eq!(roles.numeric, vec!["popularity", "danceability", "energy"]);
    assert_eq!(roles.categorical, vec!["genre"]);
}

#[test]
fn test_classify_empty_dataset_yields_empty_sets() {
    let roles = classify_columns(&DataFrame::empty());
    assert!(roles.numeric.is_empty());
    assert!(roles.categorical.is_empty());
}

#[test]
fn test_classify_is_deterministic() {
    let df = common::create_track_dataframe();
    let first = classify_columns(&df);
    let second = classify_columns(&df);
    assert_eq!(first.numeric, second.numeric);
    assert_eq!(first.categorical, second.categorical);
}

#[test]
fn test_integer_and_float_both_numeric() {
    let df = df! {
        "plays" => [100i64, 200, 300],
        "tempo" => [120.5f64, 98.0, 140.0],
        "artist" => ["a", "b", "c"],
    }
    .unwrap();

    let roles = classify_columns(&df);
    assert!(roles.is_numeric("plays"));
    assert!(roles.is_numeric("tempo"));
    assert!(roles.is_categorical("artist"));
}
