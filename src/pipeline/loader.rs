//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Shape and memory footprint of a loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    pub rows: usize,
    pub cols: usize,
    pub memory_mb: f64,
}

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// `infer_schema_length` controls how many rows the CSV reader scans for
/// type detection; 0 requests a full scan.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let schema_rows = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_rows)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Shape and estimated memory usage for the loaded dataset.
pub fn dataset_stats(df: &DataFrame) -> DatasetStats {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    DatasetStats {
        rows,
        cols,
        memory_mb,
    }
}

/// Column names of the dataset, in schema order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}
