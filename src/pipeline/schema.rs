//! Column classification: numeric vs categorical

use polars::prelude::*;

/// Column tags produced by schema inspection.
///
/// Downstream stages use these sets to decide which resolution strategy
/// (median vs sentinel fill) and which tests apply to each column.
#[derive(Debug, Clone, Default)]
pub struct ColumnRoles {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnRoles {
    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric.iter().any(|c| c == name)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical.iter().any(|c| c == name)
    }
}

/// Classify dataset columns into numeric and categorical (string-typed) sets.
///
/// Pure and deterministic given the same schema; an empty DataFrame yields
/// two empty sets. Columns of other dtypes (boolean, temporal) are ignored
/// by the pipeline and left untagged.
pub fn classify_columns(df: &DataFrame) -> ColumnRoles {
    let mut roles = ColumnRoles::default();

    for col in df.get_columns() {
        if col.dtype().is_primitive_numeric() {
            roles.numeric.push(col.name().to_string());
        } else if matches!(col.dtype(), DataType::String) {
            roles.categorical.push(col.name().to_string());
        }
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_mixed_columns() {
        let df = df! {
            "popularity" => [10i32, 50, 90],
            "danceability" => [0.1f64, 0.5, 0.9],
            "genre" => ["pop", "rock", "jazz"],
        }
        .unwrap();

        let roles = classify_columns(&df);

        assert_eq!(roles.numeric, vec!["popularity", "danceability"]);
        assert_eq!(roles.categorical, vec!["genre"]);
        assert!(roles.is_numeric("popularity"));
        assert!(roles.is_categorical("genre"));
        assert!(!roles.is_numeric("genre"));
    }

    #[test]
    fn test_classify_empty_dataframe() {
        let df = DataFrame::empty();
        let roles = classify_columns(&df);
        assert!(roles.numeric.is_empty());
        assert!(roles.categorical.is_empty());
    }

    #[test]
    fn test_boolean_columns_untagged() {
        let df = df! {
            "flag" => [true, false, true],
            "tempo" => [120.0f64, 98.5, 140.2],
        }
        .unwrap();

        let roles = classify_columns(&df);

        assert_eq!(roles.numeric, vec!["tempo"]);
        assert!(roles.categorical.is_empty());
    }
}
