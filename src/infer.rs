//! Semantic type inference from column dtypes.
//!
//! The policy is deterministic and dtype-driven; it never samples values
//! and never guesses when classification is impossible.

use crate::data::{DataFrame, Dtype};
use crate::error::{Error, Result};
use crate::shorthand::FieldType;

/// Classify a dataset column into a semantic field type.
///
/// Numeric columns are quantitative, temporal columns are temporal,
/// ordered categoricals are ordinal, and unordered categorical or free
/// text columns are nominal.
///
/// # Errors
///
/// Returns [`Error::UnresolvableType`] when the column is not present in
/// the dataset.
pub fn field_type(data: &DataFrame, column: &str) -> Result<FieldType> {
    let dtype = data.dtype(column).ok_or_else(|| Error::UnresolvableType {
        column: column.to_string(),
        reason: "column not present in dataset".to_string(),
    })?;

    Ok(match dtype {
        Dtype::Numeric => FieldType::Quantitative,
        Dtype::Temporal => FieldType::Temporal,
        Dtype::Ordered => FieldType::Ordinal,
        Dtype::Text => FieldType::Nominal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column_f64("age", &[30.0, 41.0, 25.0]);
        df.add_column_str("city", &["SF", "NY", "SF"]);
        df.add_column_temporal("joined", &["2014-01-01", "2015-06-01", "2016-02-10"]);
        df.add_column_ordered("tier", &["low", "mid", "high"]);
        df
    }

    #[test]
    fn test_numeric_is_quantitative() {
        assert_eq!(field_type(&sample(), "age").unwrap(), FieldType::Quantitative);
    }

    #[test]
    fn test_text_is_nominal() {
        assert_eq!(field_type(&sample(), "city").unwrap(), FieldType::Nominal);
    }

    #[test]
    fn test_temporal_is_temporal() {
        assert_eq!(field_type(&sample(), "joined").unwrap(), FieldType::Temporal);
    }

    #[test]
    fn test_ordered_is_ordinal() {
        assert_eq!(field_type(&sample(), "tier").unwrap(), FieldType::Ordinal);
    }

    #[test]
    fn test_missing_column_is_unresolvable() {
        let err = field_type(&sample(), "salary").unwrap_err();
        assert!(matches!(err, Error::UnresolvableType { .. }));
        assert!(err.to_string().contains("salary"));
    }
}
