//! Columnar dataset abstraction.
//!
//! Provides the minimal tabular interface the chart core needs: named
//! columns in insertion order, per-column values, and a dtype
//! classification driving type inference. The core only ever reads a
//! [`DataFrame`]; it never mutates one.

use serde_json::{Map, Number, Value};

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A boolean value.
    Bool(bool),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Convert into a JSON value for the serialized `data.values` block.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            DataValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            DataValue::Text(s) => Value::String(s.clone()),
            DataValue::Bool(b) => Value::Bool(*b),
            DataValue::Null => Value::Null,
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

/// Dtype classification of a column.
///
/// This is the dataset-side fact that drives semantic type inference; the
/// chart-side counterpart is [`crate::shorthand::FieldType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    /// Integer or floating point values.
    Numeric,
    /// Date or timestamp values, carried as ISO-8601 text.
    Temporal,
    /// Categorical values with a meaningful order.
    Ordered,
    /// Free text or unordered categorical values.
    Text,
}

/// One named column: a value sequence plus its dtype.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: Dtype,
    values: Vec<DataValue>,
}

impl Column {
    /// Create a column.
    #[must_use]
    pub fn new(name: &str, dtype: Dtype, values: Vec<DataValue>) -> Self {
        Self {
            name: name.to_string(),
            dtype,
            values,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dtype classification.
    #[must_use]
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// Column values.
    #[must_use]
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }
}

/// A simple columnar data frame with insertion-ordered columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from x and y arrays.
    #[must_use]
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        let mut df = Self::new();
        df.add_column_f64("x", &x[..n]);
        df.add_column_f64("y", &y[..n]);
        df
    }

    /// Add a column, replacing any existing column of the same name in place.
    pub fn add_column(&mut self, name: &str, dtype: Dtype, values: Vec<DataValue>) {
        self.n_rows = self.n_rows.max(values.len());
        let column = Column::new(name, dtype, values);
        if let Some(slot) = self.columns.iter_mut().find(|c| c.name == name) {
            *slot = column;
        } else {
            self.columns.push(column);
        }
    }

    /// Add a numeric column.
    pub fn add_column_f64(&mut self, name: &str, data: &[f64]) {
        let values = data.iter().map(|&v| DataValue::Number(v)).collect();
        self.add_column(name, Dtype::Numeric, values);
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) {
        let values = data.iter().map(|&s| DataValue::Text(s.to_string())).collect();
        self.add_column(name, Dtype::Text, values);
    }

    /// Add a temporal column of ISO-8601 strings.
    pub fn add_column_temporal(&mut self, name: &str, data: &[&str]) {
        let values = data.iter().map(|&s| DataValue::Text(s.to_string())).collect();
        self.add_column(name, Dtype::Temporal, values);
    }

    /// Add an ordered categorical column.
    pub fn add_column_ordered(&mut self, name: &str, data: &[&str]) {
        let values = data.iter().map(|&s| DataValue::Text(s.to_string())).collect();
        self.add_column(name, Dtype::Ordered, values);
    }

    /// Get a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Dtype of a column, if present.
    #[must_use]
    pub fn dtype(&self, name: &str) -> Option<Dtype> {
        self.column(name).map(Column::dtype)
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Rows as ordered name-to-value records.
    ///
    /// Short columns are padded with nulls so every record carries every
    /// column key.
    #[must_use]
    pub fn records(&self) -> Vec<Map<String, Value>> {
        (0..self.n_rows)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| {
                        let value = c.values.get(row).map_or(Value::Null, DataValue::to_json);
                        (c.name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

impl From<Vec<Column>> for DataFrame {
    fn from(columns: Vec<Column>) -> Self {
        let mut df = Self::new();
        for Column { name, dtype, values } in columns {
            df.add_column(&name, dtype, values);
        }
        df
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataframe_from_xy() {
        let df = DataFrame::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert_eq!(df.nrow(), 3);
        assert_eq!(df.ncol(), 2);
        assert!(df.has_column("x"));
        assert!(df.has_column("y"));
    }

    #[test]
    fn test_dataframe_from_xy_unequal() {
        // Different length arrays - should take minimum
        let df = DataFrame::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(df.nrow(), 2);
    }

    #[test]
    fn test_dtypes_by_constructor() {
        let mut df = DataFrame::new();
        df.add_column_f64("age", &[30.0, 41.0]);
        df.add_column_str("city", &["SF", "NY"]);
        df.add_column_temporal("joined", &["2014-01-01", "2015-06-01"]);
        df.add_column_ordered("tier", &["low", "high"]);

        assert_eq!(df.dtype("age"), Some(Dtype::Numeric));
        assert_eq!(df.dtype("city"), Some(Dtype::Text));
        assert_eq!(df.dtype("joined"), Some(Dtype::Temporal));
        assert_eq!(df.dtype("tier"), Some(Dtype::Ordered));
        assert_eq!(df.dtype("missing"), None);
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let mut df = DataFrame::new();
        df.add_column_f64("b", &[1.0]);
        df.add_column_f64("a", &[2.0]);
        df.add_column_f64("c", &[3.0]);
        assert_eq!(df.columns(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_replacing_column_keeps_position() {
        let mut df = DataFrame::new();
        df.add_column_f64("a", &[1.0]);
        df.add_column_str("b", &["x"]);
        df.add_column_str("a", &["now text"]);
        assert_eq!(df.columns(), vec!["a", "b"]);
        assert_eq!(df.dtype("a"), Some(Dtype::Text));
    }

    #[test]
    fn test_records_are_ordered_and_padded() {
        let mut df = DataFrame::new();
        df.add_column_f64("x", &[1.0, 2.0]);
        df.add_column_str("label", &["one"]);

        let records = df.records();
        assert_eq!(records.len(), 2);
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, vec!["x", "label"]);
        assert_eq!(records[1]["label"], Value::Null);
        assert_eq!(records[1]["x"], Value::from(2.0));
    }

    #[test]
    fn test_data_value_conversions() {
        let num: DataValue = 42.0f64.into();
        assert_eq!(num.as_f64(), Some(42.0));

        let text: DataValue = "hello".into();
        assert_eq!(text.as_str(), Some("hello"));

        let flag: DataValue = true.into();
        assert_eq!(flag.to_json(), Value::Bool(true));
    }

    #[test]
    fn test_data_value_null() {
        let null = DataValue::Null;
        assert_eq!(null.as_f64(), None);
        assert_eq!(null.as_str(), None);
        assert_eq!(null.to_json(), Value::Null);
    }

    #[test]
    fn test_non_finite_number_serializes_as_null() {
        let nan = DataValue::Number(f64::NAN);
        assert_eq!(nan.to_json(), Value::Null);
    }

    #[test]
    fn test_dataframe_from_columns() {
        let df: DataFrame = vec![
            Column::new("x", Dtype::Numeric, vec![1.0.into(), 2.0.into()]),
            Column::new("city", Dtype::Text, vec!["SF".into()]),
        ]
        .into();
        assert_eq!(df.ncol(), 2);
        assert_eq!(df.nrow(), 2);
    }

    #[test]
    fn test_dataframe_empty() {
        let df = DataFrame::new();
        assert_eq!(df.nrow(), 0);
        assert_eq!(df.ncol(), 0);
        assert!(!df.has_column("anything"));
        assert!(df.records().is_empty());
    }
}
