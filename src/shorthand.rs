//! Shorthand grammar for field references.
//!
//! A channel binding can be written compactly as `aggregate(column:suffix)`
//! where every part except the column name is optional:
//!
//! ```text
//! price           column reference
//! price:Q         explicit semantic type (N, O, Q, T)
//! joined:year     time unit instead of a type code
//! avg(price)      aggregated column
//! avg(price:Q)    aggregated and explicitly typed
//! count()         aggregate over all rows, no specific column
//! ```
//!
//! # Example
//!
//! ```rust
//! use vizspec::shorthand::{parse, Aggregate, FieldType};
//!
//! let parsed = parse("avg(price):Q").unwrap();
//! assert_eq!(parsed.name.as_deref(), Some("price"));
//! assert_eq!(parsed.aggregate, Some(Aggregate::Avg));
//! assert_eq!(parsed.field_type, Some(FieldType::Quantitative));
//! ```

use crate::error::{Error, Result};

/// Semantic type code of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Unordered categories.
    Nominal,
    /// Ordered categories.
    Ordinal,
    /// Continuous numeric values.
    Quantitative,
    /// Dates and times.
    Temporal,
}

impl FieldType {
    /// Single-letter wire code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            FieldType::Nominal => "N",
            FieldType::Ordinal => "O",
            FieldType::Quantitative => "Q",
            FieldType::Temporal => "T",
        }
    }

    /// Parse a single-letter wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(FieldType::Nominal),
            "O" => Some(FieldType::Ordinal),
            "Q" => Some(FieldType::Quantitative),
            "T" => Some(FieldType::Temporal),
            _ => None,
        }
    }
}

/// Aggregation function applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// Arithmetic mean.
    Avg,
    /// Sum.
    Sum,
    /// Median.
    Median,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Record count.
    Count,
}

impl Aggregate {
    /// Wire name of the function.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregate::Avg => "avg",
            Aggregate::Sum => "sum",
            Aggregate::Median => "median",
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Count => "count",
        }
    }

    /// Parse a function name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "avg" => Some(Aggregate::Avg),
            "sum" => Some(Aggregate::Sum),
            "median" => Some(Aggregate::Median),
            "min" => Some(Aggregate::Min),
            "max" => Some(Aggregate::Max),
            "count" => Some(Aggregate::Count),
            _ => None,
        }
    }
}

/// Calendar unit a temporal field is truncated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Calendar year.
    Year,
    /// Month of year.
    Month,
    /// Day of week.
    Day,
    /// Day of month.
    Date,
    /// Hour of day.
    Hours,
    /// Minute of hour.
    Minutes,
    /// Second of minute.
    Seconds,
}

impl TimeUnit {
    /// Wire name of the unit.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Date => "date",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }

    /// Parse a unit name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "year" => Some(TimeUnit::Year),
            "month" => Some(TimeUnit::Month),
            "day" => Some(TimeUnit::Day),
            "date" => Some(TimeUnit::Date),
            "hours" => Some(TimeUnit::Hours),
            "minutes" => Some(TimeUnit::Minutes),
            "seconds" => Some(TimeUnit::Seconds),
            _ => None,
        }
    }
}

/// Structured result of parsing a shorthand string.
///
/// Absent components are `None`. Callers apply only the present keys;
/// omission never means "clear the attribute".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shorthand {
    /// Column reference.
    pub name: Option<String>,
    /// Explicit semantic type.
    pub field_type: Option<FieldType>,
    /// Aggregation wrapper.
    pub aggregate: Option<Aggregate>,
    /// Time unit suffix.
    pub time_unit: Option<TimeUnit>,
}

fn invalid(shorthand: &str, reason: String) -> Error {
    Error::InvalidShorthand {
        shorthand: shorthand.to_string(),
        reason,
    }
}

/// Parse a shorthand string into its components.
///
/// Tolerant of missing parts: a bare column name yields only `name`, an
/// empty string yields nothing. Malformed input is rejected, never coerced.
///
/// # Errors
///
/// Returns [`Error::InvalidShorthand`] for an unknown aggregate function,
/// an unrecognized `:` suffix, or unbalanced parentheses.
pub fn parse(shorthand: &str) -> Result<Shorthand> {
    let input = shorthand.trim();
    let mut out = Shorthand::default();

    let field = match input.split_once('(') {
        Some((func, rest)) => {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| invalid(shorthand, "unbalanced parentheses".to_string()))?;
            let func = func.trim();
            let aggregate = Aggregate::from_name(func)
                .ok_or_else(|| invalid(shorthand, format!("unknown aggregate function {func:?}")))?;
            out.aggregate = Some(aggregate);
            inner.trim()
        }
        None if input.contains(')') => {
            return Err(invalid(shorthand, "unbalanced parentheses".to_string()));
        }
        None => input,
    };

    if field.is_empty() {
        return Ok(out);
    }
    if field.contains('(') || field.contains(')') {
        return Err(invalid(shorthand, "unbalanced parentheses".to_string()));
    }

    match field.split_once(':') {
        Some((name, suffix)) => {
            let suffix = suffix.trim();
            if let Some(field_type) = FieldType::from_code(suffix) {
                out.field_type = Some(field_type);
            } else if let Some(unit) = TimeUnit::from_name(suffix) {
                out.time_unit = Some(unit);
            } else {
                return Err(invalid(
                    shorthand,
                    format!("unrecognized type code or time unit {suffix:?}"),
                ));
            }
            out.name = Some(name.trim().to_string());
        }
        None => out.name = Some(field.to_string()),
    }

    Ok(out)
}
