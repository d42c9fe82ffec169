//! Field descriptors shared by every encoding channel.
//!
//! A [`FieldSpec`] names the column a channel draws from and everything
//! derived from it: semantic type, aggregation, time unit, binning, and
//! sort order. Construction from shorthand applies every component the
//! shorthand encodes; the dataset fills in a missing type later through
//! [`FieldSpec::resolve_type`].

use serde_json::{Map, Value};

use crate::data::DataFrame;
use crate::error::Result;
use crate::infer;
use crate::shorthand::{self, Aggregate, FieldType, TimeUnit};
use crate::spec::ToSpec;

/// Binning directive for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    /// Upper bound on the number of generated bins.
    pub maxbins: u32,
}

impl Bin {
    /// Create a binning directive with the given bin cap.
    #[must_use]
    pub fn new(maxbins: u32) -> Self {
        Self { maxbins }
    }
}

impl ToSpec for Bin {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        map.insert("maxbins".to_string(), Value::from(self.maxbins));
        Value::Object(map)
    }
}

/// One entry of a field's sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortItem {
    /// Column the ordering is taken from.
    pub name: String,
    /// Aggregation applied before comparison.
    pub aggregate: Option<Aggregate>,
    /// Descending order when set.
    pub reverse: bool,
}

impl SortItem {
    /// Sort ascending by a column.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aggregate: None,
            reverse: false,
        }
    }

    /// Aggregate the column before comparing.
    #[must_use]
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// Sort descending.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

impl ToSpec for SortItem {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        if !self.name.is_empty() {
            map.insert("name".to_string(), Value::from(self.name.clone()));
        }
        if let Some(aggregate) = self.aggregate {
            map.insert("aggregate".to_string(), Value::from(aggregate.as_str()));
        }
        map.insert("reverse".to_string(), Value::Bool(self.reverse));
        Value::Object(map)
    }
}

/// Resolved descriptor of one channel's data binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSpec {
    shorthand: String,
    /// Column reference; empty means "no specific column".
    pub name: String,
    /// Semantic type, set explicitly or inferred from the dataset.
    pub field_type: Option<FieldType>,
    /// Calendar truncation for temporal fields.
    pub time_unit: Option<TimeUnit>,
    /// Binning directive; `None` leaves the field unbinned.
    pub bin: Option<Bin>,
    /// Sort order; empty means unspecified.
    pub sort: Vec<SortItem>,
    /// Aggregation applied to the field.
    pub aggregate: Option<Aggregate>,
}

impl FieldSpec {
    /// Construct from a shorthand string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] for malformed input;
    /// nothing is constructed in that case.
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        let mut field = Self::default();
        field.set_shorthand(shorthand)?;
        Ok(field)
    }

    /// Re-parse and apply a new shorthand.
    ///
    /// Components present in the shorthand overwrite the current values;
    /// components it does not mention keep their prior explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] for malformed input; the
    /// field is left untouched in that case.
    pub fn set_shorthand(&mut self, shorthand: &str) -> Result<()> {
        let parsed = shorthand::parse(shorthand)?;
        self.shorthand = shorthand.to_string();
        if let Some(name) = parsed.name {
            self.name = name;
        }
        if let Some(field_type) = parsed.field_type {
            self.field_type = Some(field_type);
        }
        if let Some(aggregate) = parsed.aggregate {
            self.aggregate = Some(aggregate);
        }
        if let Some(time_unit) = parsed.time_unit {
            self.time_unit = Some(time_unit);
        }
        Ok(())
    }

    /// Raw shorthand this field was last configured from.
    ///
    /// Transient input; never serialized.
    #[must_use]
    pub fn shorthand(&self) -> &str {
        &self.shorthand
    }

    /// Fill in the semantic type from the dataset when it is still unset.
    ///
    /// Idempotent: a field whose type is already known is left untouched.
    /// A field whose name is empty or not (yet) a column of `data` is left
    /// unresolved so a later dataset binding can resolve it.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::UnresolvableType`] from inference.
    pub fn resolve_type(&mut self, data: &DataFrame) -> Result<()> {
        if self.field_type.is_some() || self.name.is_empty() || !data.has_column(&self.name) {
            return Ok(());
        }
        self.field_type = Some(infer::field_type(data, &self.name)?);
        Ok(())
    }

    /// Whether the semantic type has been determined.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.field_type.is_some()
    }

    /// Serialized attributes as an ordered map, for channel types to extend.
    pub(crate) fn entries(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if !self.name.is_empty() {
            map.insert("name".to_string(), Value::from(self.name.clone()));
        }
        if let Some(field_type) = self.field_type {
            map.insert("type".to_string(), Value::from(field_type.code()));
        }
        if let Some(time_unit) = self.time_unit {
            map.insert("timeUnit".to_string(), Value::from(time_unit.as_str()));
        }
        if let Some(bin) = &self.bin {
            map.insert("bin".to_string(), bin.to_spec());
        }
        if !self.sort.is_empty() {
            let items = self.sort.iter().map(ToSpec::to_spec).collect();
            map.insert("sort".to_string(), Value::Array(items));
        }
        if let Some(aggregate) = self.aggregate {
            map.insert("aggregate".to_string(), Value::from(aggregate.as_str()));
        }
        map
    }
}

impl ToSpec for FieldSpec {
    fn to_spec(&self) -> Value {
        Value::Object(self.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_shorthand_applies_all_components() {
        let field = FieldSpec::from_shorthand("avg(price):Q").unwrap();
        assert_eq!(field.name, "price");
        assert_eq!(field.field_type, Some(FieldType::Quantitative));
        assert_eq!(field.aggregate, Some(Aggregate::Avg));
        assert_eq!(field.shorthand(), "avg(price):Q");
    }

    #[test]
    fn test_from_shorthand_rejects_malformed_input() {
        assert!(FieldSpec::from_shorthand("mode(price)").is_err());
        assert!(FieldSpec::from_shorthand("price:Z").is_err());
    }

    #[test]
    fn test_set_shorthand_keeps_unmentioned_components() {
        let mut field = FieldSpec::from_shorthand("avg(price):Q").unwrap();
        field.set_shorthand("qty").unwrap();

        // Only the name was encoded by the new shorthand.
        assert_eq!(field.name, "qty");
        assert_eq!(field.field_type, Some(FieldType::Quantitative));
        assert_eq!(field.aggregate, Some(Aggregate::Avg));
    }

    #[test]
    fn test_set_shorthand_overwrites_encoded_components() {
        let mut field = FieldSpec::from_shorthand("avg(price)").unwrap();
        field.set_shorthand("sum(qty:O)").unwrap();
        assert_eq!(field.name, "qty");
        assert_eq!(field.field_type, Some(FieldType::Ordinal));
        assert_eq!(field.aggregate, Some(Aggregate::Sum));
    }

    #[test]
    fn test_resolve_type_from_dataset() {
        let mut df = DataFrame::new();
        df.add_column_f64("price", &[1.0, 2.0]);

        let mut field = FieldSpec::from_shorthand("price").unwrap();
        assert!(!field.is_resolved());
        field.resolve_type(&df).unwrap();
        assert_eq!(field.field_type, Some(FieldType::Quantitative));
    }

    #[test]
    fn test_resolve_type_is_idempotent() {
        let mut df = DataFrame::new();
        df.add_column_str("city", &["SF"]);

        let mut field = FieldSpec::from_shorthand("city").unwrap();
        field.resolve_type(&df).unwrap();
        let resolved = field.clone();
        field.resolve_type(&df).unwrap();
        assert_eq!(field, resolved);
    }

    #[test]
    fn test_resolve_type_keeps_explicit_type() {
        let mut df = DataFrame::new();
        df.add_column_f64("tier", &[1.0, 2.0]);

        let mut field = FieldSpec::from_shorthand("tier:O").unwrap();
        field.resolve_type(&df).unwrap();
        assert_eq!(field.field_type, Some(FieldType::Ordinal));
    }

    #[test]
    fn test_resolve_type_skips_unknown_and_empty_names() {
        let df = DataFrame::new();

        let mut field = FieldSpec::from_shorthand("absent").unwrap();
        field.resolve_type(&df).unwrap();
        assert!(!field.is_resolved());

        let mut field = FieldSpec::from_shorthand("count()").unwrap();
        field.resolve_type(&df).unwrap();
        assert!(!field.is_resolved());
    }

    #[test]
    fn test_to_spec_round_trip() {
        let field = FieldSpec::from_shorthand("avg(price):Q").unwrap();
        let spec = field.to_spec();
        assert_eq!(spec["name"], "price");
        assert_eq!(spec["type"], "Q");
        assert_eq!(spec["aggregate"], "avg");
    }

    #[test]
    fn test_to_spec_omits_absent_attributes() {
        let field = FieldSpec::from_shorthand("price").unwrap();
        let spec = field.to_spec();
        let map = spec.as_object().unwrap();
        assert!(!map.contains_key("aggregate"));
        assert!(!map.contains_key("bin"));
        assert!(!map.contains_key("timeUnit"));
        assert!(!map.contains_key("sort"));
    }

    #[test]
    fn test_to_spec_omits_empty_name() {
        let field = FieldSpec::from_shorthand("count()").unwrap();
        let spec = field.to_spec();
        assert!(!spec.as_object().unwrap().contains_key("name"));
        assert_eq!(spec["aggregate"], "count");
    }

    #[test]
    fn test_to_spec_bin_and_time_unit() {
        let mut field = FieldSpec::from_shorthand("joined:year").unwrap();
        field.bin = Some(Bin::new(12));
        let spec = field.to_spec();
        assert_eq!(spec["timeUnit"], "year");
        assert_eq!(spec["bin"], json!({ "maxbins": 12 }));
    }

    #[test]
    fn test_sort_item_spec_always_carries_reverse() {
        let ascending = SortItem::new("price");
        assert_eq!(ascending.to_spec()["reverse"], json!(false));

        let descending = SortItem::new("price")
            .aggregate(Aggregate::Avg)
            .reverse(true);
        let spec = descending.to_spec();
        assert_eq!(spec["name"], "price");
        assert_eq!(spec["aggregate"], "avg");
        assert_eq!(spec["reverse"], json!(true));
    }

    #[test]
    fn test_sorted_field_serializes_items_in_order() {
        let mut field = FieldSpec::from_shorthand("city").unwrap();
        field.sort = vec![
            SortItem::new("price").aggregate(Aggregate::Avg),
            SortItem::new("qty").reverse(true),
        ];
        let spec = field.to_spec();
        let items = spec["sort"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "price");
        assert_eq!(items[1]["reverse"], json!(true));
    }
}
