//! Aggregation of encoding channels.
//!
//! An [`Encoding`] holds the seven channel slots of a chart. Slots accept
//! either a bare shorthand string or an already constructed channel; bare
//! strings are normalized into the structured channel type the moment they
//! enter a slot, so everything downstream only ever sees resolved channels.

use serde_json::{Map, Value};

use crate::channel::{restrict_count, Color, Facet, Position, Shape, Size};
use crate::data::DataFrame;
use crate::error::Result;
use crate::spec::ToSpec;

/// Either a bare shorthand string or an already constructed channel.
///
/// The string form is transient input; it never survives entry into an
/// [`Encoding`].
#[derive(Debug, Clone)]
pub enum ChannelValue<C> {
    /// Unparsed shorthand.
    Shorthand(String),
    /// Fully constructed channel.
    Channel(C),
}

impl<C> From<&str> for ChannelValue<C> {
    fn from(shorthand: &str) -> Self {
        ChannelValue::Shorthand(shorthand.to_string())
    }
}

impl From<Position> for ChannelValue<Position> {
    fn from(channel: Position) -> Self {
        ChannelValue::Channel(channel)
    }
}

impl From<Facet> for ChannelValue<Facet> {
    fn from(channel: Facet) -> Self {
        ChannelValue::Channel(channel)
    }
}

impl From<Size> for ChannelValue<Size> {
    fn from(channel: Size) -> Self {
        ChannelValue::Channel(channel)
    }
}

impl From<Color> for ChannelValue<Color> {
    fn from(channel: Color) -> Self {
        ChannelValue::Channel(channel)
    }
}

impl From<Shape> for ChannelValue<Shape> {
    fn from(channel: Shape) -> Self {
        ChannelValue::Channel(channel)
    }
}

impl<C> ChannelValue<C> {
    /// Normalize into the structured channel, building from shorthand when
    /// necessary.
    pub(crate) fn resolve(self, build: impl FnOnce(&str) -> Result<C>) -> Result<C> {
        match self {
            ChannelValue::Shorthand(shorthand) => build(&shorthand),
            ChannelValue::Channel(channel) => Ok(channel),
        }
    }
}

/// The set of channel bindings for a chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoding {
    /// Horizontal position.
    pub x: Option<Position>,
    /// Vertical position.
    pub y: Option<Position>,
    /// Facet rows.
    pub row: Option<Facet>,
    /// Facet columns.
    pub col: Option<Facet>,
    /// Mark size.
    pub size: Option<Size>,
    /// Mark color.
    pub color: Option<Color>,
    /// Mark shape.
    pub shape: Option<Shape>,
}

impl Encoding {
    /// Create an empty encoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the x channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] when a bare string fails
    /// to parse.
    pub fn x(mut self, value: impl Into<ChannelValue<Position>>) -> Result<Self> {
        self.x = Some(value.into().resolve(Position::from_shorthand)?);
        Ok(self)
    }

    /// Bind the y channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] when a bare string fails
    /// to parse.
    pub fn y(mut self, value: impl Into<ChannelValue<Position>>) -> Result<Self> {
        self.y = Some(value.into().resolve(Position::from_shorthand)?);
        Ok(self)
    }

    /// Bind the row facet channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] when a bare string fails
    /// to parse, or [`crate::Error::InvalidChannelValue`] when the channel
    /// carries an aggregate other than `count`.
    pub fn row(mut self, value: impl Into<ChannelValue<Facet>>) -> Result<Self> {
        let facet = value.into().resolve(Facet::from_shorthand)?;
        restrict_count(&facet.field, "row")?;
        self.row = Some(facet);
        Ok(self)
    }

    /// Bind the col facet channel.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Encoding::row`].
    pub fn col(mut self, value: impl Into<ChannelValue<Facet>>) -> Result<Self> {
        let facet = value.into().resolve(Facet::from_shorthand)?;
        restrict_count(&facet.field, "col")?;
        self.col = Some(facet);
        Ok(self)
    }

    /// Bind the size channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] when a bare string fails
    /// to parse.
    pub fn size(mut self, value: impl Into<ChannelValue<Size>>) -> Result<Self> {
        self.size = Some(value.into().resolve(Size::from_shorthand)?);
        Ok(self)
    }

    /// Bind the color channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] when a bare string fails
    /// to parse.
    pub fn color(mut self, value: impl Into<ChannelValue<Color>>) -> Result<Self> {
        self.color = Some(value.into().resolve(Color::from_shorthand)?);
        Ok(self)
    }

    /// Bind the shape channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidShorthand`] when a bare string fails
    /// to parse, or [`crate::Error::InvalidChannelValue`] when the channel
    /// carries an aggregate other than `count`.
    pub fn shape(mut self, value: impl Into<ChannelValue<Shape>>) -> Result<Self> {
        let shape = value.into().resolve(Shape::from_shorthand)?;
        restrict_count(&shape.field, "shape")?;
        self.shape = Some(shape);
        Ok(self)
    }

    /// Resolve missing field types for every bound channel against `data`.
    ///
    /// Safe to call repeatedly: channels whose type is already known are
    /// left untouched, so re-running after a dataset swap only fills gaps.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::UnresolvableType`] from inference.
    pub fn infer_types(&mut self, data: &DataFrame) -> Result<()> {
        if let Some(x) = &mut self.x {
            x.field.resolve_type(data)?;
        }
        if let Some(y) = &mut self.y {
            y.field.resolve_type(data)?;
        }
        if let Some(row) = &mut self.row {
            row.field.resolve_type(data)?;
        }
        if let Some(col) = &mut self.col {
            col.field.resolve_type(data)?;
        }
        if let Some(size) = &mut self.size {
            size.field.resolve_type(data)?;
        }
        if let Some(color) = &mut self.color {
            color.field.resolve_type(data)?;
        }
        if let Some(shape) = &mut self.shape {
            shape.field.resolve_type(data)?;
        }
        Ok(())
    }
}

impl ToSpec for Encoding {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        if let Some(x) = &self.x {
            map.insert("x".to_string(), x.to_spec());
        }
        if let Some(y) = &self.y {
            map.insert("y".to_string(), y.to_spec());
        }
        if let Some(row) = &self.row {
            map.insert("row".to_string(), row.to_spec());
        }
        if let Some(col) = &self.col {
            map.insert("col".to_string(), col.to_spec());
        }
        if let Some(size) = &self.size {
            map.insert("size".to_string(), size.to_spec());
        }
        if let Some(color) = &self.color {
            map.insert("color".to_string(), color.to_spec());
        }
        if let Some(shape) = &self.shape {
            map.insert("shape".to_string(), shape.to_spec());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shorthand::{Aggregate, FieldType};

    fn sample() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column_f64("age", &[30.0, 41.0]);
        df.add_column_str("city", &["SF", "NY"]);
        df
    }

    #[test]
    fn test_bare_string_is_normalized() {
        let encoding = Encoding::new().x("avg(age)").unwrap();
        let x = encoding.x.unwrap();
        assert_eq!(x.field.name, "age");
        assert_eq!(x.field.aggregate, Some(Aggregate::Avg));
    }

    #[test]
    fn test_malformed_shorthand_fails_at_the_call_site() {
        assert!(Encoding::new().x("mode(age)").is_err());
    }

    #[test]
    fn test_constructed_channel_passes_through() {
        let x = Position::from_shorthand("age:Q").unwrap();
        let encoding = Encoding::new().x(x.clone()).unwrap();
        assert_eq!(encoding.x, Some(x));
    }

    #[test]
    fn test_infer_types_uses_column_dtypes() {
        let mut encoding = Encoding::new().x("age").unwrap().y("city").unwrap();
        encoding.infer_types(&sample()).unwrap();

        assert_eq!(
            encoding.x.as_ref().unwrap().field.field_type,
            Some(FieldType::Quantitative)
        );
        assert_eq!(
            encoding.y.as_ref().unwrap().field.field_type,
            Some(FieldType::Nominal)
        );
    }

    #[test]
    fn test_infer_types_is_a_no_op_when_resolved() {
        let mut encoding = Encoding::new().x("age").unwrap().y("city").unwrap();
        encoding.infer_types(&sample()).unwrap();
        let resolved = encoding.clone();

        encoding.infer_types(&sample()).unwrap();
        assert_eq!(encoding, resolved);

        // A different dataset cannot overwrite an already resolved channel.
        let mut other = DataFrame::new();
        other.add_column_str("age", &["thirty", "forty-one"]);
        encoding.infer_types(&other).unwrap();
        assert_eq!(encoding, resolved);
    }

    #[test]
    fn test_restricted_channels_reject_explicit_instances() {
        let mut facet = Facet::from_shorthand("city").unwrap();
        facet.field.aggregate = Some(Aggregate::Avg);
        assert!(Encoding::new().row(facet).is_err());

        let mut shape = Shape::from_shorthand("city").unwrap();
        shape.field.aggregate = Some(Aggregate::Sum);
        assert!(Encoding::new().shape(shape).is_err());
    }

    #[test]
    fn test_all_channels_serialize_under_their_slot_names() {
        let encoding = Encoding::new()
            .x("age")
            .unwrap()
            .y("city")
            .unwrap()
            .row("city")
            .unwrap()
            .col("city")
            .unwrap()
            .size("age")
            .unwrap()
            .color("city")
            .unwrap()
            .shape("city")
            .unwrap();

        let spec = encoding.to_spec();
        let map = spec.as_object().unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["x", "y", "row", "col", "size", "color", "shape"]);
    }

    #[test]
    fn test_empty_encoding_serializes_to_empty_map() {
        assert_eq!(Encoding::new().to_spec().as_object().unwrap().len(), 0);
    }
}
