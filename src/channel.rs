//! Channel subtypes and their styling options.
//!
//! Each visual encoding channel embeds a [`FieldSpec`] data binding and
//! adds the options that only make sense for that channel: positional
//! channels carry scale, axis, and band sizing; facet channels carry panel
//! layout; size, color, and shape carry their default constant values.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::field::FieldSpec;
use crate::shorthand::{Aggregate, FieldType};
use crate::spec::ToSpec;

/// Scale function family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    /// Linear mapping.
    Linear,
    /// Logarithmic mapping.
    Log,
    /// Power mapping.
    Pow,
    /// Square root mapping.
    Sqrt,
    /// Time-based mapping.
    Time,
    /// Discrete band mapping.
    Ordinal,
}

impl ScaleKind {
    /// Wire name of the family.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Log => "log",
            ScaleKind::Pow => "pow",
            ScaleKind::Sqrt => "sqrt",
            ScaleKind::Time => "time",
            ScaleKind::Ordinal => "ordinal",
        }
    }
}

/// Scale options for a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scale {
    /// Scale function family.
    pub kind: Option<ScaleKind>,
    /// Whether the domain must include zero.
    pub zero: Option<bool>,
}

impl Scale {
    /// Create an empty scale specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale family.
    #[must_use]
    pub fn kind(mut self, kind: ScaleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Force the domain to include zero.
    #[must_use]
    pub fn zero(mut self, zero: bool) -> Self {
        self.zero = Some(zero);
        self
    }
}

impl ToSpec for Scale {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        if let Some(kind) = self.kind {
            map.insert("type".to_string(), Value::from(kind.as_str()));
        }
        if let Some(zero) = self.zero {
            map.insert("zero".to_string(), Value::Bool(zero));
        }
        Value::Object(map)
    }
}

/// Axis styling options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Axis {
    /// Axis title override.
    pub title: Option<String>,
    /// Whether grid lines are drawn.
    pub grid: Option<bool>,
    /// Tick label format string.
    pub format: Option<String>,
}

impl Axis {
    /// Create an empty axis specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Toggle grid lines.
    #[must_use]
    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the tick label format.
    #[must_use]
    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

impl ToSpec for Axis {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        if let Some(title) = &self.title {
            map.insert("title".to_string(), Value::from(title.clone()));
        }
        if let Some(grid) = self.grid {
            map.insert("grid".to_string(), Value::Bool(grid));
        }
        if let Some(format) = &self.format {
            map.insert("format".to_string(), Value::from(format.clone()));
        }
        Value::Object(map)
    }
}

/// Band sizing for discrete positional scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Band size in pixels.
    pub size: u32,
}

impl Default for Band {
    fn default() -> Self {
        Self { size: 600 }
    }
}

impl Band {
    /// Create a band of the given size.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl ToSpec for Band {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        map.insert("size".to_string(), Value::from(self.size));
        Value::Object(map)
    }
}

/// Legend options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    /// Legend title override.
    pub title: Option<String>,
}

impl Legend {
    /// Create an empty legend specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the legend title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

impl ToSpec for Legend {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        if let Some(title) = &self.title {
            map.insert("title".to_string(), Value::from(title.clone()));
        }
        Value::Object(map)
    }
}

/// Point symbol used by the shape channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolShape {
    /// Filled circle.
    #[default]
    Circle,
    /// Filled square.
    Square,
    /// Cross (+).
    Cross,
    /// Diamond shape.
    Diamond,
    /// Upward triangle.
    TriangleUp,
    /// Downward triangle.
    TriangleDown,
}

impl SymbolShape {
    /// Wire name of the symbol.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolShape::Circle => "circle",
            SymbolShape::Square => "square",
            SymbolShape::Cross => "cross",
            SymbolShape::Diamond => "diamond",
            SymbolShape::TriangleUp => "triangle-up",
            SymbolShape::TriangleDown => "triangle-down",
        }
    }
}

/// Reject aggregates a restricted channel cannot carry.
pub(crate) fn restrict_count(field: &FieldSpec, channel: &'static str) -> Result<()> {
    match field.aggregate {
        None | Some(Aggregate::Count) => Ok(()),
        Some(other) => Err(Error::InvalidChannelValue {
            channel,
            reason: format!("aggregate {:?} is not allowed; only \"count\"", other.as_str()),
        }),
    }
}

/// Positional channel (x or y): a field binding plus axis styling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Position {
    /// Data binding.
    pub field: FieldSpec,
    /// Scale options.
    pub scale: Option<Scale>,
    /// Axis styling.
    pub axis: Option<Axis>,
    /// Band sizing for discrete scales.
    pub band: Option<Band>,
}

impl Position {
    /// Construct from a shorthand string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShorthand`] for malformed input.
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        Ok(Self {
            field: FieldSpec::from_shorthand(shorthand)?,
            ..Self::default()
        })
    }

    /// Set the column name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.field.name = name.to_string();
        self
    }

    /// Set the semantic type explicitly.
    #[must_use]
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field.field_type = Some(field_type);
        self
    }

    /// Set the aggregation function.
    #[must_use]
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.field.aggregate = Some(aggregate);
        self
    }

    /// Set scale options.
    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set axis styling.
    #[must_use]
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Set band sizing.
    #[must_use]
    pub fn band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }
}

impl ToSpec for Position {
    fn to_spec(&self) -> Value {
        let mut map = self.field.entries();
        if let Some(scale) = &self.scale {
            map.insert("scale".to_string(), scale.to_spec());
        }
        if let Some(axis) = &self.axis {
            map.insert("axis".to_string(), axis.to_spec());
        }
        if let Some(band) = &self.band {
            map.insert("band".to_string(), band.to_spec());
        }
        Value::Object(map)
    }
}

/// Facet channel (row or col): splits the chart into panels.
///
/// Only the `count` aggregate is meaningful for a facet dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    /// Data binding.
    pub field: FieldSpec,
    /// Space between panels, as a fraction of panel size.
    pub padding: f64,
    /// Axis styling for the facet header.
    pub axis: Option<Axis>,
    /// Panel height in pixels.
    pub height: u32,
}

impl Default for Facet {
    fn default() -> Self {
        Self {
            field: FieldSpec::default(),
            padding: 0.1,
            axis: None,
            height: 150,
        }
    }
}

impl Facet {
    /// Construct from a shorthand string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShorthand`] for malformed input and
    /// [`Error::InvalidChannelValue`] for an aggregate other than `count`.
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        let field = FieldSpec::from_shorthand(shorthand)?;
        restrict_count(&field, "facet")?;
        Ok(Self {
            field,
            ..Self::default()
        })
    }

    /// Set the inter-panel padding.
    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set axis styling.
    #[must_use]
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Set the panel height.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
}

impl ToSpec for Facet {
    fn to_spec(&self) -> Value {
        let mut map = self.field.entries();
        map.insert("padding".to_string(), Value::from(self.padding));
        if let Some(axis) = &self.axis {
            map.insert("axis".to_string(), axis.to_spec());
        }
        map.insert("height".to_string(), Value::from(self.height));
        Value::Object(map)
    }
}

/// Size channel: maps a field or constant to mark size.
#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    /// Data binding.
    pub field: FieldSpec,
    /// Scale options.
    pub scale: Option<Scale>,
    /// Legend options.
    pub legend: Option<Legend>,
    /// Constant size when no field drives the channel.
    pub value: u32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            field: FieldSpec::default(),
            scale: None,
            legend: None,
            value: 30,
        }
    }
}

impl Size {
    /// Construct from a shorthand string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShorthand`] for malformed input.
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        Ok(Self {
            field: FieldSpec::from_shorthand(shorthand)?,
            ..Self::default()
        })
    }

    /// Set scale options.
    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set legend options.
    #[must_use]
    pub fn legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Set the constant size.
    #[must_use]
    pub fn value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }
}

impl ToSpec for Size {
    fn to_spec(&self) -> Value {
        let mut map = self.field.entries();
        if let Some(scale) = &self.scale {
            map.insert("scale".to_string(), scale.to_spec());
        }
        if let Some(legend) = &self.legend {
            map.insert("legend".to_string(), legend.to_spec());
        }
        map.insert("value".to_string(), Value::from(self.value));
        Value::Object(map)
    }
}

/// Color channel: maps a field or constant to mark color.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    /// Data binding.
    pub field: FieldSpec,
    /// Constant color when no field drives the channel.
    pub value: String,
    /// Scale options.
    pub scale: Option<Scale>,
    /// Legend options.
    pub legend: Option<Legend>,
    /// Mark opacity.
    pub opacity: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            field: FieldSpec::default(),
            value: "#4682b4".to_string(),
            scale: None,
            legend: None,
            opacity: 1.0,
        }
    }
}

impl Color {
    /// Construct from a shorthand string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShorthand`] for malformed input.
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        Ok(Self {
            field: FieldSpec::from_shorthand(shorthand)?,
            ..Self::default()
        })
    }

    /// Set the constant color.
    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Set scale options.
    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set legend options.
    #[must_use]
    pub fn legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Set the mark opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl ToSpec for Color {
    fn to_spec(&self) -> Value {
        let mut map = self.field.entries();
        if !self.value.is_empty() {
            map.insert("value".to_string(), Value::from(self.value.clone()));
        }
        if let Some(scale) = &self.scale {
            map.insert("scale".to_string(), scale.to_spec());
        }
        if let Some(legend) = &self.legend {
            map.insert("legend".to_string(), legend.to_spec());
        }
        map.insert("opacity".to_string(), Value::from(self.opacity));
        Value::Object(map)
    }
}

/// Shape channel: maps a field or constant symbol to mark shape.
///
/// Only the `count` aggregate is meaningful here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    /// Data binding.
    pub field: FieldSpec,
    /// Constant symbol when no field drives the channel.
    pub value: SymbolShape,
    /// Legend options.
    pub legend: Option<Legend>,
    /// Whether symbols are filled rather than stroked.
    pub filled: bool,
}

impl Shape {
    /// Construct from a shorthand string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShorthand`] for malformed input and
    /// [`Error::InvalidChannelValue`] for an aggregate other than `count`.
    pub fn from_shorthand(shorthand: &str) -> Result<Self> {
        let field = FieldSpec::from_shorthand(shorthand)?;
        restrict_count(&field, "shape")?;
        Ok(Self {
            field,
            ..Self::default()
        })
    }

    /// Set the constant symbol.
    #[must_use]
    pub fn value(mut self, value: SymbolShape) -> Self {
        self.value = value;
        self
    }

    /// Set legend options.
    #[must_use]
    pub fn legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Fill symbols rather than stroking them.
    #[must_use]
    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }
}

impl ToSpec for Shape {
    fn to_spec(&self) -> Value {
        let mut map = self.field.entries();
        map.insert("value".to_string(), Value::from(self.value.as_str()));
        if let Some(legend) = &self.legend {
            map.insert("legend".to_string(), legend.to_spec());
        }
        map.insert("filled".to_string(), Value::Bool(self.filled));
        Value::Object(map)
    }
}
