//! Chart root aggregate and builder API.
//!
//! A [`Chart`] owns the dataset, the encoding, the configuration, and the
//! mark type, and orchestrates type re-inference whenever the dataset or
//! the encoding changes. Builder methods consume and return the chart so
//! calls chain; the fallible ones surface construction errors at the call
//! site instead of deferring them to serialization.

use serde_json::{json, Map, Value};

use crate::channel::{Band, Position};
use crate::config::ChartConfig;
use crate::data::DataFrame;
use crate::encoding::{ChannelValue, Encoding};
use crate::error::{Error, Result};
use crate::field::Bin;
use crate::render::{Artifact, RenderOptions, RendererRegistry};
use crate::shorthand::{Aggregate, FieldType};
use crate::spec::ToSpec;

/// Geometric primitive used to render each data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    /// Point symbol.
    #[default]
    Point,
    /// Short tick line.
    Tick,
    /// Bar from the baseline.
    Bar,
    /// Connected line.
    Line,
    /// Filled area.
    Area,
    /// Filled circle.
    Circle,
    /// Filled square.
    Square,
    /// Text label.
    Text,
}

impl Mark {
    /// Wire name of the mark.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::Point => "point",
            Mark::Tick => "tick",
            Mark::Bar => "bar",
            Mark::Line => "line",
            Mark::Area => "area",
            Mark::Circle => "circle",
            Mark::Square => "square",
            Mark::Text => "text",
        }
    }
}

/// A chart under construction: dataset, encoding, configuration, mark.
#[derive(Debug, Clone)]
pub struct Chart {
    data: DataFrame,
    /// Geometric primitive drawn per record.
    pub marktype: Mark,
    encoding: Option<Encoding>,
    config: ChartConfig,
}

impl Chart {
    /// Create a chart over a dataset.
    ///
    /// Anything convertible into a [`DataFrame`] is normalized on entry.
    pub fn new(data: impl Into<DataFrame>) -> Self {
        Self {
            data: data.into(),
            marktype: Mark::default(),
            encoding: None,
            config: ChartConfig::default(),
        }
    }

    /// The bound dataset.
    #[must_use]
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// The current encoding, when one has been attached.
    #[must_use]
    pub fn encoding(&self) -> Option<&Encoding> {
        self.encoding.as_ref()
    }

    /// Mutable access to the current encoding.
    #[must_use]
    pub fn encoding_mut(&mut self) -> Option<&mut Encoding> {
        self.encoding.as_mut()
    }

    /// The chart configuration.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the dataset and re-run type inference for the encoding.
    ///
    /// Channels that already carry a resolved type keep it; only channels
    /// still unresolved are inferred against the new dataset.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::UnresolvableType`] from inference.
    pub fn bind_data(mut self, data: impl Into<DataFrame>) -> Result<Self> {
        self.data = data.into();
        if let Some(encoding) = &mut self.encoding {
            encoding.infer_types(&self.data)?;
        }
        Ok(self)
    }

    /// Replace the encoding wholesale and infer types against the dataset.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::UnresolvableType`] from inference.
    pub fn encode(mut self, mut encoding: Encoding) -> Result<Self> {
        encoding.infer_types(&self.data)?;
        self.encoding = Some(encoding);
        Ok(self)
    }

    /// Replace the chart configuration wholesale.
    #[must_use]
    pub fn configure(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Re-run type inference for the current encoding against the dataset.
    ///
    /// Builder methods do this on their own; it only needs calling after
    /// direct mutation through [`Chart::encoding_mut`].
    ///
    /// # Errors
    ///
    /// Propagates [`Error::UnresolvableType`] from inference.
    pub fn infer_types(&mut self) -> Result<()> {
        if let Some(encoding) = &mut self.encoding {
            encoding.infer_types(&self.data)?;
        }
        Ok(())
    }

    /// Set the mark type.
    #[must_use]
    pub fn mark(mut self, marktype: Mark) -> Self {
        self.marktype = marktype;
        self
    }

    /// Use point marks.
    #[must_use]
    pub fn point(self) -> Self {
        self.mark(Mark::Point)
    }

    /// Use tick marks.
    #[must_use]
    pub fn tick(self) -> Self {
        self.mark(Mark::Tick)
    }

    /// Use bar marks.
    #[must_use]
    pub fn bar(self) -> Self {
        self.mark(Mark::Bar)
    }

    /// Use line marks.
    #[must_use]
    pub fn line(self) -> Self {
        self.mark(Mark::Line)
    }

    /// Use area marks.
    #[must_use]
    pub fn area(self) -> Self {
        self.mark(Mark::Area)
    }

    /// Use circle marks.
    #[must_use]
    pub fn circle(self) -> Self {
        self.mark(Mark::Circle)
    }

    /// Use square marks.
    #[must_use]
    pub fn square(self) -> Self {
        self.mark(Mark::Square)
    }

    /// Use text marks.
    #[must_use]
    pub fn text(self) -> Self {
        self.mark(Mark::Text)
    }

    /// Set the canvas dimensions and derive single-panel dimensions as
    /// three quarters of each.
    ///
    /// A nominal or ordinal positional channel additionally gets a band
    /// sized to a tenth of the matching canvas dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingChannel`] when no encoding is attached or
    /// the x or y channel is unbound.
    pub fn set_single_dims(mut self, width: u32, height: u32) -> Result<Self> {
        self.config.set_single_dims(width, height);

        let encoding = self.encoding.as_mut().ok_or(Error::MissingChannel("x"))?;
        let x = encoding.x.as_mut().ok_or(Error::MissingChannel("x"))?;
        if discrete(x) {
            x.band = Some(Band::new(width / 10));
        }
        let y = encoding.y.as_mut().ok_or(Error::MissingChannel("y"))?;
        if discrete(y) {
            y.band = Some(Band::new(height / 10));
        }
        Ok(self)
    }

    /// Configure a histogram over `x` with at most `bins` bins.
    ///
    /// Sets the mark to bar and replaces the encoding with one whose y
    /// channel counts records. When `x` is given as a bare shorthand
    /// string its field is binned with `maxbins = bins`; an explicitly
    /// constructed channel keeps whatever binning it already carries. The
    /// y field's name is set to the x column so backends resolve the count
    /// against a concrete column.
    ///
    /// Additional channels can be attached afterwards through
    /// [`Chart::encoding_mut`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShorthand`] for a malformed `x` and
    /// propagates [`Error::UnresolvableType`] from inference.
    pub fn hist(mut self, bins: u32, x: impl Into<ChannelValue<Position>>) -> Result<Self> {
        self.marktype = Mark::Bar;

        let (mut x, bare) = match x.into() {
            ChannelValue::Shorthand(shorthand) => (Position::from_shorthand(&shorthand)?, true),
            ChannelValue::Channel(channel) => (channel, false),
        };
        if bare {
            x.field.bin = Some(Bin::new(bins));
        }

        let y = Position::default()
            .name(&x.field.name)
            .field_type(FieldType::Quantitative)
            .aggregate(Aggregate::Count);

        let encoding = Encoding::new().x(x)?.y(y)?;
        self.encode(encoding)
    }

    /// Serialize and hand the chart to the registry's active renderer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RendererNotFound`] when no renderer has been
    /// selected, and propagates whatever the renderer reports.
    pub fn render(&self, registry: &RendererRegistry, options: &RenderOptions) -> Result<Artifact> {
        let renderer = registry
            .active()
            .ok_or_else(|| Error::RendererNotFound("no renderer selected".to_string()))?;
        renderer.render(self, options)
    }
}

fn discrete(position: &Position) -> bool {
    matches!(
        position.field.field_type,
        Some(FieldType::Nominal | FieldType::Ordinal)
    )
}

impl ToSpec for Chart {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        map.insert("marktype".to_string(), Value::from(self.marktype.as_str()));
        if let Some(encoding) = &self.encoding {
            map.insert("encoding".to_string(), encoding.to_spec());
        }
        map.insert(
            "data".to_string(),
            json!({ "formatType": "json", "values": self.data.records() }),
        );
        map.insert("config".to_string(), self.config.to_spec());
        Value::Object(map)
    }
}
