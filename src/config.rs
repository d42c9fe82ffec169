//! Global chart rendering options.
//!
//! Canvas dimensions and grid styling shared by every panel of a chart,
//! plus the derived single-panel sizing used for faceted layouts.

use serde_json::{Map, Value};

use crate::spec::ToSpec;

/// Canvas and grid options for a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Full canvas width in pixels.
    pub width: u32,
    /// Full canvas height in pixels.
    pub height: u32,
    /// Width of a single facet panel, when derived.
    pub single_width: Option<u32>,
    /// Height of a single facet panel, when derived.
    pub single_height: Option<u32>,
    /// Grid line color.
    pub grid_color: String,
    /// Grid line opacity.
    pub grid_opacity: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            single_width: None,
            single_height: None,
            grid_color: "black".to_string(),
            grid_opacity: 0.08,
        }
    }
}

impl ChartConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas width.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the canvas height.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the grid line color.
    #[must_use]
    pub fn grid_color(mut self, color: &str) -> Self {
        self.grid_color = color.to_string();
        self
    }

    /// Set the grid line opacity.
    #[must_use]
    pub fn grid_opacity(mut self, opacity: f64) -> Self {
        self.grid_opacity = opacity;
        self
    }

    /// Set the canvas dimensions and derive single-panel dimensions as
    /// three quarters of each, truncated.
    pub fn set_single_dims(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.single_width = Some(width * 3 / 4);
        self.single_height = Some(height * 3 / 4);
    }
}

impl ToSpec for ChartConfig {
    fn to_spec(&self) -> Value {
        let mut map = Map::new();
        map.insert("width".to_string(), Value::from(self.width));
        map.insert("height".to_string(), Value::from(self.height));
        if let Some(single_width) = self.single_width {
            map.insert("singleWidth".to_string(), Value::from(single_width));
        }
        if let Some(single_height) = self.single_height {
            map.insert("singleHeight".to_string(), Value::from(single_height));
        }
        if !self.grid_color.is_empty() {
            map.insert("gridColor".to_string(), Value::from(self.grid_color.clone()));
        }
        map.insert("gridOpacity".to_string(), Value::from(self.grid_opacity));
        Value::Object(map)
    }
}
