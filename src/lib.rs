//! # Vizspec
//!
//! Declarative chart specification builder.
//!
//! A chart is described by binding dataset columns to visual encoding
//! channels using a compact shorthand grammar (`"avg(price):Q"`), letting
//! the bound dataset fill in any semantic types the shorthand left out, and
//! serializing the fully resolved object graph into a nested Vega-style
//! specification mapping for consumption by a rendering backend.
//!
//! Rendering itself lives behind the [`render::Renderer`] capability; this
//! crate produces and hands over specs, it never rasterizes.
//!
//! ## Quick Start
//!
//! ```rust
//! use vizspec::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut data = DataFrame::new();
//! data.add_column_f64("price", &[1.0, 4.0, 9.0]);
//! data.add_column_str("city", &["SF", "NY", "SF"]);
//!
//! // "city" has a text dtype, so its type resolves to nominal; the
//! // aggregated "price" column is numeric, so it resolves to quantitative.
//! let chart = Chart::new(data)
//!     .bar()
//!     .encode(Encoding::new().x("city")?.y("avg(price)")?)?;
//!
//! let spec = chart.to_spec();
//! assert_eq!(spec["marktype"], "bar");
//! assert_eq!(spec["encoding"]["y"]["aggregate"], "avg");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]

// ============================================================================
// Core Modules
// ============================================================================

/// Columnar dataset abstraction.
pub mod data;

/// Shorthand grammar for field references.
pub mod shorthand;

/// Semantic type inference from column dtypes.
pub mod infer;

// ============================================================================
// Specification Modules
// ============================================================================

/// Field descriptors shared by every encoding channel.
pub mod field;

/// Channel subtypes and their styling options.
pub mod channel;

/// Aggregation of encoding channels.
pub mod encoding;

/// Global chart rendering options.
pub mod config;

/// Chart root aggregate and builder API.
pub mod chart;

// ============================================================================
// Output Modules
// ============================================================================

/// Serialization contract for spec entities.
pub mod spec;

/// Renderer capability and registry.
pub mod render;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for vizspec operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use vizspec::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{
        Axis, Band, Color, Facet, Legend, Position, Scale, ScaleKind, Shape, Size, SymbolShape,
    };
    pub use crate::chart::{Chart, Mark};
    pub use crate::config::ChartConfig;
    pub use crate::data::{Column, DataFrame, DataValue, Dtype};
    pub use crate::encoding::{ChannelValue, Encoding};
    pub use crate::error::{Error, Result};
    pub use crate::field::{Bin, FieldSpec, SortItem};
    pub use crate::render::{Artifact, RenderOptions, Renderer, RendererRegistry, SpecRenderer};
    pub use crate::shorthand::{Aggregate, FieldType, TimeUnit};
    pub use crate::spec::ToSpec;
}
