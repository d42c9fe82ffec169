//! Renderer capability and registry.
//!
//! Rendering is a backend concern: the core serializes a chart and hands
//! the spec to whichever [`Renderer`] has been selected. Renderers are
//! looked up by name in an explicit [`RendererRegistry`] owned by the call
//! site; there is no process-wide registry state.

use std::fmt;

use serde_json::Value;

use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::spec::ToSpec;

/// Output of a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// The spec itself, as a JSON document.
    Json(Value),
    /// A textual rendition.
    Text(String),
}

/// Options forwarded to a renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Canvas width override.
    pub width: Option<u32>,
    /// Canvas height override.
    pub height: Option<u32>,
}

/// A rendering backend consuming serialized chart specs.
pub trait Renderer {
    /// Render a chart into an artifact.
    ///
    /// # Errors
    ///
    /// Backend-specific; the core propagates whatever is reported.
    fn render(&self, chart: &Chart, options: &RenderOptions) -> Result<Artifact>;
}

/// Built-in renderer that emits the serialized spec unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecRenderer;

impl Renderer for SpecRenderer {
    fn render(&self, chart: &Chart, _options: &RenderOptions) -> Result<Artifact> {
        Ok(Artifact::Json(chart.to_spec()))
    }
}

/// Factory producing renderer instances on demand.
pub type RendererFactory = Box<dyn Fn() -> Box<dyn Renderer>>;

/// A renderer selected by registered name or supplied ready-made.
pub enum RendererChoice {
    /// Look the renderer up among the registered factories.
    Name(String),
    /// Use this instance directly.
    Instance(Box<dyn Renderer>),
}

impl From<&str> for RendererChoice {
    fn from(name: &str) -> Self {
        RendererChoice::Name(name.to_string())
    }
}

impl From<String> for RendererChoice {
    fn from(name: String) -> Self {
        RendererChoice::Name(name)
    }
}

impl From<Box<dyn Renderer>> for RendererChoice {
    fn from(renderer: Box<dyn Renderer>) -> Self {
        RendererChoice::Instance(renderer)
    }
}

/// Registry of available renderer factories and the selected renderer.
pub struct RendererRegistry {
    factories: Vec<(String, RendererFactory)>,
    active: Option<Box<dyn Renderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererRegistry {
    /// Create a registry with the built-in `"json"` renderer registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            factories: Vec::new(),
            active: None,
        };
        registry.register("json", Box::new(|| Box::new(SpecRenderer)));
        registry
    }

    /// Register a renderer factory under a name, replacing any previous
    /// entry of that name.
    pub fn register(&mut self, name: &str, factory: RendererFactory) {
        if let Some(slot) = self.factories.iter_mut().find(|(n, _)| n == name) {
            slot.1 = factory;
        } else {
            self.factories.push((name.to_string(), factory));
        }
    }

    /// Select the active renderer, by registered name or as an instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RendererNotFound`] for a name nothing was
    /// registered under.
    pub fn use_renderer(&mut self, choice: impl Into<RendererChoice>) -> Result<()> {
        match choice.into() {
            RendererChoice::Instance(renderer) => self.active = Some(renderer),
            RendererChoice::Name(name) => {
                let factory = self
                    .factories
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, f)| f)
                    .ok_or(Error::RendererNotFound(name.clone()))?;
                self.active = Some(factory());
            }
        }
        Ok(())
    }

    /// Registered renderer names, in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// The currently selected renderer, if any.
    #[must_use]
    pub fn active(&self) -> Option<&dyn Renderer> {
        self.active.as_deref()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.list())
            .field("active", &self.active.is_some())
            .finish()
    }
}
