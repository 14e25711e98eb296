//! Where admitted grid lines go.
//!
//! The builder never draws anything itself. It opens one target layer per
//! run and hands every admitted segment to a [`GridSink`], which decides how
//! to persist it.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::geometry::Segment;

/// Name used for the grid layer when the config doesn't give one.
pub const DEFAULT_LAYER_NAME: &str = "Grid Lines";

/// Stroke colour of an emitted line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
    /// Prints on every separation. Rendered as solid black on screen.
    #[default]
    Registration,
    /// Any CSS/SVG colour string.
    Custom(String),
}

impl StrokeColor {
    /// Colour string for SVG `stroke` attributes.
    pub fn to_svg(&self) -> &str {
        match self {
            StrokeColor::Registration => "#000000",
            StrokeColor::Custom(color) => color,
        }
    }
}

/// How an emitted line is drawn: solid, unfilled, `width` units wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: StrokeColor,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: StrokeColor::Registration,
        }
    }
}

/// Output port for admitted segments.
///
/// ## Rust Lesson #24: Associated Types
///
/// `type Layer` lets each sink pick its own layer handle (an index, an id
/// string, a host object) while the builder just passes it back unchanged.
pub trait GridSink {
    type Layer;

    /// Create the target layer for this run. `base_name` is a suggestion;
    /// the sink must make it distinct from layers it already has.
    fn open_layer(&mut self, base_name: &str) -> Result<Self::Layer, GridError>;

    /// Persist one segment on `layer`.
    fn emit(&mut self, layer: &Self::Layer, segment: &Segment, style: &StrokeStyle) -> Result<(), GridError>;
}

/// `base`, or `base 2`, `base 3`, ... whichever is first not in `existing`.
pub fn unique_layer_name<S: AsRef<str>>(base: &str, existing: &[S]) -> String {
    unique_layer_name_by(base, |name| existing.iter().any(|e| e.as_ref() == name))
}

/// [`unique_layer_name`] with a caller-supplied collision test, for sinks
/// where a layer is known by more than its display name.
pub fn unique_layer_name_by(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base} {n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// A layer recorded in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedLayer {
    pub name: String,
    pub segments: Vec<Segment>,
    pub style: Option<StrokeStyle>,
}

/// In-memory sink: keeps every layer and segment it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub layers: Vec<RecordedLayer>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing layer names, as a host document would have.
    pub fn with_existing_layers<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            layers: names
                .into_iter()
                .map(|name| RecordedLayer { name: name.into(), segments: Vec::new(), style: None })
                .collect(),
        }
    }

    /// Segments emitted to the most recently opened layer.
    pub fn segments(&self) -> &[Segment] {
        self.layers.last().map(|l| l.segments.as_slice()).unwrap_or(&[])
    }
}

impl GridSink for RecordingSink {
    type Layer = usize;

    fn open_layer(&mut self, base_name: &str) -> Result<usize, GridError> {
        let existing: Vec<&str> = self.layers.iter().map(|l| l.name.as_str()).collect();
        let name = unique_layer_name(base_name, &existing);
        self.layers.push(RecordedLayer { name, segments: Vec::new(), style: None });
        Ok(self.layers.len() - 1)
    }

    fn emit(&mut self, layer: &usize, segment: &Segment, style: &StrokeStyle) -> Result<(), GridError> {
        let target = self
            .layers
            .get_mut(*layer)
            .ok_or_else(|| GridError::Sink(format!("no layer with index {layer}")))?;
        target.segments.push(*segment);
        target.style = Some(style.clone());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
