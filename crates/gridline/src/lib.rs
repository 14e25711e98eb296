//! # gridline
//!
//! Full-artboard construction lines from the edges of selected artwork.
//!
//! Every straight edge of the selection defines an infinite line; that line
//! is clipped to the artboard and emitted once, however many edges share it.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod clip;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extent;
pub mod geometry;
pub mod pipeline;
pub mod shape;
pub mod sink;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use clip::intersect;
pub use config::GridConfig;
pub use dedup::{DEFAULT_TOLERANCE, LineSet};
pub use error::{EdgeSkip, GridError};
pub use extent::{extend, extend_edge};
pub use geometry::{Edge, Point, Rect, Segment, YAxis};
pub use pipeline::{GridBuilder, RunOutput, RunStats};
pub use shape::{Outline, Shape, selection_edges};
pub use sink::{
    GridSink, RecordedLayer, RecordingSink, StrokeColor, StrokeStyle, unique_layer_name,
    unique_layer_name_by,
};
pub use svg::{SvgDocument, SvgLayer, SvgLayerSink, layer_id};
