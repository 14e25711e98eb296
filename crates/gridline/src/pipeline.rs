//! Selection -> edges -> extents -> dedup -> sink.

use log::{debug, info};
use serde::Serialize;

use crate::config::GridConfig;
use crate::dedup::LineSet;
use crate::error::{EdgeSkip, GridError};
use crate::extent::extend_edge;
use crate::geometry::{Rect, Segment};
use crate::shape::Shape;
use crate::sink::GridSink;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Edges produced by the traversal.
    pub edges: usize,
    /// Edges with coincident endpoints.
    pub degenerate: usize,
    /// Edges whose line misses the artboard (or grazes one corner).
    pub no_crossing: usize,
    /// Lines already emitted earlier in the run.
    pub duplicates: usize,
    /// Lines handed to the sink.
    pub emitted: usize,
}

/// Result of [`GridBuilder::run`].
#[derive(Debug, Clone)]
pub struct RunOutput<L> {
    /// Handle of the layer the sink opened.
    pub layer: L,
    /// Emitted lines, in emission order.
    pub lines: LineSet,
    pub stats: RunStats,
}

impl<L> RunOutput<L> {
    pub fn segments(&self) -> &[Segment] {
        self.lines.as_slice()
    }
}

/// Builds grid lines for selections on one artboard.
///
/// The artboard and settings are fixed at construction, so a builder can be
/// reused for several runs; every run starts from an empty line set.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    rect: Rect,
    config: GridConfig,
}

impl GridBuilder {
    pub fn new(rect: Rect, config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self { rect, config })
    }

    /// Builder with the default config.
    pub fn with_defaults(rect: Rect) -> Self {
        Self { rect, config: GridConfig::default() }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Walk `selection` in order and emit each distinct line once.
    ///
    /// Fails with [`GridError::EmptySelection`] before touching the sink if
    /// nothing is selected. Edges that produce no line are counted and
    /// skipped. A sink error aborts the run.
    pub fn run<S: GridSink>(&self, selection: &[Shape], sink: &mut S) -> Result<RunOutput<S::Layer>, GridError> {
        if selection.is_empty() {
            return Err(GridError::EmptySelection);
        }

        let layer = sink.open_layer(&self.config.layer_name)?;
        let mut lines = LineSet::new(self.config.tolerance);
        let mut stats = RunStats::default();

        for (item, shape) in selection.iter().enumerate() {
            for edge in shape.edges() {
                stats.edges += 1;

                let segment = match extend_edge(&edge, &self.rect) {
                    Ok(segment) => segment,
                    Err(skip) => {
                        debug!(
                            "item {}: skipping edge ({}, {}) -> ({}, {}): {}",
                            item, edge.start.x, edge.start.y, edge.end.x, edge.end.y, skip
                        );
                        match skip {
                            EdgeSkip::Degenerate => stats.degenerate += 1,
                            EdgeSkip::NoCrossing => stats.no_crossing += 1,
                        }
                        continue;
                    }
                };

                if !lines.admit(segment) {
                    stats.duplicates += 1;
                    continue;
                }

                sink.emit(&layer, &segment, &self.config.stroke)?;
                stats.emitted += 1;
            }
        }

        info!(
            "{} grid lines from {} edges ({} duplicate, {} degenerate, {} off-artboard)",
            stats.emitted, stats.edges, stats.duplicates, stats.degenerate, stats.no_crossing
        );

        Ok(RunOutput { layer, lines, stats })
    }
}

// ============================================================================
// TESTS
// ============================================================================
