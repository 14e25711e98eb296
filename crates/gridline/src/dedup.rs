//! The set of grid lines emitted so far in a run.
//!
//! Many edges of a selection share a line (opposite sides of a tiled
//! pattern, shared edges between neighbouring shapes). Extending each of
//! them drifts by a few ulps, so membership is tolerance based rather than
//! exact.
//!
//! Admission is a linear scan. Selections are dozens to hundreds of edges,
//! which is well below where a spatial index pays for itself.

use crate::geometry::Segment;

/// Default per-axis tolerance, in artboard units.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Insertion-ordered, tolerance-deduplicated segments.
#[derive(Debug, Clone)]
pub struct LineSet {
    segments: Vec<Segment>,
    tolerance: f64,
}

impl Default for LineSet {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl LineSet {
    pub fn new(tolerance: f64) -> Self {
        Self {
            segments: Vec::new(),
            tolerance,
        }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// True if an equivalent segment (either direction) is already here.
    pub fn contains(&self, segment: &Segment) -> bool {
        self.segments
            .iter()
            .any(|existing| existing.approx_eq(segment, self.tolerance))
    }

    /// Add `segment` unless an equivalent one is already present.
    ///
    /// Returns `true` if it was added.
    pub fn admit(&mut self, segment: Segment) -> bool {
        if self.contains(&segment) {
            return false;
        }
        self.segments.push(segment);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.segments
    }
}

// ============================================================================
// TESTS
// ============================================================================
