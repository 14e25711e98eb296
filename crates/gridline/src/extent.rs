//! Extend an edge to the artboard.
//!
//! The clipper can over-report (corner hits come back twice), so the
//! selector doesn't trust the candidate list: it folds coincident
//! candidates together, sorts what is left by distance from the edge start
//! and keeps the two extremes.

use crate::clip::intersect;
use crate::error::EdgeSkip;
use crate::geometry::{Edge, Point, Rect, Segment};

/// Candidates closer than this on both axes are the same crossing.
///
/// Well below any useful dedup tolerance, well above the drift of solving
/// for a corner from two different sides.
pub const COINCIDENT_EPSILON: f64 = 1e-6;

/// The maximal segment of the line through `start` and `end` that fits on
/// `rect`.
pub fn extend(start: Point, end: Point, rect: &Rect) -> Result<Segment, EdgeSkip> {
    let direction = (end.x - start.x, end.y - start.y);
    if direction.0 == 0.0 && direction.1 == 0.0 {
        return Err(EdgeSkip::Degenerate);
    }

    let mut candidates: Vec<Point> = Vec::with_capacity(4);
    for hit in intersect(start, direction, rect) {
        if !candidates.iter().any(|c| c.approx_eq(hit, COINCIDENT_EPSILON)) {
            candidates.push(hit);
        }
    }

    // A line grazing a single corner (or passing within a hair of it) leaves
    // one distinct crossing.
    if candidates.len() < 2 {
        return Err(EdgeSkip::NoCrossing);
    }

    // Stable, so equidistant crossings keep clipper order. `total_cmp` keeps
    // NaN from panicking the sort.
    candidates.sort_by(|p, q| start.distance(*p).total_cmp(&start.distance(*q)));

    let (Some(&nearest), Some(&farthest)) = (candidates.first(), candidates.last()) else {
        return Err(EdgeSkip::NoCrossing);
    };

    Ok(Segment::new(nearest, farthest))
}

/// [`extend`] for an [`Edge`].
#[inline]
pub fn extend_edge(edge: &Edge, rect: &Rect) -> Result<Segment, EdgeSkip> {
    extend(edge.start, edge.end, rect)
}

// ============================================================================
// TESTS
// ============================================================================
