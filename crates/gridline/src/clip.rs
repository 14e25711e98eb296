//! Line/rectangle intersection.
//!
//! This is the HOT PATH: every edge of every selected shape comes through
//! here once.

use crate::geometry::{Point, Rect};

/// Slack on the closed-interval test at the artboard sides.
///
/// Solving for `t` and substituting back can land a hair outside the span
/// for a line that really does hit a corner.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Crossings of the infinite line through `point` along `direction` with the
/// sides of `rect`.
///
/// The vertical sides (x = left, x = right) are tried when `dx != 0`, the
/// horizontal sides (y = top, y = bottom) when `dy != 0`. Both run, and the
/// accepted points are concatenated in that order. A line through a corner
/// is accepted by both a vertical and a horizontal side, so the same point
/// can show up twice; [`crate::extent::extend`] sorts that out.
///
/// The zero direction has no line and must be filtered by the caller.
pub fn intersect(point: Point, direction: (f64, f64), rect: &Rect) -> Vec<Point> {
    let (dx, dy) = direction;
    debug_assert!(dx != 0.0 || dy != 0.0, "zero direction has no line");

    // At most one crossing per side.
    let mut crossings = Vec::with_capacity(4);

    if dx != 0.0 {
        for side_x in [rect.left(), rect.right()] {
            let t = (side_x - point.x) / dx;
            let y = point.y + t * dy;
            if within(y, rect.min_y(), rect.max_y()) {
                crossings.push(Point::new(side_x, clamp(y, rect.min_y(), rect.max_y())));
            }
        }
    }

    if dy != 0.0 {
        for side_y in [rect.top(), rect.bottom()] {
            let t = (side_y - point.y) / dy;
            let x = point.x + t * dx;
            if within(x, rect.left(), rect.right()) {
                crossings.push(Point::new(clamp(x, rect.left(), rect.right()), side_y));
            }
        }
    }

    crossings
}

/// Closed interval test with [`BOUNDARY_EPSILON`] slack.
#[inline]
fn within(v: f64, lo: f64, hi: f64) -> bool {
    v >= lo - BOUNDARY_EPSILON && v <= hi + BOUNDARY_EPSILON
}

/// Pull a value accepted within the slack back onto the side.
#[inline]
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

// ============================================================================
// TESTS
// ============================================================================
