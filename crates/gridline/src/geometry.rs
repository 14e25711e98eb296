//! Core geometry types for gridline.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` + `Copy` = small stack values that are copied implicitly
//! - `PartialEq` = can compare with `==` (exact float equality!)
//!
//! Exact equality is rarely what you want for computed coordinates, so the
//! types here also carry `approx_eq` methods that take a tolerance.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A 2D point in artboard coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Per-axis comparison: both |dx| and |dy| must be within `tolerance`.
    #[inline]
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Which way the y axis grows on the drawing surface.
///
/// SVG and most raster formats grow downward; print-oriented documents
/// grow upward. The clipper only cares about the vertical span, but the
/// artboard validation has to know which of `top`/`bottom` is the smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    Up,
    #[default]
    Down,
}

/// The artboard: a normalized, axis-aligned bounding rectangle.
///
/// Fields are private so an inverted rectangle can't be built by hand;
/// go through [`Rect::y_up`] or [`Rect::y_down`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    y_axis: YAxis,
}

impl Rect {
    /// Artboard with y growing upward (`bottom <= top`).
    pub fn y_up(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, GridError> {
        Self::checked(left, top, right, bottom, YAxis::Up)
    }

    /// Artboard with y growing downward (`top <= bottom`), as in SVG.
    pub fn y_down(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, GridError> {
        Self::checked(left, top, right, bottom, YAxis::Down)
    }

    /// Artboard from an origin plus size, in SVG orientation.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GridError> {
        Self::y_down(x, y, x + width, y + height)
    }

    fn checked(left: f64, top: f64, right: f64, bottom: f64, y_axis: YAxis) -> Result<Self, GridError> {
        if ![left, top, right, bottom].iter().all(|v| v.is_finite()) {
            return Err(GridError::InvalidArtboard("bounds must be finite".into()));
        }
        if left > right {
            return Err(GridError::InvalidArtboard(format!(
                "left ({left}) is greater than right ({right})"
            )));
        }
        let inverted = match y_axis {
            YAxis::Up => bottom > top,
            YAxis::Down => top > bottom,
        };
        if inverted {
            return Err(GridError::InvalidArtboard(format!(
                "top ({top}) and bottom ({bottom}) are inverted for a y-{} axis",
                match y_axis {
                    YAxis::Up => "up",
                    YAxis::Down => "down",
                }
            )));
        }
        Ok(Self { left, top, right, bottom, y_axis })
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    #[inline]
    pub fn y_axis(&self) -> YAxis {
        self.y_axis
    }

    /// Smallest y on the artboard, regardless of orientation.
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.top.min(self.bottom)
    }

    /// Largest y on the artboard, regardless of orientation.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.top.max(self.bottom)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// True if `p` lies on one of the four sides (corners included).
    pub fn on_boundary(&self, p: Point, tolerance: f64) -> bool {
        let within_x = p.x >= self.left - tolerance && p.x <= self.right + tolerance;
        let within_y = p.y >= self.min_y() - tolerance && p.y <= self.max_y() + tolerance;
        let on_vertical_side =
            (p.x - self.left).abs() <= tolerance || (p.x - self.right).abs() <= tolerance;
        let on_horizontal_side =
            (p.y - self.top).abs() <= tolerance || (p.y - self.bottom).abs() <= tolerance;

        (on_vertical_side && within_y) || (on_horizontal_side && within_x)
    }
}

/// One finished grid line. Equality is undirected: {a, b} == {b, a}.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Undirected, per-axis tolerant equality.
    pub fn approx_eq(&self, other: &Segment, tolerance: f64) -> bool {
        let same = self.a.approx_eq(other.a, tolerance) && self.b.approx_eq(other.b, tolerance);
        let swapped = self.a.approx_eq(other.b, tolerance) && self.b.approx_eq(other.a, tolerance);
        same || swapped
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// A straight edge between two consecutive anchors of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// `end - start`. The zero vector means the edge has no line.
    #[inline]
    pub fn direction(&self) -> (f64, f64) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let (dx, dy) = self.direction();
        dx == 0.0 && dy == 0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
