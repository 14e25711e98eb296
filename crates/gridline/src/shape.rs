//! Selected artwork and edge traversal.
//!
//! ## Rust Lesson #10: Enums (Sum Types)
//!
//! Rust enums can carry data. A selection is a tree of groups, compound
//! outlines and plain outlines, and one `match` per variant is all the
//! dispatch the traversal needs.

use serde::{Deserialize, Serialize};

use crate::geometry::{Edge, Point};

/// A single closed outline, as an ordered list of anchors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub anchors: Vec<Point>,
}

impl Outline {
    pub fn new(anchors: Vec<Point>) -> Self {
        Self { anchors }
    }

    /// One edge per consecutive anchor pair, plus the closing edge from the
    /// last anchor back to the first.
    ///
    /// A single anchor pairs with itself, giving one degenerate edge.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.anchors.len();
        (0..n).map(move |i| Edge::new(self.anchors[i], self.anchors[(i + 1) % n]))
    }
}

/// One selected item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Nested items, in stacking order.
    Group { children: Vec<Shape> },
    /// Several outlines forming one shape (e.g. a ring).
    Compound { outlines: Vec<Outline> },
    Outline(Outline),
    /// Text, images, anything without anchors.
    Other,
}

impl Shape {
    pub fn group(children: Vec<Shape>) -> Self {
        Shape::Group { children }
    }

    pub fn compound(outlines: Vec<Outline>) -> Self {
        Shape::Compound { outlines }
    }

    pub fn outline(anchors: Vec<Point>) -> Self {
        Shape::Outline(Outline::new(anchors))
    }

    /// Every edge under this item, depth first, in stored order.
    ///
    /// Lazy: nothing is collected. An edge that appears in two sub-shapes
    /// is yielded twice.
    pub fn edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        match self {
            Shape::Group { children } => Box::new(children.iter().flat_map(|c| c.edges())),
            Shape::Compound { outlines } => Box::new(outlines.iter().flat_map(|o| o.edges())),
            Shape::Outline(outline) => Box::new(outline.edges()),
            Shape::Other => Box::new(std::iter::empty()),
        }
    }

    /// Number of outlines under this item.
    pub fn outline_count(&self) -> usize {
        match self {
            Shape::Group { children } => children.iter().map(Shape::outline_count).sum(),
            Shape::Compound { outlines } => outlines.len(),
            Shape::Outline(_) => 1,
            Shape::Other => 0,
        }
    }
}

/// All edges of a selection, item by item.
pub fn selection_edges(selection: &[Shape]) -> impl Iterator<Item = Edge> + '_ {
    selection.iter().flat_map(|shape| shape.edges())
}

// ============================================================================
// TESTS
// ============================================================================
