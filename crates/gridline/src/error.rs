//! Error types.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` boilerplate from the `#[error]` strings.
//!
//! Only whole-run failures live in [`GridError`]. An edge that can't produce
//! a line is a local skip ([`EdgeSkip`]), not an error.

use thiserror::Error;

/// Failures that stop a run.
#[derive(Debug, Error)]
pub enum GridError {
    /// Nothing selected; the pipeline never starts.
    #[error("No selection")]
    EmptySelection,

    /// The artboard or config violates a precondition.
    #[error("invalid artboard: {0}")]
    InvalidArtboard(String),

    /// Tolerance must be a positive, finite number.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(f64),

    /// A selection id doesn't name any element in the document.
    #[error("no element with id \"{0}\"")]
    UnknownSelection(String),

    #[error("SVG parse error: {0}")]
    Svg(String),

    /// The emission sink couldn't persist a segment.
    #[error("sink error: {0}")]
    Sink(String),
}

/// Why an edge produced no line. Counted, logged, never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSkip {
    /// Start and end coincide, so the edge has no direction.
    Degenerate,
    /// The edge's line doesn't cross the artboard in two distinct places.
    NoCrossing,
}

impl std::fmt::Display for EdgeSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeSkip::Degenerate => write!(f, "degenerate edge"),
            EdgeSkip::NoCrossing => write!(f, "no boundary crossing"),
        }
    }
}
