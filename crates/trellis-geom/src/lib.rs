//! Geometry primitives used by the trellis layout engine.
//!
//! All sizes are unsigned and every subtraction saturates at zero, so a
//! transiently over-constrained layout degrades to empty rectangles instead
//! of wrapping.

#![warn(missing_docs)]

/// Four-sided insets.
mod edges;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use edges::Edges;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;

/// The two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}
