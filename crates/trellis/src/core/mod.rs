//! Core types: the node arena, the layout pass and diagnostics.

/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Node data stored in the arena.
pub mod node;
/// Shared node name types.
pub mod state;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Node ID types.
pub mod id;
/// Measure and arrange traversal.
pub mod pass;
/// Arena, structure and invalidation.
pub mod tree;

pub use id::{NodeId, TypedId};
pub use pass::LayoutContext;
pub use tree::Tree;
