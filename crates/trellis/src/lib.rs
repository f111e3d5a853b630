//! Trellis: a retained-mode control tree with a two-pass layout engine.
//!
//! Every node in the tree carries a [`Control`] that knows how to measure its
//! content and arrange its children. The host calls [`Tree::layout`] once per
//! frame; the tree re-runs measure and arrange only when something was
//! invalidated since the previous pass.
//!
//! # Quick Start
//!
//! - [`Tree`] - the arena, the property setters and the host pass
//! - [`Control`] - the trait implemented by all controls
//! - [`layout::Layout`] - per-node docking, padding, margin and alignment
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Size, Point, Rect, Edges)
//! - [`layout`] - Dock and stack algorithms
//! - [`controls`] - Built-in controls, including menus
//! - [`overlay`] - Popup placement
//! - [`scene`] - Declarative scene descriptions

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod control;
pub mod controls;
pub mod geom;
pub mod layout;
pub mod overlay;
pub mod scene;

#[cfg(any(test, feature = "testing"))]
pub use crate::core::testing;
pub use crate::core::{LayoutContext, NodeId, Tree, TypedId};
pub use crate::core::{dump, error, node, state};

pub use control::Control;
