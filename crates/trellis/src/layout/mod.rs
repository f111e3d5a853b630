//! Layout properties and the built-in arrangement algorithms.
//!
//! Every node carries a [`Layout`] value. The tree applies the margin and the
//! alignment generically; containers apply their own padding inside the dock
//! and stack algorithms.

pub mod dock;
pub mod stack;

use serde::{Deserialize, Serialize};

pub use crate::geom::Edges;

/// The side of a container a child is docked against.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dock {
    /// Take the remaining space after all directional docks are peeled off.
    #[default]
    Fill,
    /// Peel a strip off the top.
    Top,
    /// Peel a strip off the bottom.
    Bottom,
    /// Peel a strip off the left.
    Left,
    /// Peel a strip off the right.
    Right,
}

/// Placement of a node inside the slot its parent offers along one axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Fill the whole slot.
    #[default]
    Stretch,
    /// Use the measured size at the start of the slot.
    Start,
    /// Use the measured size centered in the slot.
    Center,
    /// Use the measured size at the end of the slot.
    End,
}

impl Align {
    /// Resolve a node extent and its offset inside a slot of length `slot`,
    /// given the node's desired extent.
    pub fn resolve(self, desired: u32, slot: u32) -> (u32, u32) {
        let extent = desired.min(slot);
        match self {
            Self::Stretch => (0, slot),
            Self::Start => (0, extent),
            Self::Center => ((slot - extent) / 2, extent),
            Self::End => (slot - extent, extent),
        }
    }
}

/// Layout-affecting properties of a node.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Dock side used by the dock compositor.
    pub dock: Dock,
    /// Interior insets between this node's bounds and its children.
    pub padding: Edges,
    /// Exterior insets between the parent's slot and this node's bounds.
    pub margin: Edges,
    /// Horizontal placement inside the parent's slot.
    pub align_h: Align,
    /// Vertical placement inside the parent's slot.
    pub align_v: Align,
    /// Collapsed nodes take no space and are skipped by every algorithm.
    pub collapsed: bool,
    /// Marks the one stack child that absorbs leftover space.
    pub stretch: bool,
}

impl Layout {
    /// The default layout: fill docked, no insets, stretched on both axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dock side.
    pub fn dock(mut self, dock: Dock) -> Self {
        self.dock = dock;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set the margin.
    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Set both alignments.
    pub fn align(mut self, horizontal: Align, vertical: Align) -> Self {
        self.align_h = horizontal;
        self.align_v = vertical;
        self
    }

    /// Set the collapsed flag.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Set the stretch flag.
    pub fn stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;
        self
    }
}
