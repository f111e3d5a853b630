use crate::{
    NodeId,
    control::Control,
    geom::{Rect, Size},
    layout::Layout,
    state::NodeName,
};

/// Core node data stored in the arena.
pub struct Node {
    /// Control behavior and state. Empty while the control's own hook runs.
    pub(crate) control: Option<Box<dyn Control>>,

    /// Parent in the arena tree. Navigational only.
    pub(crate) parent: Option<NodeId>,
    /// Children in placement order.
    pub(crate) children: Vec<NodeId>,

    /// Layout-affecting properties.
    pub(crate) layout: Layout,
    /// Node name for lookups and dumps.
    pub(crate) name: NodeName,

    /// Desired size from the last measure since the last invalidation.
    pub(crate) measured: Option<Size>,
    /// Available size the cached measurement was computed for.
    pub(crate) measured_for: Size,
    /// Bounds relative to the parent's origin from the last arrange.
    pub(crate) bounds: Option<Rect>,
    /// Size consumed by the last arrange, margin included.
    pub(crate) arranged: Option<Size>,
    /// Set by mutations that affect size or position, cleared by arrange.
    pub(crate) dirty: bool,
}

impl Node {
    /// Construct a fresh, dirty node for a control.
    pub(crate) fn new(control: Box<dyn Control>) -> Self {
        let layout = control.layout();
        let name = control.name();
        Self {
            control: Some(control),
            parent: None,
            children: Vec::new(),
            layout,
            name,
            measured: None,
            measured_for: Size::ZERO,
            bounds: None,
            arranged: None,
            dirty: true,
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout properties.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Return the measured size, if a measure has run since the last invalidation.
    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    /// Return the arranged bounds relative to the parent, if the node is clean.
    pub fn bounds(&self) -> Option<Rect> {
        if self.dirty { None } else { self.bounds }
    }

    /// Return the size consumed by the last arrange, if the node is clean.
    pub fn arranged_size(&self) -> Option<Size> {
        if self.dirty { None } else { self.arranged }
    }

    /// Return true if the node needs a layout pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return true if the node is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.layout.collapsed
    }
}
