use std::{
    any::{Any, type_name},
    collections::HashSet,
};

use slotmap::SlotMap;

use crate::{
    control::Control,
    core::{
        id::{NodeId, TypedId},
        node::Node,
    },
    error::{Error, Result},
    geom::{Edges, Size},
    layout::{Align, Dock, Layout},
    overlay::Placement,
    state::NodeName,
};

/// A root-level node positioned relative to an anchor during the host pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Popup {
    /// The popup node, a direct child of the root.
    pub(crate) node: NodeId,
    /// Anchor node while the popup is open.
    pub(crate) anchor: Option<NodeId>,
    /// Side of the anchor the popup opens on.
    pub(crate) placement: Placement,
}

/// The control tree: node arena, structure, properties and invalidation.
///
/// Nodes own their children through the ordered child list; parent links are
/// lookups only. Measure and arrange live in the `pass` module.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    pub(crate) root: NodeId,
    /// Registered popups, in placement order.
    pub(crate) popups: Vec<Popup>,
    /// Screen size used by the last host pass.
    pub(crate) screen: Option<Size>,
}

impl Tree {
    /// Create a tree whose root node carries `root`.
    pub fn new<C>(root: C) -> Self
    where
        C: Control + 'static,
    {
        Self::with_boxed_root(Box::new(root))
    }

    /// Create a tree from a boxed root control.
    pub fn with_boxed_root(root: Box<dyn Control>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root));
        Self {
            nodes,
            root,
            popups: Vec::new(),
            screen: None,
        }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Return a reference to a node by id.
    pub fn node(&self, node_id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(node_id.into())
    }

    /// Return true if the arena holds this node.
    pub fn contains(&self, node_id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(node_id.into())
    }

    /// Number of nodes in the arena, detached nodes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes. Never true in practice, since the root
    /// cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Fetch a node or fail with `NodeNotFound`.
    pub(crate) fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes.get(node_id).ok_or(Error::NodeNotFound(node_id))
    }

    /// Fetch a node mutably or fail with `NodeNotFound`.
    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))
    }

    /// Create a node in the arena detached from the tree.
    pub fn create_detached<C>(&mut self, control: C) -> NodeId
    where
        C: Control + 'static,
    {
        self.create_detached_boxed(Box::new(control))
    }

    /// Create a node in the arena detached from the tree using a boxed control.
    pub fn create_detached_boxed(&mut self, control: Box<dyn Control>) -> NodeId {
        self.nodes.insert(Node::new(control))
    }

    /// Add a control as the last child of `parent` and return the new node ID.
    pub fn add_child<C>(&mut self, parent: impl Into<NodeId>, control: C) -> Result<NodeId>
    where
        C: Control + 'static,
    {
        self.add_child_boxed(parent, Box::new(control))
    }

    /// Add a control as the last child of `parent`, returning a typed id.
    pub fn add<C>(&mut self, parent: impl Into<NodeId>, control: C) -> Result<TypedId<C>>
    where
        C: Control + 'static,
    {
        self.add_child(parent, control).map(TypedId::new)
    }

    /// Add a boxed control as the last child of `parent`.
    pub fn add_child_boxed(
        &mut self,
        parent: impl Into<NodeId>,
        control: Box<dyn Control>,
    ) -> Result<NodeId> {
        let parent = parent.into();
        self.get(parent)?;
        let child = self.create_detached_boxed(control);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Add a control as a child of `parent` at position `index`.
    pub fn insert_child<C>(
        &mut self,
        parent: impl Into<NodeId>,
        index: usize,
        control: C,
    ) -> Result<NodeId>
    where
        C: Control + 'static,
    {
        let parent = parent.into();
        self.get(parent)?;
        let child = self.create_detached(control);
        self.attach_at(parent, index, child)?;
        Ok(child)
    }

    /// Attach a detached child as the last child of `parent`.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let index = self.get(parent)?.children.len();
        self.attach_at(parent, index, child)
    }

    /// Attach a detached child under `parent` at position `index`. Indices past
    /// the end append.
    pub fn attach_at(
        &mut self,
        parent: impl Into<NodeId>,
        index: usize,
        child: impl Into<NodeId>,
    ) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        self.get(parent)?;
        if self.get(child)?.parent.is_some() || child == self.root {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        self.get_mut(child)?.parent = Some(parent);
        let node = self.get_mut(parent)?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);

        self.invalidate(parent)?;
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Detach a child from its parent, keeping its subtree alive in the arena.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        self.close_popups_anchored_in(child)?;
        self.popups.retain(|p| p.node != child);

        self.get_mut(parent)?.children.retain(|id| *id != child);
        self.get_mut(child)?.parent = None;
        self.invalidate(parent)?;
        self.invalidate(child)?;
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Replace the ordered child list of `parent`.
    ///
    /// Every listed node must be detached or already a child of `parent`.
    /// Previous children missing from the list are detached.
    pub fn set_children(&mut self, parent: impl Into<NodeId>, children: Vec<NodeId>) -> Result<()> {
        let parent = parent.into();
        self.get(parent)?;

        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !seen.insert(*child) {
                return Err(Error::DuplicateChild {
                    parent,
                    child: *child,
                });
            }
            let node = self.get(*child)?;
            if *child == parent || self.is_ancestor(*child, parent) {
                return Err(Error::WouldCreateCycle {
                    parent,
                    child: *child,
                });
            }
            if node.parent.is_some_and(|p| p != parent) || *child == self.root {
                return Err(Error::AlreadyAttached(*child));
            }
        }

        let old_children = self.get(parent)?.children.clone();
        for old in old_children.iter().filter(|id| !seen.contains(*id)) {
            self.close_popups_anchored_in(*old)?;
            self.popups.retain(|p| p.node != *old);
            self.get_mut(*old)?.parent = None;
            self.invalidate(*old)?;
        }
        for child in &children {
            self.get_mut(*child)?.parent = Some(parent);
        }

        let changed = old_children != children;
        self.get_mut(parent)?.children = children;
        if changed {
            self.invalidate(parent)?;
        }
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Remove a node and all descendants from the arena.
    pub fn remove_subtree(&mut self, root_id: impl Into<NodeId>) -> Result<()> {
        let root_id = root_id.into();
        if root_id == self.root {
            return Err(Error::InvalidOperation("cannot remove root".into()));
        }
        let parent = self.get(root_id)?.parent;

        self.close_popups_anchored_in(root_id)?;
        let post_order = self.subtree_post_order(root_id);
        let removed: HashSet<NodeId> = post_order.iter().copied().collect();
        self.popups.retain(|p| !removed.contains(&p.node));

        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|id| *id != root_id);
            self.invalidate(parent)?;
        }
        for node_id in &post_order {
            self.nodes.remove(*node_id);
        }

        tracing::debug!(?root_id, removed = post_order.len(), "removed subtree");
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Collect a subtree in pre-order, including the root.
    pub(crate) fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Collect a subtree in post-order, including the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Return true if `ancestor` appears in the parent chain of `node`,
    /// counting `node` itself.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Return true if `node_id` is attached to the root.
    pub fn is_attached_to_root(&self, node_id: impl Into<NodeId>) -> bool {
        self.is_ancestor(self.root, node_id.into())
    }

    /// Find the first node in pre-order whose name matches.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.subtree_pre_order(self.root)
            .into_iter()
            .find(|id| self.nodes[*id].name == name)
    }

    /// Rename a node. Names do not affect layout.
    pub fn set_name(&mut self, node_id: impl Into<NodeId>, name: NodeName) -> Result<()> {
        self.get_mut(node_id.into())?.name = name;
        Ok(())
    }

    /// Mark a node and its ancestor chain as needing a layout pass.
    ///
    /// The walk drops cached measurements on the way up and stops at the first
    /// ancestor that is already dirty with no cached measurement, so repeated
    /// invalidations cost at most the tree depth.
    pub fn invalidate(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        let node_id = node_id.into();
        self.get(node_id)?;
        let mut current = Some(node_id);
        let mut marked = 0usize;
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(id) else {
                break;
            };
            if id != node_id && node.dirty && node.measured.is_none() {
                break;
            }
            node.dirty = true;
            node.measured = None;
            marked += 1;
            current = node.parent;
        }
        tracing::debug!(?node_id, marked, "invalidated");
        Ok(())
    }

    /// Return true if the node needs a layout pass.
    pub fn is_dirty(&self, node_id: impl Into<NodeId>) -> Result<bool> {
        Ok(self.get(node_id.into())?.dirty)
    }

    /// Return true if the next host pass would do any work at this screen size.
    pub fn needs_layout(&self, screen: Size) -> bool {
        self.nodes[self.root].dirty || self.screen != Some(screen)
    }

    /// Update a node's layout properties through a closure. The node is
    /// invalidated only if the properties actually changed. Returns whether
    /// they did.
    pub fn update_layout(
        &mut self,
        node_id: impl Into<NodeId>,
        f: impl FnOnce(&mut Layout),
    ) -> Result<bool> {
        let node_id = node_id.into();
        let node = self.get_mut(node_id)?;
        let mut layout = node.layout;
        f(&mut layout);
        if layout == node.layout {
            return Ok(false);
        }
        node.layout = layout;
        self.invalidate(node_id)?;
        Ok(true)
    }

    /// Replace a node's layout properties.
    pub fn set_layout(&mut self, node_id: impl Into<NodeId>, layout: Layout) -> Result<bool> {
        self.update_layout(node_id, |l| *l = layout)
    }

    /// Set the dock side.
    pub fn set_dock(&mut self, node_id: impl Into<NodeId>, dock: Dock) -> Result<bool> {
        self.update_layout(node_id, |l| l.dock = dock)
    }

    /// Set the padding.
    pub fn set_padding(&mut self, node_id: impl Into<NodeId>, padding: Edges) -> Result<bool> {
        self.update_layout(node_id, |l| l.padding = padding)
    }

    /// Set the margin.
    pub fn set_margin(&mut self, node_id: impl Into<NodeId>, margin: Edges) -> Result<bool> {
        self.update_layout(node_id, |l| l.margin = margin)
    }

    /// Set the horizontal and vertical alignment.
    pub fn set_align(
        &mut self,
        node_id: impl Into<NodeId>,
        horizontal: Align,
        vertical: Align,
    ) -> Result<bool> {
        self.update_layout(node_id, |l| {
            l.align_h = horizontal;
            l.align_v = vertical;
        })
    }

    /// Collapse or restore a node.
    pub fn set_collapsed(&mut self, node_id: impl Into<NodeId>, collapsed: bool) -> Result<bool> {
        self.update_layout(node_id, |l| l.collapsed = collapsed)
    }

    /// Mark or unmark a node as its stack's stretch child.
    pub fn set_stretch(&mut self, node_id: impl Into<NodeId>, stretch: bool) -> Result<bool> {
        self.update_layout(node_id, |l| l.stretch = stretch)
    }

    /// Run a closure with the control of a node taken out of its slot, so the
    /// closure may also borrow the tree mutably.
    pub(crate) fn with_control_mut<R>(
        &mut self,
        node_id: NodeId,
        f: impl FnOnce(&mut dyn Control, &mut Self) -> R,
    ) -> Result<R> {
        let mut control = self
            .get_mut(node_id)?
            .control
            .take()
            .ok_or(Error::ReentrantControl(node_id))?;
        let out = f(control.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.control = Some(control);
        }
        Ok(out)
    }

    /// Borrow a node's control as a concrete type.
    pub fn control<C>(&self, node_id: impl Into<NodeId>) -> Result<&C>
    where
        C: Control + 'static,
    {
        let node_id = node_id.into();
        let control = self
            .get(node_id)?
            .control
            .as_deref()
            .ok_or(Error::ReentrantControl(node_id))?;
        (control as &dyn Any)
            .downcast_ref::<C>()
            .ok_or_else(|| Error::Invalid(format!("expected control type {}", type_name::<C>())))
    }

    /// Mutate a node's control as a concrete type. The closure returns whether
    /// it changed anything that affects layout; if so the node is invalidated.
    pub fn update_control<C>(
        &mut self,
        node_id: impl Into<NodeId>,
        f: impl FnOnce(&mut C) -> bool,
    ) -> Result<bool>
    where
        C: Control + 'static,
    {
        let node_id = node_id.into();
        let control = self
            .get_mut(node_id)?
            .control
            .as_deref_mut()
            .ok_or(Error::ReentrantControl(node_id))?;
        let control = (control as &mut dyn Any)
            .downcast_mut::<C>()
            .ok_or_else(|| Error::Invalid(format!("expected control type {}", type_name::<C>())))?;
        let changed = f(control);
        if changed {
            self.invalidate(node_id)?;
        }
        Ok(changed)
    }

    /// Register a new popup. Popups are root children that start collapsed and
    /// are placed against an anchor while open.
    pub fn add_popup<C>(&mut self, control: C) -> Result<NodeId>
    where
        C: Control + 'static,
    {
        let node_id = self.create_detached(control);
        self.get_mut(node_id)?.layout.collapsed = true;
        self.attach(self.root, node_id)?;
        self.popups.push(Popup {
            node: node_id,
            anchor: None,
            placement: Placement::Below,
        });
        Ok(node_id)
    }

    /// Return true if the node is a registered popup.
    pub fn is_popup(&self, node_id: NodeId) -> bool {
        self.popups.iter().any(|p| p.node == node_id)
    }

    /// Return true if the node is a popup that is currently open.
    pub fn is_open_popup(&self, node_id: NodeId) -> bool {
        self.popups
            .iter()
            .any(|p| p.node == node_id && p.anchor.is_some())
    }

    /// Open popups in placement order.
    pub fn open_popups(&self) -> Vec<NodeId> {
        self.popups
            .iter()
            .filter(|p| p.anchor.is_some())
            .map(|p| p.node)
            .collect()
    }

    /// Open a popup against an anchor node. A closed popup moves to the top of
    /// the placement order; re-opening an open one only updates its anchor and
    /// placement.
    pub fn open_popup(
        &mut self,
        popup: impl Into<NodeId>,
        anchor: impl Into<NodeId>,
        placement: Placement,
    ) -> Result<()> {
        let popup = popup.into();
        let anchor = anchor.into();
        self.get(anchor)?;
        let index = self
            .popups
            .iter()
            .position(|p| p.node == popup)
            .ok_or_else(|| Error::Invalid(format!("not a popup: {popup:?}")))?;
        if self.is_ancestor(popup, anchor) {
            return Err(Error::InvalidOperation(
                "popup cannot be anchored inside itself".into(),
            ));
        }

        // An open popup keeps its slot: popups anchored inside it come later
        // in the order and must still be placed after it.
        let entry = if self.popups[index].anchor.is_some() {
            &mut self.popups[index]
        } else {
            let entry = self.popups.remove(index);
            self.popups.push(entry);
            let last = self.popups.len() - 1;
            &mut self.popups[last]
        };
        entry.anchor = Some(anchor);
        entry.placement = placement;

        self.set_collapsed(popup, false)?;
        self.invalidate(popup)?;
        tracing::debug!(?popup, ?anchor, ?placement, "popup opened");
        Ok(())
    }

    /// Close a popup, along with any popups anchored inside it.
    pub fn close_popup(&mut self, popup: impl Into<NodeId>) -> Result<()> {
        let popup = popup.into();
        let entry = self
            .popups
            .iter_mut()
            .find(|p| p.node == popup)
            .ok_or_else(|| Error::Invalid(format!("not a popup: {popup:?}")))?;
        if entry.anchor.take().is_none() {
            return Ok(());
        }
        self.close_popups_anchored_in(popup)?;
        self.set_collapsed(popup, true)?;
        tracing::debug!(?popup, "popup closed");
        Ok(())
    }

    /// Close every open popup whose anchor lies in the subtree of `root`.
    fn close_popups_anchored_in(&mut self, root: NodeId) -> Result<()> {
        let nested: Vec<NodeId> = self
            .popups
            .iter()
            .filter(|p| p.anchor.is_some_and(|a| self.is_ancestor(root, a)))
            .map(|p| p.node)
            .collect();
        for node in nested {
            self.close_popup(node)?;
        }
        Ok(())
    }

    /// Assert structural invariants on the node tree in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) fn debug_assert_tree_invariants(&self) {
        debug_assert!(self.nodes.contains_key(self.root), "root node missing");
        for (id, node) in self.nodes.iter() {
            let mut seen = HashSet::with_capacity(node.children.len());
            for child in &node.children {
                debug_assert!(seen.insert(*child), "duplicate child {child:?} under {id:?}");
                debug_assert!(
                    self.nodes.get(*child).is_some_and(|c| c.parent == Some(id)),
                    "child {child:?} parent mismatch under {id:?}"
                );
            }
            if let Some(parent) = node.parent {
                debug_assert!(
                    self.nodes
                        .get(parent)
                        .is_some_and(|p| p.children.contains(&id)),
                    "parent {parent:?} missing child {id:?}"
                );
            }
        }
        for popup in &self.popups {
            debug_assert!(
                self.nodes
                    .get(popup.node)
                    .is_some_and(|n| n.parent == Some(self.root)),
                "popup {:?} is not a root child",
                popup.node
            );
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn debug_assert_tree_invariants(&self) {}
}
