use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    geom::{Point, Rect, Size},
    layout::Layout,
    overlay,
};

/// Layout access handed to a control while its measure or arrange hook runs.
///
/// The context is scoped to one node: it can read that node's properties and
/// drive the measure and arrange of its direct children, nothing else.
pub struct LayoutContext<'a> {
    /// The tree, with the current node's control taken out of its slot.
    tree: &'a mut Tree,
    /// The node whose hook is running.
    node: NodeId,
}

impl<'a> LayoutContext<'a> {
    /// Construct a context for `node`.
    pub(crate) fn new(tree: &'a mut Tree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// The node whose hook is running.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Read-only access to the whole tree.
    pub fn tree(&self) -> &Tree {
        self.tree
    }

    /// Layout properties of the current node.
    pub fn layout(&self) -> Layout {
        self.tree
            .nodes
            .get(self.node)
            .map(|n| n.layout)
            .unwrap_or_default()
    }

    /// All children in placement order.
    pub fn children(&self) -> Vec<NodeId> {
        self.tree
            .nodes
            .get(self.node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Children that take part in layout: not collapsed, and not popups, which
    /// the host pass places separately.
    pub fn visible_children(&self) -> Vec<NodeId> {
        self.children()
            .into_iter()
            .filter(|id| {
                !self.tree.nodes[*id].layout.collapsed && !self.tree.is_popup(*id)
            })
            .collect()
    }

    /// Layout properties of a direct child.
    pub fn child_layout(&self, child: NodeId) -> Result<Layout> {
        self.check_child(child)?;
        Ok(self.tree.get(child)?.layout)
    }

    /// Measure a direct child against `available`, margin included.
    pub fn measure_child(&mut self, child: NodeId, available: Size) -> Result<Size> {
        self.check_child(child)?;
        self.tree.measure_node(child, available)
    }

    /// Arrange a direct child into `slot`, relative to the current node's
    /// origin. Returns the size the child consumed, margin included.
    pub fn arrange_child(&mut self, child: NodeId, slot: Rect) -> Result<Size> {
        self.check_child(child)?;
        self.tree.arrange_node(child, slot)
    }

    /// The measured size of a direct child from the current pass.
    pub fn measured_size(&self, child: NodeId) -> Result<Size> {
        self.check_child(child)?;
        self.tree
            .get(child)?
            .measured
            .ok_or(Error::NotMeasured(child))
    }

    /// Fail unless `child` is a direct child of the current node.
    fn check_child(&self, child: NodeId) -> Result<()> {
        if self.tree.get(child)?.parent != Some(self.node) {
            return Err(Error::InvalidOperation(format!(
                "{child:?} is not a child of {:?}",
                self.node
            )));
        }
        Ok(())
    }
}

impl Tree {
    /// Measure a node against the space its parent offers, margin included.
    ///
    /// A cached measurement is reused when the node has not been invalidated
    /// and `available` is unchanged.
    pub fn measure(&mut self, node_id: impl Into<NodeId>, available: Size) -> Result<Size> {
        let node_id = node_id.into();
        self.check_attached(node_id)?;
        self.measure_node(node_id, available)
    }

    /// Arrange a measured node into `slot`, given relative to its parent's
    /// origin. Returns the size consumed, margin included.
    pub fn arrange(&mut self, node_id: impl Into<NodeId>, slot: Rect) -> Result<Size> {
        let node_id = node_id.into();
        self.check_attached(node_id)?;
        self.arrange_node(node_id, slot)
    }

    /// Run the host pass for a screen of the given size.
    ///
    /// Measures and arranges the root against the whole screen, then places
    /// each open popup against its anchor. Returns false without doing any
    /// work if nothing was invalidated and the screen size is unchanged.
    pub fn layout(&mut self, screen: Size) -> Result<bool> {
        if !self.needs_layout(screen) {
            tracing::trace!("layout clean, skipping pass");
            return Ok(false);
        }
        tracing::debug!(w = screen.w, h = screen.h, "layout pass");

        let root = self.root;
        self.measure_node(root, screen)?;
        self.arrange_node(root, screen.rect())?;
        self.place_popups(screen)?;

        self.screen = Some(screen);
        self.debug_assert_tree_invariants();
        Ok(true)
    }

    /// Fail with `Detached` unless the root reaches `node_id`.
    fn check_attached(&self, node_id: NodeId) -> Result<()> {
        self.get(node_id)?;
        if !self.is_attached_to_root(node_id) {
            return Err(Error::Detached(node_id));
        }
        Ok(())
    }

    /// Measure without the attachment check.
    pub(crate) fn measure_node(&mut self, node_id: NodeId, available: Size) -> Result<Size> {
        let node = self.get(node_id)?;
        let layout = node.layout;

        if layout.collapsed {
            let node = self.get_mut(node_id)?;
            node.measured = Some(Size::ZERO);
            node.measured_for = available;
            return Ok(Size::ZERO);
        }
        if let Some(measured) = node.measured
            && node.measured_for == available
        {
            return Ok(measured);
        }

        let inner = available.shrink(layout.margin);
        let desired = self.with_control_mut(node_id, |control, tree| {
            let mut ctx = LayoutContext::new(tree, node_id);
            control.measure(&mut ctx, inner)
        })??;
        let measured = desired.grow(layout.margin);

        let node = self.get_mut(node_id)?;
        node.measured = Some(measured);
        node.measured_for = available;
        // A fresh measurement may move children, so the node needs an arrange.
        node.dirty = true;
        tracing::trace!(
            ?node_id,
            name = %node.name,
            avail_w = available.w,
            avail_h = available.h,
            w = measured.w,
            h = measured.h,
            "measured"
        );
        Ok(measured)
    }

    /// Arrange without the attachment check.
    pub(crate) fn arrange_node(&mut self, node_id: NodeId, slot: Rect) -> Result<Size> {
        let node = self.get(node_id)?;
        let layout = node.layout;

        if layout.collapsed {
            self.settle(node_id, slot.tl)?;
            return Ok(Size::ZERO);
        }
        let measured = node.measured.ok_or(Error::NotMeasured(node_id))?;

        let inner = slot.shrink(layout.margin);
        let desired = measured.shrink(layout.margin);
        let (dx, w) = layout.align_h.resolve(desired.w, inner.w);
        let (dy, h) = layout.align_v.resolve(desired.h, inner.h);
        let bounds = Rect {
            tl: inner.tl.offset(dx, dy),
            w,
            h,
        };
        self.get_mut(node_id)?.bounds = Some(bounds);

        let consumed = self.with_control_mut(node_id, |control, tree| {
            let mut ctx = LayoutContext::new(tree, node_id);
            control.arrange(&mut ctx, bounds.size())
        })??;
        self.settle_children(node_id)?;

        let arranged = consumed.grow(layout.margin);
        let node = self.get_mut(node_id)?;
        node.arranged = Some(arranged);
        node.dirty = false;
        tracing::trace!(
            ?node_id,
            name = %node.name,
            x = bounds.tl.x,
            y = bounds.tl.y,
            w = bounds.w,
            h = bounds.h,
            "arranged"
        );
        Ok(arranged)
    }

    /// Give an empty rect at `origin` to a node that takes no space, and mark
    /// its whole subtree clean.
    fn settle(&mut self, node_id: NodeId, origin: Point) -> Result<()> {
        for (i, id) in self.subtree_pre_order(node_id).into_iter().enumerate() {
            let node = self.get_mut(id)?;
            let tl = if i == 0 { origin } else { Point::zero() };
            node.bounds = Some(Rect { tl, w: 0, h: 0 });
            node.arranged = Some(Size::ZERO);
            if node.measured.is_none() {
                node.measured = Some(Size::ZERO);
            }
            node.dirty = false;
        }
        Ok(())
    }

    /// Settle children the control left unarranged. Open popups are skipped;
    /// the host pass places them after the root.
    fn settle_children(&mut self, node_id: NodeId) -> Result<()> {
        let pending: Vec<NodeId> = self
            .get(node_id)?
            .children
            .iter()
            .copied()
            .filter(|id| self.nodes[*id].dirty && !self.is_open_popup(*id))
            .collect();
        for child in pending {
            if !self.get(child)?.layout.collapsed {
                tracing::warn!(parent = ?node_id, ?child, "visible child left unarranged");
            }
            self.settle(child, Point::zero())?;
        }
        Ok(())
    }

    /// Measure and place every open popup against its anchor, in open order.
    ///
    /// A popup anchored inside another popup that has not been placed yet is
    /// deferred to the next round. A round that places nothing means some
    /// anchor can never be reached.
    fn place_popups(&mut self, screen: Size) -> Result<()> {
        let origin = self
            .get(self.root)?
            .bounds
            .map(|b| b.tl)
            .unwrap_or_default();
        let mut pending: Vec<_> = self
            .popups
            .iter()
            .filter_map(|p| p.anchor.map(|a| (p.node, a, p.placement)))
            .collect();
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for (popup, anchor, placement) in pending {
                let Some(anchor_rect) = self.screen_bounds(anchor) else {
                    deferred.push((popup, anchor, placement));
                    continue;
                };
                let size = self.measure_node(popup, screen)?;
                let rect = overlay::place(anchor_rect, size, screen.rect(), placement);
                self.arrange_node(popup, rect.translate(Point::zero() - origin))?;
                tracing::debug!(?popup, ?anchor, x = rect.tl.x, y = rect.tl.y, "popup placed");
            }
            if deferred.len() == before
                && let Some((_, anchor, _)) = deferred.first()
            {
                return Err(Error::Detached(*anchor));
            }
            pending = deferred;
        }
        Ok(())
    }

    /// Bounds of a node in screen coordinates, if the node is attached and
    /// clean.
    pub fn screen_bounds(&self, node_id: impl Into<NodeId>) -> Option<Rect> {
        let node_id = node_id.into();
        let node = self.nodes.get(node_id)?;
        let mut rect = node.bounds()?;
        let mut current = node.parent;
        let mut last = node_id;
        while let Some(id) = current {
            let parent = self.nodes.get(id)?;
            rect = rect.translate(parent.bounds()?.tl);
            last = id;
            current = parent.parent;
        }
        (last == self.root).then_some(rect)
    }

    /// Bounds of a node relative to its parent, if the node is clean.
    pub fn bounds(&self, node_id: impl Into<NodeId>) -> Option<Rect> {
        self.nodes.get(node_id.into())?.bounds()
    }

    /// Measured size of a node, if it was measured since the last
    /// invalidation.
    pub fn measured_size(&self, node_id: impl Into<NodeId>) -> Option<Size> {
        self.nodes.get(node_id.into())?.measured
    }

    /// Find the deepest visible node containing a screen point. Open popups
    /// are searched first, most recently opened on top.
    pub fn locate(&self, point: Point) -> Option<NodeId> {
        let root = self.nodes.get(self.root)?;
        let origin = root.bounds()?.tl;
        for popup in self.popups.iter().rev().filter(|p| p.anchor.is_some()) {
            if let Some(hit) = self.locate_in(popup.node, point - origin) {
                return Some(hit);
            }
        }
        self.locate_in(self.root, point)
    }

    /// Hit test inside `node_id`, with `point` relative to its parent's origin.
    fn locate_in(&self, node_id: NodeId, point: Point) -> Option<NodeId> {
        let node = self.nodes.get(node_id)?;
        if node.layout.collapsed {
            return None;
        }
        let bounds = node.bounds()?;
        if !bounds.contains_point(point) {
            return None;
        }
        let local = point - bounds.tl;
        node.children
            .iter()
            .rev()
            .filter(|id| !self.is_popup(**id))
            .find_map(|child| self.locate_in(*child, local))
            .or(Some(node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controls::{Fixed, Panel},
        geom::Edges,
        layout::{Align, Dock},
        overlay::Placement,
        testing::Probe,
    };

    #[test]
    fn measure_is_cached_until_invalidated() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let (probe, calls) = Probe::new(Size::new(4, 2));
        let leaf = tree.add_child(tree.root_id(), probe)?;

        let first = tree.measure(leaf, Size::new(10, 10))?;
        let second = tree.measure(leaf, Size::new(10, 10))?;
        assert_eq!(first, second);
        assert_eq!(calls.lock().unwrap().len(), 1);

        tree.measure(leaf, Size::new(8, 10))?;
        assert_eq!(calls.lock().unwrap().len(), 2);

        tree.invalidate(leaf)?;
        tree.measure(leaf, Size::new(8, 10))?;
        assert_eq!(calls.lock().unwrap().len(), 3);
        Ok(())
    }

    #[test]
    fn margin_wraps_measure_and_arrange() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let leaf = tree.add_child(tree.root_id(), Fixed::new(4, 2))?;
        tree.set_margin(leaf, Edges::new(1, 2, 3, 4))?;
        tree.set_align(leaf, Align::Start, Align::Start)?;

        assert_eq!(tree.measure(leaf, Size::new(20, 20))?, Size::new(8, 8));
        let consumed = tree.arrange(leaf, Rect::new(0, 0, 20, 20))?;
        assert_eq!(consumed, Size::new(8, 8));
        assert_eq!(tree.bounds(leaf), Some(Rect::new(1, 2, 4, 2)));
        Ok(())
    }

    #[test]
    fn alignment_inside_slot() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let leaf = tree.add_child(tree.root_id(), Fixed::new(4, 2))?;
        tree.set_align(leaf, Align::Center, Align::End)?;
        tree.layout(Size::new(10, 10))?;
        assert_eq!(tree.bounds(leaf), Some(Rect::new(3, 8, 4, 2)));
        Ok(())
    }

    #[test]
    fn arrange_before_measure_fails() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let leaf = tree.add_child(tree.root_id(), Fixed::new(1, 1))?;
        assert_eq!(
            tree.arrange(leaf, Rect::new(0, 0, 5, 5)),
            Err(Error::NotMeasured(leaf))
        );
        Ok(())
    }

    #[test]
    fn detached_nodes_are_rejected() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let loose = tree.create_detached(Fixed::new(1, 1));
        assert_eq!(
            tree.measure(loose, Size::new(5, 5)),
            Err(Error::Detached(loose))
        );
        assert_eq!(
            tree.arrange(loose, Rect::new(0, 0, 5, 5)),
            Err(Error::Detached(loose))
        );
        Ok(())
    }

    #[test]
    fn collapsed_subtree_takes_no_space() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let root = tree.root_id();
        let top = tree.add_child(root, Fixed::new(3, 2))?;
        tree.set_dock(top, Dock::Top)?;
        let hidden = tree.add_child(root, Panel)?;
        tree.set_dock(hidden, Dock::Top)?;
        let inner = tree.add_child(hidden, Fixed::new(5, 5))?;
        let fill = tree.add_child(root, Fixed::new(1, 1))?;

        tree.layout(Size::new(10, 10))?;
        assert_eq!(tree.bounds(fill), Some(Rect::new(0, 7, 10, 3)));

        tree.set_collapsed(hidden, true)?;
        tree.layout(Size::new(10, 10))?;
        assert_eq!(tree.measured_size(hidden), Some(Size::ZERO));
        assert_eq!(tree.bounds(hidden).map(|r| r.size()), Some(Size::ZERO));
        assert!(!tree.is_dirty(inner)?);
        assert_eq!(tree.bounds(fill), Some(Rect::new(0, 2, 10, 8)));
        Ok(())
    }

    #[test]
    fn layout_skips_clean_tree() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let (probe, calls) = Probe::new(Size::new(2, 2));
        let leaf = tree.add_child(tree.root_id(), probe)?;

        assert!(tree.layout(Size::new(10, 10))?);
        assert!(!tree.layout(Size::new(10, 10))?);
        assert_eq!(calls.lock().unwrap().len(), 1);

        assert!(tree.layout(Size::new(12, 10))?);
        assert_eq!(calls.lock().unwrap().len(), 2);

        tree.invalidate(leaf)?;
        assert!(tree.is_dirty(tree.root_id())?);
        assert!(tree.layout(Size::new(12, 10))?);
        assert!(!tree.is_dirty(tree.root_id())?);
        Ok(())
    }

    #[test]
    fn redundant_write_is_a_no_op() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let leaf = tree.add_child(tree.root_id(), Fixed::new(2, 2))?;
        tree.layout(Size::new(10, 10))?;

        assert!(!tree.set_dock(leaf, Dock::Fill)?);
        assert!(!tree.is_dirty(leaf)?);
        assert!(!tree.is_dirty(tree.root_id())?);

        assert!(tree.set_dock(leaf, Dock::Left)?);
        assert!(tree.is_dirty(leaf)?);
        assert!(tree.is_dirty(tree.root_id())?);
        assert_eq!(tree.bounds(leaf), None);
        Ok(())
    }

    #[test]
    fn popup_waits_for_the_popup_holding_its_anchor() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let root = tree.root_id();
        let button = tree.add_child(root, Fixed::new(2, 1))?;
        tree.set_dock(button, Dock::Top)?;
        let outer = tree.add_popup(Panel)?;
        let item = tree.add_child(outer, Fixed::new(4, 2))?;
        let inner = tree.add_popup(Fixed::new(3, 1))?;

        // The nested popup is opened first, so it comes first in open order.
        tree.open_popup(inner, item, Placement::Right)?;
        tree.open_popup(outer, button, Placement::Below)?;
        assert_eq!(tree.open_popups(), vec![inner, outer]);

        tree.layout(Size::new(20, 10))?;
        assert_eq!(tree.screen_bounds(outer), Some(Rect::new(0, 1, 4, 2)));
        assert_eq!(tree.screen_bounds(item), Some(Rect::new(0, 1, 4, 2)));
        assert_eq!(tree.screen_bounds(inner), Some(Rect::new(4, 1, 3, 1)));
        Ok(())
    }

    #[test]
    fn screen_bounds_and_locate() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let root = tree.root_id();
        let outer = tree.add_child(root, Panel)?;
        tree.set_padding(outer, Edges::all(2))?;
        let inner = tree.add_child(outer, Fixed::new(1, 1))?;
        tree.layout(Size::new(10, 10))?;

        assert_eq!(tree.bounds(inner), Some(Rect::new(2, 2, 6, 6)));
        assert_eq!(tree.screen_bounds(inner), Some(Rect::new(2, 2, 6, 6)));
        assert_eq!(tree.locate(Point::new(3, 3)), Some(inner));
        assert_eq!(tree.locate(Point::new(1, 1)), Some(outer));
        assert_eq!(tree.locate(Point::new(20, 1)), None);
        Ok(())
    }
}
