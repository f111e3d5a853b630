use crate::{
    NodeId, Tree,
    control::Control,
    dump::dump,
    error::{Error, Result},
    geom::{Rect, Size},
};

/// A tree plus a screen size. Tests build a scene under [`Harness::root`],
/// run host passes and inspect screen rectangles.
pub struct Harness {
    /// The tree under test.
    pub tree: Tree,
    /// Screen size for host passes.
    pub size: Size,
}

impl Harness {
    /// Create a harness whose root carries `root`.
    pub fn new<C>(root: C, width: u32, height: u32) -> Self
    where
        C: Control + 'static,
    {
        Self {
            tree: Tree::new(root),
            size: Size::new(width, height),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.tree.root_id()
    }

    /// Run a host pass at the current size.
    pub fn layout(&mut self) -> Result<bool> {
        self.tree.layout(self.size)
    }

    /// Change the screen size and run a host pass.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool> {
        self.size = Size::new(width, height);
        self.layout()
    }

    /// Screen rectangle of a node after a pass.
    pub fn rect(&self, node_id: impl Into<NodeId>) -> Result<Rect> {
        let node_id = node_id.into();
        self.tree
            .screen_bounds(node_id)
            .ok_or(Error::NotMeasured(node_id))
    }

    /// Debug table of the whole tree.
    pub fn dump(&self) -> Result<String> {
        dump(&self.tree, self.tree.root_id())
    }

    /// Check the post-pass invariants over every attached node: nothing is
    /// dirty, every node has bounds, and collapsed nodes are empty.
    pub fn check(&self) -> Result<()> {
        for id in self.tree.subtree_pre_order(self.tree.root_id()) {
            let node = self.tree.node(id).ok_or(Error::NodeNotFound(id))?;
            if node.is_dirty() {
                return Err(Error::Invalid(format!("{id:?} dirty after a pass")));
            }
            let bounds = node.bounds().ok_or(Error::NotMeasured(id))?;
            if node.is_collapsed() && !bounds.is_empty() {
                return Err(Error::Invalid(format!("collapsed {id:?} has extent")));
            }
        }
        Ok(())
    }
}
