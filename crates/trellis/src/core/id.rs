use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use slotmap::new_key_type;

use crate::{Tree, control::Control, error::Result};

new_key_type! {
    /// Key of a node in the tree arena. Ids stay valid until the node is
    /// removed, and are never reused for a different node.
    pub struct NodeId;
}

/// A [`NodeId`] that remembers the control type it was created with, so the
/// control can be read back without naming the type again.
///
/// ```ignore
/// let label = tree.add(root, Label::new("ready"))?;
/// label.update(&mut tree, |l| l.set_text("busy"))?;
/// ```
pub struct TypedId<C> {
    /// Arena key.
    id: NodeId,
    /// Control type.
    _marker: PhantomData<fn() -> C>,
}

impl<C> TypedId<C> {
    /// Tag an untyped id. The control type is checked on access, not here.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The arena key.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Control + 'static> TypedId<C> {
    /// Borrow the node's control.
    pub fn get<'a>(&self, tree: &'a Tree) -> Result<&'a C> {
        tree.control::<C>(self.id)
    }

    /// Mutate the node's control. The closure returns true when the change
    /// affects layout, which invalidates the node.
    pub fn update(&self, tree: &mut Tree, f: impl FnOnce(&mut C) -> bool) -> Result<bool> {
        tree.update_control::<C>(self.id, f)
    }
}

// The control type needs none of these traits.
impl<C> fmt::Debug for TypedId<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedId({:?})", self.id)
    }
}

impl<C> PartialEq for TypedId<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for TypedId<C> {}

impl<C> Hash for TypedId<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<C> Clone for TypedId<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TypedId<C> {}

impl<C> From<TypedId<C>> for NodeId {
    fn from(value: TypedId<C>) -> Self {
        value.id
    }
}
