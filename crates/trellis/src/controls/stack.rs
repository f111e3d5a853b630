use crate::{
    LayoutContext,
    control::Control,
    error::Result,
    geom::{Axis, Size},
    layout::stack,
};

/// Arranges its children in a row or a column.
///
/// In a row, one child may be marked with the stretch flag to absorb the
/// leftover width.
#[derive(Debug, Default, Clone, Copy)]
pub struct StackLayout {
    /// Row instead of column.
    horizontal: bool,
}

impl StackLayout {
    /// Construct a stack. `horizontal` selects a row.
    pub fn new(horizontal: bool) -> Self {
        Self { horizontal }
    }

    /// A vertical stack.
    pub fn column() -> Self {
        Self::new(false)
    }

    /// A horizontal stack.
    pub fn row() -> Self {
        Self::new(true)
    }

    /// Is this a row?
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    /// Switch orientation. Returns true if it changed; use through
    /// `Tree::update_control` so the node is invalidated.
    pub fn set_horizontal(&mut self, horizontal: bool) -> bool {
        if self.horizontal == horizontal {
            return false;
        }
        self.horizontal = horizontal;
        true
    }

    /// The stacking axis.
    pub fn axis(&self) -> Axis {
        if self.horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

impl Control for StackLayout {
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        stack::measure(ctx, available, self.axis())
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        stack::arrange(ctx, size, self.axis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, controls::Fixed, geom::Rect};

    #[test]
    fn orientation_change_invalidates() -> Result<()> {
        let mut tree = Tree::new(StackLayout::row());
        let root = tree.root_id();
        let a = tree.add_child(root, Fixed::new(3, 1))?;
        let b = tree.add_child(root, Fixed::new(3, 1))?;
        tree.layout(Size::new(10, 10))?;
        assert_eq!(tree.bounds(b), Some(Rect::new(3, 0, 3, 10)));

        assert!(!tree.update_control::<StackLayout>(root, |s| s.set_horizontal(true))?);
        assert!(!tree.is_dirty(root)?);

        assert!(tree.update_control::<StackLayout>(root, |s| s.set_horizontal(false))?);
        assert!(tree.is_dirty(root)?);
        tree.layout(Size::new(10, 10))?;
        assert_eq!(tree.bounds(a), Some(Rect::new(0, 0, 10, 1)));
        assert_eq!(tree.bounds(b), Some(Rect::new(0, 1, 10, 1)));
        Ok(())
    }
}
