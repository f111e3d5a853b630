//! The control trait.

use std::any::{Any, type_name};

use crate::{
    LayoutContext,
    error::Result,
    geom::Size,
    layout::{Layout, dock},
    state::NodeName,
};

/// Controls are the behavior attached to nodes in the tree arena.
///
/// The tree owns layout bookkeeping: margins, alignment, collapsed children,
/// caching and dirty state are handled before and after these hooks run, so an
/// implementation only deals with its own content box. The default hooks run
/// the dock compositor, which makes every control a usable container.
pub trait Control: Any + Send {
    /// Initial layout properties for a node created with this control.
    fn layout(&self) -> Layout {
        Layout::new()
    }

    /// Desired size given the space offered by the parent, margin excluded.
    ///
    /// Leaf controls return their intrinsic content size plus their padding.
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        dock::measure(ctx, available)
    }

    /// Place children inside a box of `size` and return the size actually
    /// consumed, which may exceed `size` when content overflows.
    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        dock::arrange(ctx, size)
    }

    /// Name used for lookups and dumps.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }
}

/// Convert controls into boxed trait objects.
impl<C> From<C> for Box<dyn Control>
where
    C: Control + 'static,
{
    fn from(control: C) -> Self {
        Box::new(control)
    }
}
