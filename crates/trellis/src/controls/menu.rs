//! Menus: strips, popup menus and items.
//!
//! A [`MenuStrip`] is a horizontal stack of items, usually docked to the top
//! of a window. A [`Menu`] is a vertical stack registered as a popup. Each
//! [`MenuItem`] may own a submenu, which opens below the item on a strip and
//! to its right inside a menu.

use unicode_width::UnicodeWidthStr;

use crate::{
    LayoutContext, NodeId, Tree,
    control::Control,
    error::{Error, Result},
    geom::{Axis, Edges, Size},
    layout::{Dock, Layout, stack},
    overlay::Placement,
};

/// Columns reserved for the check mark of checkable items.
const CHECK_COLUMNS: u32 = 2;
/// Gap between an item's text and its accelerator.
const ACCEL_GAP: u32 = 2;
/// Columns reserved for the submenu marker inside a menu.
const SUBMENU_COLUMNS: u32 = 2;

/// A horizontal bar of menu items.
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuStrip;

impl Control for MenuStrip {
    fn layout(&self) -> Layout {
        Layout::new().dock(Dock::Top)
    }

    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        stack::measure(ctx, available, Axis::Horizontal)
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        stack::arrange(ctx, size, Axis::Horizontal)
    }
}

/// A popup column of menu items.
#[derive(Debug, Default, Clone, Copy)]
pub struct Menu;

impl Control for Menu {
    fn layout(&self) -> Layout {
        Layout::new().padding(Edges::all(1))
    }

    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        stack::measure(ctx, available, Axis::Vertical)
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        stack::arrange(ctx, size, Axis::Vertical)
    }
}

/// One entry in a strip or a menu.
#[derive(Debug, Clone, Default)]
pub struct MenuItem {
    /// Item text.
    text: String,
    /// Accelerator hint shown after the text.
    accelerator: Option<String>,
    /// Checkable items reserve a check column.
    checkable: bool,
    /// Check state.
    checked: bool,
    /// Submenu popup, created on first use.
    submenu: Option<NodeId>,
    /// Item lives on a strip rather than in a menu.
    on_strip: bool,
}

impl MenuItem {
    /// Construct an item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the accelerator hint.
    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }

    /// Make the item checkable.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// The item text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The accelerator hint.
    pub fn accelerator(&self) -> Option<&str> {
        self.accelerator.as_deref()
    }

    /// The submenu, if one was created.
    pub fn submenu(&self) -> Option<NodeId> {
        self.submenu
    }

    /// Is the item checked?
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Replace the text. Returns true if it changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    /// Set the check state. Only checkable items change. Returns true if it
    /// changed.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if !self.checkable || self.checked == checked {
            return false;
        }
        self.checked = checked;
        true
    }

    /// Content width in columns.
    fn content_width(&self) -> u32 {
        let mut w = to_u32(self.text.width());
        if self.on_strip {
            return w;
        }
        if self.checkable {
            w = w.saturating_add(CHECK_COLUMNS);
        }
        if let Some(accel) = &self.accelerator {
            w = w.saturating_add(ACCEL_GAP).saturating_add(to_u32(accel.width()));
        }
        if self.submenu.is_some() {
            w = w.saturating_add(SUBMENU_COLUMNS);
        }
        w
    }
}

/// Saturating width conversion.
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Control for MenuItem {
    fn layout(&self) -> Layout {
        Layout::new().padding(Edges::symmetric(1, 0))
    }

    fn measure(&mut self, ctx: &mut LayoutContext<'_>, _available: Size) -> Result<Size> {
        Ok(Size::new(self.content_width(), 1).grow(ctx.layout().padding))
    }

    fn arrange(&mut self, _ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        Ok(size)
    }
}

/// Add an item to a strip or a menu and return its id.
pub fn add_item(tree: &mut Tree, parent: impl Into<NodeId>, item: MenuItem) -> Result<NodeId> {
    let parent = parent.into();
    let on_strip = if tree.control::<MenuStrip>(parent).is_ok() {
        true
    } else if tree.control::<Menu>(parent).is_ok() {
        false
    } else {
        return Err(Error::Invalid(format!(
            "menu items belong in a menu or a strip, not {parent:?}"
        )));
    };
    tree.add_child(parent, MenuItem { on_strip, ..item })
}

/// Return an item's submenu, creating an empty one on first use.
pub fn submenu(tree: &mut Tree, item: impl Into<NodeId>) -> Result<NodeId> {
    let item = item.into();
    if let Some(menu) = tree.control::<MenuItem>(item)?.submenu {
        return Ok(menu);
    }
    let menu = tree.add_popup(Menu)?;
    tree.update_control::<MenuItem>(item, |i| {
        i.submenu = Some(menu);
        !i.on_strip
    })?;
    Ok(menu)
}

/// Open an item's submenu and return it. Any sibling's open submenu is closed
/// first.
pub fn open(tree: &mut Tree, item: impl Into<NodeId>) -> Result<NodeId> {
    let item = item.into();
    let control = tree.control::<MenuItem>(item)?;
    let menu = control
        .submenu
        .ok_or_else(|| Error::InvalidOperation(format!("{item:?} has no submenu")))?;
    let placement = if control.on_strip {
        Placement::Below
    } else {
        Placement::Right
    };

    let siblings = tree
        .node(item)
        .and_then(|n| n.parent())
        .and_then(|p| tree.node(p))
        .map(|p| p.children().to_vec())
        .unwrap_or_default();
    for sibling in siblings.into_iter().filter(|s| *s != item) {
        close(tree, sibling)?;
    }

    tree.open_popup(menu, item, placement)?;
    Ok(menu)
}

/// Close an item's submenu, and everything opened from it. Items without a
/// submenu are ignored.
pub fn close(tree: &mut Tree, item: impl Into<NodeId>) -> Result<()> {
    let Ok(control) = tree.control::<MenuItem>(item.into()) else {
        return Ok(());
    };
    let submenu = control.submenu;
    match submenu {
        Some(menu) => tree.close_popup(menu),
        None => Ok(()),
    }
}
