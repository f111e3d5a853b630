//! Declarative scene descriptions.
//!
//! A scene is a JSON tree of nodes. Each node names its control with a `kind`
//! field, may carry a `name` and a full `layout`, and lists its `children`:
//!
//! ```json
//! {
//!   "kind": "panel",
//!   "children": [
//!     { "kind": "menu_strip", "children": [
//!       { "kind": "menu_item", "text": "File", "children": [
//!         { "kind": "menu_item", "text": "Quit", "accelerator": "Ctrl+Q" }
//!       ]}
//!     ]},
//!     { "kind": "label", "text": "hello", "layout": { "align_h": "center" } }
//!   ]
//! }
//! ```
//!
//! The children of a `menu_item` become the items of its submenu. A `layout`
//! object replaces the control's default layout entirely; omitted fields take
//! the [`Layout`] defaults.

use serde::{Deserialize, Serialize};

use crate::{
    NodeId, Tree,
    controls::{Fixed, Label, Menu, MenuItem, MenuStrip, Panel, StackLayout, menu},
    error::Result,
    layout::Layout,
    state::NodeName,
};

/// The control a scene node instantiates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlSpec {
    /// A [`Panel`].
    Panel,
    /// A [`StackLayout`].
    Stack {
        /// Row instead of column.
        #[serde(default)]
        horizontal: bool,
    },
    /// A [`Label`].
    Label {
        /// Label text.
        text: String,
        /// Wrap to the available width.
        #[serde(default)]
        wrap: bool,
    },
    /// A [`Fixed`] leaf.
    Fixed {
        /// Width.
        w: u32,
        /// Height.
        h: u32,
    },
    /// A [`MenuStrip`].
    MenuStrip,
    /// A context [`Menu`]. Menus are popups and always attach to the root,
    /// whatever the enclosing node.
    Menu,
    /// A [`MenuItem`]; only valid inside a strip, a menu or another item.
    MenuItem {
        /// Item text.
        text: String,
        /// Accelerator hint.
        #[serde(default)]
        accelerator: Option<String>,
        /// Reserve a check column.
        #[serde(default)]
        checkable: bool,
    },
}

/// One node of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Node name, overriding the control's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NodeName>,
    /// The control.
    #[serde(flatten)]
    pub control: ControlSpec,
    /// Layout properties, replacing the control's defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    /// Children in placement order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

/// A parsed scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    /// The scene's top node.
    pub root: NodeSpec,
}

impl Scene {
    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Instantiate the scene under `parent` and return the top node.
    pub fn build(&self, tree: &mut Tree, parent: impl Into<NodeId>) -> Result<NodeId> {
        let id = build_node(tree, parent.into(), &self.root)?;
        tracing::debug!(top = ?id, nodes = tree.len(), "scene built");
        Ok(id)
    }
}

/// Create one node and its subtree.
fn build_node(tree: &mut Tree, parent: NodeId, spec: &NodeSpec) -> Result<NodeId> {
    let id = match &spec.control {
        ControlSpec::Menu => tree.add_popup(Menu)?,
        ControlSpec::MenuItem {
            text,
            accelerator,
            checkable,
        } => {
            let mut item = MenuItem::new(text.clone()).with_checkable(*checkable);
            if let Some(accel) = accelerator {
                item = item.with_accelerator(accel.clone());
            }
            // Nested items go into the enclosing item's submenu.
            let parent = if tree.control::<MenuItem>(parent).is_ok() {
                menu::submenu(tree, parent)?
            } else {
                parent
            };
            menu::add_item(tree, parent, item)?
        }
        ControlSpec::Panel => tree.add_child(parent, Panel)?,
        ControlSpec::Stack { horizontal } => {
            tree.add_child(parent, StackLayout::new(*horizontal))?
        }
        ControlSpec::Label { text, wrap } => {
            tree.add_child(parent, Label::new(text.clone()).with_wrap(*wrap))?
        }
        ControlSpec::Fixed { w, h } => tree.add_child(parent, Fixed::new(*w, *h))?,
        ControlSpec::MenuStrip => tree.add_child(parent, MenuStrip)?,
    };

    if let Some(name) = &spec.name {
        tree.set_name(id, name.clone())?;
    }
    if let Some(layout) = spec.layout {
        tree.set_layout(id, layout)?;
    }
    for child in &spec.children {
        build_node(tree, id, child)?;
    }
    Ok(id)
}
