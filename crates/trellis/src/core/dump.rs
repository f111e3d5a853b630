use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::{
    NodeId, Tree,
    error::{Error, Result},
    geom::{Rect, Size},
};

/// Render a subtree as a table of names, docks, measured sizes, screen bounds
/// and state flags. This is a debug function.
pub fn dump(tree: &Tree, root: NodeId) -> Result<String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["node", "dock", "measured", "bounds", "state"]);
    dump_node(&mut table, tree, root, 0)?;
    Ok(table.to_string())
}

/// Format an optional size.
fn fmt_size(size: Option<Size>) -> String {
    size.map_or_else(|| "-".into(), |s| format!("{}x{}", s.w, s.h))
}

/// Format an optional rectangle.
fn fmt_rect(rect: Option<Rect>) -> String {
    rect.map_or_else(
        || "-".into(),
        |r| format!("({}, {}) {}x{}", r.tl.x, r.tl.y, r.w, r.h),
    )
}

/// Emit one row per node, depth first.
fn dump_node(table: &mut Table, tree: &Tree, node_id: NodeId, level: usize) -> Result<()> {
    let node = tree.node(node_id).ok_or(Error::NodeNotFound(node_id))?;

    let mut state = Vec::new();
    if node.is_dirty() {
        state.push("dirty");
    }
    if node.is_collapsed() {
        state.push("collapsed");
    }
    if node.layout().stretch {
        state.push("stretch");
    }
    if tree.is_popup(node_id) {
        state.push(if tree.is_open_popup(node_id) {
            "popup"
        } else {
            "popup (closed)"
        });
    }

    let name = Cell::new(format!("{}{}", "  ".repeat(level), node.name()));
    let name = if node.is_dirty() {
        name.fg(Color::Yellow)
    } else {
        name.fg(Color::Green)
    };
    table.add_row(vec![
        name,
        Cell::new(format!("{:?}", node.layout().dock).to_lowercase()),
        Cell::new(fmt_size(node.measured_size())),
        Cell::new(fmt_rect(tree.screen_bounds(node_id))),
        Cell::new(state.join(", ")),
    ]);

    for child in node.children() {
        dump_node(table, tree, *child, level + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Fixed, Panel};

    #[test]
    fn dump_lists_every_node() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let root = tree.root_id();
        let inner = tree.add_child(root, Panel)?;
        tree.add_child(inner, Fixed::new(2, 2))?;

        let before = dump(&tree, root)?;
        assert!(before.contains("dirty"));

        tree.layout(Size::new(10, 5))?;
        let after = dump(&tree, root)?;
        assert!(after.contains("fixed"));
        assert!(after.contains("(0, 0) 10x5"));
        assert!(!after.contains("dirty"));
        Ok(())
    }
}
