//! Integration tests for menu strips and nested popup menus.

#[cfg(test)]
mod tests {
    use trellis::{
        NodeId,
        controls::{
            Label, MenuItem, MenuStrip, Panel,
            menu::{self, add_item, submenu},
        },
        error::{Error, Result},
        geom::{Point, Rect},
        layout::{Align, Dock},
        testing::Harness,
    };

    /// Items of a chain of nested submenus, outermost first.
    struct Chain {
        /// Strip item that opens the chain.
        top: NodeId,
        /// Items that open the next level, in order.
        items: Vec<NodeId>,
    }

    /// A window with a menu strip, a deep chain of submenus and a centered
    /// label filling the rest.
    fn window(width: u32, height: u32) -> Result<(Harness, NodeId, Chain)> {
        let mut h = Harness::new(Panel, width, height);
        let root = h.root();
        let strip = h.tree.add_child(root, MenuStrip)?;

        let file = add_item(&mut h.tree, strip, MenuItem::new("File"))?;
        let file_menu = submenu(&mut h.tree, file)?;
        for (text, accel) in [("Load", "Ctrl+L"), ("Save", "Ctrl+S"), ("Quit", "Ctrl+Q")] {
            add_item(&mut h.tree, file_menu, MenuItem::new(text).with_accelerator(accel))?;
        }

        let top = add_item(&mut h.tree, strip, MenuItem::new("Submenu"))?;
        let mut items = Vec::new();
        let mut parent = top;
        for level in ["Six", "Six.Six", "Camel", "Hair", "Red"] {
            let menu = submenu(&mut h.tree, parent)?;
            add_item(&mut h.tree, menu, MenuItem::new("Sheep"))?;
            parent = add_item(&mut h.tree, menu, MenuItem::new(level))?;
            items.push(parent);
        }
        let last = submenu(&mut h.tree, parent)?;
        add_item(&mut h.tree, last, MenuItem::new("Dark"))?;

        let label = h.tree.add_child(root, Label::new("Right Click Me"))?;
        h.tree.set_align(label, Align::Center, Align::Center)?;
        Ok((h, label, Chain { top, items }))
    }

    #[test]
    fn strip_docks_top_and_label_centers() -> Result<()> {
        let (mut h, label, _) = window(80, 24)?;
        h.layout()?;
        h.check()?;

        let strip = h
            .tree
            .find("menu_strip")
            .ok_or(Error::Invalid("strip".into()))?;
        assert_eq!(h.tree.node(strip).map(|n| n.layout().dock), Some(Dock::Top));
        assert_eq!(h.rect(strip)?, Rect::new(0, 0, 80, 1));
        // 14 columns centered in 80x23 below the strip.
        assert_eq!(h.rect(label)?, Rect::new(33, 12, 14, 1));
        Ok(())
    }

    #[test]
    fn nested_chain_cascades_right() -> Result<()> {
        let (mut h, _, chain) = window(120, 30)?;
        menu::open(&mut h.tree, chain.top)?;
        for item in &chain.items {
            menu::open(&mut h.tree, *item)?;
        }
        h.layout()?;
        h.check()?;
        assert_eq!(h.tree.open_popups().len(), chain.items.len() + 1);

        for item in &chain.items {
            let anchor = h.rect(*item)?;
            let menu = h
                .tree
                .control::<MenuItem>(*item)?
                .submenu()
                .ok_or(Error::Invalid("submenu".into()))?;
            let placed = h.rect(menu)?;
            assert_eq!(placed.tl, Point::new(anchor.right(), anchor.tl.y));
        }
        Ok(())
    }

    #[test]
    fn narrow_screen_flips_and_clamps() -> Result<()> {
        let (mut h, _, chain) = window(40, 12)?;
        menu::open(&mut h.tree, chain.top)?;
        for item in &chain.items {
            menu::open(&mut h.tree, *item)?;
        }
        h.layout()?;

        let screen = Rect::new(0, 0, 40, 12);
        for popup in h.tree.open_popups() {
            assert!(screen.contains_rect(&h.rect(popup)?));
        }
        Ok(())
    }

    #[test]
    fn reopening_an_open_menu_keeps_nested_menus_placed() -> Result<()> {
        let (mut h, _, chain) = window(80, 24)?;
        let top_menu = menu::open(&mut h.tree, chain.top)?;
        let nested = menu::open(&mut h.tree, chain.items[0])?;
        h.layout()?;
        let before = h.rect(nested)?;

        // Clicking the strip item again while its menu is open.
        assert_eq!(menu::open(&mut h.tree, chain.top)?, top_menu);
        assert_eq!(h.tree.open_popups(), vec![top_menu, nested]);
        assert!(h.layout()?);
        h.check()?;
        assert_eq!(h.rect(nested)?, before);

        let anchor = h.rect(chain.items[0])?;
        assert_eq!(before.tl, Point::new(anchor.right(), anchor.tl.y));

        // Later passes keep working.
        assert!(h.resize(70, 24)?);
        h.check()?;
        Ok(())
    }

    #[test]
    fn closing_the_top_closes_the_chain() -> Result<()> {
        let (mut h, label, chain) = window(120, 30)?;
        menu::open(&mut h.tree, chain.top)?;
        for item in &chain.items {
            menu::open(&mut h.tree, *item)?;
        }
        h.layout()?;
        let deepest = h.rect(chain.items[chain.items.len() - 1])?;

        menu::close(&mut h.tree, chain.top)?;
        assert!(h.tree.open_popups().is_empty());
        h.layout()?;
        h.check()?;
        assert_ne!(h.tree.locate(deepest.tl), Some(chain.items[chain.items.len() - 1]));
        let label_rect = h.rect(label)?;
        assert_eq!(h.tree.locate(label_rect.tl), Some(label));
        Ok(())
    }
}
