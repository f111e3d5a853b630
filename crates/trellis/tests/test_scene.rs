//! Integration tests for loading scenes from JSON files.

#[cfg(test)]
mod tests {
    use trellis::{
        NodeId,
        controls::{Label, Panel, menu},
        error::{Error, Result},
        geom::{Point, Rect},
        scene::Scene,
        testing::Harness,
    };

    const WINDOW: &str = include_str!("data/window.json");

    fn load(width: u32, height: u32) -> Result<Harness> {
        let mut h = Harness::new(Panel, width, height);
        let root = h.root();
        Scene::from_json(WINDOW)?.build(&mut h.tree, root)?;
        Ok(h)
    }

    fn named(h: &Harness, name: &str) -> Result<NodeId> {
        h.tree
            .find(name)
            .ok_or_else(|| Error::Invalid(format!("no node named {name}")))
    }

    #[test]
    fn window_scene_layout() -> Result<()> {
        let mut h = load(40, 12)?;
        h.layout()?;
        h.check()?;

        assert_eq!(h.rect(named(&h, "menubar")?)?, Rect::new(0, 0, 40, 1));
        assert_eq!(h.rect(named(&h, "status")?)?, Rect::new(0, 11, 40, 1));
        assert_eq!(h.rect(named(&h, "sidebar")?)?, Rect::new(0, 1, 12, 10));
        // The toolbar's bottom margin leaves a blank row above the body.
        assert_eq!(h.rect(named(&h, "toolbar")?)?, Rect::new(12, 1, 28, 1));
        // [new][open] take 11 columns; [help] takes 6 of the remaining 17.
        assert_eq!(h.rect(named(&h, "spacer")?)?, Rect::new(23, 1, 11, 1));
        assert_eq!(h.rect(named(&h, "body")?)?, Rect::new(12, 3, 28, 8));
        Ok(())
    }

    #[test]
    fn body_rewraps_on_resize() -> Result<()> {
        let mut h = load(40, 12)?;
        h.layout()?;
        let body = named(&h, "body")?;
        assert_eq!(h.tree.control::<Label>(body)?.lines().len(), 2);

        assert!(h.resize(30, 12)?);
        assert_eq!(h.tree.control::<Label>(body)?.lines().len(), 3);
        Ok(())
    }

    #[test]
    fn scene_menus_open_from_the_strip() -> Result<()> {
        let mut h = load(40, 12)?;
        let file = named(&h, "file")?;
        let popup = menu::open(&mut h.tree, file)?;
        h.layout()?;

        let rect = h.rect(popup)?;
        assert_eq!(rect.tl, Point::new(0, 1));
        // "Open" + gap + "Ctrl+O" plus item and menu padding.
        assert_eq!(rect.w, 16);
        assert_eq!(h.tree.locate(Point::new(2, 2)), h.tree.node(popup).map(|n| n.children()[0]));
        Ok(())
    }
}
