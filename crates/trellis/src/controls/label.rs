use unicode_width::UnicodeWidthStr;

use crate::{LayoutContext, control::Control, error::Result, geom::Size};

/// A text leaf.
///
/// Unwrapped, the label is as wide as its longest line in terminal columns
/// and one row per line. With wrapping enabled the text is re-flowed to the
/// width offered by the parent.
#[derive(Debug, Clone, Default)]
pub struct Label {
    /// Raw text.
    text: String,
    /// Wrap to the available width.
    wrap: bool,
    /// Lines from the last measure.
    lines: Vec<String>,
}

impl Label {
    /// Construct an unwrapped label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap: false,
            lines: Vec::new(),
        }
    }

    /// Enable wrapping.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines produced by the most recent measure.
    pub fn lines(&self) -> &[String] {
        &self.lines
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

    /// Enable or disable wrapping. Returns true if it changed.
    pub fn set_wrap(&mut self, wrap: bool) -> bool {
        if self.wrap == wrap {
            return false;
        }
        self.wrap = wrap;
        true
    }

    /// Lay the text out for a content width.
    fn flow(&self, width: u32) -> Vec<String> {
        if self.wrap && width > 0 {
            textwrap::wrap(&self.text, width as usize)
                .into_iter()
                .map(|l| l.into_owned())
                .collect()
        } else {
            self.text.lines().map(str::to_owned).collect()
        }
    }
}

/// Content size of a block of lines in terminal cells.
pub(crate) fn text_extent(lines: &[String]) -> Size {
    let w = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    Size::new(
        u32::try_from(w).unwrap_or(u32::MAX),
        u32::try_from(lines.len()).unwrap_or(u32::MAX),
    )
}

impl Control for Label {
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        let padding = ctx.layout().padding;
        self.lines = self.flow(available.shrink(padding).w);
        Ok(text_extent(&self.lines).grow(padding))
    }

    fn arrange(&mut self, _ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, controls::Panel, geom::Edges};

    #[test]
    fn measures_display_width() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let root = tree.root_id();
        let ascii = tree.add_child(root, Label::new("File"))?;
        let cjk = tree.add_child(root, Label::new("\u{5355}\u{5143}\u{6d4b}\u{8bd5}"))?;
        let multi = tree.add_child(root, Label::new("one\nthree"))?;
        tree.set_padding(ascii, Edges::symmetric(1, 0))?;

        assert_eq!(tree.measure(ascii, Size::new(40, 10))?, Size::new(6, 1));
        assert_eq!(tree.measure(cjk, Size::new(40, 10))?, Size::new(8, 1));
        assert_eq!(tree.measure(multi, Size::new(40, 10))?, Size::new(5, 2));
        Ok(())
    }

    #[test]
    fn wraps_to_available_width() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let label = tree.add_child(
            tree.root_id(),
            Label::new("the quick brown fox jumps").with_wrap(true),
        )?;
        assert_eq!(tree.measure(label, Size::new(10, 10))?, Size::new(9, 3));
        assert_eq!(
            tree.control::<Label>(label)?.lines(),
            &["the quick", "brown fox", "jumps"]
        );
        assert_eq!(tree.measure(label, Size::new(40, 10))?, Size::new(25, 1));
        Ok(())
    }

    #[test]
    fn empty_label_has_no_extent() -> Result<()> {
        let mut tree = Tree::new(Panel);
        let label = tree.add_child(tree.root_id(), Label::new(""))?;
        assert_eq!(tree.measure(label, Size::new(10, 10))?, Size::ZERO);
        Ok(())
    }
}
