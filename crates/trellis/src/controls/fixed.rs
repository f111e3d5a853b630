use crate::{LayoutContext, control::Control, error::Result, geom::Size};

/// A leaf with a fixed intrinsic size.
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    /// Content size, padding excluded.
    size: Size,
}

impl Fixed {
    /// Construct a leaf of `w` by `h`.
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            size: Size::new(w, h),
        }
    }

    /// The content size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Change the content size. Returns true if it changed.
    pub fn set_size(&mut self, size: Size) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }
}

impl Control for Fixed {
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, _available: Size) -> Result<Size> {
        Ok(self.size.grow(ctx.layout().padding))
    }

    fn arrange(&mut self, _ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        Ok(size)
    }
}
