//! The dock compositor.
//!
//! Children are docked against the sides of the container in child order.
//! Each directional child peels a strip off the remaining rectangle, so
//! reordering children changes the result. Fill children share whatever is
//! left after every directional child has been placed.

use crate::{
    LayoutContext,
    error::Result,
    geom::{Edges, Rect, Size},
    layout::Dock,
};

/// Measure docked children and return the container's desired size, padding
/// included.
pub fn measure(ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
    let padding = ctx.layout().padding;
    let inner = available.shrink(padding);

    // Accumulated docked extent, and the running requirement perpendicular to
    // each dock direction.
    let mut acc = Size::ZERO;
    let mut parent = Size::ZERO;
    for child in ctx.visible_children() {
        let dock = ctx.child_layout(child)?.dock;
        let desired = ctx.measure_child(child, inner - acc)?;
        match dock {
            Dock::Left | Dock::Right => {
                parent.h = parent.h.max(acc.h.saturating_add(desired.h));
                acc.w = acc.w.saturating_add(desired.w);
            }
            Dock::Top | Dock::Bottom => {
                parent.w = parent.w.max(acc.w.saturating_add(desired.w));
                acc.h = acc.h.saturating_add(desired.h);
            }
            Dock::Fill => {
                parent.w = parent.w.max(acc.w.saturating_add(desired.w));
                parent.h = parent.h.max(acc.h.saturating_add(desired.h));
            }
        }
    }

    Ok(parent.max(acc).grow(padding))
}

/// Arrange docked children inside a box of `size` and return `size`.
pub fn arrange(ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
    let padding = ctx.layout().padding;
    let mut remaining = size.rect().shrink(padding);
    let mut fill = Vec::new();

    for child in ctx.visible_children() {
        let dock = ctx.child_layout(child)?.dock;
        let desired = ctx.measured_size(child)?;
        let slot = match dock {
            Dock::Fill => {
                fill.push(child);
                continue;
            }
            Dock::Top => {
                let h = desired.h.min(remaining.h);
                let slot = Rect { h, ..remaining };
                remaining = remaining.shrink(Edges::new(0, h, 0, 0));
                slot
            }
            Dock::Bottom => {
                let h = desired.h.min(remaining.h);
                let slot = Rect {
                    tl: remaining.tl.offset(0, remaining.h - h),
                    h,
                    ..remaining
                };
                remaining = remaining.shrink(Edges::new(0, 0, 0, h));
                slot
            }
            Dock::Left => {
                let w = desired.w.min(remaining.w);
                let slot = Rect { w, ..remaining };
                remaining = remaining.shrink(Edges::new(w, 0, 0, 0));
                slot
            }
            Dock::Right => {
                let w = desired.w.min(remaining.w);
                let slot = Rect {
                    tl: remaining.tl.offset(remaining.w - w, 0),
                    w,
                    ..remaining
                };
                remaining = remaining.shrink(Edges::new(0, 0, w, 0));
                slot
            }
        };
        ctx.arrange_child(child, slot)?;
    }

    for child in fill {
        ctx.arrange_child(child, remaining)?;
    }
    Ok(size)
}
