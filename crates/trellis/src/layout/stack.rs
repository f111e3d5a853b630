//! The stack algorithm: children in a single row or column.
//!
//! A horizontal stack may hold one stretch child. When the row is narrower
//! than the stack, the stretch child's slot is widened to the leftover width
//! while the other children keep their measured widths. The leftover is the
//! inner width less the row and both horizontal paddings. Vertical stacks
//! have no stretch behaviour.

use crate::{
    LayoutContext, NodeId,
    error::{Error, Result},
    geom::{Axis, Rect, Size},
};

/// Measure children along `axis`. Each child is offered what the previous
/// children left over; the result is the total extent along the axis and the
/// largest extent across it, plus padding.
pub fn measure(ctx: &mut LayoutContext<'_>, available: Size, axis: Axis) -> Result<Size> {
    let padding = ctx.layout().padding;
    let mut remaining = available.shrink(padding);
    let mut total = Size::ZERO;

    for child in ctx.visible_children() {
        let desired = ctx.measure_child(child, remaining)?;
        match axis {
            Axis::Horizontal => {
                remaining.w = remaining.w.saturating_sub(desired.w);
                total.w = total.w.saturating_add(desired.w);
                total.h = total.h.max(desired.h);
            }
            Axis::Vertical => {
                remaining.h = remaining.h.saturating_sub(desired.h);
                total.h = total.h.saturating_add(desired.h);
                total.w = total.w.max(desired.w);
            }
        }
    }
    Ok(total.grow(padding))
}

/// Arrange children along `axis` inside a box of `size`.
///
/// Returns the extent actually used along the axis, which can exceed `size`
/// when the children overflow, and `size` across it.
pub fn arrange(ctx: &mut LayoutContext<'_>, size: Size, axis: Axis) -> Result<Size> {
    let padding = ctx.layout().padding;
    let inner = size.rect().shrink(padding);
    let children = ctx.visible_children();
    let stretch = stretch_child(ctx, &children)?;

    match axis {
        Axis::Horizontal => {
            let total = row(ctx, &children, inner, None)?;
            // The leftover is taken from the inner width with both paddings
            // counted against it again. No stretch when that goes negative.
            let used = padding.left.saturating_add(total);
            if let Some(stretch) = stretch
                && used < inner.w
                && let Some(leftover) = inner.w.checked_sub(used.saturating_add(padding.right))
            {
                tracing::trace!(?stretch, leftover, "stretching stack child");
                row(ctx, &children, inner, Some((stretch, leftover)))?;
            }
            Ok(Size::new(
                padding.horizontal().saturating_add(total),
                size.h,
            ))
        }
        Axis::Vertical => {
            let mut y = inner.tl.y;
            let mut total = 0u32;
            for child in &children {
                let h = ctx.measured_size(*child)?.h;
                ctx.arrange_child(*child, Rect::new(inner.tl.x, y, inner.w, h))?;
                y = y.saturating_add_unsigned(h);
                total = total.saturating_add(h);
            }
            Ok(Size::new(size.w, padding.vertical().saturating_add(total)))
        }
    }
}

/// Place one row of children and return their total measured width. The
/// cursor always advances by measured widths; only the stretch child's slot
/// is widened.
fn row(
    ctx: &mut LayoutContext<'_>,
    children: &[NodeId],
    inner: Rect,
    stretch: Option<(NodeId, u32)>,
) -> Result<u32> {
    let mut x = inner.tl.x;
    let mut total = 0u32;
    for child in children {
        let measured = ctx.measured_size(*child)?.w;
        let w = match stretch {
            Some((id, width)) if id == *child => width,
            _ => measured,
        };
        ctx.arrange_child(*child, Rect::new(x, inner.tl.y, w, inner.h))?;
        x = x.saturating_add_unsigned(measured);
        total = total.saturating_add(measured);
    }
    Ok(total)
}

/// Find the stretch child, failing if more than one is marked.
fn stretch_child(ctx: &LayoutContext<'_>, children: &[NodeId]) -> Result<Option<NodeId>> {
    let mut found = None;
    for child in children {
        if !ctx.child_layout(*child)?.stretch {
            continue;
        }
        if let Some(first) = found {
            return Err(Error::MultipleStretch {
                parent: ctx.node_id(),
                first,
                second: *child,
            });
        }
        found = Some(*child);
    }
    Ok(found)
}
