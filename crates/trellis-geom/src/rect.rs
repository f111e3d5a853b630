use serde::{Deserialize, Serialize};

use super::{Edges, Point, Size};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Does this rect have a zero size?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The size of this rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// The exclusive right edge.
    pub fn right(&self) -> i32 {
        self.tl.x.saturating_add_unsigned(self.w)
    }

    /// The exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.tl.y.saturating_add_unsigned(self.h)
    }

    /// Move the rectangle by a signed offset.
    pub fn translate(&self, by: Point) -> Self {
        Self {
            tl: self.tl + by,
            ..*self
        }
    }

    /// The same size at a different location.
    pub fn at(&self, tl: Point) -> Self {
        Self { tl, ..*self }
    }

    /// Shrink the rectangle by an inset on each side. Dimensions clamp at zero,
    /// and the origin never moves past the far edge.
    pub fn shrink(&self, edges: Edges) -> Self {
        let w = self.w.saturating_sub(edges.horizontal());
        let h = self.h.saturating_sub(edges.vertical());
        Self {
            tl: self.tl.offset(edges.left.min(self.w), edges.top.min(self.h)),
            w,
            h,
        }
    }

    /// Grow the rectangle by an inset on each side.
    pub fn grow(&self, edges: Edges) -> Self {
        Self {
            tl: Point {
                x: self.tl.x.saturating_sub_unsigned(edges.left),
                y: self.tl.y.saturating_sub_unsigned(edges.top),
            },
            w: self.w.saturating_add(edges.horizontal()),
            h: self.h.saturating_add(edges.vertical()),
        }
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose `other`?
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.tl.x >= self.tl.x
            && other.tl.y >= self.tl.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The overlapping region of two rectangles, if they overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.tl.x.max(other.tl.x);
        let top = self.tl.y.max(other.tl.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(
            left,
            top,
            right.abs_diff(left),
            bottom.abs_diff(top),
        ))
    }

    /// Move this rectangle so that it lies inside `bounds`, shrinking it if it
    /// is larger than `bounds` in either dimension.
    pub fn clamp_within(&self, bounds: Self) -> Self {
        let w = self.w.min(bounds.w);
        let h = self.h.min(bounds.h);
        let max_x = bounds.right().saturating_sub_unsigned(w);
        let max_y = bounds.bottom().saturating_sub_unsigned(h);
        Self {
            tl: Point {
                x: self.tl.x.clamp(bounds.tl.x, max_x),
                y: self.tl.y.clamp(bounds.tl.y, max_y),
            },
            w,
            h,
        }
    }
}

impl From<Size> for Rect {
    fn from(s: Size) -> Self {
        s.rect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn shrink_and_grow() {
        let r = Rect::new(10, 10, 10, 10);
        assert_eq!(r.shrink(Edges::all(1)), Rect::new(11, 11, 8, 8));
        assert_eq!(r.shrink(Edges::new(1, 2, 3, 4)), Rect::new(11, 12, 6, 4));
        assert_eq!(r.grow(Edges::all(1)), Rect::new(9, 9, 12, 12));
        // Over-constrained insets collapse the rectangle instead of wrapping.
        let collapsed = r.shrink(Edges::all(20));
        assert_eq!(collapsed.size(), Size::ZERO);
        assert_eq!(collapsed.tl, Point::new(20, 20));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&Rect::new(5, 5, 10, 10)), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 5, 5)), None);
        assert_eq!(
            a.intersect(&Rect::new(-5, -5, 10, 10)),
            Some(Rect::new(0, 0, 5, 5))
        );
    }

    #[test]
    fn contains() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.contains_point(Point::new(0, 0)));
        assert!(a.contains_point(Point::new(9, 9)));
        assert!(!a.contains_point(Point::new(10, 9)));
        assert!(!a.contains_point(Point::new(-1, 0)));
        assert!(a.contains_rect(&Rect::new(2, 2, 8, 8)));
        assert!(!a.contains_rect(&Rect::new(2, 2, 9, 8)));
    }

    #[test]
    fn clamp_within() {
        let screen = Rect::new(0, 0, 100, 50);
        assert_eq!(
            Rect::new(90, 45, 20, 10).clamp_within(screen),
            Rect::new(80, 40, 20, 10)
        );
        assert_eq!(
            Rect::new(-5, -5, 20, 10).clamp_within(screen),
            Rect::new(0, 0, 20, 10)
        );
        assert_eq!(
            Rect::new(10, 10, 200, 10).clamp_within(screen),
            Rect::new(0, 10, 100, 10)
        );
    }

    proptest! {
        #[test]
        fn clamped_rect_is_inside(x in -500i32..500, y in -500i32..500, w in 0u32..400, h in 0u32..400) {
            let screen = Rect::new(0, 0, 200, 100);
            let r = Rect::new(x, y, w, h).clamp_within(screen);
            prop_assert!(screen.contains_rect(&r));
        }

        #[test]
        fn intersection_is_contained(x in -50i32..50, y in -50i32..50, w in 0u32..100, h in 0u32..100) {
            let a = Rect::new(0, 0, 40, 40);
            let b = Rect::new(x, y, w, h);
            if let Some(i) = a.intersect(&b) {
                prop_assert!(a.contains_rect(&i));
                prop_assert!(b.contains_rect(&i));
            }
        }
    }
}
