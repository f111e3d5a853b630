use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::{Axis, Edges, Point, Rect};

/// A `Size` has a width and height but no location.
///
/// Arithmetic saturates: subtracting a larger size or a padding that does not
/// fit produces a zero dimension rather than wrapping.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self { w: 0, h: 0 };

    /// Construct a size.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The area of this size.
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Return a `Rect` with these dimensions located at `tl`.
    pub fn at(&self, tl: Point) -> Rect {
        Rect {
            tl,
            w: self.w,
            h: self.h,
        }
    }

    /// Return a `Rect` with these dimensions located at the origin.
    pub fn rect(&self) -> Rect {
        self.at(Point::zero())
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Grow by an inset on each side.
    pub fn grow(&self, edges: Edges) -> Self {
        Self {
            w: self.w.saturating_add(edges.horizontal()),
            h: self.h.saturating_add(edges.vertical()),
        }
    }

    /// Shrink by an inset on each side, clamping at zero.
    pub fn shrink(&self, edges: Edges) -> Self {
        Self {
            w: self.w.saturating_sub(edges.horizontal()),
            h: self.h.saturating_sub(edges.vertical()),
        }
    }

    /// Componentwise minimum.
    pub fn min(&self, other: Self) -> Self {
        Self {
            w: self.w.min(other.w),
            h: self.h.min(other.h),
        }
    }

    /// Componentwise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }

    /// The dimension along an axis.
    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }
}

impl Add for Size {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            w: self.w.saturating_add(other.w),
            h: self.h.saturating_add(other.h),
        }
    }
}

impl Sub for Size {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            w: self.w.saturating_sub(other.w),
            h: self.h.saturating_sub(other.h),
        }
    }
}

impl Add<Edges> for Size {
    type Output = Self;

    fn add(self, edges: Edges) -> Self {
        self.grow(edges)
    }
}

impl Sub<Edges> for Size {
    type Output = Self;

    fn sub(self, edges: Edges) -> Self {
        self.shrink(edges)
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Size {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
