use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A signed 2D point in integer coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the origin point.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Return true when both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Shift the point by an unsigned offset, saturating at the coordinate limits.
    pub fn offset(&self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x.saturating_add_unsigned(dx),
            y: self.y.saturating_add_unsigned(dy),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add() {
        assert_eq!(Point::zero() + (1, 1).into(), (1, 1).into());
        assert_eq!(Point::new(-3, 2) + (1, 0).into(), (-2, 2).into());
        assert_eq!(Point::new(i32::MAX, 0) + (1, 0).into(), (i32::MAX, 0).into());
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(Point::new(-2, 0).offset(5, 1), Point::new(3, 1));
        assert_eq!(Point::new(i32::MAX, 0).offset(10, 0).x, i32::MAX);
    }
}
