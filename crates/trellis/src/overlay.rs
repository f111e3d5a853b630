//! Popup placement against an anchor rectangle.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect, Size};

/// Side of the anchor a popup opens on.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Under the anchor, left edges aligned. Flips above when there is no room.
    #[default]
    Below,
    /// Right of the anchor, top edges aligned. Flips to the left when there
    /// is no room.
    Right,
}

/// Compute screen coordinates for a popup of `size` opened against `anchor`.
///
/// The popup is never larger than the screen. If the preferred side does not
/// fit it flips to the opposite side of the anchor, and if that does not fit
/// either it is clamped inside the screen.
pub fn place(anchor: Rect, size: Size, screen: Rect, placement: Placement) -> Rect {
    let size = size.min(screen.size());
    let (primary, flipped) = match placement {
        Placement::Below => (
            Point::new(anchor.tl.x, anchor.bottom()),
            Point::new(anchor.tl.x, anchor.tl.y.saturating_sub_unsigned(size.h)),
        ),
        Placement::Right => (
            Point::new(anchor.right(), anchor.tl.y),
            Point::new(anchor.tl.x.saturating_sub_unsigned(size.w), anchor.tl.y),
        ),
    };

    let fits = |tl: Point| screen.contains_rect(&size.at(tl));
    let chosen = if fits(primary) {
        primary
    } else if fits(flipped) {
        flipped
    } else {
        primary
    };
    size.at(chosen).clamp_within(screen)
}
