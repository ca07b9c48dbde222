//! Screen-space rectangles and offsets.
//!
//! Coordinates follow the DOM convention: `left`/`top` grow right and down,
//! units are CSS pixels.

use serde::{Deserialize, Serialize};

/// A translation applied to an element relative to its resting position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
}

impl Offset {
    /// No translation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create an offset.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Add a pointer delta to this offset.
    #[must_use]
    pub fn moved_by(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether this offset leaves the element where it rests.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

/// An axis-aligned bounding box, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Centre point as `(x, y)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// This rectangle moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Offset) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            ..*self
        }
    }

    /// Inclusive overlap test: rectangles that merely touch overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.left
            || self.left > other.right()
            || self.bottom() < other.top
            || self.top > other.bottom())
    }

    /// Euclidean distance between the two centres.
    #[must_use]
    pub fn center_distance(&self, other: &Rect) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }

    /// Offset that moves this rectangle so its centre sits on `target`'s centre.
    #[must_use]
    pub fn offset_to_center_on(&self, target: &Rect) -> Offset {
        Offset::new(
            target.left - self.left + (target.width - self.width) / 2.0,
            target.top - self.top + (target.height - self.height) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn disjoint_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.5, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -20.0, 10.0, 10.0)));
    }

    #[test]
    fn contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn center_distance_is_euclidean() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 4.0, 2.0, 2.0);
        assert!((a.center_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn offset_centres_on_target() {
        let element = Rect::new(10.0, 10.0, 20.0, 20.0);
        let slot = Rect::new(100.0, 50.0, 60.0, 40.0);
        let offset = element.offset_to_center_on(&slot);
        assert_eq!(element.translated(offset).center(), slot.center());
    }
}
