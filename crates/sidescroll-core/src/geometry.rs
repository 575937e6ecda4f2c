//! Axis-aligned rectangles and facing directions.
//!
//! All geometry uses screen-style coordinates: `x` grows to the right and `y`
//! grows downward, so a rectangle's `bottom()` is numerically larger than its
//! `top()`. Vectors (velocities, directions) are [`glam::Vec2`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its top-left corner and size.
///
/// # Example
///
/// ```
/// use sidescroll_core::geometry::Rect;
///
/// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let b = Rect::new(5.0, 5.0, 10.0, 10.0);
/// let c = Rect::new(10.0, 0.0, 10.0, 10.0);
///
/// assert!(a.intersects(&b));
/// // Touching edges do not overlap.
/// assert!(!a.intersects(&c));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle of `size` whose centre is `center`.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x * 0.5,
            center.y - size.y * 0.5,
            size.x,
            size.y,
        )
    }

    /// Creates a rectangle of `size` whose top-left corner is `position`.
    #[must_use]
    pub fn from_position(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Moves the rectangle so its left edge is at `x`.
    pub fn set_left(&mut self, x: f32) {
        self.x = x;
    }

    /// Moves the rectangle so its right edge is at `x`.
    pub fn set_right(&mut self, x: f32) {
        self.x = x - self.w;
    }

    /// Moves the rectangle so its top edge is at `y`.
    pub fn set_top(&mut self, y: f32) {
        self.y = y;
    }

    /// Moves the rectangle so its bottom edge is at `y`.
    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    /// Moves the rectangle so its top-left corner is at `position`.
    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Moves the rectangle by `delta` in place.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Returns a copy moved by `delta`.
    #[must_use]
    pub fn translated(mut self, delta: Vec2) -> Self {
        self.translate(delta);
        self
    }

    /// Returns `true` if the two rectangles overlap with positive area.
    ///
    /// Rectangles that only share an edge do not intersect. This is what lets
    /// an entity rest on a platform (`bottom == top`) without being pushed
    /// out of it every tick.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Horizontal facing of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward negative `x`.
    Left,
    /// Facing toward positive `x`.
    #[default]
    Right,
}

impl Facing {
    /// Returns `-1.0` for [`Facing::Left`] and `1.0` for [`Facing::Right`].
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Unit vector pointing in the facing direction.
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// Facing for a movement direction, or `None` when standing still.
    #[must_use]
    pub fn from_direction(direction: i8) -> Option<Self> {
        match direction.signum() {
            -1 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rect_tests {
        use super::*;

        #[test]
        fn edges() {
            let r = Rect::new(10.0, 20.0, 40.0, 60.0);
            assert_eq!(r.left(), 10.0);
            assert_eq!(r.right(), 50.0);
            assert_eq!(r.top(), 20.0);
            assert_eq!(r.bottom(), 80.0);
            assert_eq!(r.center(), Vec2::new(30.0, 50.0));
        }

        #[test]
        fn from_center_round_trips_center() {
            let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(15.0, 5.0));
            assert_eq!(r.center(), Vec2::new(100.0, 50.0));
            assert_eq!(r.size(), Vec2::new(15.0, 5.0));
        }

        #[test]
        fn edge_setters_preserve_size() {
            let mut r = Rect::new(0.0, 0.0, 40.0, 60.0);
            r.set_right(100.0);
            assert_eq!(r.left(), 60.0);
            r.set_bottom(460.0);
            assert_eq!(r.top(), 400.0);
            assert_eq!(r.size(), Vec2::new(40.0, 60.0));
        }

        #[test]
        fn overlap_is_strict() {
            let a = Rect::new(0.0, 0.0, 10.0, 10.0);
            assert!(a.intersects(&Rect::new(9.0, 9.0, 10.0, 10.0)));
            assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
            assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        }

        #[test]
        fn contained_rect_intersects() {
            let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
            let inner = Rect::new(10.0, 10.0, 5.0, 5.0);
            assert!(outer.intersects(&inner));
            assert!(inner.intersects(&outer));
        }

        #[test]
        fn translate_moves_position() {
            let r = Rect::new(1.0, 2.0, 3.0, 4.0).translated(Vec2::new(10.0, -2.0));
            assert_eq!(r.position(), Vec2::new(11.0, 0.0));
        }
    }

    mod facing_tests {
        use super::*;

        #[test]
        fn sign_and_unit() {
            assert_eq!(Facing::Left.sign(), -1.0);
            assert_eq!(Facing::Right.unit(), Vec2::X);
        }

        #[test]
        fn from_direction() {
            assert_eq!(Facing::from_direction(-1), Some(Facing::Left));
            assert_eq!(Facing::from_direction(1), Some(Facing::Right));
            assert_eq!(Facing::from_direction(0), None);
        }
    }
}
