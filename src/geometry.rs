//! Axis-aligned rectangles and the little vector math the simulation needs.
//!
//! Screen convention: x grows to the right, y grows downward.

use glam::DVec2;

/// Axis-aligned bounding rectangle, stored as top-left corner plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A `w`×`h` rectangle whose center sits on `center`.
    pub fn centered_at(center: DVec2, (w, h): (f64, f64)) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translate(&self, delta: DVec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// True when `other` lies fully inside `self`.  Shared edges count as inside.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True when the interiors intersect.  Rectangles that only touch along an
    /// edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Cartesian displacement of length `speed` along `angle` (radians).
pub fn from_polar(speed: f64, angle: f64) -> DVec2 {
    DVec2::from_angle(angle) * speed
}

/// Angle of the ray from `from` to `to`, in radians, via `atan2(dy, dx)`.
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}
