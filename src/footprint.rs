//! Oriented equipment footprints and their axis-aligned bounding boxes.
//!
//! Every spatial check in the engine (collision, clearance, clamping) works on
//! the [`Bounds`] of a rotated footprint rather than the rotated rectangle
//! itself. The box is conservative: for footprints that are not rotated by a
//! quarter turn it is larger than the footprint, so two rotated items can be
//! reported as overlapping while their actual outlines are apart.

#[cfg(test)]
#[path = "footprint_test.rs"]
mod footprint_test;

use serde::{Deserialize, Serialize};

use crate::consts::{AXIS_ALIGNED_TOLERANCE_DEG, CONTAINMENT_EPSILON};

/// A point in either shop space (feet) or screen space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box. All four edges live in one coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Box of half-extents `(ex, ey)` around `center`.
    #[must_use]
    pub fn around(center: Point, ex: f64, ey: f64) -> Self {
        Self { left: center.x - ex, right: center.x + ex, top: center.y - ey, bottom: center.y + ey }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Overlap test. Boxes that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.right <= other.left
            || self.left >= other.right
            || self.bottom <= other.top
            || self.top >= other.bottom)
    }

    /// Whether the box lies within `[0, width_ft] × [0, depth_ft]`. Touching a wall is inside.
    #[must_use]
    pub fn within_shop(&self, width_ft: f64, depth_ft: f64) -> bool {
        self.left >= 0.0 && self.right <= width_ft && self.top >= 0.0 && self.bottom <= depth_ft
    }
}

/// One oriented rectangle on the shop floor.
///
/// `rotation_deg` turns the rectangle clockwise on screen (y grows downward)
/// around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub center: Point,
    pub width_ft: f64,
    pub depth_ft: f64,
    pub rotation_deg: f64,
}

impl Footprint {
    #[must_use]
    pub fn new(center: Point, width_ft: f64, depth_ft: f64, rotation_deg: f64) -> Self {
        Self { center, width_ft, depth_ft, rotation_deg: normalize_rotation(rotation_deg) }
    }

    /// Same footprint moved to `center`.
    #[must_use]
    pub fn at(self, center: Point) -> Self {
        Self { center, ..self }
    }

    /// Projected half-extents `(ex, ey)` of the rotated rectangle.
    #[must_use]
    pub fn half_extents(&self) -> (f64, f64) {
        half_extents(self.width_ft, self.depth_ft, self.rotation_deg)
    }

    /// Axis-aligned bounding box of the rotated rectangle.
    #[must_use]
    pub fn bounding_box(&self) -> Bounds {
        bounding_box(self.center, self.width_ft, self.depth_ft, self.rotation_deg)
    }

    /// Whether the footprint is rotated by a whole number of quarter turns.
    #[must_use]
    pub fn is_axis_aligned(&self) -> bool {
        quarter_turns(self.rotation_deg).is_some()
    }

    /// Rotation-exact containment: `p` is moved into the footprint's local
    /// frame and compared against the half-width and half-depth. Edges count as inside.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        let (sin, cos) = sin_cos_deg(self.rotation_deg);
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let local_x = dx * cos + dy * sin;
        let local_y = -dx * sin + dy * cos;
        local_x.abs() <= self.width_ft / 2.0 + CONTAINMENT_EPSILON
            && local_y.abs() <= self.depth_ft / 2.0 + CONTAINMENT_EPSILON
    }

    /// The four rotated corners, clockwise from the local top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let hw = self.width_ft / 2.0;
        let hh = self.depth_ft / 2.0;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(lx, ly)| self.to_world(lx, ly))
    }

    /// Map a local-frame offset into shop coordinates.
    #[must_use]
    pub fn to_world(&self, local_x: f64, local_y: f64) -> Point {
        let (sin, cos) = sin_cos_deg(self.rotation_deg);
        Point::new(
            self.center.x + local_x * cos - local_y * sin,
            self.center.y + local_x * sin + local_y * cos,
        )
    }
}

/// Axis-aligned bounding box of a `width_ft × depth_ft` rectangle rotated by
/// `rotation_deg` around `center`.
#[must_use]
pub fn bounding_box(center: Point, width_ft: f64, depth_ft: f64, rotation_deg: f64) -> Bounds {
    let (ex, ey) = half_extents(width_ft, depth_ft, rotation_deg);
    Bounds::around(center, ex, ey)
}

/// `ex = |cos θ|·w/2 + |sin θ|·d/2`, `ey = |sin θ|·w/2 + |cos θ|·d/2`.
#[must_use]
pub fn half_extents(width_ft: f64, depth_ft: f64, rotation_deg: f64) -> (f64, f64) {
    let (sin, cos) = sin_cos_deg(rotation_deg);
    let hw = width_ft / 2.0;
    let hh = depth_ft / 2.0;
    (cos.abs() * hw + sin.abs() * hh, sin.abs() * hw + cos.abs() * hh)
}

/// Wrap any angle into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative angle rounds up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// `(sin, cos)` of an angle in degrees. Quarter turns return exact values so
/// axis-aligned boxes keep the footprint's exact width and depth.
#[must_use]
pub fn sin_cos_deg(deg: f64) -> (f64, f64) {
    match quarter_turns(deg) {
        Some(0) => (0.0, 1.0),
        Some(1) => (1.0, 0.0),
        Some(2) => (0.0, -1.0),
        Some(3) => (-1.0, 0.0),
        _ => deg.to_radians().sin_cos(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quarter_turns(deg: f64) -> Option<u8> {
    let turns = normalize_rotation(deg) / 90.0;
    let nearest = turns.round();
    if (turns - nearest).abs() * 90.0 > AXIS_ALIGNED_TOLERANCE_DEG {
        return None;
    }
    Some((nearest as i64).rem_euclid(4) as u8)
}
