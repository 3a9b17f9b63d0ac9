//! Placement overlap checks.
//!
//! The default test compares axis-aligned bounding boxes. It is exact for
//! footprints at quarter-turn rotations and conservative otherwise. When both
//! footprints of a pair are rotated off-axis, the boxes can report an overlap
//! that the real outlines do not have. [`CollisionMode::Oriented`] resolves such
//! pairs with a separating-axis test. It is opt-in only and never the default.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use serde::{Deserialize, Serialize};

use crate::footprint::{Footprint, Point};
use crate::shop::{PlacementId, Shop};

/// How two footprints are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Bounding box against bounding box.
    #[default]
    Aabb,
    /// Bounding boxes first, then a separating-axis check for pairs where
    /// both footprints are rotated off-axis.
    Oriented,
}

/// Whether `candidate` can sit on the shop floor without overlapping any
/// placement other than `ignore_id`. Uses the bounding-box test.
#[must_use]
pub fn can_place(shop: &Shop, candidate: &Footprint, ignore_id: Option<PlacementId>) -> bool {
    first_collision(shop, candidate, ignore_id, CollisionMode::Aabb).is_none()
}

/// [`can_place`] with an explicit collision mode.
#[must_use]
pub fn can_place_with(shop: &Shop, candidate: &Footprint, ignore_id: Option<PlacementId>, mode: CollisionMode) -> bool {
    first_collision(shop, candidate, ignore_id, mode).is_none()
}

/// Id of the first placement, in draw order, that `candidate` overlaps.
#[must_use]
pub fn first_collision(
    shop: &Shop,
    candidate: &Footprint,
    ignore_id: Option<PlacementId>,
    mode: CollisionMode,
) -> Option<PlacementId> {
    let candidate_box = candidate.bounding_box();
    shop.placements()
        .iter()
        .filter(|other| Some(other.id) != ignore_id)
        .find(|other| {
            candidate_box.overlaps(&other.footprint.bounding_box())
                && (mode == CollisionMode::Aabb || footprints_overlap(candidate, &other.footprint))
        })
        .map(|other| other.id)
}

/// Exact overlap of two footprints whose bounding boxes already overlap.
///
/// When either footprint is axis-aligned the box answer is kept as-is, so only
/// rotated-vs-rotated pairs change behavior.
fn footprints_overlap(a: &Footprint, b: &Footprint) -> bool {
    if a.is_axis_aligned() || b.is_axis_aligned() {
        return true;
    }
    let ca = a.corners();
    let cb = b.corners();
    edge_normals(&ca).into_iter().chain(edge_normals(&cb)).all(|axis| {
        let (min_a, max_a) = project(&ca, axis);
        let (min_b, max_b) = project(&cb, axis);
        max_a > min_b && max_b > min_a
    })
}

/// The two distinct edge normals of a rectangle.
fn edge_normals(corners: &[Point; 4]) -> [Point; 2] {
    [0, 1].map(|i| {
        let edge = Point::new(corners[i + 1].x - corners[i].x, corners[i + 1].y - corners[i].y);
        Point::new(-edge.y, edge.x)
    })
}

fn project(corners: &[Point; 4], axis: Point) -> (f64, f64) {
    corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        let d = c.x * axis.x + c.y * axis.y;
        (lo.min(d), hi.max(d))
    })
}
