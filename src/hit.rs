//! Finding the placement under the pointer.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::footprint::Point;
use crate::shop::Placement;

/// How a point is tested against a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitMode {
    /// Against the rotated footprint, matching what is drawn.
    #[default]
    Exact,
    /// Against the unrotated width × depth rectangle, ignoring rotation.
    Unrotated,
}

/// Whether `point` (feet) falls on `placement`. Edges count as hits.
#[must_use]
pub fn hits(placement: &Placement, point: Point, mode: HitMode) -> bool {
    let fp = &placement.footprint;
    match mode {
        HitMode::Exact => fp.contains_point(point),
        HitMode::Unrotated => {
            let hw = fp.width_ft / 2.0;
            let hh = fp.depth_ft / 2.0;
            point.x >= fp.center.x - hw
                && point.x <= fp.center.x + hw
                && point.y >= fp.center.y - hh
                && point.y <= fp.center.y + hh
        }
    }
}

/// The topmost placement under `point` (feet). Later placements are drawn on
/// top, so the slice is searched from the end.
#[must_use]
pub fn find_topmost_at(point: Point, placements: &[Placement], mode: HitMode) -> Option<&Placement> {
    placements.iter().rev().find(|p| hits(p, point, mode))
}
