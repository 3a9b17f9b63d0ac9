//! Grid snapping and clamping of placement centers to the shop walls.
//!
//! A placement is clamped by its rotated bounding box, so a rotated machine
//! stops at the wall where its box touches, not where its center does. When a
//! box is wider (or deeper) than the shop there is no valid center on that axis.
//! The item is then centered on the axis instead.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::footprint::{Footprint, Point};
use crate::shop::Shop;

/// Round each coordinate to the nearest multiple of `grid_size_ft`.
/// A non-positive grid disables snapping.
#[must_use]
pub fn snap_to_grid(point: Point, grid_size_ft: f64) -> Point {
    if grid_size_ft <= 0.0 {
        return point;
    }
    Point::new(snap_value(point.x, grid_size_ft), snap_value(point.y, grid_size_ft))
}

/// Clamp `point` so `footprint`'s bounding box, centered there, stays inside
/// the shop. No grid is involved.
#[must_use]
pub fn clamp_to_shop(point: Point, shop: &Shop, footprint: &Footprint) -> Point {
    let (ex, ey) = footprint.half_extents();
    Point::new(
        clamp_axis(point.x, ex, shop.width_ft(), 0.0),
        clamp_axis(point.y, ey, shop.depth_ft(), 0.0),
    )
}

/// Snap `(x, y)` to the grid, then clamp so the footprint stays inside the shop.
///
/// While snapping, the clamp range shrinks to the grid multiples inside it, so
/// the result is always on the grid and normalizing twice changes nothing. If
/// no grid multiple fits on an axis (including a footprint larger than the
/// shop), the center is placed mid-shop on that axis.
#[must_use]
pub fn normalize_position(x: f64, y: f64, shop: &Shop, grid_size_ft: f64, footprint: &Footprint) -> Point {
    let (ex, ey) = footprint.half_extents();
    let snapped = snap_to_grid(Point::new(x, y), grid_size_ft);
    Point::new(
        clamp_axis(snapped.x, ex, shop.width_ft(), grid_size_ft),
        clamp_axis(snapped.y, ey, shop.depth_ft(), grid_size_ft),
    )
}

fn snap_value(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

/// Clamp one axis into `[extent, dim - extent]`, tightened to grid multiples
/// when `grid > 0`. An empty range yields `dim / 2`.
fn clamp_axis(value: f64, extent: f64, dim: f64, grid: f64) -> f64 {
    let (lo, hi) = if grid > 0.0 {
        ((extent / grid).ceil() * grid, ((dim - extent) / grid).floor() * grid)
    } else {
        (extent, dim - extent)
    };
    if lo > hi {
        return dim / 2.0;
    }
    value.max(lo).min(hi)
}
