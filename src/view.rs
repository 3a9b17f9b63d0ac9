//! Mapping between shop feet and screen pixels.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use serde::{Deserialize, Serialize};

use crate::footprint::Point;

/// How the shop floor is fitted into the viewport.
///
/// `scale` is pixels per foot. `offset_x` / `offset_y` are CSS pixels from the
/// viewport's top-left corner to the shop's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub drawn_width: f64,
    pub drawn_height: f64,
}

impl ViewTransform {
    /// Fit a `width_ft × depth_ft` shop into a `viewport_w × viewport_h`
    /// viewport, centered, leaving `padding` of the smaller fit ratio in use.
    ///
    /// Returns `None` when the viewport or the shop has no area, or when
    /// `padding` is outside (0, 1]; the caller skips drawing and hit-testing
    /// for that frame.
    #[must_use]
    pub fn fit(viewport_w: f64, viewport_h: f64, width_ft: f64, depth_ft: f64, padding: f64) -> Option<Self> {
        if viewport_w <= 0.0 || viewport_h <= 0.0 || width_ft <= 0.0 || depth_ft <= 0.0 {
            return None;
        }
        if !(padding.is_finite() && padding > 0.0 && padding <= 1.0) {
            return None;
        }
        let scale = (viewport_w * padding / width_ft).min(viewport_h * padding / depth_ft);
        let drawn_width = width_ft * scale;
        let drawn_height = depth_ft * scale;
        Some(Self {
            scale,
            offset_x: (viewport_w - drawn_width) / 2.0,
            offset_y: (viewport_h - drawn_height) / 2.0,
            drawn_width,
            drawn_height,
        })
    }

    /// Convert a shop-space point (feet) to screen coordinates (CSS pixels).
    #[must_use]
    pub fn to_screen(&self, feet: Point) -> Point {
        Point { x: feet.x * self.scale + self.offset_x, y: feet.y * self.scale + self.offset_y }
    }

    /// Convert a screen-space point (CSS pixels) to shop coordinates (feet).
    #[must_use]
    pub fn to_feet(&self, px: Point) -> Point {
        Point { x: (px.x - self.offset_x) / self.scale, y: (px.y - self.offset_y) / self.scale }
    }

    /// Convert a screen-space distance (pixels) to feet.
    #[must_use]
    pub fn screen_dist_to_feet(&self, px: f64) -> f64 {
        px / self.scale
    }
}
