//! Errors raised at the engine's collaborator boundary.
//!
//! Geometry itself never fails: collisions are reported as `false`, out of
//! bounds positions are clamped, and a degenerate viewport yields no view.
//! These errors cover inputs handed in by the session store, the equipment
//! catalog, and configuration.

use crate::catalog::EquipmentTypeId;
use crate::shop::PlacementId;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid dimensions: {width_ft} x {depth_ft} ft")]
    InvalidDimensions { width_ft: f64, depth_ft: f64 },
    #[error("unknown equipment type: {0}")]
    UnknownEquipmentType(EquipmentTypeId),
    #[error("placement not found: {0}")]
    UnknownPlacement(PlacementId),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reject non-positive or non-finite width/depth pairs.
pub(crate) fn check_dimensions(width_ft: f64, depth_ft: f64) -> Result<(), LayoutError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width_ft) && valid(depth_ft) {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimensions { width_ft, depth_ft })
    }
}
