//! Shared numeric constants for the layout engine.

// ── View ────────────────────────────────────────────────────────

/// Fraction of the viewport the shop drawing may occupy.
pub const DEFAULT_VIEW_PADDING: f64 = 0.9;

// ── Placement ───────────────────────────────────────────────────

/// Default grid pitch in feet.
pub const DEFAULT_GRID_SIZE_FT: f64 = 0.5;

/// Footprint width used when a catalog entry has none.
pub const DEFAULT_EQUIPMENT_WIDTH_FT: f64 = 3.0;

/// Footprint depth used when a catalog entry has none.
pub const DEFAULT_EQUIPMENT_DEPTH_FT: f64 = 3.0;

/// Fill color used when a catalog entry has none.
pub const DEFAULT_EQUIPMENT_COLOR: &str = "#aaa";

// ── Geometry ────────────────────────────────────────────────────

/// Rotations within this many degrees of a quarter turn count as axis-aligned.
pub const AXIS_ALIGNED_TOLERANCE_DEG: f64 = 1e-9;

/// Slack absorbed by inclusive point tests after inverse rotation.
pub const CONTAINMENT_EPSILON: f64 = 1e-9;
