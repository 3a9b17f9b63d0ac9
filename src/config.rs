//! Engine configuration parsed from environment variables or host JSON.

use serde::Deserialize;
use tracing::warn;

use crate::collision::CollisionMode;
use crate::consts::{DEFAULT_GRID_SIZE_FT, DEFAULT_VIEW_PADDING};
use crate::error::LayoutError;
use crate::hit::HitMode;

/// Tunables for one layout session. Deserializes with every field optional.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub grid_size_ft: f64,
    pub view_padding: f64,
    pub hit_mode: HitMode,
    pub collision_mode: CollisionMode,
    pub show_clearances: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_size_ft: DEFAULT_GRID_SIZE_FT,
            view_padding: DEFAULT_VIEW_PADDING,
            hit_mode: HitMode::Exact,
            collision_mode: CollisionMode::Aabb,
            show_clearances: true,
        }
    }
}

impl LayoutConfig {
    /// Build typed layout config from environment variables.
    ///
    /// Optional:
    /// - `SHOP_GRID_SIZE_FT`: default 0.5; 0 disables snapping
    /// - `SHOP_VIEW_PADDING`: default 0.9, must lie in (0, 1]
    /// - `SHOP_HIT_MODE`: `exact` (default) or `unrotated`
    /// - `SHOP_COLLISION_MODE`: `aabb` (default) or `oriented`
    /// - `SHOP_SHOW_CLEARANCES`: `true` (default) or `false`
    pub fn from_env() -> Result<Self, LayoutError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Same as [`LayoutConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LayoutError> {
        let hit_mode = parse_hit_mode(lookup("SHOP_HIT_MODE").as_deref())?;
        let collision_mode = parse_collision_mode(lookup("SHOP_COLLISION_MODE").as_deref())?;
        let show_clearances = parse_bool("SHOP_SHOW_CLEARANCES", lookup("SHOP_SHOW_CLEARANCES").as_deref(), true)?;

        let grid_size_ft =
            parse_f64("SHOP_GRID_SIZE_FT", lookup("SHOP_GRID_SIZE_FT").as_deref(), DEFAULT_GRID_SIZE_FT, |v| v >= 0.0);
        let view_padding = parse_f64("SHOP_VIEW_PADDING", lookup("SHOP_VIEW_PADDING").as_deref(), DEFAULT_VIEW_PADDING, |v| {
            v > 0.0 && v <= 1.0
        });

        let config = Self { grid_size_ft, view_padding, hit_mode, collision_mode, show_clearances };
        config.validate()?;
        Ok(config)
    }

    /// Parse config handed over by the host. Missing fields take their
    /// defaults; out-of-range numbers are errors.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric fields: a finite grid pitch of at least 0 and a
    /// finite view padding in (0, 1].
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.grid_size_ft.is_finite() && self.grid_size_ft >= 0.0) {
            return Err(LayoutError::ConfigParse(format!(
                "grid_size_ft must be a finite value >= 0, got {}",
                self.grid_size_ft
            )));
        }
        if !(self.view_padding.is_finite() && self.view_padding > 0.0 && self.view_padding <= 1.0) {
            return Err(LayoutError::ConfigParse(format!(
                "view_padding must lie in (0, 1], got {}",
                self.view_padding
            )));
        }
        Ok(())
    }
}

/// Parse a number, falling back to `default` (with a warning) when the value
/// is malformed or fails `valid`.
fn parse_f64(key: &str, raw: Option<&str>, default: f64, valid: impl Fn(f64) -> bool) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && valid(v) => v,
        _ => {
            warn!(key, value = raw, default, "ignoring invalid config value");
            default
        }
    }
}

fn parse_bool(key: &str, raw: Option<&str>, default: bool) -> Result<bool, LayoutError> {
    match raw.map(str::trim) {
        None => Ok(default),
        Some("true" | "1") => Ok(true),
        Some("false" | "0") => Ok(false),
        Some(other) => Err(LayoutError::ConfigParse(format!("unsupported {key} '{other}' (expected 'true' or 'false')"))),
    }
}

fn parse_hit_mode(raw: Option<&str>) -> Result<HitMode, LayoutError> {
    match raw.unwrap_or("exact") {
        "exact" => Ok(HitMode::Exact),
        "unrotated" => Ok(HitMode::Unrotated),
        other => Err(LayoutError::ConfigParse(format!(
            "unsupported SHOP_HIT_MODE '{other}' (expected 'exact' or 'unrotated')"
        ))),
    }
}

fn parse_collision_mode(raw: Option<&str>) -> Result<CollisionMode, LayoutError> {
    match raw.unwrap_or("aabb") {
        "aabb" => Ok(CollisionMode::Aabb),
        "oriented" => Ok(CollisionMode::Oriented),
        other => Err(LayoutError::ConfigParse(format!(
            "unsupported SHOP_COLLISION_MODE '{other}' (expected 'aabb' or 'oriented')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
