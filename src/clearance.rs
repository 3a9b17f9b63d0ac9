//! Clearance zones: the operating space a machine needs around its body.
//!
//! Margins are looked up by [`EquipmentKind`], a typed classification of the
//! catalog's equipment. The classification runs once per equipment type when
//! the catalog loads, and the margins are stored on each placement. Nothing here
//! matches strings while rendering.
//!
//! Clearance zones only produce warnings. They never block a placement.

#[cfg(test)]
#[path = "clearance_test.rs"]
mod clearance_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::footprint::{Bounds, half_extents};
use crate::shop::{Placement, PlacementId, Shop};

/// Extra space around a footprint, in feet, measured in the footprint's own
/// (unrotated) frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClearanceMargins {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl ClearanceMargins {
    #[must_use]
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
}

/// Machine families that carry a clearance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    TableSaw,
    Planer,
    DrillPress,
    Jointer,
    BeltDiscSander,
    BandSaw,
    CncRouter,
}

impl EquipmentKind {
    /// Classify catalog equipment from its display name and model number.
    ///
    /// Checks run in a fixed order and the first match wins, so a "planer
    /// table saw" is a table saw. Matching ignores case.
    #[must_use]
    pub fn classify(name: &str, model: &str) -> Option<Self> {
        let name = name.to_lowercase();
        let model = model.to_lowercase();
        if name.contains("table saw") || model.contains("pcs31230") {
            Some(Self::TableSaw)
        } else if name.contains("planer") || model.contains("dw735") {
            Some(Self::Planer)
        } else if name.contains("drill press") || model.contains("18-900l") {
            Some(Self::DrillPress)
        } else if name.contains("jointer") || model.contains("jwj-8cs") {
            Some(Self::Jointer)
        } else if name.contains("belt/disc")
            || (name.contains("belt") && name.contains("sander"))
            || model.contains("31-735")
        {
            Some(Self::BeltDiscSander)
        } else if name.contains("band saw") || name.contains("bandsaw") || model.contains("pm1500") {
            Some(Self::BandSaw)
        } else if name.contains("cnc") || model.contains("c-103") {
            Some(Self::CncRouter)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TableSaw => "table saw",
            Self::Planer => "planer",
            Self::DrillPress => "drill press",
            Self::Jointer => "jointer",
            Self::BeltDiscSander => "belt/disc sander",
            Self::BandSaw => "band saw",
            Self::CncRouter => "cnc router",
        }
    }
}

/// A named clearance rule: one machine family and its margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearanceRule {
    pub kind: EquipmentKind,
    pub margins: ClearanceMargins,
}

impl ClearanceRule {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.label()
    }
}

/// Typed mapping from machine family to clearance margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClearanceTable {
    rules: BTreeMap<EquipmentKind, ClearanceMargins>,
}

impl Default for ClearanceTable {
    fn default() -> Self {
        let rules = BTreeMap::from([
            (EquipmentKind::TableSaw, ClearanceMargins::new(8.0, 8.0, 0.0, 0.0)),
            (EquipmentKind::Planer, ClearanceMargins::new(0.0, 0.0, 6.0, 6.0)),
            (EquipmentKind::DrillPress, ClearanceMargins::new(0.0, 0.0, 0.0, 2.0)),
            (EquipmentKind::Jointer, ClearanceMargins::new(2.0, 0.0, 6.0, 6.0)),
            (EquipmentKind::BeltDiscSander, ClearanceMargins::new(2.0, 0.0, 0.0, 2.0)),
            (EquipmentKind::BandSaw, ClearanceMargins::new(0.0, 0.0, 4.0, 4.0)),
            (EquipmentKind::CncRouter, ClearanceMargins::new(2.0, 2.0, 2.0, 2.0)),
        ]);
        Self { rules }
    }
}

impl ClearanceTable {
    /// A table with no rules: nothing gets a clearance zone.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: BTreeMap::new() }
    }

    /// Parse a table such as `{"table_saw": {"left": 8, "right": 8}}`.
    /// Kinds not listed get no clearance zone; omitted sides default to 0.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Add or replace the rule for `kind`.
    pub fn set(&mut self, kind: EquipmentKind, margins: ClearanceMargins) {
        self.rules.insert(kind, margins);
    }

    #[must_use]
    pub fn margins_for(&self, kind: EquipmentKind) -> Option<ClearanceMargins> {
        self.rules.get(&kind).copied()
    }

    /// Classify `name` / `model` and look up the margins for the result.
    #[must_use]
    pub fn resolve(&self, name: &str, model: &str) -> Option<ClearanceMargins> {
        EquipmentKind::classify(name, model).and_then(|kind| self.margins_for(kind))
    }

    pub fn rules(&self) -> impl Iterator<Item = ClearanceRule> + '_ {
        self.rules.iter().map(|(&kind, &margins)| ClearanceRule { kind, margins })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Axis-aligned box of a placement's clearance zone in shop feet, or `None`
/// when the placement has no clearance rule.
///
/// The expanded rectangle can sit off-center when its margins differ per side.
/// Its center is rotated with the footprint, and the expanded rectangle is then
/// bounded the same way a body is.
#[must_use]
pub fn clearance_box(placement: &Placement) -> Option<Bounds> {
    let margins = placement.clearance?;
    let fp = &placement.footprint;

    let area_w = fp.width_ft + margins.left + margins.right;
    let area_h = fp.depth_ft + margins.top + margins.bottom;
    let local_cx = (margins.right - margins.left) / 2.0;
    let local_cy = (margins.bottom - margins.top) / 2.0;

    let center = fp.to_world(local_cx, local_cy);
    let (ex, ey) = half_extents(area_w, area_h, fp.rotation_deg);
    Some(Bounds::around(center, ex, ey))
}

/// Clearance boxes for every placement that has one, in draw order.
#[must_use]
pub fn clearance_boxes(shop: &Shop) -> Vec<(PlacementId, Bounds)> {
    shop.placements()
        .iter()
        .filter_map(|p| clearance_box(p).map(|b| (p.id, b)))
        .collect()
}

/// Ids of placements with a clearance problem.
///
/// A placement is flagged when its clearance box leaves the shop floor. It is
/// also flagged when the box overlaps another placement's body; in that case
/// the other placement is flagged too. Clearance boxes are never compared with
/// each other.
#[must_use]
pub fn compute_clearance_issues(shop: &Shop) -> BTreeSet<PlacementId> {
    let mut issues = BTreeSet::new();
    let placements = shop.placements();

    for placement in placements {
        let Some(zone) = clearance_box(placement) else {
            continue;
        };

        if !zone.within_shop(shop.width_ft(), shop.depth_ft()) {
            issues.insert(placement.id);
        }

        for other in placements {
            if other.id == placement.id {
                continue;
            }
            if zone.overlaps(&other.footprint.bounding_box()) {
                issues.insert(placement.id);
                issues.insert(other.id);
            }
        }
    }

    issues
}
