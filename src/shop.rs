//! Shop model: the floor dimensions and the placements on it.
//!
//! `Shop` is the only owner of the placement collection. Callers read
//! placements through shared references and change them through the
//! add/move/rotate/remove methods, each of which hands back the affected
//! record. Insertion order is draw order: the last placement is on top and
//! wins hit tests.

#[cfg(test)]
#[path = "shop_test.rs"]
mod shop_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::EquipmentTypeId;
use crate::clearance::ClearanceMargins;
use crate::error::{LayoutError, check_dimensions};
use crate::footprint::{Footprint, Point, normalize_rotation};

/// Identifier of a placement, unique within its shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which catalog equipment a placement is an instance of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRef {
    pub type_id: EquipmentTypeId,
    pub name: String,
    pub model: String,
}

/// One piece of equipment placed on the shop floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: PlacementId,
    /// Center, size, and rotation in shop feet.
    pub footprint: Footprint,
    pub equipment: EquipmentRef,
    /// CSS fill color for the renderer.
    pub color: String,
    /// Clearance margins resolved from the catalog, if this equipment needs any.
    pub clearance: Option<ClearanceMargins>,
    /// Opaque id of the persisted record. Never interpreted here.
    pub backend_id: Option<Uuid>,
}

impl Placement {
    #[must_use]
    pub fn center(&self) -> Point {
        self.footprint.center
    }

    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.footprint.rotation_deg
    }

    /// The persisted form of this placement.
    #[must_use]
    pub fn record(&self) -> PlacementRecord {
        PlacementRecord {
            backend_id: self.backend_id,
            type_id: self.equipment.type_id,
            x: self.footprint.center.x,
            y: self.footprint.center.y,
            rotation_deg: self.footprint.rotation_deg,
        }
    }
}

/// A placement as kept by the session store: which equipment, where, and how
/// it is turned. Size, color, and clearance come from the catalog on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    #[serde(default)]
    pub backend_id: Option<Uuid>,
    pub type_id: EquipmentTypeId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation_deg: f64,
}

/// Everything needed to create a placement except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlacement {
    pub footprint: Footprint,
    pub equipment: EquipmentRef,
    pub color: String,
    pub clearance: Option<ClearanceMargins>,
    pub backend_id: Option<Uuid>,
}

/// Position and rotation of a placement, saved at drag start so a rejected
/// release can be reverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub center: Point,
    pub rotation_deg: f64,
}

/// A rectangular shop floor and its ordered placements.
#[derive(Debug, Clone)]
pub struct Shop {
    width_ft: f64,
    depth_ft: f64,
    placements: Vec<Placement>,
    next_id: u64,
}

impl Shop {
    /// Create an empty shop. Both dimensions must be positive and finite.
    pub fn new(width_ft: f64, depth_ft: f64) -> Result<Self, LayoutError> {
        check_dimensions(width_ft, depth_ft)?;
        Ok(Self { width_ft, depth_ft, placements: Vec::new(), next_id: 0 })
    }

    #[must_use]
    pub fn width_ft(&self) -> f64 {
        self.width_ft
    }

    #[must_use]
    pub fn depth_ft(&self) -> f64 {
        self.depth_ft
    }

    /// Change the floor dimensions. Placements are left where they are.
    pub fn resize(&mut self, width_ft: f64, depth_ft: f64) -> Result<(), LayoutError> {
        check_dimensions(width_ft, depth_ft)?;
        self.width_ft = width_ft;
        self.depth_ft = depth_ft;
        Ok(())
    }

    /// Append a placement on top of the stack and assign it the next id.
    pub fn add(&mut self, new: NewPlacement) -> &Placement {
        let id = PlacementId(self.next_id);
        self.next_id += 1;
        let NewPlacement { footprint, equipment, color, clearance, backend_id } = new;
        let footprint = Footprint::new(footprint.center, footprint.width_ft, footprint.depth_ft, footprint.rotation_deg);
        let index = self.placements.len();
        self.placements.push(Placement { id, footprint, equipment, color, clearance, backend_id });
        &self.placements[index]
    }

    /// Move a placement's center. Returns `None` if the id is unknown.
    pub fn move_to(&mut self, id: PlacementId, center: Point) -> Option<&Placement> {
        let placement = self.get_mut(id)?;
        placement.footprint.center = center;
        Some(&*placement)
    }

    /// Set a placement's absolute rotation (normalized into `[0, 360)`).
    pub fn rotate_to(&mut self, id: PlacementId, rotation_deg: f64) -> Option<&Placement> {
        let placement = self.get_mut(id)?;
        placement.footprint.rotation_deg = normalize_rotation(rotation_deg);
        Some(&*placement)
    }

    /// Restore a previously captured pose.
    pub fn set_pose(&mut self, id: PlacementId, pose: Pose) -> Option<&Placement> {
        let placement = self.get_mut(id)?;
        placement.footprint.center = pose.center;
        placement.footprint.rotation_deg = normalize_rotation(pose.rotation_deg);
        Some(&*placement)
    }

    /// Remove a placement, returning it if it was present. Ids are never reused.
    pub fn remove(&mut self, id: PlacementId) -> Option<Placement> {
        let index = self.placements.iter().position(|p| p.id == id)?;
        Some(self.placements.remove(index))
    }

    /// Drop every placement. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.placements.clear();
    }

    #[must_use]
    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn pose(&self, id: PlacementId) -> Option<Pose> {
        self.get(id).map(|p| Pose { center: p.footprint.center, rotation_deg: p.footprint.rotation_deg })
    }

    /// Placements in draw order, bottom first.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    fn get_mut(&mut self, id: PlacementId) -> Option<&mut Placement> {
        self.placements.iter_mut().find(|p| p.id == id)
    }
}
