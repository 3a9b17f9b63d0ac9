//! Equipment catalog as handed over by the catalog collaborator.
//!
//! The catalog supplies default footprints, colors, and the name/model strings
//! of each equipment type. Clearance margins are resolved here, once per type,
//! when the catalog is loaded.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clearance::{ClearanceMargins, ClearanceTable, EquipmentKind};
use crate::consts::{DEFAULT_EQUIPMENT_COLOR, DEFAULT_EQUIPMENT_DEPTH_FT, DEFAULT_EQUIPMENT_WIDTH_FT};
use crate::error::{LayoutError, check_dimensions};
use crate::shop::EquipmentRef;

/// Catalog identifier of an equipment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentTypeId(pub i64);

impl fmt::Display for EquipmentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One equipment type as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentType {
    pub id: EquipmentTypeId,
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default = "default_width")]
    pub width_ft: f64,
    #[serde(default = "default_depth")]
    pub depth_ft: f64,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_width() -> f64 {
    DEFAULT_EQUIPMENT_WIDTH_FT
}

fn default_depth() -> f64 {
    DEFAULT_EQUIPMENT_DEPTH_FT
}

fn default_color() -> String {
    DEFAULT_EQUIPMENT_COLOR.to_string()
}

/// A loaded catalog entry with its clearance already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub equipment: EquipmentType,
    pub kind: Option<EquipmentKind>,
    pub clearance: Option<ClearanceMargins>,
}

impl CatalogEntry {
    #[must_use]
    pub fn equipment_ref(&self) -> EquipmentRef {
        EquipmentRef {
            type_id: self.equipment.id,
            name: self.equipment.name.clone(),
            model: self.equipment.model.clone(),
        }
    }
}

/// Equipment types keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<EquipmentTypeId, CatalogEntry>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog and resolve each type's clearance against `table`.
    ///
    /// Fails on the first type whose default footprint is not positive.
    pub fn load(types: Vec<EquipmentType>, table: &ClearanceTable) -> Result<Self, LayoutError> {
        let mut catalog = Self::new();
        for equipment in types {
            catalog.insert(equipment, table)?;
        }
        let with_clearance = catalog.entries.values().filter(|e| e.clearance.is_some()).count();
        info!(count = catalog.entries.len(), with_clearance, "loaded equipment catalog");
        Ok(catalog)
    }

    /// Parse a JSON array of equipment types and load it.
    pub fn from_json(raw: &str, table: &ClearanceTable) -> Result<Self, LayoutError> {
        let types: Vec<EquipmentType> = serde_json::from_str(raw)?;
        Self::load(types, table)
    }

    /// Add or replace a single equipment type.
    pub fn insert(&mut self, equipment: EquipmentType, table: &ClearanceTable) -> Result<(), LayoutError> {
        check_dimensions(equipment.width_ft, equipment.depth_ft)?;
        let kind = EquipmentKind::classify(&equipment.name, &equipment.model);
        let clearance = kind.and_then(|k| table.margins_for(k));
        self.entries.insert(equipment.id, CatalogEntry { equipment, kind, clearance });
        Ok(())
    }

    pub fn get(&self, id: EquipmentTypeId) -> Result<&CatalogEntry, LayoutError> {
        self.entries.get(&id).ok_or(LayoutError::UnknownEquipmentType(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
