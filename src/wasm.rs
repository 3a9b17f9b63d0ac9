//! `wasm-bindgen` exports for the browser host.
//!
//! Structured values cross the boundary as JSON strings: the catalog and stored
//! placements come in, and action lists and the render scene go out. Errors
//! are surfaced as JS strings.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::catalog::{Catalog, EquipmentTypeId};
use crate::clearance::ClearanceTable;
use crate::config::LayoutConfig;
use crate::engine::{Action, LayoutSession};
use crate::footprint::{Bounds, Point};
use crate::shop::{Placement, PlacementId, PlacementRecord, Shop};
use crate::view::ViewTransform;

fn js_err(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_err)
}

#[derive(Serialize)]
struct ClearanceZone {
    id: PlacementId,
    bounds: Bounds,
}

/// Everything the renderer needs for one frame.
#[derive(Serialize)]
struct Scene<'a> {
    view: Option<ViewTransform>,
    shop_width_ft: f64,
    shop_depth_ft: f64,
    grid_size_ft: f64,
    show_clearances: bool,
    selection: Option<PlacementId>,
    placements: &'a [Placement],
    clearance_issues: &'a BTreeSet<PlacementId>,
    clearance_zones: Vec<ClearanceZone>,
}

/// Browser-facing shop layout engine.
#[wasm_bindgen]
pub struct ShopEngine {
    session: LayoutSession,
}

#[wasm_bindgen]
impl ShopEngine {
    /// Open a session on an empty `width_ft × depth_ft` shop.
    ///
    /// `catalog_json` is an array of equipment types. `clearance_json`
    /// overrides the built-in clearance table and `config_json` the
    /// environment-derived config.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width_ft: f64,
        depth_ft: f64,
        catalog_json: &str,
        clearance_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<ShopEngine, JsValue> {
        let table = match clearance_json {
            Some(raw) => ClearanceTable::from_json(&raw).map_err(js_err)?,
            None => ClearanceTable::default(),
        };
        let config = match config_json {
            Some(raw) => LayoutConfig::from_json(&raw).map_err(js_err)?,
            None => LayoutConfig::from_env().map_err(js_err)?,
        };
        let catalog = Catalog::from_json(catalog_json, &table).map_err(js_err)?;
        let shop = Shop::new(width_ft, depth_ft).map_err(js_err)?;
        Ok(Self { session: LayoutSession::new(shop, catalog, config) })
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        let actions = self.session.set_viewport(width, height).map_err(js_err)?;
        to_json(&actions)
    }

    #[wasm_bindgen(js_name = setShopSize)]
    pub fn set_shop_size(&mut self, width_ft: f64, depth_ft: f64) -> Result<String, JsValue> {
        let actions = self.session.set_shop_size(width_ft, depth_ft).map_err(js_err)?;
        to_json(&actions)
    }

    #[wasm_bindgen(js_name = setGridSize)]
    pub fn set_grid_size(&mut self, grid_size_ft: f64) -> Result<String, JsValue> {
        to_json(&self.session.set_grid_size(grid_size_ft))
    }

    #[wasm_bindgen(js_name = setShowClearances)]
    pub fn set_show_clearances(&mut self, show: bool) -> Result<String, JsValue> {
        to_json(&self.session.set_show_clearances(show))
    }

    /// Replace the layout with a JSON array of stored placement records.
    #[wasm_bindgen(js_name = loadPlacements)]
    pub fn load_placements(&mut self, records_json: &str) -> Result<String, JsValue> {
        let records: Vec<PlacementRecord> = serde_json::from_str(records_json).map_err(js_err)?;
        to_json(&self.session.load_placements(records))
    }

    /// Drop catalog item `type_id` at screen point `(x, y)`. The id crosses as
    /// a JS number, so only types in the `i32` range are addressable.
    #[wasm_bindgen(js_name = dropEquipment)]
    pub fn drop_equipment(&mut self, type_id: i32, x: f64, y: f64) -> Result<String, JsValue> {
        let actions =
            self.session.drop_equipment(EquipmentTypeId(i64::from(type_id)), Point::new(x, y)).map_err(js_err)?;
        to_json(&actions)
    }

    /// Ghost footprint for a catalog item hovering at `(x, y)`, or `null`.
    /// `type_id` has the same `i32` range as in `dropEquipment`.
    #[wasm_bindgen(js_name = previewDrop)]
    pub fn preview_drop(&self, type_id: i32, x: f64, y: f64) -> Result<String, JsValue> {
        let preview =
            self.session.preview_drop(EquipmentTypeId(i64::from(type_id)), Point::new(x, y)).map_err(js_err)?;
        to_json(&preview)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.session.on_pointer_down(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.session.on_pointer_move(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.session.on_pointer_up(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.on_pointer_cancel())
    }

    #[wasm_bindgen(js_name = rotateSelected)]
    pub fn rotate_selected(&mut self, delta_deg: f64) -> Result<String, JsValue> {
        to_json(&self.session.rotate_selected(delta_deg))
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.delete_selected())
    }

    /// Select a placement by id, or clear the selection with `undefined`.
    /// Placement ids above `u32::MAX` are not addressable from the host.
    pub fn select(&mut self, id: Option<u32>) -> Result<String, JsValue> {
        let actions: Vec<Action> =
            self.session.select(id.map(|id| PlacementId(u64::from(id)))).map_err(js_err)?;
        to_json(&actions)
    }

    /// The render scene as JSON.
    pub fn scene(&self) -> Result<String, JsValue> {
        let session = &self.session;
        let scene = Scene {
            view: session.view(),
            shop_width_ft: session.shop().width_ft(),
            shop_depth_ft: session.shop().depth_ft(),
            grid_size_ft: session.ui().grid_size_ft,
            show_clearances: session.ui().show_clearances,
            selection: session.selection(),
            placements: session.placements(),
            clearance_issues: session.clearance_issues(),
            clearance_zones: session
                .clearance_boxes()
                .into_iter()
                .map(|(id, bounds)| ClearanceZone { id, bounds })
                .collect(),
        };
        to_json(&scene)
    }

    /// Stored placement records for the host to persist.
    pub fn records(&self) -> Result<String, JsValue> {
        to_json(&self.session.records())
    }

    #[wasm_bindgen(js_name = sessionId)]
    pub fn session_id(&self) -> String {
        self.session.session_id().to_string()
    }
}
