//! Layout session: the single owner of a shop layout while it is being edited.
//!
//! `LayoutSession` ties the geometry modules together. Pointer events arrive
//! in screen pixels, are mapped to shop feet through the cached view, snapped
//! and clamped, checked for collisions, and applied to the shop. Every
//! operation returns the [`Action`]s the host should persist or react to; the
//! session itself never performs I/O.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, EquipmentTypeId};
use crate::clearance::{clearance_boxes, compute_clearance_issues};
use crate::collision::first_collision;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, check_dimensions};
use crate::footprint::{Bounds, Footprint, Point, normalize_rotation};
use crate::hit::find_topmost_at;
use crate::input::{InputState, UiState};
use crate::shop::{NewPlacement, Placement, PlacementId, PlacementRecord, Pose, Shop};
use crate::snap::normalize_position;
use crate::view::ViewTransform;

/// Actions returned from session operations for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    PlacementCreated { placement: Placement },
    PlacementMoved { id: PlacementId, center: Point },
    PlacementRotated { id: PlacementId, rotation_deg: f64, center: Point },
    PlacementDeleted { id: PlacementId, backend_id: Option<Uuid> },
    SelectionChanged { id: Option<PlacementId> },
    /// A drop landed on another machine; nothing was created.
    DropRejected { type_id: EquipmentTypeId, center: Point, blocker: Option<PlacementId> },
    /// A drag was released onto another machine (or cancelled) and put back.
    DragReverted { id: PlacementId, center: Point, blocker: Option<PlacementId> },
    RotateRejected { id: PlacementId, blocker: Option<PlacementId> },
    RenderNeeded,
}

/// Where a dragged catalog item would land, without placing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropPreview {
    pub footprint: Footprint,
    pub can_place: bool,
}

pub struct LayoutSession {
    session_id: Uuid,
    shop: Shop,
    catalog: Catalog,
    config: LayoutConfig,
    viewport_width: f64,
    viewport_height: f64,
    view: Option<ViewTransform>,
    ui: UiState,
    input: InputState,
    issues: BTreeSet<PlacementId>,
}

impl LayoutSession {
    #[must_use]
    pub fn new(shop: Shop, catalog: Catalog, config: LayoutConfig) -> Self {
        let ui = UiState {
            selected_id: None,
            show_clearances: config.show_clearances,
            grid_size_ft: sanitize_grid(config.grid_size_ft),
        };
        let mut session = Self {
            session_id: Uuid::new_v4(),
            shop,
            catalog,
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            view: None,
            ui,
            input: InputState::Idle,
            issues: BTreeSet::new(),
        };
        session.refresh_issues();
        info!(
            session_id = %session.session_id,
            width_ft = session.shop.width_ft(),
            depth_ft = session.shop.depth_ft(),
            equipment_types = session.catalog.len(),
            "layout session opened"
        );
        session
    }

    // --- Shop and view ---

    /// Update the viewport size in CSS pixels. A zero-sized viewport is
    /// allowed and leaves the session without a view until it grows.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<Vec<Action>, LayoutError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(LayoutError::InvalidDimensions { width_ft: width, depth_ft: height });
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.refresh_view();
        Ok(vec![Action::RenderNeeded])
    }

    /// Change the shop floor size. Placements stay where they are; issues are
    /// recomputed against the new walls. An open drag is reverted first.
    pub fn set_shop_size(&mut self, width_ft: f64, depth_ft: f64) -> Result<Vec<Action>, LayoutError> {
        check_dimensions(width_ft, depth_ft)?;
        let mut actions = self.abandon_drag();
        self.shop.resize(width_ft, depth_ft)?;
        info!(session_id = %self.session_id, width_ft, depth_ft, "shop resized");
        self.refresh_view();
        self.refresh_issues();
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Set the grid pitch in feet. Zero (or anything not positive) turns
    /// snapping off.
    pub fn set_grid_size(&mut self, grid_size_ft: f64) -> Vec<Action> {
        self.ui.grid_size_ft = sanitize_grid(grid_size_ft);
        vec![Action::RenderNeeded]
    }

    pub fn set_show_clearances(&mut self, show: bool) -> Vec<Action> {
        self.ui.show_clearances = show;
        self.refresh_issues();
        vec![Action::RenderNeeded]
    }

    /// Replace every placement with the stored records, in order.
    ///
    /// Records whose equipment type is not in the catalog are skipped. Ids are
    /// assigned fresh; any selection or drag is dropped.
    pub fn load_placements(&mut self, records: Vec<PlacementRecord>) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged { id: None });
        }
        self.input = InputState::Idle;
        self.shop.clear();

        let total = records.len();
        for record in records {
            let entry = match self.catalog.get(record.type_id) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(session_id = %self.session_id, type_id = %record.type_id, %err, "skipping stored placement");
                    continue;
                }
            };
            let center = Point::new(record.x, record.y);
            self.shop.add(NewPlacement {
                footprint: Footprint::new(
                    center,
                    entry.equipment.width_ft,
                    entry.equipment.depth_ft,
                    record.rotation_deg,
                ),
                equipment: entry.equipment_ref(),
                color: entry.equipment.color.clone(),
                clearance: entry.clearance,
                backend_id: record.backend_id,
            });
        }

        self.refresh_issues();
        info!(session_id = %self.session_id, total, loaded = self.shop.len(), "placements loaded");
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Drop from the catalog ---

    /// Create a placement of `type_id` under the screen point, snapped and
    /// clamped into the shop. A drop onto another machine is rejected.
    ///
    /// Without a view (zero-sized viewport) the drop is ignored.
    pub fn drop_equipment(&mut self, type_id: EquipmentTypeId, screen_pt: Point) -> Result<Vec<Action>, LayoutError> {
        let Some(footprint) = self.drop_footprint(type_id, screen_pt)? else {
            return Ok(Vec::new());
        };

        if let Some(blocker) = first_collision(&self.shop, &footprint, None, self.config.collision_mode) {
            debug!(session_id = %self.session_id, %type_id, %blocker, "drop rejected");
            return Ok(vec![Action::DropRejected { type_id, center: footprint.center, blocker: Some(blocker) }]);
        }

        let entry = self.catalog.get(type_id)?;
        let new = NewPlacement {
            footprint,
            equipment: entry.equipment_ref(),
            color: entry.equipment.color.clone(),
            clearance: entry.clearance,
            backend_id: None,
        };
        let placement = self.shop.add(new).clone();
        debug!(
            session_id = %self.session_id,
            id = %placement.id,
            %type_id,
            x = placement.footprint.center.x,
            y = placement.footprint.center.y,
            "placement created"
        );

        self.refresh_issues();
        let mut actions = vec![Action::PlacementCreated { placement: placement.clone() }];
        actions.extend(self.set_selection(Some(placement.id)));
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// The footprint a drop at `screen_pt` would produce and whether it fits.
    /// Nothing is changed.
    pub fn preview_drop(&self, type_id: EquipmentTypeId, screen_pt: Point) -> Result<Option<DropPreview>, LayoutError> {
        let preview = self.drop_footprint(type_id, screen_pt)?.map(|footprint| DropPreview {
            footprint,
            can_place: first_collision(&self.shop, &footprint, None, self.config.collision_mode).is_none(),
        });
        Ok(preview)
    }

    fn drop_footprint(&self, type_id: EquipmentTypeId, screen_pt: Point) -> Result<Option<Footprint>, LayoutError> {
        let entry = self.catalog.get(type_id)?;
        let Some(view) = self.view else {
            return Ok(None);
        };
        let feet = view.to_feet(screen_pt);
        let unplaced = Footprint::new(feet, entry.equipment.width_ft, entry.equipment.depth_ft, 0.0);
        let center = normalize_position(feet.x, feet.y, &self.shop, self.ui.grid_size_ft, &unplaced);
        Ok(Some(unplaced.at(center)))
    }

    // --- Pointer input ---

    /// Select the topmost placement under the pointer and start dragging it.
    /// Pressing on empty floor clears the selection.
    ///
    /// A press that arrives while a drag is still open (its release was lost)
    /// reverts that drag first.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = self.abandon_drag();
        let Some(view) = self.view else {
            return with_render(actions);
        };
        let feet = view.to_feet(screen_pt);
        let hit = find_topmost_at(feet, self.shop.placements(), self.config.hit_mode)
            .map(|p| (p.id, p.footprint.center, p.footprint.rotation_deg));

        let Some((id, center, rotation_deg)) = hit else {
            actions.extend(self.set_selection(None));
            return with_render(actions);
        };

        self.input = InputState::Dragging {
            id,
            grab_offset: Point::new(feet.x - center.x, feet.y - center.y),
            orig: Pose { center, rotation_deg },
        };
        actions.extend(self.set_selection(Some(id)));
        with_render(actions)
    }

    /// Move the dragged placement with the pointer, snapped and clamped.
    /// Collisions are not checked until release.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { id, grab_offset, .. } = self.input else {
            return Vec::new();
        };
        let Some(view) = self.view else {
            return Vec::new();
        };
        let feet = view.to_feet(screen_pt);
        if self.drag_to(id, Point::new(feet.x - grab_offset.x, feet.y - grab_offset.y)) {
            self.refresh_issues();
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Finish a drag. The placement stays where it was dropped unless it now
    /// overlaps another placement, in which case it returns to where the drag
    /// started.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { id, grab_offset, orig } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        if let Some(view) = self.view {
            let feet = view.to_feet(screen_pt);
            self.drag_to(id, Point::new(feet.x - grab_offset.x, feet.y - grab_offset.y));
        }
        let Some(placement) = self.shop.get(id) else {
            return Vec::new();
        };
        let footprint = placement.footprint;

        if let Some(blocker) = first_collision(&self.shop, &footprint, Some(id), self.config.collision_mode) {
            self.shop.set_pose(id, orig);
            self.refresh_issues();
            debug!(session_id = %self.session_id, %id, %blocker, "drag reverted");
            return vec![Action::DragReverted { id, center: orig.center, blocker: Some(blocker) }, Action::RenderNeeded];
        }

        self.refresh_issues();
        if footprint.center == orig.center {
            return vec![Action::RenderNeeded];
        }
        debug!(session_id = %self.session_id, %id, x = footprint.center.x, y = footprint.center.y, "placement moved");
        vec![Action::PlacementMoved { id, center: footprint.center }, Action::RenderNeeded]
    }

    /// Abort a drag and put the placement back where it started.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        with_render(self.abandon_drag())
    }

    /// End any open drag without committing it.
    fn abandon_drag(&mut self) -> Vec<Action> {
        let InputState::Dragging { id, orig, .. } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        if self.shop.set_pose(id, orig).is_none() {
            return Vec::new();
        }
        self.refresh_issues();
        debug!(session_id = %self.session_id, %id, "drag cancelled");
        vec![Action::DragReverted { id, center: orig.center, blocker: None }]
    }

    /// Normalize `target` for the dragged placement and move it there.
    /// Returns whether the center changed.
    fn drag_to(&mut self, id: PlacementId, target: Point) -> bool {
        let Some(placement) = self.shop.get(id) else {
            return false;
        };
        let footprint = placement.footprint;
        let center = normalize_position(target.x, target.y, &self.shop, self.ui.grid_size_ft, &footprint);
        if center == footprint.center {
            return false;
        }
        self.shop.move_to(id, center).is_some()
    }

    // --- Selection commands ---

    /// Turn the selected placement by `delta_deg`. The center is re-clamped
    /// so the turned box stays inside the shop; a turn that would overlap
    /// another placement is rejected and nothing changes.
    pub fn rotate_selected(&mut self, delta_deg: f64) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        if self.input.dragging_id().is_some() {
            return Vec::new();
        }
        let Some(placement) = self.shop.get(id) else {
            return Vec::new();
        };

        let current = placement.footprint;
        let rotation_deg = normalize_rotation(current.rotation_deg + delta_deg);
        let turned = Footprint::new(current.center, current.width_ft, current.depth_ft, rotation_deg);
        let center = normalize_position(current.center.x, current.center.y, &self.shop, self.ui.grid_size_ft, &turned);
        let candidate = turned.at(center);

        if let Some(blocker) = first_collision(&self.shop, &candidate, Some(id), self.config.collision_mode) {
            debug!(session_id = %self.session_id, %id, rotation_deg, %blocker, "rotate rejected");
            return vec![Action::RotateRejected { id, blocker: Some(blocker) }];
        }

        self.shop.rotate_to(id, rotation_deg);
        self.shop.move_to(id, center);
        self.refresh_issues();
        debug!(session_id = %self.session_id, %id, rotation_deg, "placement rotated");
        vec![Action::PlacementRotated { id, rotation_deg, center }, Action::RenderNeeded]
    }

    /// Remove the selected placement.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        if self.input.dragging_id() == Some(id) {
            self.input = InputState::Idle;
        }
        let mut actions = self.set_selection(None);
        let Some(removed) = self.shop.remove(id) else {
            return with_render(actions);
        };
        self.refresh_issues();
        debug!(session_id = %self.session_id, %id, "placement deleted");
        actions.insert(0, Action::PlacementDeleted { id, backend_id: removed.backend_id });
        with_render(actions)
    }

    /// Select a placement, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<PlacementId>) -> Result<Vec<Action>, LayoutError> {
        if let Some(id) = id
            && self.shop.get(id).is_none()
        {
            return Err(LayoutError::UnknownPlacement(id));
        }
        Ok(with_render(self.set_selection(id)))
    }

    fn set_selection(&mut self, id: Option<PlacementId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged { id }]
    }

    // --- Derived state ---

    fn refresh_view(&mut self) {
        self.view = ViewTransform::fit(
            self.viewport_width,
            self.viewport_height,
            self.shop.width_ft(),
            self.shop.depth_ft(),
            self.config.view_padding,
        );
    }

    fn refresh_issues(&mut self) {
        self.issues = if self.ui.show_clearances { compute_clearance_issues(&self.shop) } else { BTreeSet::new() };
    }

    // --- Queries ---

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The currently selected placement, if any.
    #[must_use]
    pub fn selection(&self) -> Option<PlacementId> {
        self.ui.selected_id
    }

    /// The current view, or `None` while the viewport has no area.
    #[must_use]
    pub fn view(&self) -> Option<ViewTransform> {
        self.view
    }

    #[must_use]
    pub fn placement(&self, id: PlacementId) -> Option<&Placement> {
        self.shop.get(id)
    }

    /// Placements in draw order, bottom first.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        self.shop.placements()
    }

    /// The persisted form of every placement, in draw order.
    #[must_use]
    pub fn records(&self) -> Vec<PlacementRecord> {
        self.shop.placements().iter().map(Placement::record).collect()
    }

    /// Placements with a clearance problem. Empty while clearances are hidden.
    #[must_use]
    pub fn clearance_issues(&self) -> &BTreeSet<PlacementId> {
        &self.issues
    }

    /// Clearance zones to draw. Empty while clearances are hidden.
    #[must_use]
    pub fn clearance_boxes(&self) -> Vec<(PlacementId, Bounds)> {
        if self.ui.show_clearances { clearance_boxes(&self.shop) } else { Vec::new() }
    }

    #[must_use]
    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }
}

fn sanitize_grid(grid_size_ft: f64) -> f64 {
    if grid_size_ft.is_finite() && grid_size_ft > 0.0 { grid_size_ft } else { 0.0 }
}

fn with_render(mut actions: Vec<Action>) -> Vec<Action> {
    if !actions.is_empty() {
        actions.push(Action::RenderNeeded);
    }
    actions
}
