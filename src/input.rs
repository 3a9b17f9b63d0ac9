//! Input model: UI flags and the drag state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. A drag carries the placement's pose from before the gesture so a
//! release onto another machine can put it back exactly where it was.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_GRID_SIZE_FT;
use crate::footprint::Point;
use crate::shop::{PlacementId, Pose};

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// The currently selected placement, if any.
    pub selected_id: Option<PlacementId>,
    /// Whether clearance zones are drawn and checked.
    pub show_clearances: bool,
    /// Grid pitch in feet. Zero or less disables snapping.
    pub grid_size_ft: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self { selected_id: None, show_clearances: true, grid_size_ft: DEFAULT_GRID_SIZE_FT }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving a placement across the floor.
    Dragging {
        /// Id of the placement being dragged.
        id: PlacementId,
        /// Pointer position minus placement center at pointer-down, in feet.
        /// Keeps the machine from jumping under the cursor.
        grab_offset: Point,
        /// Pose at the start of the drag, restored if the release is rejected.
        orig: Pose,
    },
}

impl InputState {
    /// The placement being dragged, if a drag is in progress.
    #[must_use]
    pub fn dragging_id(&self) -> Option<PlacementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } => Some(*id),
        }
    }
}
