//! Pointer-driven editing: add anchors or drag control points.

use crate::handles::{HANDLE_HIT_RADIUS, hit_test_controls};
use crate::path::BezierPath;
use glam::DVec3;

/// State of the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A control point is held and follows the pointer.
    Dragging {
        /// Segment whose control point is held.
        segment: usize,
    },
}

/// What a pointer event did to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed.
    None,
    /// A new anchor was appended at this index.
    AnchorAdded(usize),
    /// A control point was grabbed and flagged manual.
    DragStarted(usize),
    /// The held control point moved.
    ControlMoved(usize),
    /// The held control point was released.
    DragEnded(usize),
}

impl DragOutcome {
    /// Whether the curve geometry changed and needs re-tessellation.
    pub fn changes_geometry(&self) -> bool {
        matches!(self, Self::AnchorAdded(_) | Self::ControlMoved(_))
    }
}

/// Toggles between "add point" and "drag control point" on pointer input.
///
/// Operates on world-space points already projected onto the drawing plane.
#[derive(Debug, Clone)]
pub struct DragController {
    /// Current state.
    pub state: ToolState,
    /// Grab radius around control points.
    pub hit_radius: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            state: ToolState::Idle,
            hit_radius: HANDLE_HIT_RADIUS,
        }
    }
}

impl DragController {
    /// Create a new controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a control point is currently held.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ToolState::Dragging { .. })
    }

    /// Segment of the held control point, if any.
    pub fn dragged_segment(&self) -> Option<usize> {
        match self.state {
            ToolState::Dragging { segment } => Some(segment),
            ToolState::Idle => None,
        }
    }

    /// Handle a press: grab a control point under `point` or add an anchor.
    pub fn pointer_down(&mut self, path: &mut BezierPath, point: DVec3) -> DragOutcome {
        if let Some(segment) = hit_test_controls(point, path.controls(), self.hit_radius) {
            path.begin_manual(segment);
            self.state = ToolState::Dragging { segment };
            log::debug!("Grabbed control point {}", segment);
            return DragOutcome::DragStarted(segment);
        }

        let index = path.push_anchor(point);
        log::debug!("Added anchor {} at {:?}", index, point);
        DragOutcome::AnchorAdded(index)
    }

    /// Handle pointer motion: move the held control point, if any.
    pub fn pointer_move(&mut self, path: &mut BezierPath, point: DVec3) -> DragOutcome {
        match self.state {
            ToolState::Dragging { segment } if path.move_control(segment, point) => {
                DragOutcome::ControlMoved(segment)
            }
            _ => DragOutcome::None,
        }
    }

    /// Handle a release: drop the held control point.
    pub fn pointer_up(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            ToolState::Dragging { segment } => DragOutcome::DragEnded(segment),
            ToolState::Idle => DragOutcome::None,
        }
    }

    /// Abandon any drag in progress without a release event.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_anchor_path() -> BezierPath {
        let mut path = BezierPath::new();
        path.push_anchor(DVec3::ZERO);
        path.push_anchor(DVec3::new(2.0, 0.0, 0.0));
        path
    }

    #[test]
    fn test_press_on_empty_space_adds_anchor() {
        let mut tool = DragController::new();
        let mut path = BezierPath::new();

        assert_eq!(tool.pointer_down(&mut path, DVec3::ZERO), DragOutcome::AnchorAdded(0));
        tool.pointer_up();
        assert_eq!(tool.pointer_down(&mut path, DVec3::X * 2.0), DragOutcome::AnchorAdded(1));
        assert_eq!(path.segment_count(), 1);
        assert!(!tool.is_dragging());
    }

    #[test]
    fn test_press_on_control_starts_drag() {
        let mut tool = DragController::new();
        let mut path = two_anchor_path();

        let outcome = tool.pointer_down(&mut path, DVec3::new(1.1, 1.4, 0.0));
        assert_eq!(outcome, DragOutcome::DragStarted(0));
        assert_eq!(tool.dragged_segment(), Some(0));
        assert!(path.control(0).unwrap().manual);
        assert_eq!(path.anchors().len(), 2);
    }

    #[test]
    fn test_drag_moves_only_held_control() {
        let mut tool = DragController::new();
        let mut path = two_anchor_path();
        path.push_anchor(DVec3::new(4.0, 0.0, 0.0));
        let untouched = *path.control(1).unwrap();

        tool.pointer_down(&mut path, DVec3::new(1.0, 1.5, 0.0));
        let target = DVec3::new(1.0, -3.0, 0.0);
        assert_eq!(tool.pointer_move(&mut path, target), DragOutcome::ControlMoved(0));

        assert_eq!(path.control(0).unwrap().position, target);
        assert_eq!(path.control(1).unwrap(), &untouched);
        assert_eq!(path.anchors().len(), 3);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut tool = DragController::new();
        let mut path = two_anchor_path();
        let before = path.clone();

        assert_eq!(tool.pointer_move(&mut path, DVec3::new(1.0, 1.5, 0.0)), DragOutcome::None);
        assert_eq!(path, before);
    }

    #[test]
    fn test_release_ends_drag() {
        let mut tool = DragController::new();
        let mut path = two_anchor_path();

        tool.pointer_down(&mut path, DVec3::new(1.0, 1.5, 0.0));
        assert_eq!(tool.pointer_up(), DragOutcome::DragEnded(0));
        assert!(!tool.is_dragging());
        assert_eq!(tool.pointer_up(), DragOutcome::None);

        let before = path.clone();
        tool.pointer_move(&mut path, DVec3::new(9.0, 9.0, 0.0));
        assert_eq!(path, before);
    }

    #[test]
    fn test_dragged_control_survives_new_anchor() {
        let mut tool = DragController::new();
        let mut path = two_anchor_path();

        tool.pointer_down(&mut path, DVec3::new(1.0, 1.5, 0.0));
        tool.pointer_move(&mut path, DVec3::new(1.0, 4.0, 0.0));
        tool.pointer_up();

        tool.pointer_down(&mut path, DVec3::new(5.0, 5.0, 0.0));
        assert_eq!(path.control(0).unwrap().position, DVec3::new(1.0, 4.0, 0.0));
        assert_eq!(path.segment_count(), 2);
    }

    #[test]
    fn test_outcome_geometry_flags() {
        assert!(DragOutcome::AnchorAdded(0).changes_geometry());
        assert!(DragOutcome::ControlMoved(0).changes_geometry());
        assert!(!DragOutcome::DragStarted(0).changes_geometry());
        assert!(!DragOutcome::DragEnded(0).changes_geometry());
        assert!(!DragOutcome::None.changes_geometry());
    }
}
