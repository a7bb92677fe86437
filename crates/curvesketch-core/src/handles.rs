//! Handle definitions, hit testing and guide geometry.

use crate::path::BezierPath;
use crate::solver::ControlPoint;
use glam::DVec3;

/// Pointer-to-control distance (world units) below which a press grabs it.
pub const HANDLE_HIT_RADIUS: f64 = 0.3;
/// Display radius of anchor handles.
pub const ANCHOR_HANDLE_RADIUS: f64 = 0.15;
/// Display radius of control point handles.
pub const CONTROL_HANDLE_RADIUS: f64 = 0.12;

/// What a handle is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Anchor at this index.
    Anchor(usize),
    /// Control point of this segment.
    Control(usize),
}

/// A visible, pickable marker in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    /// Position in world coordinates.
    pub position: DVec3,
    /// Display radius.
    pub radius: f64,
}

impl Handle {
    pub fn new(kind: HandleKind, position: DVec3) -> Self {
        let radius = match kind {
            HandleKind::Anchor(_) => ANCHOR_HANDLE_RADIUS,
            HandleKind::Control(_) => CONTROL_HANDLE_RADIUS,
        };
        Self {
            kind,
            position,
            radius,
        }
    }

    /// Check if a world point lies strictly within `tolerance` of the handle.
    pub fn hit_test(&self, point: DVec3, tolerance: f64) -> bool {
        self.position.distance(point) < tolerance
    }
}

/// Find the control point a press at `point` would grab.
///
/// Candidates are checked in segment order and the first one within the
/// radius wins, even if a later one is closer.
pub fn hit_test_controls(point: DVec3, controls: &[ControlPoint], radius: f64) -> Option<usize> {
    controls
        .iter()
        .position(|control| control.position.distance(point) < radius)
}

/// All handles of a path: anchors first, then control points.
pub fn path_handles(path: &BezierPath) -> Vec<Handle> {
    let anchors = path
        .anchors()
        .iter()
        .enumerate()
        .map(|(i, p)| Handle::new(HandleKind::Anchor(i), p));
    let controls = path
        .controls()
        .iter()
        .enumerate()
        .map(|(i, c)| Handle::new(HandleKind::Control(i), c.position));
    anchors.chain(controls).collect()
}

/// A straight guide between an anchor and a control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLine {
    /// Segment the guide belongs to.
    pub segment: usize,
    pub start: DVec3,
    pub end: DVec3,
}

/// Guides from each segment's start anchor to its control point and from the
/// control point to the end anchor.
pub fn handle_lines(path: &BezierPath) -> Vec<HandleLine> {
    path.segments()
        .enumerate()
        .flat_map(|(segment, quad)| {
            [
                HandleLine {
                    segment,
                    start: quad.start,
                    end: quad.control,
                },
                HandleLine {
                    segment,
                    start: quad.control,
                    end: quad.end,
                },
            ]
        })
        .collect()
}

/// A numbered marker drawn on an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorLabel {
    /// One-based anchor number.
    pub text: String,
    pub position: DVec3,
}

/// Labels numbering the anchors from 1 in placement order.
pub fn anchor_labels(path: &BezierPath) -> Vec<AnchorLabel> {
    path.anchors()
        .iter()
        .enumerate()
        .map(|(i, position)| AnchorLabel {
            text: (i + 1).to_string(),
            position,
        })
        .collect()
}
