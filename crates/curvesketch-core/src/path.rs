//! A chain of quadratic segments: anchors plus one control point per segment.

use crate::anchors::AnchorStore;
use crate::curve::QuadSegment;
use crate::solver::{ControlPoint, ControlPointSolver};
use glam::DVec3;

/// Anchors and their per-segment control points.
///
/// Invariant: `controls.len() == max(0, anchors.len() - 1)`, and control `i`
/// belongs to the segment `anchors[i] -> anchors[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BezierPath {
    anchors: AnchorStore,
    controls: Vec<ControlPoint>,
    solver: ControlPointSolver,
}

impl BezierPath {
    /// Create an empty path with the default solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty path with a custom solver.
    pub fn with_solver(solver: ControlPointSolver) -> Self {
        Self {
            solver,
            ..Self::default()
        }
    }

    /// Build a path from anchors and explicit control points.
    ///
    /// Returns `None` when the control count does not match the segment count.
    pub fn from_parts(anchors: Vec<DVec3>, controls: Vec<ControlPoint>) -> Option<Self> {
        let anchors = AnchorStore::from_points(anchors);
        if controls.len() != anchors.segment_count() {
            return None;
        }
        Some(Self {
            anchors,
            controls,
            solver: ControlPointSolver::default(),
        })
    }

    /// Append an anchor, recompute automatic control points and return the
    /// new anchor's index.
    pub fn push_anchor(&mut self, point: DVec3) -> usize {
        let index = self.anchors.push(point);
        self.solver.recompute(self.anchors.as_slice(), &mut self.controls);
        index
    }

    /// Flag a control point as manually adjusted without moving it.
    ///
    /// Returns false if no such control point exists.
    pub fn begin_manual(&mut self, index: usize) -> bool {
        match self.controls.get_mut(index) {
            Some(control) => {
                control.manual = true;
                true
            }
            None => false,
        }
    }

    /// Move a control point, flagging it as manual.
    ///
    /// Returns false if no such control point exists.
    pub fn move_control(&mut self, index: usize, position: DVec3) -> bool {
        match self.controls.get_mut(index) {
            Some(control) => {
                control.position = position;
                control.manual = true;
                true
            }
            None => false,
        }
    }

    /// The anchor store.
    pub fn anchors(&self) -> &AnchorStore {
        &self.anchors
    }

    /// Control points in segment order.
    pub fn controls(&self) -> &[ControlPoint] {
        &self.controls
    }

    /// Get a control point by segment index.
    pub fn control(&self, index: usize) -> Option<&ControlPoint> {
        self.controls.get(index)
    }

    /// The solver used for automatic placement.
    pub fn solver(&self) -> &ControlPointSolver {
        &self.solver
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.controls.len()
    }

    /// Iterate over the quadratic segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = QuadSegment> + '_ {
        self.anchors
            .segments()
            .zip(&self.controls)
            .map(|((_, start, end), control)| QuadSegment::new(start, control.position, end))
    }
}
