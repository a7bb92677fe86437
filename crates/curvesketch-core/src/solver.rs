//! Automatic control point placement for quadratic segments.

use glam::DVec3;

/// Distance between a segment's midpoint and its automatic control point.
pub const CURVATURE: f64 = 1.5;

/// The single off-curve point of one quadratic segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Position in world coordinates.
    pub position: DVec3,
    /// Set once the point has been grabbed; manual points are never recomputed.
    pub manual: bool,
}

impl ControlPoint {
    /// Create an automatically placed control point.
    pub fn automatic(position: DVec3) -> Self {
        Self {
            position,
            manual: false,
        }
    }

    /// Create a control point that is exempt from recomputation.
    pub fn manual(position: DVec3) -> Self {
        Self {
            position,
            manual: true,
        }
    }
}

/// Derives one control point per segment from the neighbouring anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPointSolver {
    /// Length of the perpendicular offset from the segment midpoint.
    pub curvature: f64,
}

impl Default for ControlPointSolver {
    fn default() -> Self {
        Self {
            curvature: CURVATURE,
        }
    }
}

impl ControlPointSolver {
    /// Create a solver with a custom curvature.
    pub fn new(curvature: f64) -> Self {
        Self { curvature }
    }

    /// Compute the automatic control point for the segment `p0 -> p1`.
    ///
    /// The segment direction is rotated a quarter turn in the XY plane,
    /// normalized and scaled by the curvature, then added to the midpoint.
    /// A segment with no XY extent gets its midpoint.
    pub fn control_for(&self, p0: DVec3, p1: DVec3) -> DVec3 {
        let midpoint = (p0 + p1) * 0.5;
        let dir = p1 - p0;
        let offset = DVec3::new(-dir.y, dir.x, 0.0).normalize_or_zero() * self.curvature;
        midpoint + offset
    }

    /// Bring `controls` in line with `anchors`.
    ///
    /// Missing control points are created; existing ones are recomputed unless
    /// their manual flag is set.
    pub fn recompute(&self, anchors: &[DVec3], controls: &mut Vec<ControlPoint>) {
        for (i, pair) in anchors.windows(2).enumerate() {
            let position = self.control_for(pair[0], pair[1]);
            match controls.get_mut(i) {
                Some(control) if control.manual => {}
                Some(control) => control.position = position,
                None => controls.push(ControlPoint::automatic(position)),
            }
        }
    }
}
