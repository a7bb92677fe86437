//! Bézier segment evaluation and polyline tessellation.

use crate::path::BezierPath;
use glam::DVec3;

/// Number of divisions sampled along each segment.
pub const SAMPLES_PER_SEGMENT: usize = 50;

/// A quadratic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub start: DVec3,
    pub control: DVec3,
    pub end: DVec3,
}

impl QuadSegment {
    pub fn new(start: DVec3, control: DVec3, end: DVec3) -> Self {
        Self { start, control, end }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> DVec3 {
        let mt = 1.0 - t;
        self.start * (mt * mt) + self.control * (2.0 * mt * t) + self.end * (t * t)
    }

    /// Sample `divisions + 1` evenly spaced points, endpoints included.
    pub fn sample(&self, divisions: usize) -> Vec<DVec3> {
        sample_with(divisions, |t| self.eval(t))
    }
}

/// A cubic Bézier segment, as produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: DVec3,
    pub control1: DVec3,
    pub control2: DVec3,
    pub end: DVec3,
}

impl CubicSegment {
    pub fn new(start: DVec3, control1: DVec3, control2: DVec3, end: DVec3) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> DVec3 {
        let mt = 1.0 - t;
        self.start * (mt * mt * mt)
            + self.control1 * (3.0 * mt * mt * t)
            + self.control2 * (3.0 * mt * t * t)
            + self.end * (t * t * t)
    }

    /// Sample `divisions + 1` evenly spaced points, endpoints included.
    pub fn sample(&self, divisions: usize) -> Vec<DVec3> {
        sample_with(divisions, |t| self.eval(t))
    }

    /// Best single-control quadratic approximation.
    ///
    /// Uses the midpoint of the two degree-raised control estimates,
    /// `(3 (c1 + c2) - (p0 + p3)) / 4`.
    pub fn to_quadratic(&self) -> QuadSegment {
        let control = ((self.control1 + self.control2) * 3.0 - (self.start + self.end)) * 0.25;
        QuadSegment::new(self.start, control, self.end)
    }
}

fn sample_with(divisions: usize, eval: impl Fn(f64) -> DVec3) -> Vec<DVec3> {
    let divisions = divisions.max(1);
    (0..=divisions)
        .map(|i| eval(i as f64 / divisions as f64))
        .collect()
}

/// A connected line strip in world coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<DVec3>,
}

impl Polyline {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the lengths of all line pieces.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Turns a [`BezierPath`] into a single polyline for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveRenderer {
    /// Divisions per segment; each segment contributes `samples + 1` points.
    pub samples_per_segment: usize,
}

impl Default for CurveRenderer {
    fn default() -> Self {
        Self {
            samples_per_segment: SAMPLES_PER_SEGMENT,
        }
    }
}

impl CurveRenderer {
    pub fn new(samples_per_segment: usize) -> Self {
        Self {
            samples_per_segment,
        }
    }

    /// Tessellate every segment and concatenate the samples.
    ///
    /// Returns `None` when the path has fewer than two anchors.
    pub fn tessellate(&self, path: &BezierPath) -> Option<Polyline> {
        if path.segment_count() == 0 {
            return None;
        }
        let points = path
            .segments()
            .flat_map(|segment| segment.sample(self.samples_per_segment))
            .collect();
        Some(Polyline::new(points))
    }
}
