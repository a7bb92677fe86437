//! Curves produced by the text-to-geometry generator.
//!
//! The generator replies with free text that should contain a JSON object of
//! the form:
//!
//! ```json
//! {
//!   "anchors": [{ "x": 0, "y": 0, "z": 0 }, { "x": 2, "y": 0, "z": 0 }],
//!   "controls": [{ "cp1": { "x": 0.5, "y": 1, "z": 0 }, "cp2": { "x": 1.5, "y": 1, "z": 0 } }]
//! }
//! ```
//!
//! Each control pair describes a cubic segment between consecutive anchors.

use crate::curve::{CubicSegment, Polyline};
use crate::path::BezierPath;
use crate::solver::ControlPoint;
use glam::DVec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while pulling a JSON object out of generated text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Empty generator response")]
    Empty,
    #[error("No JSON object found")]
    NoJsonObject,
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors when a generated curve does not describe a valid path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveShapeError {
    #[error("Expected {expected} control pairs for {anchors} anchors, got {actual}")]
    ControlCount {
        anchors: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Coordinate as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<DVec3> for Point3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for DVec3 {
    fn from(p: Point3) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

/// The two cubic control points of one generated segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPair {
    pub cp1: Point3,
    pub cp2: Point3,
}

/// Anchors and per-segment control pairs returned by the generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedCurve {
    #[serde(default)]
    pub anchors: Vec<Point3>,
    #[serde(default)]
    pub controls: Vec<ControlPair>,
}

impl GeneratedCurve {
    /// Check that there is one control pair per segment and every coordinate
    /// is finite.
    pub fn validate(&self) -> Result<(), CurveShapeError> {
        let expected = self.anchors.len().saturating_sub(1);
        if self.controls.len() != expected {
            return Err(CurveShapeError::ControlCount {
                anchors: self.anchors.len(),
                expected,
                actual: self.controls.len(),
            });
        }
        if !self.anchors.iter().all(Point3::is_finite) {
            return Err(CurveShapeError::NonFinite("anchors"));
        }
        if !self
            .controls
            .iter()
            .all(|pair| pair.cp1.is_finite() && pair.cp2.is_finite())
        {
            return Err(CurveShapeError::NonFinite("controls"));
        }
        Ok(())
    }

    /// The cubic segments between consecutive anchors.
    pub fn segments(&self) -> impl Iterator<Item = CubicSegment> + '_ {
        self.anchors
            .windows(2)
            .zip(&self.controls)
            .map(|(pair, controls)| {
                CubicSegment::new(
                    pair[0].into(),
                    controls.cp1.into(),
                    controls.cp2.into(),
                    pair[1].into(),
                )
            })
    }

    /// Sample the cubic segments directly into one polyline.
    ///
    /// Returns `Ok(None)` for fewer than two anchors.
    pub fn tessellate(&self, samples_per_segment: usize) -> Result<Option<Polyline>, CurveShapeError> {
        self.validate()?;
        if self.anchors.len() < 2 {
            return Ok(None);
        }
        let points = self
            .segments()
            .flat_map(|segment| segment.sample(samples_per_segment))
            .collect();
        Ok(Some(Polyline::new(points)))
    }

    /// Convert to an editable quadratic path.
    ///
    /// Each cubic segment is approximated by a single quadratic control point,
    /// flagged manual so later anchor additions keep it in place.
    pub fn to_path(&self) -> Result<BezierPath, CurveShapeError> {
        self.validate()?;
        let anchors = self.anchors.iter().copied().map(DVec3::from).collect();
        let controls = self
            .segments()
            .map(|segment| ControlPoint::manual(segment.to_quadratic().control))
            .collect();
        BezierPath::from_parts(anchors, controls).ok_or(CurveShapeError::ControlCount {
            anchors: self.anchors.len(),
            expected: self.anchors.len().saturating_sub(1),
            actual: self.controls.len(),
        })
    }
}

/// Strip markdown fences from `text` and parse the outermost `{ ... }` span.
///
/// Fences are removed first ("```json" case-insensitively, then bare "```"),
/// each together with the whitespace that follows it. The span runs from the
/// first `{` to the last `}`.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    let cleaned = strip_fences(text);
    let cleaned = cleaned.trim();

    let start = cleaned.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = cleaned.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }

    Ok(serde_json::from_str(&cleaned[start..=end])?)
}

fn strip_fences(text: &str) -> String {
    let without_tagged = remove_marker(text, "```json", true);
    remove_marker(&without_tagged, "```", false)
}

/// Remove every occurrence of `marker` plus the whitespace right after it.
fn remove_marker(text: &str, marker: &str, ignore_case: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let found = if ignore_case {
            find_ignore_ascii_case(rest, marker)
        } else {
            rest.find(marker)
        };
        match found {
            Some(pos) => {
                out.push_str(&rest[..pos]);
                rest = rest[pos + marker.len()..].trim_start();
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
