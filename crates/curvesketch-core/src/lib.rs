//! curvesketch Core Library
//!
//! Platform-agnostic scene logic for sketching quadratic Bézier curves in 3D:
//! anchor storage, automatic control points, tessellation, ray picking and
//! pointer-driven editing.

pub mod anchors;
pub mod camera;
pub mod curve;
pub mod generated;
pub mod handles;
pub mod input;
pub mod path;
pub mod scene;
pub mod solver;
pub mod style;
pub mod tools;

pub use anchors::AnchorStore;
pub use camera::{Camera, Plane, Ray};
pub use curve::{CubicSegment, CurveRenderer, Polyline, QuadSegment, SAMPLES_PER_SEGMENT};
pub use generated::{ControlPair, CurveShapeError, ExtractError, GeneratedCurve, Point3, extract_json};
pub use handles::{AnchorLabel, Handle, HandleKind, HandleLine, HANDLE_HIT_RADIUS};
pub use input::{InputState, MouseButton, PointerEvent};
pub use path::BezierPath;
pub use scene::{Frame, Scene, SceneChange};
pub use solver::{ControlPoint, ControlPointSolver, CURVATURE};
pub use style::SceneStyle;
pub use tools::{DragController, DragOutcome, ToolState};

/// Re-exported so callers can build points without naming glam themselves.
pub use glam::DVec3;
