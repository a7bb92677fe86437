//! Scene state: the path being sketched, its camera, input and display curve.

use crate::camera::{Camera, Plane};
use crate::curve::{CurveRenderer, Polyline};
use crate::generated::{CurveShapeError, GeneratedCurve};
use crate::handles::{self, AnchorLabel, Handle, HandleLine};
use crate::input::{InputState, MouseButton, PointerEvent};
use crate::path::BezierPath;
use crate::style::SceneStyle;
use crate::tools::{DragController, DragOutcome};
use glam::DVec3;
use kurbo::{Point, Size};

/// Result of feeding one pointer event to the scene.
pub type SceneChange = DragOutcome;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Anchor and control point markers.
    pub handles: Vec<Handle>,
    /// Guides between anchors and their control points.
    pub handle_lines: Vec<HandleLine>,
    /// Numbered anchor labels.
    pub labels: Vec<AnchorLabel>,
    /// The tessellated curve, if there are at least two anchors.
    pub curve: Option<Polyline>,
    /// Revision of `curve`; changes whenever it is rebuilt.
    pub curve_revision: u64,
    pub style: SceneStyle,
}

/// The interactive sketching scene.
///
/// All mutation goes through pointer events or explicit imports; the display
/// curve is rebuilt from scratch after every geometry change.
#[derive(Debug, Clone)]
pub struct Scene {
    path: BezierPath,
    /// View into the scene.
    pub camera: Camera,
    /// Viewport size in pixels.
    viewport: Size,
    /// Plane that pointer presses are projected onto.
    pub drawing_plane: Plane,
    /// Pointer state.
    pub input: InputState,
    tool: DragController,
    renderer: CurveRenderer,
    curve: Option<Polyline>,
    curve_revision: u64,
    /// Display colors.
    pub style: SceneStyle,
}

impl Scene {
    /// Create an empty scene for a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        Self {
            path: BezierPath::new(),
            camera: Camera::new(viewport),
            viewport,
            drawing_plane: Plane::XY,
            input: InputState::new(),
            tool: DragController::new(),
            renderer: CurveRenderer::default(),
            curve: None,
            curve_revision: 0,
            style: SceneStyle::default(),
        }
    }

    /// Use a different tessellation density.
    pub fn with_renderer(mut self, renderer: CurveRenderer) -> Self {
        self.renderer = renderer;
        self.rebuild_curve();
        self
    }

    /// The path being sketched.
    pub fn path(&self) -> &BezierPath {
        &self.path
    }

    /// The current display curve.
    pub fn curve(&self) -> Option<&Polyline> {
        self.curve.as_ref()
    }

    /// Number of times the display curve has been rebuilt.
    pub fn curve_revision(&self) -> u64 {
        self.curve_revision
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The drag controller.
    pub fn tool(&self) -> &DragController {
        &self.tool
    }

    /// Update the viewport after a window resize.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// Project a viewport position onto the drawing plane.
    pub fn pick(&self, position: Point) -> Option<DVec3> {
        self.camera
            .pick_on_plane(position, self.viewport, &self.drawing_plane)
    }

    /// Feed a pointer event through input tracking and the drag controller.
    ///
    /// Presses that cannot be projected onto the drawing plane are ignored.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> SceneChange {
        self.input.handle_pointer_event(event);

        let outcome = match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => match self.pick(position) {
                Some(point) => self.tool.pointer_down(&mut self.path, point),
                None => {
                    log::debug!("Press at {:?} missed the drawing plane", position);
                    DragOutcome::None
                }
            },
            PointerEvent::Move { position } if self.tool.is_dragging() => match self.pick(position) {
                Some(point) => self.tool.pointer_move(&mut self.path, point),
                None => DragOutcome::None,
            },
            PointerEvent::Up { .. } => self.tool.pointer_up(),
            _ => DragOutcome::None,
        };

        if outcome.changes_geometry() {
            self.rebuild_curve();
        }
        outcome
    }

    /// Replace the whole path with a generated curve.
    ///
    /// Any drag in progress is abandoned. On error the scene is unchanged.
    pub fn import_generated(&mut self, curve: &GeneratedCurve) -> Result<(), CurveShapeError> {
        let path = curve.to_path()?;
        log::debug!(
            "Importing generated curve with {} anchors",
            path.anchors().len()
        );
        self.tool.cancel();
        self.path = path;
        self.rebuild_curve();
        Ok(())
    }

    /// Reset per-frame input state. Call once at the start of each redraw.
    pub fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    /// Build the draw list for the current frame.
    pub fn frame(&self) -> Frame {
        Frame {
            handles: handles::path_handles(&self.path),
            handle_lines: handles::handle_lines(&self.path),
            labels: handles::anchor_labels(&self.path),
            curve: self.curve.clone(),
            curve_revision: self.curve_revision,
            style: self.style,
        }
    }

    fn rebuild_curve(&mut self) {
        self.curve = self.renderer.tessellate(&self.path);
        self.curve_revision += 1;
    }
}
