//! Perspective camera and pointer ray picking.

use glam::{DMat4, DVec2, DVec3};
use kurbo::{Point, Size};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f64 = 75.0;
/// Default near clip distance.
pub const DEFAULT_NEAR: f64 = 0.1;
/// Default far clip distance.
pub const DEFAULT_FAR: f64 = 1000.0;
/// Default distance of the eye from the origin along +Z.
pub const DEFAULT_DISTANCE: f64 = 10.0;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Intersect with a plane.
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane lies
    /// behind the origin. A ray lying inside the plane hits at its origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<DVec3> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() <= f64::EPSILON {
            return (plane.distance_to_point(self.origin).abs() <= f64::EPSILON).then_some(self.origin);
        }
        let t = -(self.origin.dot(plane.normal) + plane.constant) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }
}

/// A plane `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: DVec3,
    pub constant: f64,
}

impl Plane {
    /// The `z = 0` plane that new points are placed on.
    pub const XY: Self = Self {
        normal: DVec3::Z,
        constant: 0.0,
    };

    pub fn new(normal: DVec3, constant: f64) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            constant,
        }
    }

    /// Signed distance from the plane.
    pub fn distance_to_point(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.constant
    }
}

/// A perspective camera looking at a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Viewport width over height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, DEFAULT_DISTANCE),
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov_degrees: DEFAULT_FOV_DEGREES,
            aspect: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl Camera {
    /// Create a camera with default settings for the given viewport.
    pub fn new(viewport: Size) -> Self {
        let mut camera = Self::default();
        camera.resize(viewport);
        camera
    }

    /// Update the aspect ratio after the viewport changed size.
    pub fn resize(&mut self, viewport: Size) {
        if viewport.width > 0.0 && viewport.height > 0.0 {
            self.aspect = viewport.width / viewport.height;
        }
    }

    /// World-to-view transform.
    pub fn view(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    /// View-to-clip transform.
    pub fn projection(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined world-to-clip transform.
    pub fn view_projection(&self) -> DMat4 {
        self.projection() * self.view()
    }

    /// Convert a pointer position in viewport pixels to normalized device
    /// coordinates (`[-1, 1]` on both axes, +Y up).
    pub fn screen_to_ndc(point: Point, viewport: Size) -> DVec2 {
        DVec2::new(
            (point.x / viewport.width) * 2.0 - 1.0,
            -(point.y / viewport.height) * 2.0 + 1.0,
        )
    }

    /// Ray from the eye through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: DVec2) -> Ray {
        let unprojected = self
            .view_projection()
            .inverse()
            .project_point3(DVec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, unprojected - self.position)
    }

    /// Ray from the eye through a pointer position in viewport pixels.
    pub fn ray_from_screen(&self, point: Point, viewport: Size) -> Ray {
        self.ray_from_ndc(Self::screen_to_ndc(point, viewport))
    }

    /// Project a pointer position onto a plane.
    pub fn pick_on_plane(&self, point: Point, viewport: Size, plane: &Plane) -> Option<DVec3> {
        self.ray_from_screen(point, viewport).intersect_plane(plane)
    }

    /// Project a world point to viewport pixels; `None` behind the eye.
    pub fn world_to_screen(&self, world: DVec3, viewport: Size) -> Option<Point> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Point::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const VIEWPORT: Size = Size::new(1400.0, 900.0);

    #[test]
    fn test_default_camera() {
        let camera = Camera::new(VIEWPORT);
        assert_eq!(camera.position, DVec3::new(0.0, 0.0, 10.0));
        assert_abs_diff_eq!(camera.aspect, 1400.0 / 900.0);
    }

    #[test]
    fn test_resize_ignores_empty_viewport() {
        let mut camera = Camera::new(VIEWPORT);
        camera.resize(Size::new(0.0, 100.0));
        assert_abs_diff_eq!(camera.aspect, 1400.0 / 900.0);
    }

    #[test]
    fn test_screen_to_ndc() {
        let center = Camera::screen_to_ndc(Point::new(700.0, 450.0), VIEWPORT);
        assert_abs_diff_eq!(center.x, 0.0);
        assert_abs_diff_eq!(center.y, 0.0);
        let top_left = Camera::screen_to_ndc(Point::ZERO, VIEWPORT);
        assert_abs_diff_eq!(top_left.x, -1.0);
        assert_abs_diff_eq!(top_left.y, 1.0);
    }

    #[test]
    fn test_center_ray_hits_origin() {
        let camera = Camera::new(VIEWPORT);
        let hit = camera
            .pick_on_plane(Point::new(700.0, 450.0), VIEWPORT, &Plane::XY)
            .unwrap();
        assert!(hit.abs_diff_eq(DVec3::ZERO, 1e-9));
    }

    #[test]
    fn test_pick_roundtrips_through_projection() {
        let camera = Camera::new(VIEWPORT);
        let world = DVec3::new(2.5, -1.25, 0.0);
        let screen = camera.world_to_screen(world, VIEWPORT).unwrap();
        let hit = camera.pick_on_plane(screen, VIEWPORT, &Plane::XY).unwrap();
        assert!(hit.abs_diff_eq(world, 1e-9), "{hit:?}");
    }

    #[test]
    fn test_upper_right_click_lands_upper_right() {
        let camera = Camera::new(VIEWPORT);
        let hit = camera
            .pick_on_plane(Point::new(1000.0, 200.0), VIEWPORT, &Plane::XY)
            .unwrap();
        assert!(hit.x > 0.0);
        assert!(hit.y > 0.0);
        assert_abs_diff_eq!(hit.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::X);
        assert!(ray.intersect_plane(&Plane::XY).is_none());
    }

    #[test]
    fn test_ray_in_plane_hits_origin() {
        let ray = Ray::new(DVec3::new(3.0, 1.0, 0.0), DVec3::X);
        assert_eq!(ray.intersect_plane(&Plane::XY), Some(DVec3::new(3.0, 1.0, 0.0)));
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z);
        assert!(ray.intersect_plane(&Plane::XY).is_none());
    }

    #[test]
    fn test_offset_plane() {
        let plane = Plane::new(DVec3::Z, -2.0);
        let ray = Ray::new(DVec3::new(1.0, 1.0, 10.0), DVec3::NEG_Z);
        let hit = ray.intersect_plane(&plane).unwrap();
        assert!(hit.abs_diff_eq(DVec3::new(1.0, 1.0, 2.0), 1e-12));
    }
}
