//! Camera state and primary-ray generation.

use glam::DVec3;
use whitted_core::{palette, Node, Scene, Transformable};
use whitted_math::{look_at, persp, AffineTransform, HomogeneousVector, RigidTransform};

/// Largest image-plane half-width and depth.
const MAX_EXTENT: f64 = 100.0;
/// Smallest image-plane half-width and depth.
const MIN_EXTENT: f64 = 1.0;
/// Closest the near plane may come to the camera.
const MIN_NEAR: f64 = 0.5;
/// Minimum gap between the near and far planes.
const MIN_PLANE_GAP: f64 = 1.0;
/// Step for width/depth adjustments.
const ZOOM_FACTOR: f64 = 1.1;

/// How primary rays leave the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// All rays start at the camera origin
    Perspective,
    /// Rays start on the image plane, parallel to the view axis
    Orthographic,
}

/// What [`View::snap`] aims at next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnapTarget {
    WorldOrigin,
    Selection,
}

/// A camera looking into a scene.
///
/// The node's state is the world-to-camera transform. The camera looks down
/// its `-z` axis at an image plane `depth` units away whose half-width is
/// `width`.
#[derive(Debug, Clone)]
pub struct View {
    node: Node,
    projection: Projection,
    width: f64,
    depth: f64,
    near: f64,
    far: f64,
    snap_target: SnapTarget,
}

impl Default for View {
    fn default() -> Self {
        let camera = look_at(
            HomogeneousVector::point(0.0, 0.0, 8.0),
            HomogeneousVector::point(0.0, 0.0, 0.0),
            HomogeneousVector::vector(0.0, 1.0, 0.0),
        )
        .into_inner();

        Self {
            node: Node::new(palette::GREEN)
                .with_axes(palette::GREEN)
                .with_state(camera),
            projection: Projection::Perspective,
            width: 6.0,
            depth: 8.0,
            near: 0.5,
            far: 20.0,
            snap_target: SnapTarget::WorldOrigin,
        }
    }
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the camera at `eye` looking at `target`.
    ///
    /// Degenerate input is repaired (and logged) by [`look_at`].
    pub fn look_at(&mut self, eye: DVec3, target: DVec3, up: DVec3) {
        let camera = look_at(
            HomogeneousVector::from_point3(eye),
            HomogeneousVector::from_point3(target),
            HomogeneousVector::from_vector3(up),
        );
        self.node.set_state(camera.into_inner());
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Switch between perspective and orthographic. Returns the new mode.
    pub fn toggle_projection(&mut self) -> Projection {
        self.projection = match self.projection {
            Projection::Perspective => Projection::Orthographic,
            Projection::Orthographic => Projection::Perspective,
        };
        self.projection
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    pub fn inc_width(&mut self) {
        self.width = (self.width * ZOOM_FACTOR).min(MAX_EXTENT);
    }

    pub fn dec_width(&mut self) {
        self.width = (self.width / ZOOM_FACTOR).max(MIN_EXTENT);
    }

    pub fn inc_depth(&mut self) {
        self.depth = (self.depth * ZOOM_FACTOR).min(MAX_EXTENT);
    }

    pub fn dec_depth(&mut self) {
        self.depth = (self.depth / ZOOM_FACTOR).max(MIN_EXTENT);
    }

    /// Move the near plane, keeping it between the camera and the far plane.
    pub fn move_near_plane(&mut self, delta: f64) {
        self.near = (self.near + delta).min(self.far - MIN_PLANE_GAP).max(MIN_NEAR);
    }

    /// Move the far plane, keeping it beyond the near plane.
    pub fn move_far_plane(&mut self, delta: f64) {
        self.far = (self.far + delta).min(MAX_EXTENT).max(self.near + MIN_PLANE_GAP);
    }

    /// Camera-to-clip matrix for the current mode.
    pub fn projection_matrix(&self) -> AffineTransform {
        match self.projection {
            Projection::Perspective => persp(self.near, self.far, self.depth / self.width),
            Projection::Orthographic => {
                let (w, n, f) = (self.width, self.near, self.far);
                AffineTransform::from_rows([
                    [1.0 / w, 0.0, 0.0, 0.0],
                    [0.0, 1.0 / w, 0.0, 0.0],
                    [0.0, 0.0, -2.0 / (f - n), -(f + n) / (f - n)],
                    [0.0, 0.0, 0.0, 1.0],
                ])
            }
        }
    }

    /// World-space ray through image-plane coordinates `(x, y)`.
    ///
    /// Both coordinates run from `-width` to `width`. The direction is not
    /// normalized.
    pub fn cast_ray(&self, x: f64, y: f64) -> (HomogeneousVector, HomogeneousVector) {
        let to_world = self.node.state().inverse();
        match self.projection {
            Projection::Perspective => (
                to_world * HomogeneousVector::ORIGIN,
                to_world * HomogeneousVector::vector(x, y, -self.depth),
            ),
            Projection::Orthographic => (
                to_world * HomogeneousVector::point(x, y, 0.0),
                to_world * HomogeneousVector::vector(0.0, 0.0, -self.depth),
            ),
        }
    }

    /// Map a window pixel (origin top left) onto the image plane.
    pub fn window_to_plane(&self, px: f64, py: f64, window_width: f64, window_height: f64) -> (f64, f64) {
        let x = 2.0 * self.width * px / window_width - self.width;
        let y = self.width - 2.0 * self.width * py / window_height;
        (x, y)
    }

    /// Select the surface under a window pixel. Returns the new selection.
    pub fn pick(
        &self,
        scene: &mut Scene,
        px: f64,
        py: f64,
        window_width: f64,
        window_height: f64,
    ) -> Option<usize> {
        let (x, y) = self.window_to_plane(px, py, window_width, window_height);
        let (orig, dir) = self.cast_ray(x, y);
        scene.intersection(orig, dir)
    }

    /// Re-aim the camera without moving it.
    ///
    /// Alternates between the world origin and the origin of the selected
    /// surface (the world origin again if nothing is selected). The camera
    /// keeps its current up direction.
    pub fn snap(&mut self, scene: &Scene) {
        let to_world = self.node.state().inverse();
        let eye = to_world * HomogeneousVector::ORIGIN;
        let up = to_world * HomogeneousVector::vector(0.0, 1.0, 0.0);

        let (focus, next) = match self.snap_target {
            SnapTarget::WorldOrigin => (HomogeneousVector::ORIGIN, SnapTarget::Selection),
            SnapTarget::Selection => (scene.state() * HomogeneousVector::ORIGIN, SnapTarget::WorldOrigin),
        };
        log::debug!("Snapping camera at {:?} to {:?}", eye.cartesian(), focus.cartesian());

        self.node.set_state(look_at(eye, focus, up).into_inner());
        self.snap_target = next;
    }

    /// World-to-camera transform.
    pub fn camera(&self) -> RigidTransform {
        self.node.state()
    }
}

impl Transformable for View {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
}
