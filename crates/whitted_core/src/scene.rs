//! Scene: lights, surfaces and the current selection.

use whitted_math::{DVec3, HomogeneousVector, RigidTransform};

use crate::intersect::SurfaceHit;
use crate::material::Light;
use crate::node::{LineSink, Node, Transformable};
use crate::surface::Surface;

/// A collection of lights and surfaces.
///
/// Surfaces are stored spheres first, then meshes, so an index below
/// [`Scene::num_spheres`] always names a sphere. Transform calls made through
/// [`Transformable`] act on the selected surface; adornment toggles apply to
/// every surface.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    node: Node,
    lights: Vec<Light>,
    surfaces: Vec<Surface>,
    num_spheres: usize,
    selected: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Add a surface, keeping spheres ahead of meshes. Returns its index.
    pub fn add_surface(&mut self, surface: Surface) -> usize {
        let index = if surface.is_sphere() {
            self.num_spheres += 1;
            self.num_spheres - 1
        } else {
            self.surfaces.len()
        };
        self.surfaces.insert(index, surface);

        // Keep the selection on the same surface
        if let Some(selected) = self.selected.as_mut() {
            if *selected >= index {
                *selected += 1;
            }
        }
        index
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn num_spheres(&self) -> usize {
        self.num_spheres
    }

    pub fn num_meshes(&self) -> usize {
        self.surfaces.len() - self.num_spheres
    }

    pub fn num_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn get_surface(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(index)
    }

    pub fn get_surface_mut(&mut self, index: usize) -> Option<&mut Surface> {
        self.surfaces.get_mut(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_surface(&self) -> Option<&Surface> {
        self.selected.and_then(|i| self.surfaces.get(i))
    }

    /// Select `index`, deselecting the previous surface. An index that names
    /// no surface clears the selection.
    pub fn select(&mut self, index: Option<usize>) {
        if let Some(previous) = self.selected.and_then(|i| self.surfaces.get_mut(i)) {
            previous.deselect();
        }
        self.selected = match index.and_then(|i| self.surfaces.get_mut(i).map(|s| (i, s))) {
            Some((i, surface)) => {
                surface.select();
                Some(i)
            }
            None => None,
        };
    }

    /// Pick the nearest surface along a ray using the coarse test.
    ///
    /// The winner becomes the selection; a miss clears it.
    pub fn intersection(&mut self, orig: HomogeneousVector, dir: HomogeneousVector) -> Option<usize> {
        let closest = self
            .surfaces
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.intersect(orig, dir).map(|t| (i, t)))
            .filter(|&(_, t)| t >= 0.0)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i);

        log::debug!("Picked surface {:?}", closest);
        self.select(closest);
        closest
    }

    /// Nearest fine intersection over every surface.
    pub fn nearest_hit(
        &self,
        orig: HomogeneousVector,
        dir: HomogeneousVector,
    ) -> Option<(&Surface, SurfaceHit)> {
        self.surfaces
            .iter()
            .filter_map(|s| s.fine_intersect(orig, dir).map(|hit| (s, hit)))
            .min_by(|(_, a), (_, b)| a.t.total_cmp(&b.t))
    }

    /// Emit every surface's wireframe.
    pub fn render(&self, parent: &RigidTransform, sink: &mut dyn LineSink) {
        let transform = self.node.compose(parent);
        for surface in &self.surfaces {
            surface.render(&transform, sink);
        }
    }

    fn selected_mut(&mut self) -> Option<&mut Surface> {
        self.selected.and_then(|i| self.surfaces.get_mut(i))
    }
}

impl Transformable for Scene {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    /// State of the selected surface, or the identity.
    fn state(&self) -> RigidTransform {
        self.selected_surface()
            .map(|s| s.state())
            .unwrap_or(RigidTransform::IDENTITY)
    }

    fn rotate(&mut self, theta: f64, axis: DVec3) {
        if let Some(s) = self.selected_mut() {
            s.rotate(theta, axis);
        }
    }

    fn scale(&mut self, s: f64) {
        if let Some(surface) = self.selected_mut() {
            surface.scale(s);
        }
    }

    fn translate(&mut self, offset: DVec3) {
        if let Some(s) = self.selected_mut() {
            s.translate(offset);
        }
    }

    fn rotate_local(&mut self, theta: f64, axis: DVec3) {
        if let Some(s) = self.selected_mut() {
            s.rotate_local(theta, axis);
        }
    }

    fn scale_local(&mut self, s: f64) {
        if let Some(surface) = self.selected_mut() {
            surface.scale_local(s);
        }
    }

    fn translate_local(&mut self, offset: DVec3) {
        if let Some(s) = self.selected_mut() {
            s.translate_local(offset);
        }
    }

    fn on_set_axes(&mut self) {
        self.surfaces.iter_mut().for_each(Transformable::set_axes);
    }

    fn on_unset_axes(&mut self) {
        self.surfaces.iter_mut().for_each(Transformable::unset_axes);
    }

    fn on_set_box(&mut self) {
        self.surfaces.iter_mut().for_each(Transformable::set_box);
    }

    fn on_unset_box(&mut self) {
        self.surfaces.iter_mut().for_each(Transformable::unset_box);
    }
}
