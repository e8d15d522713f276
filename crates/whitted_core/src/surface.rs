//! Renderable surfaces: a node, a material and a primitive.

use whitted_math::{HomogeneousVector, RigidTransform};

use crate::intersect::SurfaceHit;
use crate::material::{palette, Material};
use crate::mesh::Mesh;
use crate::node::{LineSink, Node, Transformable};
use crate::sphere::Sphere;

/// The primitive a surface is made of.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Mesh(Mesh),
}

/// A primitive placed in the world with a Phong material.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    node: Node,
    pub material: Material,
    shape: Shape,
}

impl Surface {
    pub fn sphere(material: Material) -> Self {
        Self {
            node: Node::new(palette::BLUE),
            material,
            shape: Shape::Sphere(Sphere),
        }
    }

    /// Meshes carry an axes adornment.
    pub fn mesh(mesh: Mesh, material: Material) -> Self {
        Self {
            node: Node::new(palette::BLUE).with_axes(palette::CYAN),
            material,
            shape: Shape::Mesh(mesh),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self.shape, Shape::Sphere(_))
    }

    /// Highlight as the picked surface.
    pub fn select(&mut self) {
        self.node.color = palette::YELLOW;
        if let Shape::Mesh(mesh) = &mut self.shape {
            mesh.bounds_mut().color = palette::RED;
        }
    }

    pub fn deselect(&mut self) {
        self.node.color = palette::BLUE;
        if let Shape::Mesh(mesh) = &mut self.shape {
            mesh.bounds_mut().color = palette::BLUE;
        }
    }

    /// Cheap intersection used for picking. Meshes only test their bounds.
    pub fn intersect(&self, orig: HomogeneousVector, dir: HomogeneousVector) -> Option<f64> {
        let state = self.node.state();
        match &self.shape {
            Shape::Sphere(sphere) => sphere.intersect(&state, orig, dir),
            Shape::Mesh(mesh) => mesh.intersect(&state, orig, dir),
        }
    }

    /// Exact intersection with world-space hit point and normal.
    pub fn fine_intersect(&self, orig: HomogeneousVector, dir: HomogeneousVector) -> Option<SurfaceHit> {
        let state = self.node.state();
        match &self.shape {
            Shape::Sphere(sphere) => sphere.fine_intersect(&state, orig, dir),
            Shape::Mesh(mesh) => mesh.fine_intersect(&state, orig, dir),
        }
    }

    /// Emit the wireframe and any enabled adornments.
    pub fn render(&self, parent: &RigidTransform, sink: &mut dyn LineSink) {
        let transform = self.node.compose(parent);
        self.node.render_axes(&transform, sink);
        match &self.shape {
            Shape::Sphere(sphere) => sphere.render(&transform, self.node.color, sink),
            Shape::Mesh(mesh) => {
                if self.node.shows_box() {
                    mesh.bounds().render(&transform, sink);
                }
                mesh.render(&transform, self.node.color, sink);
            }
        }
    }
}

impl Transformable for Surface {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
}
