//! Indexed triangle meshes.

use thiserror::Error;
use whitted_math::{HomogeneousVector, RigidTransform};

use crate::bbox::BoundingBox;
use crate::intersect::{triangle_intersect, Facet, SurfaceHit};
use crate::material::Color;
use crate::node::{emit_line, LineSink};

/// Face hits closer than this to the ray origin are ignored.
///
/// Keeps secondary rays from re-hitting the face they start on.
pub const MIN_HIT_DISTANCE: f64 = 0.2;

/// Errors from building a mesh out of raw vertex and face lists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    NoVertices,

    #[error("face {face} references vertex {index}, but the mesh has only {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Triangle mesh in object space with smoothed vertex normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<HomogeneousVector>,
    normals: Vec<HomogeneousVector>,
    faces: Vec<[usize; 3]>,
    bounds: BoundingBox,
}

impl Mesh {
    /// Build a mesh from zero-based face indices.
    ///
    /// Every index is checked here once so intersection can index freely.
    pub fn new(vertices: Vec<HomogeneousVector>, faces: Vec<[usize; 3]>) -> Result<Self, MeshError> {
        let vertices: Vec<_> = vertices.into_iter().map(HomogeneousVector::to_point).collect();
        let bounds = BoundingBox::from_points(&vertices).ok_or(MeshError::NoVertices)?;

        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let normals = vertex_normals(&vertices, &faces);
        log::debug!(
            "Built mesh: {} vertices, {} faces, bounds {:?} .. {:?}",
            vertices.len(),
            faces.len(),
            bounds.min(),
            bounds.max()
        );

        Ok(Self {
            vertices,
            normals,
            faces,
            bounds,
        })
    }

    pub fn vertices(&self) -> &[HomogeneousVector] {
        &self.vertices
    }

    pub fn normals(&self) -> &[HomogeneousVector] {
        &self.normals
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn bounds_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounds
    }

    /// Coarse test against the bounding box only.
    pub fn intersect(
        &self,
        state: &RigidTransform,
        orig: HomogeneousVector,
        dir: HomogeneousVector,
    ) -> Option<f64> {
        let inv = state.inverse();
        self.bounds.intersect(inv * orig, inv * dir)
    }

    /// Nearest face hit at least [`MIN_HIT_DISTANCE`] along the ray.
    ///
    /// The hit point and normal are interpolated from the face's vertices and
    /// vertex normals, then taken back to world space.
    pub fn fine_intersect(
        &self,
        state: &RigidTransform,
        orig: HomogeneousVector,
        dir: HomogeneousVector,
    ) -> Option<SurfaceHit> {
        let inv = state.inverse();
        let orig = inv * orig;
        let dir = inv * dir;

        // Bail early if the ray misses the box
        self.bounds.intersect(orig, dir)?;

        let (face, hit) = self
            .faces
            .iter()
            .filter_map(|&[a, b, c]| {
                let hit = triangle_intersect(
                    orig,
                    dir,
                    self.vertices[a],
                    self.vertices[b],
                    self.vertices[c],
                    Facet::Triangle,
                )?;
                (hit.t >= MIN_HIT_DISTANCE).then_some(([a, b, c], hit))
            })
            .min_by(|(_, x), (_, y)| x.t.total_cmp(&y.t))?;

        let [a, b, c] = face;
        let point = hit.interpolate(&self.vertices[a], &self.vertices[b], &self.vertices[c]);
        let normal = hit.interpolate(&self.normals[a], &self.normals[b], &self.normals[c]);

        Some(SurfaceHit {
            t: hit.t,
            point: *state * point,
            normal: (*state * normal).normalize(),
        })
    }

    /// Wireframe: every triangle edge.
    pub fn render(&self, transform: &RigidTransform, color: Color, sink: &mut dyn LineSink) {
        for &[a, b, c] in &self.faces {
            let (va, vb, vc) = (self.vertices[a], self.vertices[b], self.vertices[c]);
            emit_line(sink, transform, va, vb, color);
            emit_line(sink, transform, vb, vc, color);
            emit_line(sink, transform, vc, va, color);
        }
    }
}

/// Per-vertex normals: the normalized sum of the unit normals of every face
/// touching the vertex.
fn vertex_normals(vertices: &[HomogeneousVector], faces: &[[usize; 3]]) -> Vec<HomogeneousVector> {
    let mut normals = vec![HomogeneousVector::ZERO; vertices.len()];
    for &[a, b, c] in faces {
        let (va, vb, vc) = (vertices[a], vertices[b], vertices[c]);
        let face_normal = -(vb - va).cross(&(vc - vb)).normalize();
        normals[a] += face_normal;
        normals[b] += face_normal;
        normals[c] += face_normal;
    }
    normals.into_iter().map(HomogeneousVector::normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Line;

    /// Two triangles covering `[-1, 1]²` in the `z = 0` plane.
    fn square() -> Mesh {
        Mesh::new(
            vec![
                HomogeneousVector::point(-1.0, -1.0, 0.0),
                HomogeneousVector::point(1.0, -1.0, 0.0),
                HomogeneousVector::point(1.0, 1.0, 0.0),
                HomogeneousVector::point(-1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .expect("valid mesh")
    }

    #[test]
    fn test_rejects_out_of_range_face() {
        let err = Mesh::new(
            vec![
                HomogeneousVector::point(0.0, 0.0, 0.0),
                HomogeneousVector::point(1.0, 0.0, 0.0),
                HomogeneousVector::point(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 1, 3]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::FaceIndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_rejects_empty_mesh() {
        assert_eq!(Mesh::new(Vec::new(), Vec::new()).unwrap_err(), MeshError::NoVertices);
    }

    #[test]
    fn test_vertex_normals() {
        let mesh = square();
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(&HomogeneousVector::vector(0.0, 0.0, -1.0), 1e-12));
        }
    }

    #[test]
    fn test_unused_vertex_has_zero_normal() {
        let mesh = Mesh::new(
            vec![
                HomogeneousVector::point(0.0, 0.0, 0.0),
                HomogeneousVector::point(1.0, 0.0, 0.0),
                HomogeneousVector::point(0.0, 1.0, 0.0),
                HomogeneousVector::point(5.0, 5.0, 5.0),
            ],
            vec![[0, 1, 2]],
        )
        .expect("valid mesh");
        assert_eq!(mesh.normals()[3], HomogeneousVector::ZERO);
    }

    #[test]
    fn test_fine_intersect() {
        let state = RigidTransform::translate(0.0, 0.0, -1.0);
        let hit = square()
            .fine_intersect(
                &state,
                HomogeneousVector::point(0.5, -0.5, 5.0),
                HomogeneousVector::vector(0.0, 0.0, -1.0),
            )
            .expect("ray crosses the square");
        assert!((hit.t - 6.0).abs() < 1e-12);
        assert!(hit.point.abs_diff_eq(&HomogeneousVector::point(0.5, -0.5, -1.0), 1e-12));
        assert!(hit.normal.abs_diff_eq(&HomogeneousVector::vector(0.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_coarse_intersect_uses_box() {
        let t = square().intersect(
            &RigidTransform::IDENTITY,
            HomogeneousVector::point(0.5, -0.5, 5.0),
            HomogeneousVector::vector(0.0, 0.0, -1.0),
        );
        assert_eq!(t, Some(5.0));
    }

    #[test]
    fn test_ignores_hits_closer_than_min_distance() {
        let mesh = square();
        let orig = HomogeneousVector::point(0.5, -0.5, 0.1);
        let dir = HomogeneousVector::vector(0.0, 0.0, -1.0);
        assert!(mesh.fine_intersect(&RigidTransform::IDENTITY, orig, dir).is_none());
    }

    #[test]
    fn test_render_face_edges() {
        let mut lines: Vec<Line> = Vec::new();
        square().render(&RigidTransform::IDENTITY, Color::ONE, &mut lines);
        assert_eq!(lines.len(), 6);
    }
}
