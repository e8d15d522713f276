//! Sphere primitive.
//!
//! The sphere is always the unit sphere at the object-space origin; position
//! and radius come from the owning node's transform.

use whitted_math::{HomogeneousVector, RigidTransform};

use crate::intersect::SurfaceHit;
use crate::material::Color;
use crate::node::{emit_line, LineSink};

const EPSILON: f64 = 1e-6;

/// Unit sphere centered at the object-space origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sphere;

impl Sphere {
    /// Ray parameter and object-space hit point of the nearest intersection in
    /// front of the origin.
    fn hit(
        &self,
        state: &RigidTransform,
        orig: HomogeneousVector,
        dir: HomogeneousVector,
    ) -> Option<(f64, HomogeneousVector)> {
        // Into object space
        let inv = state.inverse();
        let orig = inv * orig;
        let dir = inv * dir;

        // Closest approach to the center, as a multiple of dir
        let t0 = -dir.dot(&orig.to_vector()) / dir.dot(&dir);
        let dist = (orig + dir * t0).to_vector().norm();
        if dist > 1.0 {
            return None;
        }

        // Half chord length, as a multiple of dir
        let h = (1.0 - dist * dist).sqrt() / dir.norm();

        let t = if t0 > EPSILON {
            if h < t0 - EPSILON {
                t0 - h
            } else {
                t0 + h
            }
        } else if h > EPSILON - t0 {
            t0 + h
        } else {
            return None;
        };

        Some((t, orig + dir * t))
    }

    /// Coarse test: the ray parameter of the nearest hit.
    pub fn intersect(
        &self,
        state: &RigidTransform,
        orig: HomogeneousVector,
        dir: HomogeneousVector,
    ) -> Option<f64> {
        self.hit(state, orig, dir).map(|(t, _)| t)
    }

    /// Nearest hit with world-space point and normal.
    pub fn fine_intersect(
        &self,
        state: &RigidTransform,
        orig: HomogeneousVector,
        dir: HomogeneousVector,
    ) -> Option<SurfaceHit> {
        let (t, p) = self.hit(state, orig, dir)?;
        Some(SurfaceHit {
            t,
            point: *state * p,
            normal: (*state * p.to_vector()).normalize(),
        })
    }

    /// Wireframe: an inscribed octahedron.
    pub fn render(&self, transform: &RigidTransform, color: Color, sink: &mut dyn LineSink) {
        let tips = [
            HomogeneousVector::point(1.0, 0.0, 0.0),
            HomogeneousVector::point(-1.0, 0.0, 0.0),
            HomogeneousVector::point(0.0, 1.0, 0.0),
            HomogeneousVector::point(0.0, -1.0, 0.0),
            HomogeneousVector::point(0.0, 0.0, 1.0),
            HomogeneousVector::point(0.0, 0.0, -1.0),
        ];
        // every pair of tips that are not opposite each other is an edge
        for i in 0..tips.len() {
            for j in (i + 1)..tips.len() {
                if i / 2 != j / 2 {
                    emit_line(sink, transform, tips[i], tips[j], color);
                }
            }
        }
    }
}
