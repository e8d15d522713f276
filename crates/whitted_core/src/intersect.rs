//! Ray/triangle intersection and hit records.
//!
//! Uses the Möller-Trumbore algorithm. The same routine also answers
//! ray/parallelogram queries, which is how box faces are tested.

use whitted_math::HomogeneousVector;

/// Determinant threshold below which the ray counts as parallel to the face.
const EPSILON: f64 = 1e-6;

/// Shape spanned by `v0`, `v1 - v0` and `v2 - v0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    /// The triangle `v0 v1 v2`
    Triangle,
    /// The parallelogram with corners `v0`, `v1`, `v2` and `v1 + v2 - v0`
    Parallelogram,
}

/// Ray parameter and barycentric coordinates of a facet hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter; may be negative (hit behind the origin)
    pub t: f64,
    pub u: f64,
    pub v: f64,
}

impl TriangleHit {
    /// Weights of `v0`, `v1` and `v2`.
    pub fn barycentric(&self) -> [f64; 3] {
        [1.0 - self.u - self.v, self.u, self.v]
    }

    /// Interpolate per-vertex attributes with this hit's coordinates.
    pub fn interpolate(
        &self,
        a: &HomogeneousVector,
        b: &HomogeneousVector,
        c: &HomogeneousVector,
    ) -> HomogeneousVector {
        HomogeneousVector::combine3(a, b, self.u, c, self.v)
    }
}

/// Intersect the line `orig + t dir` with a triangle or parallelogram.
///
/// Returns `None` when the line is (nearly) parallel to the facet or misses
/// it. Hits behind the origin are reported with a negative `t`; filtering is
/// up to the caller.
pub fn triangle_intersect(
    orig: HomogeneousVector,
    dir: HomogeneousVector,
    v0: HomogeneousVector,
    v1: HomogeneousVector,
    v2: HomogeneousVector,
    facet: Facet,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = dir.cross(&edge2);
    let det = edge1.dot(&pvec);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = orig - v0;
    let u = tvec.dot(&pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(&edge1);
    let v = dir.dot(&qvec) * inv_det;
    let outside = match facet {
        Facet::Triangle => v < 0.0 || u + v > 1.0,
        Facet::Parallelogram => !(0.0..=1.0).contains(&v),
    };
    if outside {
        return None;
    }

    let t = edge2.dot(&qvec) * inv_det;
    Some(TriangleHit { t, u, v })
}

/// World-space result of a fine intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter in world space
    pub t: f64,
    /// Hit point
    pub point: HomogeneousVector,
    /// Unit surface normal, not oriented against the ray
    pub normal: HomogeneousVector,
}
