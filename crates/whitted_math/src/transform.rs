// Affine and rigid transforms acting on homogeneous coordinates.
//
// Both types wrap a glam::DMat4 (column-major). `AffineTransform` accepts any
// matrix; `RigidTransform` can only be built from rotations, uniform scales and
// translations, which is what makes its closed-form inverse valid.

use std::ops::{Mul, MulAssign};

use glam::{DMat3, DMat4, DVec3};

use crate::HomogeneousVector;

/// Skew-symmetric 3x3 block `K` with `K x = v × x`.
fn skew(v: DVec3) -> DMat3 {
    // columns
    DMat3::from_cols(
        DVec3::new(0.0, v.z, -v.y),
        DVec3::new(-v.z, 0.0, v.x),
        DVec3::new(v.y, -v.x, 0.0),
    )
}

/// A general 4x4 transform.
///
/// There is deliberately no `inverse` here; see [`RigidTransform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(DMat4);

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    pub fn from_mat4(m: DMat4) -> Self {
        Self(m)
    }

    /// Build from row-major elements, `rows[i][j]` being row `i`, column `j`.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self(DMat4::from_cols_array_2d(&rows).transpose())
    }

    pub fn as_mat4(&self) -> &DMat4 {
        &self.0
    }

    /// Element at row `row`, column `col`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.col(col)[row]
    }

    /// Matrix form of the cross product: `cross_matrix(v) * x == v × x` for
    /// vectors `x`. The homogeneous corner is 1, so points keep their `w`.
    pub fn cross_matrix(v: HomogeneousVector) -> Self {
        if !v.is_vector() {
            log::warn!("cross_matrix called on non-vector {:?}", v);
        }
        Self(DMat4::from_mat3(skew(v.cartesian())))
    }

    /// Transform a point or vector.
    pub fn apply(&self, v: HomogeneousVector) -> HomogeneousVector {
        HomogeneousVector::from_dvec4(self.0 * v.to_dvec4())
    }

    pub fn abs_diff_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.0.abs_diff_eq(other.0, tolerance)
    }
}

impl Mul for AffineTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Mul<HomogeneousVector> for AffineTransform {
    type Output = HomogeneousVector;

    fn mul(self, rhs: HomogeneousVector) -> HomogeneousVector {
        self.apply(rhs)
    }
}

impl From<RigidTransform> for AffineTransform {
    fn from(t: RigidTransform) -> Self {
        Self(t.0)
    }
}

/// A composition of rotations, uniform scales and translations.
///
/// The only constructors are the ones below and composition with another
/// `RigidTransform`, so the upper-left 3x3 block is always `s R` for a rotation
/// `R` and a scalar `s`. That invariant is what [`RigidTransform::inverse`]
/// relies on: it transposes the block, divides by `s²` and runs the
/// translation back through the result. Applied to a sheared or non-uniformly
/// scaled matrix it would silently produce garbage, which is why there is no
/// way to build one from an arbitrary matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform(DMat4);

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    pub fn translate(tx: f64, ty: f64, tz: f64) -> Self {
        Self(DMat4::from_translation(DVec3::new(tx, ty, tz)))
    }

    /// Uniform scale by `s`.
    pub fn scale(s: f64) -> Self {
        Self(DMat4::from_scale(DVec3::splat(s)))
    }

    /// Rotate by `theta` radians about `axis` (normalized internally).
    ///
    /// Rodrigues' formula, `I + sin θ K + (1 - cos θ) K²` with `K` the cross
    /// matrix of the unit axis.
    pub fn rotate(theta: f64, axis: HomogeneousVector) -> Self {
        let k = skew(axis.to_vector().normalize().xyz());
        let (sin, cos) = theta.sin_cos();
        let r = DMat3::IDENTITY + k * sin + (k * k) * (1.0 - cos);
        Self(DMat4::from_mat3(r))
    }

    /// Build from an orthonormal basis given as the rows of the rotation
    /// block, followed by a translation. Used by `look_at`.
    pub(crate) fn from_basis_rows(x: DVec3, y: DVec3, z: DVec3, translation: DVec3) -> Self {
        let r = DMat3::from_cols(x, y, z).transpose();
        let mut m = DMat4::from_mat3(r);
        m.w_axis = translation.extend(1.0);
        Self(m)
    }

    pub fn as_mat4(&self) -> &DMat4 {
        &self.0
    }

    /// Element at row `row`, column `col`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.col(col)[row]
    }

    /// Closed-form inverse.
    pub fn inverse(&self) -> Self {
        let block = DMat3::from_mat4(self.0);
        // column 0 of s R has squared length s²
        let inv_scale2 = 1.0 / block.x_axis.length_squared();
        let inv_block = block.transpose() * inv_scale2;
        let translation = self.0.w_axis.truncate();
        let mut m = DMat4::from_mat3(inv_block);
        m.w_axis = (-(inv_block * translation)).extend(1.0);
        Self(m)
    }

    /// Transform a point or vector.
    pub fn apply(&self, v: HomogeneousVector) -> HomogeneousVector {
        HomogeneousVector::from_dvec4(self.0 * v.to_dvec4())
    }

    pub fn abs_diff_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.0.abs_diff_eq(other.0, tolerance)
    }
}

impl Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl MulAssign for RigidTransform {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = self.0 * rhs.0;
    }
}

impl Mul<HomogeneousVector> for RigidTransform {
    type Output = HomogeneousVector;

    fn mul(self, rhs: HomogeneousVector) -> HomogeneousVector {
        self.apply(rhs)
    }
}

impl Mul<AffineTransform> for RigidTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        AffineTransform(self.0 * rhs.0)
    }
}

impl Mul<RigidTransform> for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: RigidTransform) -> AffineTransform {
        AffineTransform(self.0 * rhs.0)
    }
}
