//! Whitted math - homogeneous coordinates and transforms.
//!
//! - [`HomogeneousVector`]: points (`w != 0`) and vectors (`w == 0`) in one type,
//!   with arithmetic checked against the affine rules
//! - [`AffineTransform`]: general 4x4 matrices such as projections
//! - [`RigidTransform`]: rotation, uniform scale and translation only, with a
//!   closed-form inverse
//! - [`camera`]: `look_at`, `persp` and `inv_persp`

// Re-export glam for convenience
pub use glam::{DMat3, DMat4, DVec3, DVec4};

mod hvec;
mod transform;
pub mod camera;

pub use camera::{inv_persp, look_at, persp, Degeneracy, Diagnosed};
pub use hvec::HomogeneousVector;
pub use transform::{AffineTransform, RigidTransform};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_and_vector_constructors() {
        let p = HomogeneousVector::point(1.0, 2.0, 3.0);
        let v = HomogeneousVector::vector(1.0, 2.0, 3.0);
        assert!(p.is_point());
        assert!(v.is_vector());
        assert_eq!(p.xyz(), v.xyz());
    }

    #[test]
    fn test_rigid_transform_moves_points_not_vectors() {
        let t = RigidTransform::translate(1.0, 0.0, 0.0) * RigidTransform::scale(2.0);
        assert_eq!(
            t * HomogeneousVector::point(1.0, 1.0, 1.0),
            HomogeneousVector::point(3.0, 2.0, 2.0)
        );
        assert_eq!(
            t * HomogeneousVector::vector(1.0, 1.0, 1.0),
            HomogeneousVector::vector(2.0, 2.0, 2.0)
        );
    }
}
