//! Camera placement and projection matrices.
//!
//! `look_at` never fails. Degenerate input (eye on top of the target, an up
//! vector parallel to the view direction) is repaired with a fixed fallback
//! chain and the repairs are reported alongside the result.

use glam::DVec3;

use crate::{AffineTransform, HomogeneousVector, RigidTransform};

/// A degenerate camera configuration that was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Eye and target coincide; the target was moved to `eye - (0, 0, 1)`.
    CoincidentEyeAndTarget,
    /// The up vector was parallel to the view direction; world up `(0, 1, 0)` was used.
    UpParallelToView,
    /// World up was parallel to the view direction as well; `(0, 0, 1)` was used.
    WorldUpParallelToView,
}

/// A value together with the degeneracies repaired while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub diagnostics: Vec<Degeneracy>,
}

impl<T> Diagnosed<T> {
    /// True when no fallback was needed.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Component of `up` orthogonal to the unit vector `z`, normalized.
fn orthogonalize(up: HomogeneousVector, z: HomogeneousVector) -> HomogeneousVector {
    (up - z * up.dot(&z)).normalize()
}

/// World-to-camera transform for a camera at `eye` looking at `target`.
///
/// The camera looks down its own `-z` axis with `+y` towards `up`. `eye` and
/// `target` are treated as points and `up` as a vector whatever their `w`.
pub fn look_at(
    eye: HomogeneousVector,
    target: HomogeneousVector,
    up: HomogeneousVector,
) -> Diagnosed<RigidTransform> {
    let mut diagnostics = Vec::new();
    let eye = eye.to_point();
    let mut target = target.to_point();
    let up = up.to_vector();

    if (eye - target).norm() == 0.0 {
        log::warn!("look_at: eye and target are the same point {:?}", eye.cartesian());
        target = eye - HomogeneousVector::vector(0.0, 0.0, 1.0);
        diagnostics.push(Degeneracy::CoincidentEyeAndTarget);
    }

    let z = (eye - target).normalize();
    let mut y = orthogonalize(up, z);
    if y.norm() == 0.0 {
        log::warn!("look_at: up vector {:?} is parallel to the view direction", up.xyz());
        diagnostics.push(Degeneracy::UpParallelToView);
        y = orthogonalize(HomogeneousVector::vector(0.0, 1.0, 0.0), z);
        if y.norm() == 0.0 {
            log::warn!("look_at: world up is parallel to the view direction, using +z");
            diagnostics.push(Degeneracy::WorldUpParallelToView);
            y = orthogonalize(HomogeneousVector::vector(0.0, 0.0, 1.0), z);
        }
    }
    let x = y.cross(&z);

    let rotation = RigidTransform::from_basis_rows(x.xyz(), y.xyz(), z.xyz(), DVec3::ZERO);
    let shift = -(rotation * eye);
    let value = RigidTransform::from_basis_rows(x.xyz(), y.xyz(), z.xyz(), shift.cartesian());

    Diagnosed { value, diagnostics }
}

/// Perspective projection for an image plane scaled by `image`.
pub fn persp(near: f64, far: f64, image: f64) -> AffineTransform {
    AffineTransform::from_rows([
        [image, 0.0, 0.0, 0.0],
        [0.0, image, 0.0, 0.0],
        [0.0, 0.0, (near + far) / (near - far), 2.0 * near * far / (near - far)],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Closed-form inverse of [`persp`] with the same parameters.
pub fn inv_persp(near: f64, far: f64, image: f64) -> AffineTransform {
    AffineTransform::from_rows([
        [1.0 / image, 0.0, 0.0, 0.0],
        [0.0, 1.0 / image, 0.0, 0.0],
        [0.0, 0.0, 0.0, -1.0],
        [
            0.0,
            0.0,
            (near - far) / (2.0 * near * far),
            (near + far) / (2.0 * near * far),
        ],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_default_camera() {
        let view = look_at(
            HomogeneousVector::point(0.0, 0.0, 8.0),
            HomogeneousVector::point(0.0, 0.0, 0.0),
            HomogeneousVector::vector(0.0, 1.0, 0.0),
        );
        assert!(view.is_clean());

        // The eye maps to the camera origin, the target onto -z
        let eye = view.value * HomogeneousVector::point(0.0, 0.0, 8.0);
        let target = view.value * HomogeneousVector::point(0.0, 0.0, 0.0);
        assert!(eye.abs_diff_eq(&HomogeneousVector::point(0.0, 0.0, 0.0), 1e-12));
        assert!(target.abs_diff_eq(&HomogeneousVector::point(0.0, 0.0, -8.0), 1e-12));
    }

    #[test]
    fn test_look_at_coincident_eye_and_target() {
        let eye = HomogeneousVector::point(1.0, 2.0, 3.0);
        let view = look_at(eye, eye, HomogeneousVector::vector(0.0, 1.0, 0.0));
        assert_eq!(view.diagnostics, vec![Degeneracy::CoincidentEyeAndTarget]);

        // Falls back to looking down world -z
        let ahead = view.value * HomogeneousVector::point(1.0, 2.0, 2.0);
        assert!(ahead.abs_diff_eq(&HomogeneousVector::point(0.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_look_at_up_parallel_to_view() {
        let view = look_at(
            HomogeneousVector::point(0.0, 5.0, 0.0),
            HomogeneousVector::point(0.0, 0.0, 0.0),
            HomogeneousVector::vector(0.0, 3.0, 0.0),
        );
        // Both the supplied up and world up are parallel to the view axis
        assert_eq!(
            view.diagnostics,
            vec![Degeneracy::UpParallelToView, Degeneracy::WorldUpParallelToView]
        );

        let m = view.value;
        for row in 0..3 {
            let len2: f64 = (0..3).map(|col| m.get(row, col).powi(2)).sum();
            assert!((len2 - 1.0).abs() < 1e-12, "row {} not unit length", row);
        }
    }

    #[test]
    fn test_look_at_produces_invertible_transform() {
        let view = look_at(
            HomogeneousVector::point(3.0, -2.0, 7.0),
            HomogeneousVector::point(0.5, 0.0, 0.0),
            HomogeneousVector::vector(0.0, 1.0, 0.2),
        )
        .into_inner();
        let p = HomogeneousVector::point(-1.0, 4.0, 2.0);
        assert!((view.inverse() * (view * p)).abs_diff_eq(&p, 1e-10));
    }

    #[test]
    fn test_inv_persp_inverts_persp() {
        let (near, far, image) = (0.5, 20.0, 1.25);
        let product = inv_persp(near, far, image) * persp(near, far, image);
        assert!(product.abs_diff_eq(&AffineTransform::IDENTITY, 1e-12));
    }
}
