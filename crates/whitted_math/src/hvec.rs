//! Homogeneous points and vectors.
//!
//! A single 4-component type covers both affine points (`w != 0`) and free
//! vectors (`w == 0`). Arithmetic inspects `w` to decide what the result is,
//! mirroring the usual rules of affine geometry:
//!
//! | lhs    | op | rhs    | result  |
//! |--------|----|--------|---------|
//! | vector | +  | vector | vector  |
//! | point  | +  | vector | point   |
//! | point  | -  | point  | vector  |
//! | point  | -  | vector | point   |
//! | vector | -  | vector | vector  |
//!
//! `point + point` and `vector - point` have no meaning and panic.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec3, DVec4};

/// A point or vector in homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomogeneousVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for HomogeneousVector {
    /// The origin point `(0, 0, 0, 1)`.
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl HomogeneousVector {
    /// The origin point.
    pub const ORIGIN: Self = Self::point(0.0, 0.0, 0.0);

    /// The zero vector.
    pub const ZERO: Self = Self::vector(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// An affine point with `w == 1`.
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// A free vector with `w == 0`.
    pub const fn vector(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.0)
    }

    pub fn from_point3(p: DVec3) -> Self {
        Self::point(p.x, p.y, p.z)
    }

    pub fn from_vector3(v: DVec3) -> Self {
        Self::vector(v.x, v.y, v.z)
    }

    #[inline]
    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.w != 0.0
    }

    /// True unless all of `x`, `y`, `z` are zero.
    #[inline]
    pub fn is_nonzero(&self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }

    /// Raw `(x, y, z)` without dividing by `w`.
    #[inline]
    pub fn xyz(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Cartesian coordinates: `(x, y, z) / w` for points, `(x, y, z)` for vectors.
    #[inline]
    pub fn cartesian(&self) -> DVec3 {
        if self.w != 0.0 {
            self.xyz() / self.w
        } else {
            self.xyz()
        }
    }

    #[inline]
    pub fn to_dvec4(self) -> DVec4 {
        DVec4::new(self.x, self.y, self.z, self.w)
    }

    #[inline]
    pub fn from_dvec4(v: DVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Reinterpret as a free vector, dividing through by `w` first.
    ///
    /// For a point this is the displacement from the origin.
    pub fn to_vector(self) -> Self {
        Self::from_vector3(self.cartesian())
    }

    /// Reinterpret as a point. Vectors become the point at that displacement
    /// from the origin; points are returned unchanged.
    pub fn to_point(self) -> Self {
        if self.is_point() {
            self
        } else {
            Self::point(self.x, self.y, self.z)
        }
    }

    /// Dot product over all four components.
    ///
    /// Only meaningful for two vectors. Other inputs are logged and the
    /// result is computed anyway.
    pub fn dot(&self, other: &Self) -> f64 {
        if !self.is_vector() || !other.is_vector() {
            log::warn!("dot product called on non-vectors: {:?} . {:?}", self, other);
        }
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared euclidean length over all four components.
    pub fn norm_squared(&self) -> f64 {
        if !self.is_vector() {
            log::warn!("norm called on non-vector {:?}", self);
        }
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Scale `(x, y, z)` to unit length.
    ///
    /// A zero vector is returned unchanged.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(self)
    }

    /// Scale `(x, y, z)` to unit length, or `None` for a zero-length input.
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.norm();
        if len == 0.0 {
            return None;
        }
        Some(Self::new(self.x / len, self.y / len, self.z / len, self.w))
    }

    /// Cross product of two vectors.
    pub fn cross(&self, other: &Self) -> Self {
        if !self.is_vector() || !other.is_vector() {
            log::warn!("cross product called on non-vectors: {:?} x {:?}", self, other);
        }
        Self::from_vector3(self.cartesian().cross(other.cartesian()))
    }

    /// `a + t (b - a)` over all four components.
    pub fn combine(a: &Self, b: &Self, t: f64) -> Self {
        Self::from_dvec4(a.to_dvec4() + t * (b.to_dvec4() - a.to_dvec4()))
    }

    /// `a + t (b - a) + u (c - a)` over all four components.
    ///
    /// With `(t, u)` taken from a triangle hit this evaluates the barycentric
    /// interpolation `(1 - t - u) a + t b + u c`.
    pub fn combine3(a: &Self, b: &Self, t: f64, c: &Self, u: f64) -> Self {
        let a4 = a.to_dvec4();
        Self::from_dvec4(a4 + t * (b.to_dvec4() - a4) + u * (c.to_dvec4() - a4))
    }

    /// Component-wise closeness of the cartesian coordinates.
    pub fn abs_diff_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.is_vector() == other.is_vector()
            && self.cartesian().abs_diff_eq(other.cartesian(), tolerance)
    }
}

impl Add for HomogeneousVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self.is_vector(), rhs.is_vector()) {
            (true, true) => Self::from_dvec4(self.to_dvec4() + rhs.to_dvec4()),
            // vector + point: scale the vector into the point's homogeneous frame
            (true, false) => Self::from_dvec4(rhs.w * self.to_dvec4() + rhs.to_dvec4()),
            (false, true) => Self::from_dvec4(self.to_dvec4() + self.w * rhs.to_dvec4()),
            (false, false) => panic!(
                "incompatible point addition: w = {} and w = {}",
                self.w, rhs.w
            ),
        }
    }
}

impl AddAssign for HomogeneousVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for HomogeneousVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self.is_vector(), rhs.is_vector()) {
            (true, false) => panic!(
                "incompatible point subtraction: w = {} and w = {}",
                self.w, rhs.w
            ),
            (false, false) => Self::from_vector3(self.cartesian() - rhs.cartesian()),
            (false, true) => Self::from_dvec4(self.to_dvec4() - self.w * rhs.to_dvec4()),
            (true, true) => Self::from_vector3(self.xyz() - rhs.xyz()),
        }
    }
}

impl SubAssign for HomogeneousVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for HomogeneousVector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }
}

impl Mul<f64> for HomogeneousVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w)
    }
}

impl Mul<HomogeneousVector> for f64 {
    type Output = HomogeneousVector;

    fn mul(self, rhs: HomogeneousVector) -> HomogeneousVector {
        rhs * self
    }
}

impl Div<f64> for HomogeneousVector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w)
    }
}
