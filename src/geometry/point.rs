//! `Point<T>`: a position in 3D space.
//!
//! Lower-dimensional meshes leave the unused components at zero. Points
//! implement `num_traits::Zero` plus `Add` and `Mul<T>`, so they are valid
//! [`FieldValue`](crate::geometry::bounds::FieldValue)s and refinement
//! prolongates coordinates with the same code path as nodal fields.

use crate::geometry::bounds::Real;
use num_traits::Zero;
use std::ops::{Add, Index, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point<T>(pub [T; 3]);

impl<T: Real> Point<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Point([x, y, z])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.0[0] * other.0[0] + self.0[1] * other.0[1] + self.0[2] * other.0[2]
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        Point([a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0])
    }

    #[inline]
    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(&self, other: &Self) -> T {
        (*self - *other).norm()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(&self) -> Option<Self> {
        let n = self.norm();
        if n > T::zero() { Some(*self * n.recip()) } else { None }
    }

    /// Component-wise `|a - b| <= tol`.
    pub fn abs_diff_le(&self, other: &Self, tol: T) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(&a, &b)| (a - b).abs() <= tol)
    }
}

impl<T: Real> Add for Point<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Point([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1], self.0[2] + rhs.0[2]])
    }
}

impl<T: Real> Sub for Point<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Point([self.0[0] - rhs.0[0], self.0[1] - rhs.0[1], self.0[2] - rhs.0[2]])
    }
}

impl<T: Real> Mul<T> for Point<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Point([self.0[0] * rhs, self.0[1] * rhs, self.0[2] * rhs])
    }
}

impl<T: Real> Neg for Point<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Point([-self.0[0], -self.0[1], -self.0[2]])
    }
}

impl<T: Real> Zero for Point<T> {
    #[inline]
    fn zero() -> Self {
        Point([T::zero(); 3])
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.is_zero())
    }
}

impl<T> Index<usize> for Point<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.0[i]
    }
}

impl<T: Real> From<[T; 3]> for Point<T> {
    fn from(c: [T; 3]) -> Self {
        Point(c)
    }
}
