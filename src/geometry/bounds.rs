//! Common bound aliases for the numeric types the kernel is generic over.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds will automatically implement them. They are zero-cost and only
//! reduce duplication in `where` clauses.

use num_traits::{Float, Zero};
use std::fmt::Debug;
use std::ops::{Add, Mul};

/// Real coordinate type (`f32` or `f64`).
pub trait Real: Float + Debug + Send + Sync + 'static {}
impl<T> Real for T where T: Float + Debug + Send + Sync + 'static {}

/// Nodal value that can be carried from a parent to its children by an
/// affine combination with real weights: real scalars, complex numbers and
/// points all qualify.
pub trait FieldValue<T: Real>: Copy + Zero + Add<Output = Self> + Mul<T, Output = Self> {}
impl<T: Real, V> FieldValue<T> for V where V: Copy + Zero + Add<Output = V> + Mul<T, Output = V> {}

/// Converts an `f64` table value into the coordinate type.
#[inline]
pub(crate) fn cast<T: Real>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

/// Converts a coordinate-type value to `f64` for error reporting.
#[inline]
pub(crate) fn to_f64<T: Real>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}
