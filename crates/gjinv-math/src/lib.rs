#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod matrix;
pub use matrix::Matrix;

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};
use zeroize::DefaultIsZeroes;

/// Floating-point element of a grid matrix.
///
/// Buffers holding scalars are wiped on release, hence the `DefaultIsZeroes`
/// bound (the default value must be the all-zero bit pattern).
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + DefaultIsZeroes
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    /// Absolute pivot magnitude at or below which a matrix is treated as
    /// singular. Not relative to the matrix scale.
    const DEFAULT_EPSILON: Self;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn is_finite(self) -> bool;

    #[inline(always)]
    fn abs(self) -> Self {
        if self < Self::ZERO { -self } else { self }
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const DEFAULT_EPSILON: Self = 1e-6;

    #[inline(always)]
    fn from_f64(v: f64) -> Self { v as f32 }
    #[inline(always)]
    fn to_f64(self) -> f64 { self as f64 }
    #[inline(always)]
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const DEFAULT_EPSILON: Self = 1e-12;

    #[inline(always)]
    fn from_f64(v: f64) -> Self { v }
    #[inline(always)]
    fn to_f64(self) -> f64 { self }
    #[inline(always)]
    fn is_finite(self) -> bool { f64::is_finite(self) }
}
