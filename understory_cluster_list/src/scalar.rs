// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction used for row heights, spacer extents, and scroll offsets.
//!
//! Only implemented for `f32` and `f64`.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Scalar type used for heights, offsets, and scroll positions.
///
/// The trait is deliberately minimal and geared toward floating-point pixel
/// coordinates.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity (typically `0.0`).
    fn zero() -> Self;

    /// Returns the maximum of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Returns the minimum of `self` and `other`.
    fn min(self, other: Self) -> Self;

    /// Returns `true` if the value is finite (not NaN or infinite).
    fn is_finite(self) -> bool;

    /// Constructs from a `usize` lossily.
    fn from_usize(value: usize) -> Self;

    /// Floors the value and converts it to `usize`.
    ///
    /// Negative and NaN values map to `0`; values past `usize::MAX` saturate.
    fn floor_to_usize(self) -> usize;

    /// Returns `true` for finite values strictly greater than zero.
    fn is_positive_finite(self) -> bool {
        self.is_finite() && self > Self::zero()
    }

    /// Clamps negative (and NaN) values to zero.
    fn clamp_non_negative(self) -> Self {
        if self > Self::zero() {
            self
        } else {
            Self::zero()
        }
    }

    /// Returns the smallest whole number of `unit`s covering `self`.
    ///
    /// `unit` must be positive and finite; the result is at least `0`.
    fn ceil_div_to_usize(self, unit: Self) -> usize {
        let whole = (self / unit).floor_to_usize();
        if Self::from_usize(whole) * unit < self {
            whole.saturating_add(1)
        } else {
            whole
        }
    }
}

impl Scalar for f32 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn floor_to_usize(self) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float-to-int `as` casts saturate and map NaN to zero, which is the documented behavior"
        )]
        {
            self as usize
        }
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn floor_to_usize(self) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float-to-int `as` casts saturate and map NaN to zero, which is the documented behavior"
        )]
        {
            self as usize
        }
    }
}
