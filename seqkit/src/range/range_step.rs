// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Numeric types that can be used as [`RangeProducer`] elements.
//!
//! [`RangeProducer`]: super::RangeProducer

use std::fmt::{Debug, Display};

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One};

/// A numeric type whose values can be enumerated in unit steps (`x`, `x + 1`, `x + 2`,
/// ...). Range validation happens in [`BigInt`] so that no intermediate computation can
/// overflow, regardless of the width of `Self`.
pub trait RangeStep: Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// Used in error messages.
    const TYPE_NAME: &'static str;

    /// The integral part of `self`. [`None`] if `self` is not finite.
    fn to_bigint(self) -> Option<BigInt>;

    /// The largest representable value, widened.
    fn max_bigint() -> BigInt;

    /// Number of whole unit steps from `self` up to `end`, negative if `end < self`.
    /// [`None`] if either bound is not finite.
    fn steps_to(self, end: Self) -> Option<BigInt>;

    /// For types that can't hold every integer of their range (floats), the largest
    /// magnitude up to which consecutive integers are still distinct values. Past it
    /// `x + 1` rounds back to `x`. [`None`] if every unit step is exact.
    fn exact_limit() -> Option<BigInt> { None }

    /// `self + index`. Only called with an `index` for which the result has already been
    /// validated to be representable.
    #[must_use]
    fn offset(self, index: usize) -> Self;

    /// The natural successor, `self + 1`.
    #[must_use]
    fn successor(self) -> Self { self.offset(1) }
}

/// Integers. The offset uses wrapping arithmetic on purpose: `index` is truncated to the
/// width of `Self`, and two's complement addition yields the exact result whenever the
/// true sum is representable (which the range validated up front).
macro_rules! impl_range_step_for_int {
    ($($arg_type: ty),* $(,)?) => {
        $(
            impl RangeStep for $arg_type {
                const TYPE_NAME: &'static str = stringify!($arg_type);

                fn to_bigint(self) -> Option<BigInt> { Some(BigInt::from(self)) }

                fn max_bigint() -> BigInt { BigInt::from(<$arg_type>::MAX) }

                fn steps_to(self, end: Self) -> Option<BigInt> {
                    Some(BigInt::from(end) - BigInt::from(self))
                }

                #[allow(
                    trivial_numeric_casts,
                    clippy::cast_possible_truncation,
                    clippy::cast_possible_wrap,
                    clippy::cast_sign_loss
                )]
                fn offset(self, index: usize) -> Self {
                    self.wrapping_add(index as $arg_type)
                }
            }
        )*
    };
}

impl_range_step_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_range_step_for_float {
    ($($arg_type: ty),* $(,)?) => {
        $(
            impl RangeStep for $arg_type {
                const TYPE_NAME: &'static str = stringify!($arg_type);

                fn to_bigint(self) -> Option<BigInt> {
                    if self.is_finite() {
                        BigInt::from_f64(f64::from(self).trunc())
                    } else {
                        None
                    }
                }

                fn max_bigint() -> BigInt {
                    BigInt::from_f64(f64::from(<$arg_type>::MAX)).unwrap_or_default()
                }

                fn exact_limit() -> Option<BigInt> {
                    Some(BigInt::one() << <$arg_type>::MANTISSA_DIGITS)
                }

                fn steps_to(self, end: Self) -> Option<BigInt> {
                    let span = f64::from(end) - f64::from(self);
                    if span.is_finite() {
                        BigInt::from_f64(span.floor())
                    } else {
                        None
                    }
                }

                #[allow(trivial_numeric_casts, clippy::cast_precision_loss)]
                fn offset(self, index: usize) -> Self { self + index as $arg_type }
            }
        )*
    };
}

impl_range_step_for_float!(f32, f64);
