// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Overflow checked numeric ranges.
//!
//! A [`RangeProducer`] is a small immutable value (start and length). It does not hold
//! any iteration state, every call to [`RangeProducer::iter`] returns a fresh
//! [`RangeIter`] that starts from the beginning. All validation happens when the producer
//! is created, so iteration itself can't fail:
//!
//! ```text
//! produce_counted(10, 5)          -> Ok  [10, 11, 12, 13, 14]
//! produce_counted(i32::MAX - 1, 5) -> Err(EndOverflow), nothing was produced
//! produce_bounded(3, 5)           -> Ok  [3, 4, 5]
//! produce_bounded(5, 3)           -> Ok  []
//! ```

use std::iter::FusedIterator;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive};

use super::{RangeError, RangeStep};

/// Upper limit on the number of elements in a single range.
#[allow(clippy::cast_sign_loss)]
pub const MAX_COUNT: usize = i32::MAX as usize;

/// Returns every value from `start` to `end` inclusive, in ascending unit steps. If `end`
/// is less than `start` the range is empty.
///
/// # Errors
///
/// - [`RangeError::NonFiniteBound`] if a float bound is NaN or infinite.
/// - [`RangeError::CountOutOfRange`] if the range would have more than [`MAX_COUNT`]
///   elements.
/// - [`RangeError::InexactStep`] as in [`produce_counted`].
pub fn produce_bounded<T: RangeStep>(
    start: T,
    end: T,
) -> Result<RangeProducer<T>, RangeError> {
    RangeProducer::bounded(start, end)
}

/// Returns exactly `count` values, starting at `start`, in ascending unit steps.
///
/// # Errors
///
/// - [`RangeError::CountOutOfRange`] if `count` is more than [`MAX_COUNT`].
/// - [`RangeError::EndOverflow`] if `start + count - 1` is not representable in `T`.
/// - [`RangeError::NonFiniteBound`] if a float `start` is NaN or infinite.
/// - [`RangeError::InexactStep`] if a float range has more than one element and reaches
///   past the integers the float type can represent exactly (`2^24` for [`f32`]).
pub fn produce_counted<T: RangeStep>(
    start: T,
    count: usize,
) -> Result<RangeProducer<T>, RangeError> {
    RangeProducer::counted(start, count)
}

/// A validated numeric range. See the [module docs](self) for details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeProducer<T> {
    start: T,
    count: usize,
}

mod constructor {
    use super::*;

    impl<T: RangeStep> RangeProducer<T> {
        /// See [`produce_bounded`].
        ///
        /// # Errors
        ///
        /// See [`produce_bounded`].
        pub fn bounded(start: T, end: T) -> Result<Self, RangeError> {
            let steps = match start.steps_to(end) {
                Some(it) => it,
                None if start.to_bigint().is_none() => return Err(non_finite(start)),
                None if end.to_bigint().is_none() => return Err(non_finite(end)),
                // Both bounds are finite but their distance is not.
                None => {
                    return Err(RangeError::CountOutOfRange {
                        count: "inf".to_string(),
                        max: MAX_COUNT,
                    });
                }
            };

            if steps.is_negative() {
                return Ok(Self { start, count: 0 });
            }

            let count = steps + BigInt::one();
            let count = count_within_limit(&count)?;
            Self::counted(start, count)
        }

        /// See [`produce_counted`].
        ///
        /// # Errors
        ///
        /// See [`produce_counted`].
        pub fn counted(start: T, count: usize) -> Result<Self, RangeError> {
            count_within_limit(&BigInt::from(count))?;

            let wide_start = start.to_bigint().ok_or_else(|| non_finite::<T>(start))?;

            if count > 0 {
                let wide_last = &wide_start + BigInt::from(count - 1);
                if wide_last > T::max_bigint() {
                    return Err(RangeError::EndOverflow {
                        type_name: T::TYPE_NAME,
                        start: start.to_string(),
                        count,
                    });
                }

                // A single element is `start` itself, only steps can lose precision.
                let is_inexact = match T::exact_limit() {
                    Some(limit) if count > 1 => wide_start < -&limit || wide_last > limit,
                    _ => false,
                };
                if is_inexact {
                    return Err(RangeError::InexactStep {
                        type_name: T::TYPE_NAME,
                        start: start.to_string(),
                        count,
                    });
                }
            }

            Ok(Self { start, count })
        }
    }

    fn count_within_limit(count: &BigInt) -> Result<usize, RangeError> {
        match count.to_usize() {
            Some(it) if it <= MAX_COUNT && !count.is_negative() => Ok(it),
            _ => Err(RangeError::CountOutOfRange {
                count: count.to_string(),
                max: MAX_COUNT,
            }),
        }
    }

    fn non_finite<T: RangeStep>(value: T) -> RangeError {
        RangeError::NonFiniteBound {
            type_name: T::TYPE_NAME,
            value: value.to_string(),
        }
    }
}

mod accessor {
    use super::*;

    impl<T: RangeStep> RangeProducer<T> {
        #[must_use]
        pub fn start(&self) -> T { self.start }

        #[must_use]
        pub fn len(&self) -> usize { self.count }

        #[must_use]
        pub fn is_empty(&self) -> bool { self.count == 0 }

        /// The inclusive end of the range, [`None`] if it is empty.
        #[must_use]
        pub fn last(&self) -> Option<T> {
            self.count
                .checked_sub(1)
                .map(|last_index| self.start.offset(last_index))
        }

        /// Returns a fresh iterator positioned at the start of the range.
        #[must_use]
        pub fn iter(&self) -> RangeIter<T> {
            RangeIter {
                start: self.start,
                front: 0,
                back: self.count,
            }
        }
    }

    impl<T: RangeStep> IntoIterator for RangeProducer<T> {
        type Item = T;
        type IntoIter = RangeIter<T>;

        fn into_iter(self) -> Self::IntoIter { self.iter() }
    }

    impl<T: RangeStep> IntoIterator for &RangeProducer<T> {
        type Item = T;
        type IntoIter = RangeIter<T>;

        fn into_iter(self) -> Self::IntoIter { self.iter() }
    }
}

/// Iterator over a [`RangeProducer`]. Element `i` is computed as `start + i` rather than
/// by repeatedly adding one, so float ranges don't accumulate rounding error.
#[derive(Debug, Clone)]
pub struct RangeIter<T> {
    start: T,
    /// Index of the next element from the front.
    front: usize,
    /// One past the index of the next element from the back.
    back: usize,
}

mod iterator {
    use super::*;

    impl<T: RangeStep> Iterator for RangeIter<T> {
        type Item = T;

        fn next(&mut self) -> Option<Self::Item> {
            if self.front >= self.back {
                return None;
            }
            let it = self.start.offset(self.front);
            self.front += 1;
            Some(it)
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            let remaining = self.back - self.front;
            (remaining, Some(remaining))
        }

        fn nth(&mut self, n: usize) -> Option<Self::Item> {
            self.front = self.front.saturating_add(n).min(self.back);
            self.next()
        }
    }

    impl<T: RangeStep> DoubleEndedIterator for RangeIter<T> {
        fn next_back(&mut self) -> Option<Self::Item> {
            if self.front >= self.back {
                return None;
            }
            self.back -= 1;
            Some(self.start.offset(self.back))
        }
    }

    impl<T: RangeStep> ExactSizeIterator for RangeIter<T> {}

    impl<T: RangeStep> FusedIterator for RangeIter<T> {}
}
