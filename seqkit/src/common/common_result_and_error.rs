// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)
//!
//! Each module owns its error enum ([`RangeError`], [`LazyError`]), derived with
//! [`thiserror`] and [`miette::Diagnostic`]. Setup code that can fail for many reasons
//! (like [`init_tracing`]) returns [`CommonResult`].
//!
//! [`RangeError`]: crate::RangeError
//! [`LazyError`]: crate::LazyError
//! [`init_tracing`]: crate::init_tracing

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`],
/// which are [`std::error::Error`] wrappers. Works hand in hand with the typed error
/// enums of this crate, since they all implement [`miette::Diagnostic`].
///
/// # Example
///
/// ```
/// use seqkit::{produce_counted, CommonResult};
///
/// fn sum_of_range(start: i64, count: usize) -> CommonResult<i64> {
///     let range = produce_counted(start, count)?;
///     Ok(range.iter().sum())
/// }
///
/// assert_eq!(sum_of_range(1, 4).unwrap(), 10);
/// assert!(sum_of_range(i64::MAX, 2).is_err());
/// ```
pub type CommonResult<T> = miette::Result<T>;
