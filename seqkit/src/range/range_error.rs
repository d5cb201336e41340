// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Errors from [`produce_bounded`] and [`produce_counted`]. They are always returned
/// before any element of the range is produced.
///
/// [`produce_bounded`]: super::produce_bounded
/// [`produce_counted`]: super::produce_counted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum RangeError {
    #[error("Range count {count} is outside of [0, {max}]")]
    #[diagnostic(
        code(seqkit::range::count_out_of_range),
        help("Split the range into several smaller ones")
    )]
    CountOutOfRange { count: String, max: usize },

    #[error("Range of {count} {type_name} values starting at {start} overflows {type_name}")]
    #[diagnostic(
        code(seqkit::range::end_overflow),
        help("The last value (start + count - 1) must be representable")
    )]
    EndOverflow {
        type_name: &'static str,
        start: String,
        count: usize,
    },

    #[error(
        "Range of {count} {type_name} values starting at {start} goes past the integers \
         that {type_name} can represent exactly"
    )]
    #[diagnostic(
        code(seqkit::range::inexact_step),
        help("Every value must be within +/- 2^mantissa digits, use f64 instead of f32")
    )]
    InexactStep {
        type_name: &'static str,
        start: String,
        count: usize,
    },

    #[error("Range bound {value} is not a finite {type_name}")]
    #[diagnostic(code(seqkit::range::non_finite_bound))]
    NonFiniteBound {
        type_name: &'static str,
        value: String,
    },
}
