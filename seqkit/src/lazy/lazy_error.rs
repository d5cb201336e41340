// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::RangeError;

/// Errors from computing or replacing a lazy value.
///
/// The first three variants are *transient*: they signal that the computation was
/// called off rather than that it is broken. [`ResettableLazy::value`] retries once
/// when it sees one. Value factories return them to opt into that retry.
///
/// | Variant                      | Transient? | Raised by                       |
/// | :--------------------------- | :--------- | :------------------------------ |
/// | [`Self::Cancelled`]          | Yes        | factory (cooperative cancel)    |
/// | [`Self::Interrupted`]        | Yes        | factory (a wait was interrupted) |
/// | [`Self::CancellationRequested`] | Yes     | factory (someone asked it to stop) |
/// | [`Self::Factory`]            | No         | factory (any other failure)     |
/// | [`Self::Rejected`]           | No         | validator in `set_value`        |
/// | [`Self::Reentrant`]          | No         | slot, factory read its own slot |
///
/// This type is [`Clone`] so that a cached failure can be handed to every caller that
/// waited on the same evaluation.
///
/// [`ResettableLazy::value`]: super::ResettableLazy::value
#[derive(Debug, Clone, thiserror::Error, miette::Diagnostic)]
pub enum LazyError {
    #[error("Lazy value computation was cancelled")]
    #[diagnostic(code(seqkit::lazy::cancelled))]
    Cancelled,

    #[error("Wait inside lazy value computation was interrupted")]
    #[diagnostic(code(seqkit::lazy::interrupted))]
    Interrupted,

    #[error("Cancellation of lazy value computation was requested")]
    #[diagnostic(code(seqkit::lazy::cancellation_requested))]
    CancellationRequested,

    #[error("Lazy value factory failed: {0}")]
    #[diagnostic(code(seqkit::lazy::factory))]
    Factory(Arc<miette::Report>),

    #[error("Value was rejected by the validator: {0}")]
    #[diagnostic(
        code(seqkit::lazy::rejected),
        help("The previous value was kept")
    )]
    Rejected(Arc<miette::Report>),

    #[error("Lazy value factory tried to read the value it is computing")]
    #[diagnostic(
        code(seqkit::lazy::reentrant),
        help("Break the cycle between the factory and the slot it fills")
    )]
    Reentrant,
}

impl LazyError {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Interrupted | Self::CancellationRequested
        )
    }

    #[must_use]
    pub fn rejected(report: miette::Report) -> Self { Self::Rejected(Arc::new(report)) }
}

/// Lets a factory use `?` on anything that converts into a [`miette::Report`].
impl From<miette::Report> for LazyError {
    fn from(report: miette::Report) -> Self { Self::Factory(Arc::new(report)) }
}

/// A factory that builds its value from a range can use `?` on the range constructors.
impl From<RangeError> for LazyError {
    fn from(error: RangeError) -> Self { Self::from(miette::Report::new(error)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(LazyError::Cancelled.is_transient());
        assert!(LazyError::Interrupted.is_transient());
        assert!(LazyError::CancellationRequested.is_transient());
        assert!(!LazyError::Reentrant.is_transient());
        assert!(!LazyError::from(miette::miette!("nope")).is_transient());
        assert!(!LazyError::rejected(miette::miette!("nope")).is_transient());
    }

    #[test]
    fn test_factory_error_keeps_message() {
        let error = LazyError::from(miette::miette!("database unreachable"));
        assert_eq!(
            error.to_string(),
            "Lazy value factory failed: database unreachable"
        );
    }

    #[test]
    fn test_range_error_becomes_factory_error() {
        let error = LazyError::from(crate::produce_counted(u8::MAX, 2).unwrap_err());
        assert!(matches!(error, LazyError::Factory(_)));
        assert!(error.to_string().contains("u8"));
    }
}
