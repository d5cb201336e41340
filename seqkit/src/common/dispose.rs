// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Never failing cleanup of discarded values.
//!
//! Rust already releases resources deterministically via [`Drop`]. Some values need an
//! explicit, fallible shutdown step as well (flush a buffer, close a session). Those
//! implement [`Dispose`]. Code that discards values on behalf of someone else, like
//! [`ResettableLazy`] replacing its cached value, must never fail because of that
//! cleanup, so it goes through [`safe_drop`] or [`safe_dispose`]. Both catch panics and
//! errors and record them as a [`tracing`] warning.
//!
//! [`ResettableLazy`]: crate::ResettableLazy

use std::panic::{catch_unwind, AssertUnwindSafe};

/// A value that has an explicit shutdown step in addition to [`Drop`].
///
/// Takes `&self` since values handed to a cleanup action are usually shared (eg: held in
/// an [`std::sync::Arc`]). Use interior mutability if the shutdown mutates state.
pub trait Dispose {
    /// # Errors
    ///
    /// Returns an error if the shutdown step failed. Callers that go through
    /// [`safe_dispose`] never see it, it gets logged instead.
    fn dispose(&self) -> miette::Result<()>;
}

/// Drop `value`. A panic raised while dropping it is caught and logged.
///
/// When `value` is an [`std::sync::Arc`] that is still shared, this only releases this
/// reference.
pub fn safe_drop<T>(value: T) {
    let result = catch_unwind(AssertUnwindSafe(move || drop(value)));
    if let Err(panic_payload) = result {
        // % is Display, ? is Debug.
        tracing::warn!(
            message = "Panic while dropping discarded value",
            panic = %panic_message(panic_payload.as_ref()),
        );
    }
}

/// Call [`Dispose::dispose`] on `value`. An error or a panic is caught and logged.
///
/// Returns `true` if the value was disposed cleanly.
pub fn safe_dispose<T: Dispose + ?Sized>(value: &T) -> bool {
    match catch_unwind(AssertUnwindSafe(|| value.dispose())) {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            tracing::warn!(
                message = "Failed to dispose discarded value",
                error = ?error,
            );
            false
        }
        Err(panic_payload) => {
            tracing::warn!(
                message = "Panic while disposing discarded value",
                panic = %panic_message(panic_payload.as_ref()),
            );
            false
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non string panic payload>"
    }
}
