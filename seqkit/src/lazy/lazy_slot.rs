// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A single-assignment cell that computes its value on first read.
//!
//! A [`LazySlot`] is never reset. [`ResettableLazy`] gets "reset" by throwing the whole
//! slot away and installing a fresh one, which keeps the state machine below one way:
//!
//! ```text
//!                get()                 factory Ok
//!   Pending ───────────► Evaluating ───────────────► Ready(Arc<T>)
//!      ▲                     │   │
//!      │  factory panicked   │   │ factory Err
//!      └─────────────────────┘   └─────────────────► Failed(LazyError)
//! ```
//!
//! How callers coordinate depends on the [`ThreadSafetyMode`], see its docs for the
//! table. Values are handed out as [`Arc<T>`] so a reader keeps its value alive even if
//! the slot is discarded right after.
//!
//! [`ResettableLazy`]: super::ResettableLazy

use std::{fmt::{Debug, Formatter},
          sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError},
          thread::{self, ThreadId}};

use super::{LazyError, ThreadSafetyMode};

const DEBUG_SEQKIT_LAZY: bool = false;

/// The value factory shared by every slot a [`ResettableLazy`] installs.
///
/// [`ResettableLazy`]: super::ResettableLazy
pub type LazyFactory<T> = Arc<dyn Fn() -> Result<T, LazyError> + Send + Sync>;

pub struct LazySlot<T> {
    factory: Option<LazyFactory<T>>,
    mode: ThreadSafetyMode,
    strategy: Strategy<T>,
}

enum Strategy<T> {
    /// [`ThreadSafetyMode::None`]. The lock only guards the state, evaluation happens
    /// outside of it.
    Unsynchronized(Mutex<SlotState<T>>),
    /// [`ThreadSafetyMode::ExecutionAndPublication`].
    Blocking {
        state: Mutex<SlotState<T>>,
        ready: Condvar,
    },
    /// [`ThreadSafetyMode::PublicationOnly`].
    Racing(OnceLock<Arc<T>>),
}

enum SlotState<T> {
    Pending,
    /// Holds the thread running the factory, to catch a factory that reads its own slot.
    Evaluating(ThreadId),
    Ready(Arc<T>),
    Failed(LazyError),
}

mod constructor {
    use super::*;

    impl<T> LazySlot<T> {
        pub fn new<F>(factory: F, mode: ThreadSafetyMode) -> Self
        where
            F: Fn() -> Result<T, LazyError> + Send + Sync + 'static,
        {
            Self::with_shared_factory(Arc::new(factory), mode)
        }

        /// A pending slot that will call `factory` on first read.
        pub fn with_shared_factory(factory: LazyFactory<T>, mode: ThreadSafetyMode) -> Self {
            Self {
                factory: Some(factory),
                mode,
                strategy: Strategy::pending(mode),
            }
        }

        /// A slot that already holds `value`. It has no factory, it never needs one.
        pub fn with_value(value: T, mode: ThreadSafetyMode) -> Self {
            let value = Arc::new(value);
            let strategy = match mode {
                ThreadSafetyMode::None => {
                    Strategy::Unsynchronized(Mutex::new(SlotState::Ready(value)))
                }
                ThreadSafetyMode::ExecutionAndPublication => Strategy::Blocking {
                    state: Mutex::new(SlotState::Ready(value)),
                    ready: Condvar::new(),
                },
                ThreadSafetyMode::PublicationOnly => Strategy::Racing(OnceLock::from(value)),
            };
            Self {
                factory: None,
                mode,
                strategy,
            }
        }

        /// Consume the slot, returning the value if one was published.
        pub fn into_value(self) -> Option<Arc<T>> {
            match self.strategy {
                Strategy::Unsynchronized(state) | Strategy::Blocking { state, .. } => {
                    match state.into_inner().unwrap_or_else(PoisonError::into_inner) {
                        SlotState::Ready(value) => Some(value),
                        _ => None,
                    }
                }
                Strategy::Racing(cell) => cell.into_inner(),
            }
        }
    }

    impl<T> Strategy<T> {
        fn pending(mode: ThreadSafetyMode) -> Self {
            match mode {
                ThreadSafetyMode::None => Self::Unsynchronized(Mutex::new(SlotState::Pending)),
                ThreadSafetyMode::ExecutionAndPublication => Self::Blocking {
                    state: Mutex::new(SlotState::Pending),
                    ready: Condvar::new(),
                },
                ThreadSafetyMode::PublicationOnly => Self::Racing(OnceLock::new()),
            }
        }
    }
}

mod accessor {
    use super::*;

    impl<T> LazySlot<T> {
        /// Returns the value, running the factory first if needed.
        ///
        /// # Errors
        ///
        /// - Whatever the factory returned. Cached (and returned to every later caller)
        ///   in [`ThreadSafetyMode::None`] and [`ThreadSafetyMode::ExecutionAndPublication`]
        ///   modes, not cached in [`ThreadSafetyMode::PublicationOnly`] mode.
        /// - [`LazyError::Reentrant`] if the factory reads the slot it is filling. Not
        ///   detected in [`ThreadSafetyMode::PublicationOnly`] mode.
        pub fn get(&self) -> Result<Arc<T>, LazyError> {
            match &self.strategy {
                Strategy::Unsynchronized(state) => self.get_unsynchronized(state),
                Strategy::Blocking { state, ready } => self.get_blocking(state, ready),
                Strategy::Racing(cell) => self.get_racing(cell),
            }
        }

        /// The published value, without running the factory.
        pub fn peek(&self) -> Option<Arc<T>> {
            match &self.strategy {
                Strategy::Unsynchronized(state) | Strategy::Blocking { state, .. } => {
                    match &*lock(state) {
                        SlotState::Ready(value) => Some(value.clone()),
                        _ => None,
                    }
                }
                Strategy::Racing(cell) => cell.get().cloned(),
            }
        }

        #[must_use]
        pub fn is_value_created(&self) -> bool { self.peek().is_some() }

        #[must_use]
        pub fn mode(&self) -> ThreadSafetyMode { self.mode }
    }
}

mod evaluation {
    use super::*;

    impl<T> LazySlot<T> {
        pub(super) fn get_unsynchronized(
            &self,
            state: &Mutex<SlotState<T>>,
        ) -> Result<Arc<T>, LazyError> {
            {
                let mut guard = lock(state);
                match &*guard {
                    SlotState::Ready(value) => return Ok(value.clone()),
                    SlotState::Failed(error) => return Err(error.clone()),
                    SlotState::Evaluating(owner) if *owner == thread::current().id() => {
                        return Err(LazyError::Reentrant);
                    }
                    // Someone else is evaluating, this mode doesn't wait for them.
                    SlotState::Evaluating(_) => {}
                    SlotState::Pending => {
                        *guard = SlotState::Evaluating(thread::current().id());
                    }
                }
            }

            let _reset_on_unwind = ResetOnUnwind { state, ready: None };
            let result = self.evaluate();

            // The first result stored wins.
            let mut guard = lock(state);
            match &*guard {
                SlotState::Ready(value) => Ok(value.clone()),
                SlotState::Failed(error) => Err(error.clone()),
                SlotState::Pending | SlotState::Evaluating(_) => {
                    *guard = SlotState::from_result(&result);
                    result
                }
            }
        }

        pub(super) fn get_blocking(
            &self,
            state: &Mutex<SlotState<T>>,
            ready: &Condvar,
        ) -> Result<Arc<T>, LazyError> {
            let mut guard = lock(state);
            loop {
                match &*guard {
                    SlotState::Ready(value) => return Ok(value.clone()),
                    SlotState::Failed(error) => return Err(error.clone()),
                    SlotState::Evaluating(owner) if *owner == thread::current().id() => {
                        return Err(LazyError::Reentrant);
                    }
                    SlotState::Evaluating(_) => {
                        guard = ready.wait(guard).unwrap_or_else(PoisonError::into_inner);
                    }
                    SlotState::Pending => break,
                }
            }
            *guard = SlotState::Evaluating(thread::current().id());
            drop(guard);

            let _reset_on_unwind = ResetOnUnwind {
                state,
                ready: Some(ready),
            };
            let result = self.evaluate();

            *lock(state) = SlotState::from_result(&result);
            ready.notify_all();
            result
        }

        pub(super) fn get_racing(&self, cell: &OnceLock<Arc<T>>) -> Result<Arc<T>, LazyError> {
            if let Some(value) = cell.get() {
                return Ok(value.clone());
            }
            let value = self.evaluate()?;
            // A loser's value is dropped here, everyone gets the winner's.
            Ok(cell.get_or_init(|| value).clone())
        }

        fn evaluate(&self) -> Result<Arc<T>, LazyError> {
            let Some(factory) = &self.factory else {
                return Err(miette::miette!("Lazy slot has no value factory").into());
            };

            let result = factory().map(Arc::new);

            if let Err(error) = &result {
                DEBUG_SEQKIT_LAZY.then(|| {
                    tracing::debug!(
                        message = "Lazy value factory failed",
                        mode = %self.mode,
                        error = ?error,
                    );
                });
            }

            result
        }
    }

    impl<T> SlotState<T> {
        fn from_result(result: &Result<Arc<T>, LazyError>) -> Self {
            match result {
                Ok(value) => Self::Ready(value.clone()),
                Err(error) => Self::Failed(error.clone()),
            }
        }
    }

    /// If the factory panics, puts the slot back to [`SlotState::Pending`] and wakes any
    /// waiters so one of them can try. On a normal return the state has already moved
    /// past [`SlotState::Evaluating`] and this does nothing.
    struct ResetOnUnwind<'a, T> {
        state: &'a Mutex<SlotState<T>>,
        ready: Option<&'a Condvar>,
    }

    impl<T> Drop for ResetOnUnwind<'_, T> {
        fn drop(&mut self) {
            let mut guard = lock(self.state);
            if matches!(&*guard, SlotState::Evaluating(owner) if *owner == thread::current().id())
            {
                tracing::warn!(message = "Lazy value factory panicked, slot reset to pending");
                *guard = SlotState::Pending;
                if let Some(ready) = self.ready {
                    ready.notify_all();
                }
            }
        }
    }
}

/// The state mutex is never held while user code runs, so a poisoned lock still holds a
/// consistent state.
fn lock<T>(state: &Mutex<SlotState<T>>) -> MutexGuard<'_, SlotState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Debug for LazySlot<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySlot")
            .field("mode", &self.mode)
            .field("is_value_created", &self.is_value_created())
            .finish_non_exhaustive()
    }
}
