// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A lazily computed value that can be thrown away and computed again.
//!
//! [`ResettableLazy`] owns exactly one [`LazySlot`] at a time. Every operation that
//! changes what the cell holds swaps in a whole new slot under one cell level lock:
//!
//! | Operation                          | New slot                       | Cleanup runs on old value? |
//! | :--------------------------------- | :----------------------------- | :------------------------- |
//! | [`ResettableLazy::reset`]          | pending                        | Yes, if one was computed   |
//! | [`ResettableLazy::set_value`]      | holds the given value          | Yes, if one was computed   |
//! | failed [`ResettableLazy::value`]   | pending                        | Nothing to clean up        |
//! | drop of the cell                   | none                           | Yes, if one was computed   |
//!
//! The cell level lock is held while the factory runs, so concurrent readers of a
//! [`ResettableLazy`] never run the factory more than once per slot regardless of the
//! slot's [`ThreadSafetyMode`]. The factory must not read the cell it belongs to.
//!
//! Values are handed out as [`Arc<T>`]. The cleanup callback gets the cell's reference,
//! so with the default cleanup ([`safe_drop`]) the value itself is dropped once the last
//! reader lets go of it.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//! use seqkit::ResettableLazy;
//!
//! let cleaned_up = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&cleaned_up);
//! let config = ResettableLazy::builder(|| Ok(String::from("loaded")))
//!     .cleanup(move |_old| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })
//!     .build();
//!
//! assert!(!config.is_value_created());
//! assert_eq!(config.value().unwrap().as_str(), "loaded");
//!
//! config.reset();
//! assert!(!config.is_value_created());
//! assert_eq!(cleaned_up.load(Ordering::SeqCst), 1);
//! ```

use std::{fmt::{Debug, Formatter},
          sync::{Arc, Mutex, MutexGuard, PoisonError}};

use super::{LazyError, LazyFactory, LazySlot, ThreadSafetyMode};
use crate::{safe_dispose, safe_drop, Dispose};

/// Checks a value handed to [`ResettableLazy::set_value`] before it is installed.
pub type LazyValidator<T> = Box<dyn Fn(&T) -> miette::Result<()> + Send + Sync>;

/// Runs once for every computed value the cell discards.
pub type LazyCleanup<T> = Box<dyn Fn(Arc<T>) + Send + Sync>;

pub struct ResettableLazy<T> {
    factory: LazyFactory<T>,
    mode: ThreadSafetyMode,
    validator: Option<LazyValidator<T>>,
    cleanup: LazyCleanup<T>,
    slot: Mutex<LazySlot<T>>,
}

pub struct ResettableLazyBuilder<T> {
    factory: LazyFactory<T>,
    mode: ThreadSafetyMode,
    validator: Option<LazyValidator<T>>,
    cleanup: Option<LazyCleanup<T>>,
}

mod constructor {
    use super::*;

    impl<T: Send + Sync + 'static> ResettableLazy<T> {
        /// A cell using [`ThreadSafetyMode::ExecutionAndPublication`].
        pub fn new<F>(factory: F) -> Self
        where
            F: Fn() -> Result<T, LazyError> + Send + Sync + 'static,
        {
            Self::builder(factory).build()
        }

        pub fn with_mode<F>(factory: F, mode: ThreadSafetyMode) -> Self
        where
            F: Fn() -> Result<T, LazyError> + Send + Sync + 'static,
        {
            Self::builder(factory).mode(mode).build()
        }

        /// See [`ThreadSafetyMode::from`] for how the flag maps to a mode.
        pub fn with_thread_safety<F>(factory: F, is_thread_safe: bool) -> Self
        where
            F: Fn() -> Result<T, LazyError> + Send + Sync + 'static,
        {
            Self::with_mode(factory, ThreadSafetyMode::from(is_thread_safe))
        }

        pub fn builder<F>(factory: F) -> ResettableLazyBuilder<T>
        where
            F: Fn() -> Result<T, LazyError> + Send + Sync + 'static,
        {
            ResettableLazyBuilder {
                factory: Arc::new(factory),
                mode: ThreadSafetyMode::default(),
                validator: None,
                cleanup: None,
            }
        }
    }

    impl<T: Send + Sync + 'static> ResettableLazyBuilder<T> {
        #[must_use]
        pub fn mode(mut self, mode: ThreadSafetyMode) -> Self {
            self.mode = mode;
            self
        }

        /// Values passed to [`ResettableLazy::set_value`] must pass `validator` to be
        /// installed. Values from the factory are not validated.
        #[must_use]
        pub fn validator<V>(mut self, validator: V) -> Self
        where
            V: Fn(&T) -> miette::Result<()> + Send + Sync + 'static,
        {
            self.validator = Some(Box::new(validator));
            self
        }

        /// Replaces the default cleanup, which is [`safe_drop`].
        #[must_use]
        pub fn cleanup<C>(mut self, cleanup: C) -> Self
        where
            C: Fn(Arc<T>) + Send + Sync + 'static,
        {
            self.cleanup = Some(Box::new(cleanup));
            self
        }

        pub fn build(self) -> ResettableLazy<T> {
            let slot = LazySlot::with_shared_factory(Arc::clone(&self.factory), self.mode);
            ResettableLazy {
                factory: self.factory,
                mode: self.mode,
                validator: self.validator,
                cleanup: self.cleanup.unwrap_or_else(|| Box::new(safe_drop::<Arc<T>>)),
                slot: Mutex::new(slot),
            }
        }
    }

    impl<T: Dispose + Send + Sync + 'static> ResettableLazyBuilder<T> {
        /// Cleanup calls [`Dispose::dispose`] on each discarded value, then releases the
        /// cell's reference. Errors and panics from `dispose` are logged, never raised.
        #[must_use]
        pub fn dispose_on_cleanup(self) -> Self {
            self.cleanup(|value: Arc<T>| {
                safe_dispose(&*value);
                safe_drop(value);
            })
        }
    }
}

mod accessor {
    use super::*;

    impl<T: Send + Sync + 'static> ResettableLazy<T> {
        /// Returns the value, computing it first if needed.
        ///
        /// On any failure the slot is replaced with a fresh pending one, so the next call
        /// runs the factory again. A transient failure (see [`LazyError::is_transient`]) is
        /// retried once, on a fresh slot, before it is returned.
        ///
        /// # Errors
        ///
        /// Whatever the factory returned on its last attempt.
        pub fn value(&self) -> Result<Arc<T>, LazyError> {
            let mut slot = self.lock_slot();

            let error = match slot.get() {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            *slot = self.fresh_slot();

            if !error.is_transient() {
                return Err(error);
            }

            tracing::debug!(
                message = "Transient failure computing lazy value, retrying once",
                error = ?error,
            );
            let result = slot.get();
            if result.is_err() {
                *slot = self.fresh_slot();
            }
            result
        }

        /// `true` if a value is currently published, never runs the factory.
        #[must_use]
        pub fn is_value_created(&self) -> bool { self.lock_slot().is_value_created() }

        #[must_use]
        pub fn mode(&self) -> ThreadSafetyMode { self.mode }
    }
}

mod mutator {
    use super::*;

    impl<T: Send + Sync + 'static> ResettableLazy<T> {
        /// Discard the current value (if any). The next [`Self::value`] runs the factory.
        pub fn reset(&self) {
            let fresh = self.fresh_slot();
            self.replace_slot(fresh);
        }

        /// Install `value` in place of whatever the cell holds now.
        ///
        /// # Errors
        ///
        /// [`LazyError::Rejected`] if the validator rejects `value`. The cell is left
        /// exactly as it was.
        pub fn set_value(&self, value: T) -> Result<(), LazyError> {
            if let Some(validator) = &self.validator {
                validator(&value).map_err(LazyError::rejected)?;
            }
            self.replace_slot(LazySlot::with_value(value, self.mode));
            Ok(())
        }

        /// `false` resets the cell. `true` does nothing, a value can only come from the
        /// factory or from [`Self::set_value`].
        pub fn set_is_value_created(&self, is_value_created: bool) {
            if !is_value_created {
                self.reset();
            }
        }

        fn replace_slot(&self, new_slot: LazySlot<T>) {
            let old_slot = std::mem::replace(&mut *self.lock_slot(), new_slot);
            self.discard(old_slot);
        }

        pub(super) fn discard(&self, old_slot: LazySlot<T>) {
            if let Some(value) = old_slot.into_value() {
                (self.cleanup)(value);
            }
        }

        pub(super) fn fresh_slot(&self) -> LazySlot<T> {
            LazySlot::with_shared_factory(Arc::clone(&self.factory), self.mode)
        }

        pub(super) fn lock_slot(&self) -> MutexGuard<'_, LazySlot<T>> {
            self.slot.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

impl<T> Drop for ResettableLazy<T> {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        let old_slot = std::mem::replace(
            slot,
            LazySlot::with_shared_factory(Arc::clone(&self.factory), self.mode),
        );
        if let Some(value) = old_slot.into_value() {
            (self.cleanup)(value);
        }
    }
}

impl<T> Debug for ResettableLazy<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ResettableLazy")
            .field("mode", &self.mode)
            .field("is_value_created", &slot.is_value_created())
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> Debug for ResettableLazyBuilder<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResettableLazyBuilder")
            .field("mode", &self.mode)
            .field("has_validator", &self.validator.is_some())
            .field("has_cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::{atomic::{AtomicUsize, Ordering},
                     Barrier},
              thread,
              time::Duration};

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    /// Counts factory calls and cleanups. The factory returns the call number.
    #[derive(Clone, Default)]
    struct Counters {
        factory_calls: Arc<AtomicUsize>,
        cleanups: Arc<Mutex<Vec<usize>>>,
    }

    impl Counters {
        fn lazy(&self, mode: ThreadSafetyMode) -> ResettableLazy<usize> {
            let factory_calls = Arc::clone(&self.factory_calls);
            let cleanups = Arc::clone(&self.cleanups);
            ResettableLazy::builder(move || Ok(factory_calls.fetch_add(1, Ordering::SeqCst)))
                .mode(mode)
                .cleanup(move |value| cleanups.lock().unwrap().push(*value))
                .build()
        }

        fn factory_calls(&self) -> usize { self.factory_calls.load(Ordering::SeqCst) }

        fn cleanups(&self) -> Vec<usize> { self.cleanups.lock().unwrap().clone() }
    }

    #[test_case(ThreadSafetyMode::None)]
    #[test_case(ThreadSafetyMode::PublicationOnly)]
    #[test_case(ThreadSafetyMode::ExecutionAndPublication)]
    fn test_value_then_reset_then_value(mode: ThreadSafetyMode) {
        let counters = Counters::default();
        let lazy = counters.lazy(mode);

        assert!(!lazy.is_value_created());
        assert_eq!(*lazy.value().unwrap(), 0);
        assert_eq!(*lazy.value().unwrap(), 0);
        assert!(lazy.is_value_created());
        assert_eq!(counters.factory_calls(), 1);

        lazy.reset();
        assert!(!lazy.is_value_created());
        assert_eq!(counters.cleanups(), vec![0]);

        assert_eq!(*lazy.value().unwrap(), 1);
        assert_eq!(counters.factory_calls(), 2);
    }

    #[test]
    fn test_reset_without_value_runs_no_cleanup() {
        let counters = Counters::default();
        let lazy = counters.lazy(ThreadSafetyMode::default());
        lazy.reset();
        lazy.reset();
        assert_eq!(counters.cleanups(), Vec::<usize>::new());
        assert_eq!(counters.factory_calls(), 0);
    }

    #[test]
    fn test_set_is_value_created() {
        let counters = Counters::default();
        let lazy = counters.lazy(ThreadSafetyMode::default());

        lazy.set_is_value_created(true);
        assert!(!lazy.is_value_created());

        lazy.value().unwrap();
        lazy.set_is_value_created(true);
        assert!(lazy.is_value_created());

        lazy.set_is_value_created(false);
        assert!(!lazy.is_value_created());
        assert_eq!(counters.cleanups(), vec![0]);
    }

    #[test]
    fn test_set_value_replaces_and_cleans_up_old_value() {
        let counters = Counters::default();
        let lazy = counters.lazy(ThreadSafetyMode::default());

        // Nothing computed yet, nothing to clean up.
        lazy.set_value(40).unwrap();
        assert!(lazy.is_value_created());
        assert_eq!(*lazy.value().unwrap(), 40);
        assert_eq!(counters.cleanups(), Vec::<usize>::new());

        lazy.set_value(41).unwrap();
        assert_eq!(*lazy.value().unwrap(), 41);
        assert_eq!(counters.cleanups(), vec![40]);
        assert_eq!(counters.factory_calls(), 0);
    }

    #[test]
    fn test_rejected_value_leaves_cell_unchanged() {
        let lazy = ResettableLazy::builder(|| Ok(10_i32))
            .validator(|value: &i32| {
                if *value < 0 {
                    miette::bail!("negative values are not allowed");
                }
                Ok(())
            })
            .build();

        assert!(matches!(lazy.set_value(-1), Err(LazyError::Rejected(_))));
        assert!(!lazy.is_value_created());

        assert_eq!(*lazy.value().unwrap(), 10);
        assert!(matches!(lazy.set_value(-5), Err(LazyError::Rejected(_))));
        assert_eq!(*lazy.value().unwrap(), 10);

        lazy.set_value(3).unwrap();
        assert_eq!(*lazy.value().unwrap(), 3);
    }

    #[test]
    fn test_non_transient_failure_is_not_sticky() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = ResettableLazy::new(move || match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Err(miette::miette!("disk not mounted").into()),
            n => Ok(n),
        });

        let error = lazy.value().unwrap_err();
        assert!(matches!(error, LazyError::Factory(_)));
        assert!(!lazy.is_value_created());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(*lazy.value().unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test_case(LazyError::Cancelled)]
    #[test_case(LazyError::Interrupted)]
    #[test_case(LazyError::CancellationRequested)]
    fn test_transient_failure_is_retried_once(transient: LazyError) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = ResettableLazy::new(move || match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Err(transient.clone()),
            _ => Ok("recovered"),
        });

        assert_eq!(*lazy.value().unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_transient_failure_twice_is_returned() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = ResettableLazy::new(move || match counter.fetch_add(1, Ordering::SeqCst) {
            0 | 1 => Err(LazyError::Cancelled),
            n => Ok(n),
        });

        assert!(matches!(lazy.value(), Err(LazyError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!lazy.is_value_created());

        assert_eq!(*lazy.value().unwrap(), 2);
    }

    #[test]
    fn test_drop_cleans_up_computed_value() {
        let counters = Counters::default();
        let lazy = counters.lazy(ThreadSafetyMode::default());
        lazy.value().unwrap();
        drop(lazy);
        assert_eq!(counters.cleanups(), vec![0]);

        let lazy = counters.lazy(ThreadSafetyMode::default());
        drop(lazy);
        assert_eq!(counters.cleanups(), vec![0]);
    }

    #[test]
    fn test_default_cleanup_releases_value() {
        let token = Arc::new(());
        let tracked = Arc::clone(&token);
        let lazy = ResettableLazy::new(move || Ok(Arc::clone(&tracked)));

        let value = lazy.value().unwrap();
        // Ours, the factory's, the value inside the cell.
        assert_eq!(Arc::strong_count(&token), 3);
        drop(value);

        lazy.reset();
        assert_eq!(Arc::strong_count(&token), 2);
    }

    #[test]
    fn test_dispose_on_cleanup() {
        #[derive(Debug)]
        struct Connection {
            disposed: Arc<AtomicUsize>,
        }

        impl Dispose for Connection {
            fn dispose(&self) -> miette::Result<()> {
                self.disposed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let disposed = Arc::new(AtomicUsize::new(0));
        let tracked = Arc::clone(&disposed);
        let lazy = ResettableLazy::builder(move || {
            Ok(Connection {
                disposed: Arc::clone(&tracked),
            })
        })
        .dispose_on_cleanup()
        .build();

        lazy.value().unwrap();
        lazy.reset();
        assert_eq!(disposed.load(Ordering::SeqCst), 1);

        lazy.value().unwrap();
        drop(lazy);
        assert_eq!(disposed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_with_thread_safety_flag() {
        let lazy = ResettableLazy::with_thread_safety(|| Ok(()), true);
        assert_eq!(lazy.mode(), ThreadSafetyMode::ExecutionAndPublication);
        let lazy = ResettableLazy::with_thread_safety(|| Ok(()), false);
        assert_eq!(lazy.mode(), ThreadSafetyMode::None);
        let lazy = ResettableLazy::with_mode(|| Ok(()), ThreadSafetyMode::PublicationOnly);
        assert_eq!(lazy.mode(), ThreadSafetyMode::PublicationOnly);
    }

    #[test_case(ThreadSafetyMode::None)]
    #[test_case(ThreadSafetyMode::PublicationOnly)]
    #[test_case(ThreadSafetyMode::ExecutionAndPublication)]
    fn test_concurrent_readers_share_one_computation(mode: ThreadSafetyMode) {
        const THREAD_COUNT: usize = 8;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = Arc::new(ResettableLazy::with_mode(
            move || {
                thread::sleep(Duration::from_millis(20));
                Ok(counter.fetch_add(1, Ordering::SeqCst))
            },
            mode,
        ));
        let barrier = Arc::new(Barrier::new(THREAD_COUNT));

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    lazy.value().unwrap()
                })
            })
            .collect();

        let values: Vec<_> = handles.into_iter().map(|it| it.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|it| Arc::ptr_eq(it, &values[0])));
    }

    #[test]
    fn test_reset_while_readers_hold_values() {
        let counters = Counters::default();
        let lazy = counters.lazy(ThreadSafetyMode::default());

        let held = lazy.value().unwrap();
        lazy.reset();
        let fresh = lazy.value().unwrap();

        assert_eq!(*held, 0);
        assert_eq!(*fresh, 1);
        assert_eq!(counters.cleanups(), vec![0]);
    }

    #[test]
    fn test_debug_output() {
        let lazy = ResettableLazy::new(|| Ok(1_u8));
        lazy.value().unwrap();
        let text = format!("{lazy:?}");
        assert!(text.contains("is_value_created: true"));
        assert!(text.contains("ExecutionAndPublication"));
    }
}
