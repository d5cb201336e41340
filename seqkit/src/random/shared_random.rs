// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Randomness without ambient global state.
//!
//! [`SharedRandom`] is a generator behind a mutex that is passed around explicitly and
//! cloned to share it. Seed it with [`SharedRandom::seeded`] to get reproducible
//! sequences in tests. For a one off draw that doesn't need to be shared or reproduced,
//! [`with_thread_rng`] borrows the calling thread's generator instead.

use std::{fmt::{Debug, Formatter},
          sync::{Arc, Mutex, MutexGuard, PoisonError}};

use rand::{distr::uniform::{SampleRange, SampleUniform},
           rngs::{StdRng, ThreadRng},
           seq::{IndexedRandom, IteratorRandom, SliceRandom},
           Rng, SeedableRng};

use crate::{LoopedView, SequenceSource};

#[derive(Clone)]
pub struct SharedRandom {
    rng: Arc<Mutex<StdRng>>,
}

mod constructor {
    use super::*;

    impl SharedRandom {
        /// Seeded from the operating system.
        pub fn from_os_rng() -> Self { Self::from_rng(StdRng::from_os_rng()) }

        /// Same seed, same sequence of draws.
        pub fn seeded(seed: u64) -> Self { Self::from_rng(StdRng::seed_from_u64(seed)) }

        fn from_rng(rng: StdRng) -> Self {
            Self {
                rng: Arc::new(Mutex::new(rng)),
            }
        }
    }

    impl Default for SharedRandom {
        fn default() -> Self { Self::from_os_rng() }
    }
}

mod accessor {
    use super::*;

    impl SharedRandom {
        /// A uniformly distributed value in `range`. [`None`] if `range` is empty.
        pub fn random_range<T, R>(&self, range: R) -> Option<T>
        where
            T: SampleUniform,
            R: SampleRange<T>,
        {
            if range.is_empty() {
                return None;
            }
            Some(self.lock().random_range(range))
        }

        /// A uniformly chosen element of `items`. [`None`] if `items` is empty.
        pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
            items.choose(&mut *self.lock())
        }

        pub fn shuffle<T>(&self, items: &mut [T]) { items.shuffle(&mut *self.lock()); }

        /// A uniformly chosen element from one pass over `view`, without collecting the
        /// pass. [`None`] if the view's source is empty.
        pub fn pick_looped<S: SequenceSource>(&self, view: &LoopedView<S>) -> Option<S::Item> {
            view.source().open().choose(&mut *self.lock())
        }

        fn lock(&self) -> MutexGuard<'_, StdRng> {
            self.rng.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

/// Run `f` with the calling thread's generator.
pub fn with_thread_rng<R>(f: impl FnOnce(&mut ThreadRng) -> R) -> R {
    let mut rng: ThreadRng = rand::rng();
    f(&mut rng)
}

impl Debug for SharedRandom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRandom").finish_non_exhaustive()
    }
}
