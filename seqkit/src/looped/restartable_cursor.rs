// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A cursor over a [`SequenceSource`] that can start over from the beginning.
//!
//! ```text
//!            advance() -> true                advance() -> false
//!   Fresh ─────────────────────► Active ─────────────────────────► Exhausted
//!     ▲                          │    ▲                                │
//!     │                          │    │ is_infinite: reopen source,    │
//!     │                          └────┘ keep going                     │
//!     └────────────────────── restart_from_beginning() ────────────────┘
//! ```
//!
//! - A finite cursor (`is_infinite == false`) reports the end of the sequence normally.
//!   Calling [`RestartableCursor::restart_from_beginning`] makes it do one more full pass.
//! - An infinite cursor never reports the end of a non empty sequence. When the owned
//!   iterator runs dry it is dropped and a fresh one is opened from the source, and the
//!   cursor keeps going. This is done in a loop with a single retry, never by recursion.
//! - If a freshly opened iterator is empty, the source is empty and an infinite cursor
//!   has nothing to repeat. It becomes [`CursorState::Exhausted`] instead of spinning.
//!
//! The cursor owns exactly one iterator at a time. The old one is dropped when it is
//! replaced, and the current one is dropped with the cursor.

use std::fmt::{Debug, Formatter};

use super::SequenceSource;

const DEBUG_SEQKIT_CURSOR: bool = false;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CursorState {
    /// An iterator was just opened, nothing has been read from it yet.
    Fresh,
    /// At least one item was produced, [`RestartableCursor::current`] holds the last one.
    Active,
    /// No more items. Only [`RestartableCursor::restart_from_beginning`] leaves this
    /// state.
    Exhausted,
}

pub struct RestartableCursor<S: SequenceSource> {
    source: S,
    iter: S::Iter,
    current: Option<S::Item>,
    state: CursorState,
    is_infinite: bool,
    restart_count: usize,
}

mod constructor {
    use super::*;

    impl<S: SequenceSource> RestartableCursor<S> {
        /// Opens the first iterator from `source` right away.
        pub fn new(source: S, is_infinite: bool) -> Self {
            let iter = source.open();
            Self {
                source,
                iter,
                current: None,
                state: CursorState::Fresh,
                is_infinite,
                restart_count: 0,
            }
        }

        /// Give back the source. Drops the owned iterator.
        pub fn into_source(self) -> S { self.source }
    }
}

mod mutator {
    use super::*;

    impl<S: SequenceSource> RestartableCursor<S> {
        /// Move to the next item. Returns `true` if [`Self::current`] now holds one.
        pub fn advance(&mut self) -> bool {
            if self.state == CursorState::Exhausted {
                return false;
            }

            if let Some(item) = self.iter.next() {
                self.set_current(item);
                return true;
            }

            if self.is_infinite {
                self.reopen();
                self.restart_count += 1;

                DEBUG_SEQKIT_CURSOR.then(|| {
                    tracing::debug!(
                        message = "Infinite cursor reached the end, restarted",
                        restart_count = self.restart_count,
                    );
                });

                if let Some(item) = self.iter.next() {
                    self.set_current(item);
                    return true;
                }

                tracing::debug!(
                    message = "Infinite cursor over an empty source, treating as exhausted"
                );
            }

            self.current = None;
            self.state = CursorState::Exhausted;
            false
        }

        /// Drop the owned iterator and open a new one from the source, from any state
        /// (including [`CursorState::Exhausted`]). The next [`Self::advance`] returns the
        /// first item again.
        pub fn restart_from_beginning(&mut self) {
            self.reopen();
            self.current = None;
            self.state = CursorState::Fresh;
        }

        fn set_current(&mut self, item: S::Item) {
            self.current = Some(item);
            self.state = CursorState::Active;
        }

        fn reopen(&mut self) {
            // Assigning drops the previous iterator.
            self.iter = self.source.open();
        }
    }
}

mod accessor {
    use super::*;

    impl<S: SequenceSource> RestartableCursor<S> {
        /// The item produced by the last successful [`Self::advance`].
        pub fn current(&self) -> Option<&S::Item> { self.current.as_ref() }

        pub fn state(&self) -> CursorState { self.state }

        pub fn is_infinite(&self) -> bool { self.is_infinite }

        /// How many times an infinite cursor wrapped around to the beginning on its own.
        /// Explicit [`Self::restart_from_beginning`] calls are not counted.
        pub fn restart_count(&self) -> usize { self.restart_count }

        pub fn source(&self) -> &S { &self.source }
    }
}

mod iterator {
    use super::*;

    impl<S> Iterator for RestartableCursor<S>
    where
        S: SequenceSource,
        S::Item: Clone,
    {
        type Item = S::Item;

        fn next(&mut self) -> Option<Self::Item> {
            if self.advance() {
                self.current.clone()
            } else {
                None
            }
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            match (self.state, self.is_infinite) {
                (CursorState::Exhausted, _) => (0, Some(0)),
                // Ends if the source is (or becomes) empty, so only what is left in the
                // owned iterator is guaranteed.
                (_, true) => (self.iter.size_hint().0, None),
                (_, false) => self.iter.size_hint(),
            }
        }
    }
}

impl<S> Debug for RestartableCursor<S>
where
    S: SequenceSource + Debug,
    S::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartableCursor")
            .field("source", &self.source)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("is_infinite", &self.is_infinite)
            .field("restart_count", &self.restart_count)
            .finish_non_exhaustive()
    }
}
