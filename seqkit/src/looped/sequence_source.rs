// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`SequenceSource`] is anything that can hand out a fresh iterator over the same
//! logical sequence, as many times as asked. This is what lets a [`RestartableCursor`]
//! start over.
//!
//! | Source                 | Item         | Each [`open`] call                       |
//! | :--------------------- | :----------- | :--------------------------------------- |
//! | [`RangeProducer<T>`]   | `T`          | new [`RangeIter`], no allocation         |
//! | `&'a [T]`              | `&'a T`      | new [`std::slice::Iter`]                 |
//! | [`ReplaySource<I>`]    | `I::Item`    | clones the collection and iterates it    |
//! | [`FnSource<F>`]        | `I::Item`    | calls the closure again                  |
//! | `&S`                   | `S::Item`    | delegates to `S`                         |
//!
//! [`open`]: SequenceSource::open
//! [`RestartableCursor`]: super::RestartableCursor
//! [`RangeProducer<T>`]: crate::RangeProducer
//! [`RangeIter`]: crate::RangeIter

use std::fmt::{Debug, Formatter};

use crate::{RangeIter, RangeProducer, RangeStep};

pub trait SequenceSource {
    type Item;
    type Iter: Iterator<Item = Self::Item>;

    /// Returns a new iterator positioned at the beginning of the sequence.
    fn open(&self) -> Self::Iter;
}

impl<S: SequenceSource + ?Sized> SequenceSource for &S {
    type Item = S::Item;
    type Iter = S::Iter;

    fn open(&self) -> Self::Iter { (**self).open() }
}

impl<T: RangeStep> SequenceSource for RangeProducer<T> {
    type Item = T;
    type Iter = RangeIter<T>;

    fn open(&self) -> Self::Iter { self.iter() }
}

impl<'a, T> SequenceSource for &'a [T] {
    type Item = &'a T;
    type Iter = std::slice::Iter<'a, T>;

    fn open(&self) -> Self::Iter { self.iter() }
}

/// Replays a clonable collection (or any clonable [`IntoIterator`]) by cloning it for
/// every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySource<I>(pub I);

impl<I> SequenceSource for ReplaySource<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Iter = I::IntoIter;

    fn open(&self) -> Self::Iter { self.0.clone().into_iter() }
}

/// Produces a sequence by calling a closure for every pass. The closure may return a
/// different sequence each time (eg: re-reading a snapshot), which is how a
/// [`RestartableCursor`] can observe a source that became empty.
///
/// [`RestartableCursor`]: super::RestartableCursor
#[derive(Clone)]
pub struct FnSource<F>(pub F);

/// Wrap a closure returning an [`IntoIterator`] as a [`SequenceSource`].
pub fn from_fn<F, I>(open_fn: F) -> FnSource<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FnSource(open_fn)
}

impl<F, I> SequenceSource for FnSource<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Iter = I::IntoIter;

    fn open(&self) -> Self::Iter { (self.0)().into_iter() }
}

impl<F> Debug for FnSource<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}
