// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RestartableCursor, SequenceSource};
use crate::{RangeError, RangeProducer, RangeStep};

/// An iterable that hands out a new [`RestartableCursor`] for every [`Self::iter`] call.
/// The view itself holds no iteration state, so any number of cursors from the same view
/// can be driven at the same time without affecting one another.
///
/// - [`Self::loop_once`]: cursors do a single pass and then report the end. A cursor can
///   be sent around again with [`RestartableCursor::restart_from_beginning`].
/// - [`Self::loop_forever`]: cursors wrap around to the beginning forever (unless the
///   source is empty).
///
/// # Example
///
/// ```
/// use seqkit::{LoopedView, ReplaySource};
///
/// let view = LoopedView::loop_forever(ReplaySource(vec!['a', 'b']));
/// let mut first = view.iter();
/// let mut second = view.iter();
///
/// assert_eq!(first.next(), Some('a'));
/// assert_eq!(first.next(), Some('b'));
/// assert_eq!(second.next(), Some('a'));
/// assert_eq!(first.next(), Some('a'));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LoopedView<S> {
    source: S,
    is_infinite: bool,
}

impl<S: SequenceSource> LoopedView<S> {
    pub fn new(source: S, is_infinite: bool) -> Self {
        Self {
            source,
            is_infinite,
        }
    }

    pub fn loop_once(source: S) -> Self { Self::new(source, false) }

    pub fn loop_forever(source: S) -> Self { Self::new(source, true) }

    /// Returns an independent cursor positioned before the first item.
    pub fn iter(&self) -> RestartableCursor<&S> {
        RestartableCursor::new(&self.source, self.is_infinite)
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool { self.is_infinite }

    pub fn source(&self) -> &S { &self.source }
}

impl<'a, S> IntoIterator for &'a LoopedView<S>
where
    S: SequenceSource,
    S::Item: Clone,
{
    type Item = S::Item;
    type IntoIter = RestartableCursor<&'a S>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// A [`LoopedView`] over the numeric range `start..=end`. See [`produce_bounded`].
///
/// # Errors
///
/// Same as [`produce_bounded`].
///
/// [`produce_bounded`]: crate::produce_bounded
pub fn looped_range<T: RangeStep>(
    start: T,
    end: T,
    is_infinite: bool,
) -> Result<LoopedView<RangeProducer<T>>, RangeError> {
    let range = RangeProducer::bounded(start, end)?;
    Ok(LoopedView::new(range, is_infinite))
}

/// A [`LoopedView`] over `count` numbers starting at `start`. See [`produce_counted`].
///
/// # Errors
///
/// Same as [`produce_counted`].
///
/// [`produce_counted`]: crate::produce_counted
pub fn looped_range_counted<T: RangeStep>(
    start: T,
    count: usize,
    is_infinite: bool,
) -> Result<LoopedView<RangeProducer<T>>, RangeError> {
    let range = RangeProducer::counted(start, count)?;
    Ok(LoopedView::new(range, is_infinite))
}
