// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::iter::Take;

use super::{LoopedView, ReplaySource, RestartableCursor};

/// Looping helpers for anything that can be iterated and cloned (collections, ranges,
/// slices, other iterators). Every pass works on a fresh clone, see [`ReplaySource`].
///
/// ```
/// use seqkit::SeqExt;
///
/// assert_eq!((1..4).take_looped(7).collect::<Vec<_>>(), vec![1, 2, 3, 1, 2, 3, 1]);
///
/// let days = ["mon", "tue"].loop_forever();
/// assert_eq!(days.iter().nth(3), Some("tue"));
/// ```
pub trait SeqExt: IntoIterator + Clone + Sized {
    fn loop_once(self) -> LoopedView<ReplaySource<Self>> {
        LoopedView::loop_once(ReplaySource(self))
    }

    fn loop_forever(self) -> LoopedView<ReplaySource<Self>> {
        LoopedView::loop_forever(ReplaySource(self))
    }

    /// The first `count` items of the endlessly repeated sequence. Empty if `self` is
    /// empty.
    fn take_looped(self, count: usize) -> Take<RestartableCursor<ReplaySource<Self>>>
    where
        Self::Item: Clone,
    {
        RestartableCursor::new(ReplaySource(self), true).take(count)
    }
}

impl<I: IntoIterator + Clone> SeqExt for I {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_take_looped_vec() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            items.take_looped(5).collect::<Vec<_>>(),
            vec!["a", "b", "a", "b", "a"]
        );
    }

    #[test]
    fn test_take_looped_empty() {
        let items: Vec<u8> = vec![];
        assert_eq!(items.take_looped(3).count(), 0);
    }

    #[test]
    fn test_loop_once_over_slice_iter() {
        let data = [3, 1, 4];
        let view = data.iter().loop_once();
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![3, 1, 4]);
        assert_eq!(view.iter().count(), 3);
    }
}
