// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

/// How concurrent callers of [`LazySlot::get`] coordinate while the value is being
/// computed.
///
/// | Mode                          | Factory runs             | Others wait? | Failure cached? |
/// | :---------------------------- | :----------------------- | :----------- | :-------------- |
/// | [`Self::None`]                | by every racing caller   | No           | Yes             |
/// | [`Self::PublicationOnly`]     | by every racing caller   | No           | No              |
/// | [`Self::ExecutionAndPublication`] | once                 | Yes          | Yes             |
///
/// With [`Self::None`] the slot is still memory safe, it simply does not coordinate
/// evaluation. With [`Self::PublicationOnly`] the first result to *complete* (not the
/// first caller to start) is the one every caller gets.
///
/// The mode can be parsed from configuration text:
///
/// ```
/// use std::str::FromStr;
/// use seqkit::ThreadSafetyMode;
///
/// let mode = ThreadSafetyMode::from_str("publication_only").unwrap();
/// assert_eq!(mode, ThreadSafetyMode::PublicationOnly);
/// assert_eq!(mode.to_string(), "publication_only");
/// ```
///
/// [`LazySlot::get`]: super::LazySlot::get
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ThreadSafetyMode {
    None,
    PublicationOnly,
    #[default]
    ExecutionAndPublication,
}

/// `true` selects [`ThreadSafetyMode::ExecutionAndPublication`], `false` selects
/// [`ThreadSafetyMode::None`].
impl From<bool> for ThreadSafetyMode {
    fn from(is_thread_safe: bool) -> Self {
        if is_thread_safe {
            Self::ExecutionAndPublication
        } else {
            Self::None
        }
    }
}
