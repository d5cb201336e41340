// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # seqkit
//!
//! Small building blocks for lazily produced values:
//!
//! 1. [`range`]: overflow checked numeric ranges, bounded by an end value or a count.
//!    See [`produce_bounded`] and [`produce_counted`].
//! 2. [`looped`]: cursors that can restart a sequence from the beginning, optionally
//!    forever, and views that hand out a fresh cursor per iteration. See
//!    [`RestartableCursor`] and [`LoopedView`].
//! 3. [`lazy`]: a single slot cache that computes its value on first access, and can be
//!    reset, replaced, validated, and that recovers once from transient cancellation
//!    failures. See [`ResettableLazy`] and [`LazySlot`].
//!
//! Supporting modules:
//!
//! - [`common`]: error types and the [`Dispose`] capability with its never failing
//!   helpers [`safe_drop`] and [`safe_dispose`].
//! - [`random`]: [`SharedRandom`], an explicitly passed random generator.
//! - [`log`]: [`tracing`] subscriber setup via [`init_tracing`].
//!
//! # Example
//!
//! ```
//! use seqkit::{looped_range_counted, ResettableLazy};
//!
//! // 1, 2, 3, 1, 2, 3, 1, ...
//! let view = looped_range_counted(1_i32, 3, true).unwrap();
//! let first_seven: Vec<i32> = view.iter().take(7).collect();
//! assert_eq!(first_seven, vec![1, 2, 3, 1, 2, 3, 1]);
//!
//! let len = first_seven.len();
//! let cell = ResettableLazy::new(move || Ok(len));
//! assert!(!cell.is_value_created());
//! assert_eq!(*cell.value().unwrap(), 7);
//! cell.reset();
//! assert!(!cell.is_value_created());
//! ```

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod common;
pub mod lazy;
pub mod log;
pub mod looped;
pub mod random;
pub mod range;

// Re-export.
pub use common::*;
pub use lazy::*;
pub use log::*;
pub use looped::*;
pub use random::*;
pub use range::*;
