// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`tracing`] subscriber setup. The library itself only emits events, nothing in it
//! installs a subscriber. Binaries and tests that want to see those events call
//! [`init_tracing`] with a [`TracingConfig`].

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
