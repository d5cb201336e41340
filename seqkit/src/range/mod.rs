// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod range_error;
pub mod range_producer;
pub mod range_step;

// Re-export.
pub use range_error::*;
pub use range_producer::*;
pub use range_step::*;
