// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod friendly_random_id;
pub mod shared_random;

// Re-export.
pub use friendly_random_id::*;
pub use shared_random::*;
