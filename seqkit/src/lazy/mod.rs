// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod lazy_error;
pub mod lazy_slot;
pub mod resettable_lazy;
pub mod thread_safety_mode;

// Re-export.
pub use lazy_error::*;
pub use lazy_slot::*;
pub use resettable_lazy::*;
pub use thread_safety_mode::*;
