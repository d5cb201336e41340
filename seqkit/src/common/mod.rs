// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod common_result_and_error;
pub mod dispose;
#[cfg(test)]
pub mod temp_dir;

// Re-export.
pub use common_result_and_error::*;
pub use dispose::*;
#[cfg(test)]
pub use temp_dir::*;
