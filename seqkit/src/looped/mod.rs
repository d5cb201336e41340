// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod looped_view;
pub mod restartable_cursor;
pub mod seq_ext;
pub mod sequence_source;

// Re-export.
pub use looped_view::*;
pub use restartable_cursor::*;
pub use seq_ext::*;
pub use sequence_source::*;
