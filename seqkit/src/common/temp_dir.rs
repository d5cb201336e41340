// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{ops::Deref,
          path::{Path, PathBuf},
          sync::atomic::{AtomicUsize, Ordering}};

use miette::IntoDiagnostic;

use crate::generate_friendly_random_id;

/// A directory under [`std::env::temp_dir`] that is deleted when this is dropped.
#[derive(Debug)]
pub struct TempDir {
    pub inner: PathBuf,
}

impl TempDir {
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf { self.inner.join(path) }
}

static NEXT_TEMP_DIR_INDEX: AtomicUsize = AtomicUsize::new(0);

/// # Errors
///
/// Returns an error if the directory can't be created.
pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let new_temp_dir = std::env::temp_dir().join(format!(
        "seqkit-{}-{}-{}",
        generate_friendly_random_id(),
        std::process::id(),
        NEXT_TEMP_DIR_INDEX.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&new_temp_dir).into_diagnostic()?;
    Ok(TempDir {
        inner: new_temp_dir,
    })
}

impl Drop for TempDir {
    fn drop(&mut self) {
        // Best effort.
        std::fs::remove_dir_all(&self.inner).ok();
    }
}

impl Deref for TempDir {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target { &self.inner }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_removed_on_drop() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.inner.clone();
        std::fs::write(dir.join("file.txt"), "hello").unwrap();
        assert!(path.exists());
        drop(dir);
        assert!(!path.exists());
    }
}
