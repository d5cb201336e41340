// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// A file writer that appends to `path_str` and never rolls over to a new file.
///
/// Wrapping this in [`tracing_appender::non_blocking`] drops events that are written
/// right before the process exits, so it is used as is.
///
/// # Errors
///
/// Returns an error if the path has no parent directory or no file name.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!("Log file path {} has no parent directory", path.display())
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Log file path {} has no file name", path.display())
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}
