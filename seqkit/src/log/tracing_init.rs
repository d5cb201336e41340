// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::dispatcher;
use tracing_core::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt,
                         registry::LookupSpan,
                         util::SubscriberInitExt,
                         Layer};

use super::{rolling_file_appender_impl, DisplayPreference, TracingConfig, TracingScope,
            WriterConfig};
use crate::CommonResult;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(true)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Initialize the tracing system with the provided [`TracingConfig`], either:
/// 1. [`TracingScope::Global`]: the process wide default subscriber. Once set it can't
///    be unset or changed. Returns [`None`].
/// 2. [`TracingScope::ThreadLocal`]: only for the calling thread. Returns a
///    [`dispatcher::DefaultGuard`], dropping it restores the previous subscriber for
///    that thread.
///
/// # Errors
///
/// - The log file can't be created.
/// - [`TracingScope::Global`] and a global subscriber is already set.
pub fn init_tracing(
    tracing_config: TracingConfig,
) -> CommonResult<Option<dispatcher::DefaultGuard>> {
    let scope = tracing_config.scope;
    let layers = try_create_layers(&tracing_config)?;
    match scope {
        TracingScope::Global => {
            tracing_subscriber::registry()
                .with(layers)
                .try_init()
                .map_err(|error| miette::miette!("Can't set global subscriber: {error}"))?;
            Ok(None)
        }
        TracingScope::ThreadLocal => {
            Ok(Some(tracing_subscriber::registry().with(layers).set_default()))
        }
    }
}

/// Returns the layers without installing them. The first layer is the level filter.
///
/// # Errors
///
/// The log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> =
        vec![Box::new(level_filter)];

    if let Some(layer) = try_create_display_layer(level_filter, &writer_config)? {
        return_it.push(layer);
    }

    if let Some(layer) = try_create_file_layer(level_filter, &writer_config)? {
        return_it.push(layer);
    }

    Ok(return_it)
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Never fails today. Kept fallible to match [`try_create_file_layer`].
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(display_pref, _) | WriterConfig::Display(display_pref) => {
            match display_pref {
                DisplayPreference::Stdout => Some(Box::new(
                    fmt_layer
                        .with_writer(std::io::stdout)
                        .with_filter(level_filter),
                )),
                DisplayPreference::Stderr => Some(Box::new(
                    fmt_layer
                        .with_writer(std::io::stderr)
                        .with_filter(level_filter),
                )),
            }
        }
        WriterConfig::None | WriterConfig::File(_) => None,
    })
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// The log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, log_file_path) | WriterConfig::File(log_file_path) => {
            let file = rolling_file_appender_impl::try_create(log_file_path)?;
            Some(Box::new(
                create_fmt!()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(level_filter),
            ))
        }
        WriterConfig::None | WriterConfig::Display(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;
    use crate::{common::try_create_temp_dir, safe_drop};

    #[test]
    fn test_try_create_display_layer() {
        let writer_config = WriterConfig::Display(DisplayPreference::Stdout);
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, &writer_config).unwrap();
        assert!(layer.is_some());

        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, &WriterConfig::None).unwrap();
        assert!(layer.is_none());
    }

    #[test]
    fn test_try_create_both_layers() {
        let dir = try_create_temp_dir().unwrap();
        let file_path = dir.join("both.log").to_str().unwrap().to_string();

        let tracing_config =
            TracingConfig::new_file_and_display(Some(file_path.clone()), DisplayPreference::Stderr);

        let layers = try_create_layers(&tracing_config).unwrap();
        assert_eq!(layers.len(), 3);
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_writer_config_none_only_has_level_filter() {
        let tracing_config = TracingConfig {
            writer_config: WriterConfig::None,
            level: tracing::Level::INFO,
            scope: TracingScope::ThreadLocal,
        };
        assert_eq!(try_create_layers(&tracing_config).unwrap().len(), 1);
    }

    /// The guard only affects this thread, but the file writer is shared state on disk,
    /// so this runs serially with anything else that installs a subscriber.
    #[test]
    #[serial]
    fn test_thread_local_subscriber_writes_library_events_to_file() {
        struct PanicOnDrop;
        impl Drop for PanicOnDrop {
            fn drop(&mut self) { panic!("drop exploded"); }
        }

        let dir = try_create_temp_dir().unwrap();
        let file_path = dir.join("thread_local.log").to_str().unwrap().to_string();

        let guard = init_tracing(TracingConfig::new_file(Some(file_path.clone())))
            .unwrap()
            .unwrap();

        // Dropping a value that panics is logged as a warning.
        safe_drop(PanicOnDrop);
        tracing::debug!(message = "debug events reach the file");
        drop(guard);

        let contents = std::fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("Panic while dropping discarded value"));
        assert!(contents.contains("drop exploded"));
        assert!(contents.contains("debug events reach the file"));
    }

    #[test]
    #[serial]
    fn test_level_filter_discards_lower_events() {
        let dir = try_create_temp_dir().unwrap();
        let file_path = dir.join("filtered.log").to_str().unwrap().to_string();

        let guard = init_tracing(
            TracingConfig::new_file(Some(file_path.clone())).with_level(tracing::Level::WARN),
        )
        .unwrap();

        tracing::info!(message = "info is filtered out");
        tracing::warn!(message = "warn is kept");
        drop(guard);

        let contents = std::fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("warn is kept"));
        assert!(!contents.contains("info is filtered out"));
    }
}
