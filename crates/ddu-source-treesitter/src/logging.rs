use std::{ffi::OsStr, path::Path};

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{LogLevel, LoggingSettings};

const DEFAULT_LOG_FILE_NAME: &str = "ddu-source-treesitter.log";

/// Filter directive for this crate at the effective level.
pub fn filter_directive(
    settings: &LoggingSettings,
    verbose: bool,
) -> String {
    let level = if verbose {
        settings.level.max(LogLevel::Debug)
    } else {
        settings.level
    };
    format!("ddu_source_treesitter={}", level.as_directive())
}

/// Install the global subscriber: stderr always, plus the configured log file.
///
/// Returns `false` when a subscriber was already installed by the embedding
/// process; that subscriber is left untouched.
pub fn init(
    settings: &LoggingSettings,
    verbose: bool,
) -> bool {
    let directive = filter_directive(settings, verbose);

    let file_layer = settings.file.as_ref().map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path.file_name().unwrap_or(OsStr::new(DEFAULT_LOG_FILE_NAME)),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(&directive))
    });

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(&directive));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
#[path = "../tests/src/logging_tests.rs"]
mod tests;
