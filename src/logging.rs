//! Logging setup
//!
//! `tracing` to stdout plus a daily-rolling file in the data directory.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::LOG_FILE_PREFIX;
use crate::helpers::is_development;

/// Default filter when `RUST_LOG` is not set
fn default_filter() -> &'static str {
    if is_development() {
        "info,quality_console=debug"
    } else {
        "info"
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()))
}

/// Install the global subscriber. Keep the guard alive for the whole run or
/// buffered file output is lost.
pub fn init(log_dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

/// Stdout-only subscriber for when the data directory is unavailable
pub fn init_stdout() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}
