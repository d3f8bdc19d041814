//! File-based logging.
//!
//! The screen owns the terminal, so tracing output goes to a daily
//! rotating file instead of stdout.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "orbit";
const DEFAULT_FILTER: &str = "orbit=info,warn";

/// Install the global subscriber. Keep the returned guard alive for as
/// long as logs should be flushed.
///
/// `RUST_LOG` overrides the default filter.
pub fn init(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

/// Log the outcome of an engine call.
#[macro_export]
macro_rules! log_engine_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(operation = $operation, "engine call succeeded"),
            Err(e) => tracing::warn!(operation = $operation, error = %e, "engine call failed"),
        }
    };
}
