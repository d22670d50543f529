//! Operation log setup.

use crate::config::{LOG_FILE_NAME, PathsConfig};
use crate::error::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber writing to `trading_bot.log` in the log directory.
///
/// The console is left to operator prompts. Keep the returned guard alive
/// until exit or buffered records are lost.
pub fn init(paths: &PathsConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&paths.log_dir)?;

    let file_appender = tracing_appender::rolling::never(&paths.log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "clicktrader=info".into()))
        .with(file_layer)
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(guard)
}
