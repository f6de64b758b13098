//! Tracing subscriber setup

use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, data_dir, log_path};

/// Install the global subscriber.
///
/// RUST_LOG takes precedence over the configured level. When file logging is
/// enabled the returned guard must be held until exit so buffered lines flush.
pub fn init(config: &LogConfig) -> std::io::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if !config.file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .inspect_err(|e| debug!("Keeping existing subscriber: {}", e));
        return Ok(None);
    }

    std::fs::create_dir_all(data_dir())?;
    let path = log_path();
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "version-tags.log".into());
    let appender = tracing_appender::rolling::never(data_dir(), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .inspect_err(|e| debug!("Keeping existing subscriber: {}", e));

    Ok(Some(guard))
}
