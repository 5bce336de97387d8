/*
[INPUT]:  Console log level and log file path from BotConfig
[OUTPUT]: Global tracing subscriber writing to stderr and an append-only file
[POS]:    Observability layer - process startup
[UPDATE]: When changing log targets, formats or filters
*/

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// The file always keeps request, response and error detail.
pub const FILE_LOG_FILTER: &str = "warn,binance_futures_adapter=debug,binance_futures_bot=debug";

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered file lines are flushed.
pub fn init_tracing(log_level: &str, log_file: &Path) -> Result<WorkerGuard> {
    let console_filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let file_filter = EnvFilter::try_new(FILE_LOG_FILTER).context("invalid file log filter")?;

    let file_name = log_file
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", log_file.display()))?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        assert!(EnvFilter::try_new(FILE_LOG_FILTER).is_ok());
        assert!(EnvFilter::try_new("info").is_ok());
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        let err = init_tracing("info", Path::new("/")).unwrap_err();
        assert!(err.to_string().contains("no file name"));
    }
}
