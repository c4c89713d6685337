//! Tracing subscriber setup for hosts embedding the runtime.

use std::path::PathBuf;

use anyhow::Context;
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directive used when `RUST_LOG` is unset, e.g. `"info"` or `"runtime=debug"`.
    pub filter: String,
    /// Directory for daily-rolling log files. Stderr only when `None`.
    pub log_dir: Option<PathBuf>,
    pub file_prefix: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            log_dir: None,
            file_prefix: "rune-atb.log".to_owned(),
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Logs to stderr and to the platform cache directory.
    pub fn with_default_log_dir(mut self) -> Self {
        self.log_dir = ProjectDirs::from("", "", "rune-atb").map(|dirs| dirs.cache_dir().join("logs"));
        self
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process. Returns `Ok(None)` when no file is configured.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .with_context(|| format!("invalid log filter '{}'", config.filter))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("global tracing subscriber already installed")?;

    if let Some(dir) = &config.log_dir {
        tracing::info!(dir = %dir.display(), prefix = %config.file_prefix, "file logging enabled");
    }

    Ok(guard)
}
