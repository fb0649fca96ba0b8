use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the JSON writer flushing until dropped.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    pub json_path: Option<PathBuf>,
}

/// Installs the global subscriber: human-readable events on stderr, plus a
/// JSON lines file when `logging.json_file` is set. `RUST_LOG` overrides the
/// configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<LoggingGuard> {
    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (json_layer, guard) = match logging.json_file.as_deref() {
        Some(path) => {
            let file = create_log_file(path)?;
            let (writer, guard) = non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file);
            let layer = fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_events(FmtSpan::NONE)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer);

    // A subscriber may already be installed, e.g. under test harnesses.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(LoggingGuard {
        _guard: guard,
        json_path: logging.json_file.clone(),
    })
}

fn create_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating log file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::init_logging;
    use crate::config::LoggingConfig;

    #[test]
    fn creates_json_log_file_in_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("briscola.jsonl");
        let config = LoggingConfig {
            tracing_level: "info".to_string(),
            json_file: Some(path.clone()),
        };
        let guard = init_logging(&config).expect("logging");
        assert_eq!(guard.json_path.as_deref(), Some(path.as_path()));
        assert!(path.exists());
    }
}
