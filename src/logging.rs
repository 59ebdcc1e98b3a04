/// The run's log sink: one dated, append-only file per day.
///
/// The subscriber is installed as the scoped default for the current thread
/// and lives exactly as long as the returned [`LogGuard`].
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::config::LogConfig;
use crate::retrieve::RetrieveError;

/// Owns the installed subscriber. Records "Application end" when dropped.
pub struct LogGuard {
    path: PathBuf,
    _default: tracing::subscriber::DefaultGuard,
}

impl LogGuard {
    /// Log file being written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        tracing::info!("Application end");
    }
}

/// `<prefix>-dd-MM-yyyy.log`
#[must_use]
pub fn log_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.log", date.format("%d-%m-%Y"))
}

/// Open the log file and install the subscriber.
///
/// `RUST_LOG` overrides the filter; otherwise `verbose` selects debug over info.
///
/// # Errors
///
/// Returns `RetrieveError::Log` if the log directory or file cannot be opened,
/// or the filter is malformed.
pub fn init(
    config: &LogConfig,
    work_dir: &Path,
    verbose: bool,
    today: NaiveDate,
) -> Result<LogGuard, RetrieveError> {
    let dir = config
        .directory
        .as_ref()
        .map_or_else(|| work_dir.to_path_buf(), |d| work_dir.join(d));
    std::fs::create_dir_all(&dir)
        .map_err(|e| RetrieveError::Log(format!("{}: {e}", dir.display())))?;

    let path = dir.join(log_file_name(&config.file_prefix, today));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| RetrieveError::Log(format!("{}: {e}", path.display())))?;

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("object_retriever={level}")))
        .map_err(|e| RetrieveError::Log(format!("invalid log filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);
    let default = tracing::subscriber::set_default(subscriber);

    tracing::info!("Application start");
    Ok(LogGuard {
        path,
        _default: default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_log_file_name_is_dated() {
        assert_eq!(
            log_file_name("ObjectRetriever", jan_15()),
            "ObjectRetriever-15-01-2024.log"
        );
    }

    #[test]
    fn test_guard_brackets_run_in_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            directory: Some(PathBuf::from("logs")),
            ..LogConfig::default()
        };

        let guard = init(&config, dir.path(), false, jan_15()).unwrap();
        let path = guard.path().to_path_buf();
        assert_eq!(path, dir.path().join("logs").join("ObjectRetriever-15-01-2024.log"));
        drop(guard);

        let text = std::fs::read_to_string(&path).unwrap();
        let start = text.find("Application start").unwrap();
        let end = text.find("Application end").unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_second_run_appends() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::default();

        drop(init(&config, dir.path(), false, jan_15()).unwrap());
        let guard = init(&config, dir.path(), false, jan_15()).unwrap();
        let path = guard.path().to_path_buf();
        drop(guard);

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.matches("Application start").count(), 2);
    }
}
