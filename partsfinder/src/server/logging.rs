use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use finder_router::BuildMode;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use super::{ServerConfig, ServerError};

/// Installs the global subscriber.
///
/// Development builds log to stdout. Production builds append to a dated file
/// in the log directory, one file per day the server was started on.
pub fn init(config: &ServerConfig) -> Result<Option<PathBuf>, ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match config.build_mode {
        BuildMode::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| ServerError::Logging(e.to_string()))?;

            Ok(None)
        }
        BuildMode::Production => {
            let path = log_file_path(&config.log_dir, OffsetDateTime::now_utc());
            fs::create_dir_all(&config.log_dir)?;

            let file = OpenOptions::new().create(true).append(true).open(&path)?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| ServerError::Logging(e.to_string()))?;

            Ok(Some(path))
        }
    }
}

fn log_file_path(log_dir: &Path, now: OffsetDateTime) -> PathBuf {
    log_dir.join(format!("{}.log", now.date()))
}
