use std::path::PathBuf;

use finder_router::BuildMode;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "frontend/dist";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_DATABASE_PATH: &str = "sqlite.db";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Server settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub build_mode: BuildMode,
    pub port: u16,
    pub static_dir: PathBuf,
    pub log_dir: PathBuf,
    pub database_path: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            build_mode: BuildMode::Production,
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Reads `DEBUG`, `PORT`, `STATIC_DIR`, `LOG_DIR`, `DATABASE_PATH` and
    /// `CORS_ORIGINS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => defaults.port,
        };

        let cors_origins = match non_empty("CORS_ORIGINS") {
            Some(value) => split_origins(&value),
            None => defaults.cors_origins,
        };

        if let Some(origin) = cors_origins.iter().find(|origin| !is_http_origin(origin)) {
            return Err(ConfigError::InvalidOrigin(origin.clone()));
        }

        Ok(Self {
            build_mode: BuildMode::from_debug_flag(lookup("DEBUG").as_deref()),
            port,
            static_dir: non_empty("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            log_dir: non_empty("LOG_DIR").map_or(defaults.log_dir, PathBuf::from),
            database_path: non_empty("DATABASE_PATH").map_or(defaults.database_path, PathBuf::from),
            cors_origins,
        })
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

fn is_http_origin(origin: &str) -> bool {
    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"));

    matches!(rest, Some(host) if !host.is_empty() && !host.contains(['/', ' ']))
}
