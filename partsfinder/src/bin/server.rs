//! DSM Parts Finder host server.
//!
//! Serves the frontend build and pre-renders client routes into its shell.

#![allow(missing_docs)]
#![cfg(not(target_arch = "wasm32"))]

use partsfinder::server::{self, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logging is not up yet, remember the outcome and report it afterwards.
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    let log_file = server::init_logging(&config)?;

    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "could not load .env file");
    }

    if let Some(path) = log_file {
        tracing::info!(path = %path.display(), "logging to file");
    }

    tracing::info!(
        port = config.port,
        static_dir = %config.static_dir.display(),
        build_mode = %config.build_mode,
        "starting DSM Parts Finder"
    );

    server::serve(config).await?;

    Ok(())
}
