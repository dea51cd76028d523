//! Host server for the built frontend.
//!
//! Serves the files of the frontend build and the parts API backed by
//! SQLite, and falls back to the `index.html` shell for client-side routes,
//! pre-rendering the matched page into `#app` with the same route table the
//! browser uses.

mod api;
mod config;
mod handlers;
mod logging;
mod store;

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use finder::{App, MountHost, ShellHost};
use finder_router::RouteTableError;
use tokio::net::TcpListener;

use crate::{MOUNT_SELECTOR, RouteSet, build_app};

pub use config::{ConfigError, ServerConfig};
pub use handlers::router;
pub use logging::init as init_logging;
pub use store::{NewPart, Page, Part, PartFilter, RecordSummary, STALE_AFTER, SWEEP_MIN_BATCH, Site, Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("route table error: {0}")]
    Routes(#[from] RouteTableError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// State shared by all request handlers.
#[derive(Debug)]
pub struct AppState {
    app: App,
    store: Store,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(app: App, store: Store, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            app,
            store,
            static_dir: static_dir.into(),
        }
    }

    /// Builds the application for the configured build mode and opens the
    /// database.
    ///
    /// A missing shell is not fatal: the server starts and answers page
    /// requests with an error until the frontend is built.
    pub async fn load(config: &ServerConfig) -> Result<Self, ServerError> {
        let app = build_app(RouteSet::default(), config.build_mode)?;
        let store = Store::open(&config.database_path).await?;

        let index = config.static_dir.join("index.html");
        if !tokio::fs::try_exists(&index).await.unwrap_or(false) {
            tracing::warn!(path = %index.display(), "frontend shell not available yet");
        }

        Ok(Self::new(app, store, config.static_dir.clone()))
    }

    /// The shell with the page for `location` rendered into the mount target.
    ///
    /// The shell is read on every call, so a frontend rebuilt while the
    /// server runs is picked up without a restart.
    pub async fn render_shell(&self, location: &str) -> Option<String> {
        let index = self.static_dir.join("index.html");

        let shell = match tokio::fs::read_to_string(&index).await {
            Ok(shell) => shell,
            Err(e) => {
                tracing::error!(path = %index.display(), error = %e, "failed to read frontend shell");
                return None;
            }
        };

        let mut host = ShellHost::new(shell.as_str());

        match host.attach(MOUNT_SELECTOR, &self.app.render(location)) {
            Ok(()) => Some(host.into_html()),
            Err(e) => {
                tracing::warn!(error = %e, "serving shell without pre-rendered page");
                Some(shell)
            }
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

/// Runs the server until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::load(&config).await?);
    let app = router(state, &config)?;

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;

    tracing::info!(
        port = config.port,
        static_dir = %config.static_dir.display(),
        database = %config.database_path.display(),
        build_mode = %config.build_mode,
        "DSM Parts Finder listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }

    tracing::info!("shutting down");
}
