use finder::{App, MountError, MountHost, MountedApp, ViewRouter};
use finder_router::{BuildMode, RouteTableError};

use crate::{
    routes::RouteSet,
    views::{Layout, Views},
};

/// Selector of the element the application mounts into.
pub const MOUNT_SELECTOR: &str = "#app";

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("failed to mount application: {0}")]
    Mount(#[from] MountError),
}

/// Routes, then router, then the application object. Nothing is mounted yet.
///
/// # Errors
///
/// Returns the route table's validation error.
pub fn build_app(set: RouteSet, mode: BuildMode) -> Result<App, RouteTableError> {
    let table = set.table(mode, &Views::default())?;
    let router = ViewRouter::new(table)?;

    log::debug!("built {set:?} routes for a {mode} build");

    Ok(App::new(Layout).use_router(router))
}

/// Full startup sequence: build the application and mount it on [`MOUNT_SELECTOR`].
///
/// # Errors
///
/// Returns [`BootstrapError::Mount`] when `host` has no mount target.
pub fn bootstrap<H: MountHost>(
    host: &mut H,
    mode: BuildMode,
    location: &str,
) -> Result<MountedApp, BootstrapError> {
    let app = build_app(RouteSet::default(), mode)?;

    Ok(app.mount(host, MOUNT_SELECTOR, location)?)
}
