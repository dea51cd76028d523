//! DSM Parts Finder frontend.
//!
//! The same crate builds the browser bundle (`wasm32`, started by [`start`])
//! and, with the `server` feature, the host that serves it.

#![allow(missing_docs)]

pub mod bootstrap;
pub mod routes;
pub mod views;

#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
pub mod server;

pub use bootstrap::{BootstrapError, MOUNT_SELECTOR, bootstrap, build_app};
pub use routes::RouteSet;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point: build routes, build the app, mount it on `#app`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "wasm")]
    {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
        }
    }

    let mode = finder_router::BuildMode::compiled();
    log::info!("starting DSM Parts Finder ({mode} build)");

    build_app(RouteSet::default(), mode)
        .map_err(BootstrapError::from)
        .and_then(|app| {
            app.mount_to_document(MOUNT_SELECTOR)
                .map_err(BootstrapError::from)
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
