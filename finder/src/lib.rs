//! Application object for the DSM Parts Finder frontend.
//!
//! An [`App`] owns a root layout view and, optionally, a router. Rendering a
//! location composes the layout with the matched route's view through the
//! layout's [`outlet`]. Mounting hands that markup to a [`MountHost`]: the
//! browser document on wasm, or an HTML shell on the server.

use std::sync::Arc;

mod app;
pub mod mount;
pub mod outlet;
pub mod prelude;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use app::{App, MountedApp};
pub use finder_router;
pub use mount::{MountError, MountHost, ShellHost};

#[cfg(target_arch = "wasm32")]
pub use dom::DocumentHost;

/// Trait that defines the view layer for pages and layouts.
///
/// Views are opaque to the router; the application only asks them for markup.
pub trait View: Send + Sync {
    /// Render the view to an HTML fragment.
    fn render(&self) -> String;
}

impl View for &'static str {
    fn render(&self) -> String {
        (*self).to_owned()
    }
}

impl View for String {
    fn render(&self) -> String {
        self.clone()
    }
}

/// Shared handle to a view, as stored in route tables.
pub type ViewRef = Arc<dyn View>;

/// Route record whose component is a view.
pub type ViewRoute = finder_router::Route<ViewRef>;

/// Route table of views.
pub type ViewTable = finder_router::RouteTable<ViewRef>;

/// Router over a table of views.
pub type ViewRouter = finder_router::ClientRouter<ViewRef>;
