use std::{fmt, sync::Arc};

use crate::{
    MountError, MountHost, View, ViewRef, ViewRouter,
    outlet::{fill_outlet, has_outlet},
};

/// The root application object.
///
/// Holds the root layout and the router. It is assembled once at startup and
/// consumed by [`App::mount`].
pub struct App {
    root: ViewRef,
    router: Option<ViewRouter>,
}

impl App {
    /// Create an application around its root layout.
    pub fn new(root: impl View + 'static) -> Self {
        Self {
            root: Arc::new(root),
            router: None,
        }
    }

    /// Install the router. The routed view is rendered into the layout's outlet.
    pub fn use_router(mut self, router: ViewRouter) -> Self {
        if !has_outlet(&self.root.render()) {
            log::warn!("root view has no outlet, routed views will not be shown");
        }

        self.router = Some(router);
        self
    }

    /// The installed router, if any.
    pub fn router(&self) -> Option<&ViewRouter> {
        self.router.as_ref()
    }

    /// Markup of the whole application for a browser location.
    ///
    /// A location no route matches renders the layout with an empty outlet.
    pub fn render(&self, location: &str) -> String {
        let layout = self.root.render();

        let Some(router) = &self.router else {
            return layout;
        };

        let (path, content) = match router.resolve(location) {
            Some(route) => (route.path(), route.component().render()),
            None => {
                log::warn!("no route matches location '{location}'");
                (finder_router::normalize_location(location), String::new())
            }
        };

        fill_outlet(&layout, path, &content).unwrap_or(layout)
    }

    /// Attach the application to the element matching `selector` in `host`.
    ///
    /// Consumes the application: an application is mounted once.
    ///
    /// # Errors
    ///
    /// Propagates the host's [`MountError`], e.g. when the target is missing.
    pub fn mount<H: MountHost>(
        self,
        host: &mut H,
        selector: &str,
        location: &str,
    ) -> Result<MountedApp, MountError> {
        let html = self.render(location);
        host.attach(selector, &html)?;

        log::info!("mounted application on '{selector}' at '{location}'");

        Ok(MountedApp {
            app: self,
            selector: selector.to_owned(),
        })
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("root", &"<View>")
            .field("router", &self.router)
            .finish()
    }
}

/// An application that has been attached to its target.
#[derive(Debug)]
pub struct MountedApp {
    app: App,
    selector: String,
}

impl MountedApp {
    /// Selector of the element the application was attached to.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Markup for a new location, used to refresh the target after navigation.
    pub fn render(&self, location: &str) -> String {
        self.app.render(location)
    }

    /// Router of the mounted application.
    pub fn router(&self) -> Option<&ViewRouter> {
        self.app.router()
    }
}
