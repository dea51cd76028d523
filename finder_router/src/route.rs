use std::fmt;

/// A single named mapping from a URL path to a view component.
///
/// `C` is whatever the view layer uses to refer to a component. The router
/// only stores it alongside the path and name.
#[derive(Clone)]
pub struct Route<C> {
    path: &'static str,
    name: &'static str,
    component: C,
}

impl<C> Route<C> {
    pub(crate) fn new(path: &'static str, name: &'static str, component: C) -> Self {
        Self {
            path,
            name,
            component,
        }
    }

    /// Path pattern, e.g. `/parts`.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Display name, e.g. `Parts`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The component attached to this route.
    pub fn component(&self) -> &C {
        &self.component
    }
}

impl<C> fmt::Debug for Route<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("component", &"<component>")
            .finish()
    }
}
