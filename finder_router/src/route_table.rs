use std::collections::HashSet;

use crate::route::Route;

/// Reasons a route table is rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    /// Two routes share a path.
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    /// Two routes share a name.
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    /// Nothing is mounted at `/`.
    #[error("route table has no root route '/'")]
    MissingRoot,

    /// A path without a leading `/`, or with a query or fragment.
    #[error("route path '{0}' must start with '/' and contain no query or fragment")]
    InvalidPath(String),

    /// The matcher refused a path that passed table validation.
    #[error("route '{path}' conflicts with an existing route: {reason}")]
    Conflict {
        /// Path that could not be registered.
        path: String,
        /// Matcher's explanation.
        reason: String,
    },
}

/// Ordered, immutable sequence of routes.
///
/// Paths and names are pairwise distinct and the root path `/` is present.
/// Once built, the table cannot be modified.
#[derive(Debug, Clone)]
pub struct RouteTable<C> {
    routes: Vec<Route<C>>,
}

impl<C> RouteTable<C> {
    /// Starts an empty builder.
    pub fn builder() -> RouteTableBuilder<C> {
        RouteTableBuilder { routes: Vec::new() }
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Route<C>] {
        &self.routes
    }

    /// Iterates routes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route<C>> {
        self.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false for a built table, which holds at least the root route.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route registered under exactly `path`.
    pub fn get(&self, path: &str) -> Option<&Route<C>> {
        self.routes.iter().find(|route| route.path() == path)
    }

    /// Route registered under `name`.
    pub fn by_name(&self, name: &str) -> Option<&Route<C>> {
        self.routes.iter().find(|route| route.name() == name)
    }

    /// Every path, in declaration order.
    pub fn paths(&self) -> Vec<&'static str> {
        self.routes.iter().map(Route::path).collect()
    }
}

impl<'a, C> IntoIterator for &'a RouteTable<C> {
    type Item = &'a Route<C>;
    type IntoIter = std::slice::Iter<'a, Route<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Collects routes in declaration order and validates them on [`build`](Self::build).
#[derive(Debug)]
pub struct RouteTableBuilder<C> {
    routes: Vec<Route<C>>,
}

impl<C> RouteTableBuilder<C> {
    /// Appends a route.
    pub fn route(mut self, path: &'static str, name: &'static str, component: C) -> Self {
        self.routes.push(Route::new(path, name, component));
        self
    }

    /// Appends a route only when `include` is true.
    ///
    /// This is the single conditional step of table construction: the flag is
    /// evaluated here, before the table exists, and never again.
    pub fn route_if(self, include: bool, path: &'static str, name: &'static str, component: C) -> Self {
        if include {
            self.route(path, name, component)
        } else {
            log::debug!("skipping route '{name}' ({path})");
            self
        }
    }

    /// Validates and freezes the table.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] if a path is malformed, a path or name is
    /// registered twice, or no route is mounted at `/`.
    pub fn build(self) -> Result<RouteTable<C>, RouteTableError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for route in &self.routes {
            let path = route.path();

            if !path.starts_with('/') || path.contains(['?', '#']) {
                return Err(RouteTableError::InvalidPath(path.to_owned()));
            }

            if !paths.insert(path) {
                return Err(RouteTableError::DuplicatePath(path.to_owned()));
            }

            if !names.insert(route.name()) {
                return Err(RouteTableError::DuplicateName(route.name().to_owned()));
            }
        }

        if !paths.contains("/") {
            return Err(RouteTableError::MissingRoot);
        }

        Ok(RouteTable {
            routes: self.routes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_keeps_declaration_order() {
        let table = RouteTable::builder()
            .route("/", "Home", 0)
            .route("/sites", "Sites", 1)
            .route("/parts", "Parts", 2)
            .build()
            .unwrap();

        assert_eq!(table.paths(), vec!["/", "/sites", "/parts"]);
        assert_eq!(table.by_name("Sites").map(|r| *r.component()), Some(1));
        assert_eq!(table.get("/parts").map(Route::name), Some("Parts"));
    }

    #[test]
    fn test_route_if_false_leaves_table_untouched() {
        let table = RouteTable::builder()
            .route("/", "Home", ())
            .route_if(false, "/parts", "Parts", ())
            .build()
            .unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get("/parts").is_none());
    }

    #[test]
    fn test_rejects_duplicate_path() {
        let err = RouteTable::builder()
            .route("/", "Home", ())
            .route("/", "Start", ())
            .build()
            .unwrap_err();

        assert_eq!(err, RouteTableError::DuplicatePath("/".to_owned()));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let err = RouteTable::builder()
            .route("/", "Home", ())
            .route("/home", "Home", ())
            .build()
            .unwrap_err();

        assert_eq!(err, RouteTableError::DuplicateName("Home".to_owned()));
    }

    #[test]
    fn test_rejects_missing_root() {
        let err = RouteTable::builder()
            .route("/parts", "Parts", ())
            .build()
            .unwrap_err();

        assert_eq!(err, RouteTableError::MissingRoot);
    }

    #[test]
    fn test_rejects_malformed_paths() {
        for path in ["parts", "/parts?x=1", "/parts#top"] {
            let err = RouteTable::builder()
                .route("/", "Home", ())
                .route(path, "Parts", ())
                .build()
                .unwrap_err();

            assert_eq!(err, RouteTableError::InvalidPath(path.to_owned()));
        }
    }
}
