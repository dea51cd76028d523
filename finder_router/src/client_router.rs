use matchit::Router;
use std::fmt;

use crate::{Route, RouteTable, RouteTableError};

/// Resolves browser locations against a [`RouteTable`].
///
/// Matching is delegated to `matchit`; the router keeps the table itself so
/// lookups hand back the registered [`Route`] record.
pub struct ClientRouter<C> {
    table: RouteTable<C>,
    matcher: Router<usize>,
}

impl<C> ClientRouter<C> {
    /// Registers every route of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError::Conflict`] when `matchit` refuses a path,
    /// e.g. two parameter segments competing for the same position.
    pub fn new(table: RouteTable<C>) -> Result<Self, RouteTableError> {
        let mut matcher = Router::new();

        for (index, route) in table.iter().enumerate() {
            if let Err(e) = matcher.insert(route.path(), index) {
                return Err(RouteTableError::Conflict {
                    path: route.path().to_owned(),
                    reason: e.to_string(),
                });
            }
        }

        log::debug!("client router ready with {} routes", table.len());

        Ok(Self { table, matcher })
    }

    /// Route for a browser location such as `/parts/?page=2#top`.
    pub fn resolve(&self, location: &str) -> Option<&Route<C>> {
        let path = normalize_location(location);
        let matched = self.matcher.at(path).ok()?;

        self.table.routes().get(*matched.value)
    }

    /// Path of the route called `name`.
    pub fn resolve_name(&self, name: &str) -> Option<&'static str> {
        self.table.by_name(name).map(Route::path)
    }

    /// The table this router was built from.
    pub fn table(&self) -> &RouteTable<C> {
        &self.table
    }
}

impl<C> fmt::Debug for ClientRouter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRouter")
            .field("routes", &self.table.paths())
            .field("matcher", &"Router<usize> { ... }")
            .finish()
    }
}

/// Strips query and fragment, and the trailing slash of non-root paths.
///
/// An empty location is the root.
pub fn normalize_location(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];

    if path.is_empty() {
        return "/";
    }

    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
