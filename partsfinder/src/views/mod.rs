//! Pages of the parts finder.
//!
//! Each view is a self-contained unit; the route table only attaches them to paths.

mod browse;
mod home;
mod layout;
mod parts;
mod sites;

pub use browse::Browse;
pub use home::Home;
pub use layout::Layout;
pub use parts::Parts;
pub use sites::Sites;

use finder::ViewRef;
use std::sync::Arc;

/// One instance of every page, constructed before any route refers to them.
#[derive(Clone)]
pub struct Views {
    pub home: ViewRef,
    pub parts: ViewRef,
    pub browse: ViewRef,
    pub sites: ViewRef,
}

impl Default for Views {
    fn default() -> Self {
        Self {
            home: Arc::new(Home),
            parts: Arc::new(Parts),
            browse: Arc::new(Browse),
            sites: Arc::new(Sites),
        }
    }
}

impl std::fmt::Debug for Views {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Views").finish_non_exhaustive()
    }
}
