//! Route tables of the parts finder.
//!
//! The app went through four route layouts. They are kept side by side so
//! each can still be built; [`RouteSet::default`] is the one the app boots with.

use finder::{ViewRef, ViewTable};
use finder_router::{BuildMode, RouteTable, RouteTableError};

use crate::views::Views;

/// The route layouts the application has shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteSet {
    /// `/` Home, `/parts` Parts, `/browse` Browse.
    Catalog,
    /// `/` Home, `/browse` Browse, plus `/parts` Parts outside production.
    Staged,
    /// `/` Home, `/sites` Sites.
    Sites,
    /// `/` Home, `/sites` Sites, `/parts` Parts.
    #[default]
    SitesAndParts,
}

impl RouteSet {
    pub const ALL: [RouteSet; 4] = [
        RouteSet::Catalog,
        RouteSet::Staged,
        RouteSet::Sites,
        RouteSet::SitesAndParts,
    ];

    /// Build this layout's table.
    ///
    /// `mode` only matters for [`RouteSet::Staged`].
    ///
    /// # Errors
    ///
    /// Never fails for the shipped layouts; the error is the table's own
    /// validation passed through.
    pub fn table(self, mode: BuildMode, views: &Views) -> Result<ViewTable, RouteTableError> {
        let home = || ViewRef::clone(&views.home);
        let parts = || ViewRef::clone(&views.parts);
        let browse = || ViewRef::clone(&views.browse);
        let sites = || ViewRef::clone(&views.sites);

        let builder = RouteTable::builder().route("/", "Home", home());

        let builder = match self {
            RouteSet::Catalog => builder
                .route("/parts", "Parts", parts())
                .route("/browse", "Browse", browse()),
            RouteSet::Staged => builder
                .route("/browse", "Browse", browse())
                .route_if(!mode.is_production(), "/parts", "Parts", parts()),
            RouteSet::Sites => builder.route("/sites", "Sites", sites()),
            RouteSet::SitesAndParts => builder
                .route("/sites", "Sites", sites())
                .route("/parts", "Parts", parts()),
        };

        builder.build()
    }
}
