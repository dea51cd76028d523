//! Route table and client-side router for the DSM Parts Finder frontend.
//!
//! A [`RouteTable`] is an ordered, validated list of [`Route`] records built once
//! at startup. [`ClientRouter`] takes ownership of the table and resolves the
//! browser location to a route. The route's component is opaque to this crate:
//! it is stored and handed back, never inspected.

mod build_mode;
mod client_router;
mod route;
mod route_table;

#[cfg(target_arch = "wasm32")]
pub mod history;

pub use build_mode::{BuildMode, ParseBuildModeError};
pub use client_router::{ClientRouter, normalize_location};
pub use route::Route;
pub use route_table::{RouteTable, RouteTableBuilder, RouteTableError};
