//! Common imports for building and mounting an application.

pub use crate::outlet::OUTLET;
pub use crate::{App, MountError, MountHost, MountedApp, ShellHost, View, ViewRef, ViewRouter, ViewTable};
pub use finder_router::{BuildMode, ClientRouter, Route, RouteTable, RouteTableError};

#[cfg(target_arch = "wasm32")]
pub use crate::DocumentHost;
