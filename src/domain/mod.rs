//! Domain layer: route model and resolution logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every resolution function is pure and total.

pub mod breadcrumb;
pub mod entities;
pub mod error;
pub mod lint;
pub mod metadata;
pub mod navbar;
pub mod path;
pub mod pattern;
pub mod sitemap;
pub mod walker;

pub use breadcrumb::build_breadcrumbs;
pub use entities::*;
pub use error::DomainError;
pub use lint::{LintFinding, RouteLinter};
pub use metadata::project;
pub use navbar::build_navbar;
pub use path::{normalize, BrandScope, RouteContext};
pub use pattern::matches;
pub use sitemap::{collect_entries, SitemapEntry, SitemapKind};
pub use walker::{effective_routes, find_route, ResolvedMatch, RouteEntry};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
