//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod resolver;
mod site;
mod sitemap;

pub use resolver::{resolve_in, MatchSummary, NavigationState, Resolution, ResolverService};
pub use site::SiteLoader;
pub use sitemap::{SitemapService, SitemapUrl};
