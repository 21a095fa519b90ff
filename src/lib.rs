//! brandroute: brand-scoped route resolution
//!
//! Given a concrete URL path and the active brand, locate the matching route
//! in the brand's route forest and derive page metadata, breadcrumbs and
//! navigation links.
//!
//! ```
//! use brandroute::application::services::{NavigationState, ResolverService};
//! use brandroute::domain::{BrandConfig, RouteDefinition, Site};
//!
//! let site = Site::new(
//!     vec![
//!         BrandConfig::new("crazyclown", vec![RouteDefinition::new("/", "home")]).as_main(),
//!         BrandConfig::new(
//!             "chuanlife",
//!             vec![RouteDefinition::new("/news", "news")
//!                 .with_children(vec![RouteDefinition::new(":id", "news-detail")])],
//!         ),
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! let resolver = ResolverService::new(site, "Home", true);
//! let res = resolver.resolve(&NavigationState::new("/chuanlife/news/42").with_brand("chuanlife"));
//! assert_eq!(res.matched.as_ref().unwrap().name, "news-detail");
//! assert_eq!(res.breadcrumbs.len(), 3);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
