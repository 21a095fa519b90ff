//! Route resolution pipeline
//!
//! normalize -> walk -> project metadata, breadcrumbs and navbar, memoized
//! per (brand, path).

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::{
    build_breadcrumbs, build_navbar, find_route, project, BreadcrumbEntry, NavbarLink,
    PageMetadata, Params, RouteContext, Site,
};

/// Where the user is: a concrete path plus an optional brand.
///
/// Without a brand hint the main brand is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub path: String,
    pub brand_hint: Option<String>,
}

impl NavigationState {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            brand_hint: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand_hint = Some(brand.into());
        self
    }
}

/// The matched route of a resolution.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchSummary {
    pub name: String,
    pub pattern: String,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

/// Everything derived for one navigation state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Resolution {
    pub brand: String,
    pub is_main_brand: bool,
    pub path: String,
    pub relative_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchSummary>,
    pub metadata: PageMetadata,
    pub breadcrumbs: Vec<BreadcrumbEntry>,
    pub navbar: Vec<NavbarLink>,
}

type CacheKey = (String, String);

/// Loaded site together with the resolutions memoized against it.
struct Loaded {
    site: Arc<Site>,
    cache: HashMap<CacheKey, Arc<Resolution>>,
}

/// Resolves navigation states against a loaded site.
pub struct ResolverService {
    state: RwLock<Loaded>,
    home_label: String,
    cache_enabled: bool,
}

impl ResolverService {
    pub fn new(site: Site, home_label: impl Into<String>, cache_enabled: bool) -> Self {
        Self {
            state: RwLock::new(Loaded {
                site: Arc::new(site),
                cache: HashMap::new(),
            }),
            home_label: home_label.into(),
            cache_enabled,
        }
    }

    /// Currently loaded site.
    pub fn site(&self) -> Arc<Site> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .site
            .clone()
    }

    /// Resolve a navigation state; identical inputs yield identical results.
    #[instrument(level = "debug", skip(self), fields(path = %state.path))]
    pub fn resolve(&self, state: &NavigationState) -> Arc<Resolution> {
        let (site, key) = {
            let loaded = self.state.read().unwrap_or_else(PoisonError::into_inner);
            let brand = state
                .brand_hint
                .clone()
                .unwrap_or_else(|| loaded.site.main_brand().to_string());
            let key = (brand, state.path.clone());
            if self.cache_enabled {
                if let Some(hit) = loaded.cache.get(&key) {
                    trace!("cache hit");
                    return hit.clone();
                }
            }
            (loaded.site.clone(), key)
        };

        let resolution = Arc::new(resolve_in(&site, &key.0, &key.1, &self.home_label));

        if self.cache_enabled {
            let mut loaded = self.state.write().unwrap_or_else(PoisonError::into_inner);
            // a reload in between owns the cache now
            if Arc::ptr_eq(&loaded.site, &site) {
                loaded.cache.insert(key, resolution.clone());
            } else {
                trace!("site replaced during resolution, not memoized");
            }
        }
        resolution
    }

    /// Swap in a freshly loaded site and drop every memoized resolution.
    pub fn reload(&self, site: Site) {
        let mut loaded = self.state.write().unwrap_or_else(PoisonError::into_inner);
        loaded.site = Arc::new(site);
        loaded.cache.clear();
        debug!("site reloaded, cache cleared");
    }

    pub fn cached_entries(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cache
            .len()
    }
}

/// Uncached resolution of `path` within `brand`.
pub fn resolve_in(site: &Site, brand: &str, path: &str, home_label: &str) -> Resolution {
    let scope = site.scope(brand);
    let context = RouteContext::new(scope.clone(), path);
    let forest = site.routes(brand);

    let found = find_route(forest, &context.relative_path);
    match &found {
        Some(m) => debug!(route = %m.route.name, pattern = %m.pattern, "matched"),
        None => debug!(relative = %context.relative_path, "no matching route"),
    }

    let metadata = project(found.as_ref().map(|m| m.route), site.seo(brand));
    let matched = found.map(|m| MatchSummary {
        name: m.route.name.clone(),
        pattern: m.pattern,
        params: m.params,
    });

    Resolution {
        brand: brand.to_string(),
        is_main_brand: scope.is_main(),
        breadcrumbs: build_breadcrumbs(forest, &scope, path, home_label),
        navbar: build_navbar(forest, &scope, path),
        path: context.path,
        relative_path: context.relative_path,
        matched,
        metadata,
    }
}
