//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{ResolverService, SiteLoader, SitemapService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub loader: SiteLoader,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let loader = SiteLoader::new(fs.clone());

        Self {
            settings,
            fs,
            loader,
        }
    }

    /// Load the configured site and build a resolver over it.
    pub fn resolver(&self) -> InfraResult<ResolverService> {
        debug!(site_dir = %self.settings.site_dir.display(), "building resolver");
        let site = self
            .loader
            .load(&self.settings.site_dir, self.settings.main_brand.as_deref())?;
        Ok(ResolverService::new(
            site,
            self.settings.home_label.clone(),
            self.settings.cache,
        ))
    }

    pub fn sitemap(&self) -> SitemapService {
        SitemapService::new(self.settings.sitemap.clone())
    }
}
