//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/brandroute/brandroute.toml`
//! 3. Local config: `<site_dir>/.brandroute.toml`
//! 4. Environment variables: `BRANDROUTE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Name of the per-site config file inside the site directory.
pub const LOCAL_CONFIG_FILE: &str = ".brandroute.toml";

/// Sitemap generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SitemapConfig {
    /// Absolute origin prepended to every sitemap path (e.g. `https://example.com`)
    pub base_url: String,
    pub changefreq: String,
    pub priority: f64,
    /// Additional URLs (typically dynamic detail pages), absolute or site-relative
    pub extra_urls: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            changefreq: "daily".into(),
            priority: 0.8,
            extra_urls: vec![],
        }
    }
}

/// Raw sitemap config for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSitemapConfig {
    pub base_url: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
    pub extra_urls: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub site_dir: Option<PathBuf>,
    pub main_brand: Option<String>,
    pub home_label: Option<String>,
    pub cache: Option<bool>,
    #[serde(default)]
    pub sitemap: RawSitemapConfig,
}

impl SitemapConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated, first occurrence keeps its position
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: Vec<String> = base.iter().unique().cloned().collect();

        for item in overlay {
            if let Some(negated) = item.strip_prefix('!') {
                result.retain(|existing| existing != negated);
            } else if !result.contains(item) {
                result.push(item.clone());
            }
        }

        result
    }

    /// Merge local overlay: scalars replace when given, `extra_urls` unions.
    pub fn merge(&self, overlay: &RawSitemapConfig) -> Self {
        Self {
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            changefreq: overlay
                .changefreq
                .clone()
                .unwrap_or_else(|| self.changefreq.clone()),
            priority: overlay.priority.unwrap_or(self.priority),
            extra_urls: overlay
                .extra_urls
                .as_ref()
                .map(|o| Self::merge_array(&self.extra_urls, o))
                .unwrap_or_else(|| self.extra_urls.clone()),
        }
    }

    /// Apply global config onto defaults; arrays REPLACE.
    pub fn apply_global(&self, global: &RawSitemapConfig) -> Self {
        Self {
            base_url: global
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            changefreq: global
                .changefreq
                .clone()
                .unwrap_or_else(|| self.changefreq.clone()),
            priority: global.priority.unwrap_or(self.priority),
            extra_urls: global
                .extra_urls
                .clone()
                .unwrap_or_else(|| self.extra_urls.clone()),
        }
    }
}

/// Unified configuration for brandroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one `<brand>.toml` per brand (default: ./site)
    pub site_dir: PathBuf,
    /// Main brand override; otherwise the brand flagged `main = true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_brand: Option<String>,
    /// Label of the first breadcrumb
    pub home_label: String,
    /// Memoize resolutions per (brand, path)
    pub cache: bool,
    pub sitemap: SitemapConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            main_brand: None,
            home_label: "Home".into(),
            cache: true,
            sitemap: SitemapConfig::default(),
        }
    }
}

/// Get the XDG config directory for brandroute.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "brandroute").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("brandroute.toml"))
}

/// Get the path to the local config file in a site directory.
pub fn local_config_path(site_dir: &Path) -> PathBuf {
    site_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.site_dir.to_string_lossy().as_ref());
        self.site_dir = PathBuf::from(expanded);
    }

    /// Merge local config onto self with union semantics for arrays.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            site_dir: overlay
                .site_dir
                .clone()
                .unwrap_or_else(|| self.site_dir.clone()),
            main_brand: overlay
                .main_brand
                .clone()
                .or_else(|| self.main_brand.clone()),
            home_label: overlay
                .home_label
                .clone()
                .unwrap_or_else(|| self.home_label.clone()),
            cache: overlay.cache.unwrap_or(self.cache),
            sitemap: self.sitemap.merge(&overlay.sitemap),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            site_dir: global
                .site_dir
                .clone()
                .unwrap_or_else(|| self.site_dir.clone()),
            main_brand: global
                .main_brand
                .clone()
                .or_else(|| self.main_brand.clone()),
            home_label: global
                .home_label
                .clone()
                .unwrap_or_else(|| self.home_label.clone()),
            cache: global.cache.unwrap_or(self.cache),
            sitemap: self.sitemap.apply_global(&global.sitemap),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `site_dir` (from `-C`) selects the local config and wins over every layer.
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(site_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), site_dir)
    }

    /// Same as [`Settings::load`] with an explicit global config location.
    pub fn load_layers(
        global_path: Option<&Path>,
        site_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        // local config lives in the site dir that ends up effective
        let local_dir = match site_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let dir = std::env::var("BRANDROUTE_SITE_DIR")
                    .unwrap_or_else(|_| current.site_dir.to_string_lossy().into_owned());
                PathBuf::from(expand_env_vars(&dir))
            }
        };
        let local_path = local_config_path(&local_dir);
        if local_path.exists() {
            debug!("Loading local config: {}", local_path.display());
            let raw = load_raw_settings(&local_path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;

        if let Some(dir) = site_dir {
            current.site_dir = dir.to_path_buf();
        }
        current.expand_paths();

        Ok(current)
    }

    /// Apply BRANDROUTE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("BRANDROUTE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("sitemap.extra_urls")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("site_dir") {
            settings.site_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("main_brand") {
            settings.main_brand = Some(val);
        }
        if let Ok(val) = config.get_string("home_label") {
            settings.home_label = val;
        }
        if let Ok(val) = config.get_bool("cache") {
            settings.cache = val;
        }
        if let Ok(val) = config.get_string("sitemap.base_url") {
            settings.sitemap.base_url = val;
        }
        if let Ok(val) = config.get_string("sitemap.changefreq") {
            settings.sitemap.changefreq = val;
        }
        if let Ok(val) = config.get_float("sitemap.priority") {
            settings.sitemap.priority = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("sitemap.extra_urls") {
            settings.sitemap.extra_urls = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# brandroute configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/brandroute/brandroute.toml  (defines your baseline)
#   Local:  <site_dir>/.brandroute.toml           (site-specific additions)
#   Env:    BRANDROUTE_* environment variables    (explicit overrides,
#           nested keys with "__", e.g. BRANDROUTE_SITEMAP__BASE_URL)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!item" in local config to REMOVE an inherited item:
#     extra_urls = ["/news/42", "!/news/1"]

# Directory with one <brand>.toml per brand
# site_dir = "site"

# Main brand (served without URL prefix); defaults to the brand with `main = true`
# main_brand = "crazyclown"

# Label of the first breadcrumb entry
# home_label = "Home"

# Memoize resolutions per (brand, path)
# cache = true

[sitemap]
# Origin prepended to every sitemap path
# base_url = "https://example.com"

# <changefreq> of every entry
# changefreq = "daily"

# <priority> of every entry
# priority = 0.8

# Extra URLs, e.g. dynamic detail pages (absolute or site-relative)
# extra_urls = ["/news/42"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
