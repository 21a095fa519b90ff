//! Domain entities: route definitions, brands and the derived projections

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::path::BrandScope;

/// Sort key for navbar entries without an explicit `navbar_order`.
pub const DEFAULT_NAVBAR_ORDER: u32 = 999;

/// Layout used when a route does not name one.
pub const DEFAULT_LAYOUT: &str = "default";

/// One node of a brand's route forest.
///
/// `path` is relative to the parent route; the effective pattern is the
/// concatenation of all ancestor paths (see [`crate::domain::path::join_paths`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDefinition {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDefinition>,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = title.into();
        self
    }

    pub fn with_children(mut self, children: Vec<RouteDefinition>) -> Self {
        self.children = children;
        self
    }

    /// Show in the navbar, optionally at a given position.
    pub fn in_navbar(mut self, order: Option<u32>) -> Self {
        self.meta.ui = Some(RouteUi {
            navbar: Some(true),
            navbar_order: order,
        });
        self
    }

    pub fn shows_in_navbar(&self) -> bool {
        self.meta.ui.as_ref().and_then(|ui| ui.navbar) == Some(true)
    }

    pub fn navbar_order(&self) -> u32 {
        self.meta
            .ui
            .as_ref()
            .and_then(|ui| ui.navbar_order)
            .unwrap_or(DEFAULT_NAVBAR_ORDER)
    }
}

/// Fully typed route metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteMeta {
    pub title: String,
    pub description: Option<String>,
    pub layout: Option<String>,
    pub requires_auth: Option<bool>,
    pub roles: Option<Vec<String>>,
    pub seo: Option<RouteSeo>,
    pub ui: Option<RouteUi>,
    /// Per-route overrides of the brand's head tags
    pub head: HeadTags,
}

/// Search engine flags of a single route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteSeo {
    /// Listed on the human readable sitemap page
    pub sitemap: Option<bool>,
    /// Listed in sitemap.xml
    pub sitemap_xml: Option<bool>,
    pub robots: Option<RobotsFlag>,
}

/// Robots setting of a route: a plain allow/deny flag or a literal directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RobotsFlag {
    Allow(bool),
    Directive(String),
}

impl RobotsFlag {
    pub fn directive(&self) -> String {
        match self {
            RobotsFlag::Allow(true) => "index, follow".to_string(),
            RobotsFlag::Allow(false) => "noindex, nofollow".to_string(),
            RobotsFlag::Directive(d) => d.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteUi {
    pub navbar: Option<bool>,
    pub navbar_order: Option<u32>,
}

/// Optional SEO, OpenGraph and Twitter fields.
///
/// Appears on routes (overrides) and on brands (defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeadTags {
    pub keywords: Option<Vec<String>>,
    pub canonical_url: Option<String>,
    pub alternate_locales: Option<Vec<String>>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub og_url: Option<String>,
    pub og_site_name: Option<String>,
    pub og_locale: Option<String>,
    pub og_locale_alternate: Option<Vec<String>>,
    pub og_image_width: Option<u32>,
    pub og_image_height: Option<u32>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub twitter_url: Option<String>,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub twitter_creator_id: Option<String>,
    pub google_site_verification: Option<String>,
}

/// Brand-level SEO defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrandSeo {
    pub default_title: String,
    pub default_description: String,
    pub robots: Option<String>,
    #[serde(flatten)]
    pub tags: HeadTags,
}

/// `[brand]` table of a site file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandInfo {
    pub key: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub main: bool,
}

/// One brand: identity, SEO defaults and its route forest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandConfig {
    pub brand: BrandInfo,
    #[serde(default)]
    pub seo: BrandSeo,
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

impl BrandConfig {
    pub fn new(key: impl Into<String>, routes: Vec<RouteDefinition>) -> Self {
        let key = key.into();
        Self {
            brand: BrandInfo {
                display_name: key.clone(),
                key,
                main: false,
            },
            seo: BrandSeo::default(),
            routes,
        }
    }

    pub fn key(&self) -> &str {
        &self.brand.key
    }

    pub fn with_seo(mut self, seo: BrandSeo) -> Self {
        self.seo = seo;
        self
    }

    pub fn as_main(mut self) -> Self {
        self.brand.main = true;
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        let key = self.key();
        if key.is_empty() || key.contains('/') || key.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidBrandKey {
                key: key.to_string(),
                reason: "must be a single non-empty path segment".to_string(),
            });
        }
        fn check(brand: &str, routes: &[RouteDefinition]) -> Result<(), DomainError> {
            for route in routes {
                if route.name.trim().is_empty() {
                    return Err(DomainError::EmptyRouteName {
                        brand: brand.to_string(),
                        path: route.path.clone(),
                    });
                }
                check(brand, &route.children)?;
            }
            Ok(())
        }
        check(key, &self.routes)
    }
}

/// All brands of a deployment with exactly one main brand.
///
/// Immutable once built; every lookup for an unknown brand yields an empty
/// forest and empty SEO defaults.
#[derive(Debug, Clone)]
pub struct Site {
    brands: Vec<BrandConfig>,
    main_brand: String,
    empty_seo: BrandSeo,
}

impl Site {
    /// Assemble a site.
    ///
    /// `main_brand` overrides the `main` flags of the brands when given.
    pub fn new(brands: Vec<BrandConfig>, main_brand: Option<&str>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for brand in &brands {
            brand.validate()?;
            if !seen.insert(brand.key().to_string()) {
                return Err(DomainError::DuplicateBrand(brand.key().to_string()));
            }
        }

        let main_brand = match main_brand {
            Some(key) if seen.contains(key) => key.to_string(),
            Some(key) => return Err(DomainError::UnknownMainBrand(key.to_string())),
            None => {
                let flagged: Vec<String> = brands
                    .iter()
                    .filter(|b| b.brand.main)
                    .map(|b| b.key().to_string())
                    .collect();
                match flagged.len() {
                    0 => return Err(DomainError::MissingMainBrand),
                    1 => flagged[0].clone(),
                    _ => return Err(DomainError::MultipleMainBrands(flagged)),
                }
            }
        };

        Ok(Self {
            brands,
            main_brand,
            empty_seo: BrandSeo::default(),
        })
    }

    pub fn main_brand(&self) -> &str {
        &self.main_brand
    }

    pub fn brands(&self) -> &[BrandConfig] {
        &self.brands
    }

    pub fn brand(&self, key: &str) -> Option<&BrandConfig> {
        self.brands.iter().find(|b| b.key() == key)
    }

    pub fn is_main(&self, key: &str) -> bool {
        self.main_brand == key
    }

    pub fn scope(&self, key: &str) -> BrandScope {
        BrandScope::new(key, self.is_main(key))
    }

    /// Route forest of a brand; empty for unknown brands.
    pub fn routes(&self, key: &str) -> &[RouteDefinition] {
        self.brand(key).map(|b| b.routes.as_slice()).unwrap_or(&[])
    }

    /// SEO defaults of a brand; empty for unknown brands.
    pub fn seo(&self, key: &str) -> &BrandSeo {
        self.brand(key).map(|b| &b.seo).unwrap_or(&self.empty_seo)
    }
}

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BreadcrumbEntry {
    pub name: String,
    pub path: String,
    pub is_active: bool,
}

/// One navigable link, possibly with nested links.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavbarLink {
    pub path: String,
    pub name: String,
    pub title: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavbarLink>,
}

/// `<meta>` entry; exactly one of `name`/`property` is set.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetaTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub content: String,
}

impl MetaTag {
    pub fn name(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            property: None,
            content: content.into(),
        }
    }

    pub fn property(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: None,
            property: Some(property.into()),
            content: content.into(),
        }
    }

    /// `name` or `property`, whichever is set.
    pub fn key(&self) -> &str {
        self.name
            .as_deref()
            .or(self.property.as_deref())
            .unwrap_or_default()
    }
}

/// `<link>` entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LinkTag {
    pub rel: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

/// Everything the document head needs for one page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub layout: String,
    pub meta: Vec<MetaTag>,
    pub links: Vec<LinkTag>,
}

impl PageMetadata {
    /// Content of the first meta tag with the given name or property.
    pub fn content(&self, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|m| m.key() == key)
            .map(|m| m.content.as_str())
    }
}

/// Captured dynamic segments, keyed by capture name.
pub type Params = BTreeMap<String, String>;
