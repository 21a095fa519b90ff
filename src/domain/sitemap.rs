//! Sitemap entries derived from route flags

use serde::Serialize;

use crate::domain::entities::RouteDefinition;
use crate::domain::path::BrandScope;
use crate::domain::pattern::is_dynamic;
use crate::domain::walker::effective_routes;

/// Which sitemap a route opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `seo.sitemap_xml`: machine readable sitemap.xml
    Xml,
    /// `seo.sitemap`: human readable sitemap page
    Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub brand: String,
    pub path: String,
    pub title: String,
    pub depth: usize,
}

fn opted_in(route: &RouteDefinition, kind: SitemapKind) -> bool {
    let Some(seo) = route.meta.seo.as_ref() else {
        return false;
    };
    let flag = match kind {
        SitemapKind::Xml => seo.sitemap_xml,
        SitemapKind::Page => seo.sitemap,
    };
    flag == Some(true)
}

/// Opted-in routes of one brand in lookup order.
///
/// Routes with dynamic segments have no single URL and are skipped.
pub fn collect_entries(
    forest: &[RouteDefinition],
    scope: &BrandScope,
    kind: SitemapKind,
) -> Vec<SitemapEntry> {
    effective_routes(forest)
        .into_iter()
        .filter(|entry| opted_in(entry.route, kind) && !is_dynamic(&entry.pattern))
        .map(|entry| SitemapEntry {
            brand: scope.key().to_string(),
            path: scope.absolute(&entry.pattern),
            title: entry.route.meta.title.clone(),
            depth: entry.depth,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RouteSeo;

    fn listed(path: &str, name: &str, xml: bool, page: bool) -> RouteDefinition {
        let mut route = RouteDefinition::new(path, name).with_title(name);
        route.meta.seo = Some(RouteSeo {
            sitemap: Some(page),
            sitemap_xml: Some(xml),
            robots: None,
        });
        route
    }

    fn forest() -> Vec<RouteDefinition> {
        vec![
            listed("/", "home", true, true),
            listed("/news", "news", true, true).with_children(vec![listed(":id", "detail", true, true)]),
            listed("/join", "join", false, true),
            RouteDefinition::new("/store", "store"),
        ]
    }

    #[test]
    fn given_flags_when_collecting_xml_then_skips_dynamic_and_opted_out() {
        let entries = collect_entries(&forest(), &BrandScope::new("crazyclown", true), SitemapKind::Xml);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/news"]);
    }

    #[test]
    fn given_flags_when_collecting_page_then_uses_page_flag() {
        let entries = collect_entries(&forest(), &BrandScope::new("crazyclown", true), SitemapKind::Page);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/news", "/join"]);
    }

    #[test]
    fn given_non_main_brand_when_collecting_then_paths_are_prefixed() {
        let entries = collect_entries(&forest(), &BrandScope::new("chuanlife", false), SitemapKind::Xml);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/chuanlife", "/chuanlife/news"]);
        assert!(entries.iter().all(|e| e.brand == "chuanlife"));
    }
}
