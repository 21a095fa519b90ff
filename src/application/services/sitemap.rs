//! Sitemap generation service
//!
//! Renders `sitemap.xml` for all brands and the listing behind an HTML
//! sitemap page.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::config::SitemapConfig;
use crate::domain::{collect_entries, SitemapEntry, SitemapKind, Site};

/// One `<url>` of the XML sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: f64,
}

pub struct SitemapService {
    config: SitemapConfig,
}

impl SitemapService {
    pub fn new(config: SitemapConfig) -> Self {
        Self { config }
    }

    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// URLs of every brand's `sitemap_xml` routes followed by the configured extra URLs.
    pub fn urls(&self, site: &Site, lastmod: DateTime<Utc>) -> Vec<SitemapUrl> {
        let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Secs, true);
        let routes = site
            .brands()
            .iter()
            .flat_map(|brand| {
                collect_entries(&brand.routes, &site.scope(brand.key()), SitemapKind::Xml)
            })
            .map(|entry| entry.path);

        let urls: Vec<SitemapUrl> = routes
            .chain(self.config.extra_urls.iter().cloned())
            .map(|path| SitemapUrl {
                loc: self.absolute_url(&path),
                lastmod: lastmod.clone(),
                changefreq: self.config.changefreq.clone(),
                priority: self.config.priority,
            })
            .collect();
        debug!(count = urls.len(), "sitemap urls collected");
        urls
    }

    /// `sitemap.xml` document.
    pub fn render_xml(&self, site: &Site, lastmod: DateTime<Utc>) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for url in self.urls(site, lastmod) {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", url.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                escape_xml(&url.changefreq)
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }

    /// Routes flagged `seo.sitemap`, per brand in lookup order.
    pub fn page_listing(&self, site: &Site) -> Vec<SitemapEntry> {
        site.brands()
            .iter()
            .flat_map(|brand| {
                collect_entries(&brand.routes, &site.scope(brand.key()), SitemapKind::Page)
            })
            .collect()
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
