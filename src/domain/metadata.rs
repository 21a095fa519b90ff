//! Projection of a matched route onto document head metadata
//!
//! Precedence per field: route value, then brand default. Title and
//! description fall back to the brand's default title/description; the
//! OpenGraph/Twitter title, description and url tags finally fall back to
//! the resolved title, description and canonical URL. Empty values are
//! never emitted.

use crate::domain::entities::{
    BrandSeo, LinkTag, MetaTag, PageMetadata, RouteDefinition, DEFAULT_LAYOUT,
};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn pick<'a>(route: Option<&'a String>, brand: Option<&'a String>) -> Option<&'a str> {
    route.or(brand).map(String::as_str)
}

fn pick_list<'a>(route: Option<&'a Vec<String>>, brand: Option<&'a Vec<String>>) -> &'a [String] {
    route.or(brand).map(Vec::as_slice).unwrap_or(&[])
}

/// Project `matched` (or its absence) onto page metadata.
pub fn project(matched: Option<&RouteDefinition>, defaults: &BrandSeo) -> PageMetadata {
    let meta = matched.map(|r| &r.meta);
    let route_tags = meta.map(|m| &m.head);
    let brand_tags = &defaults.tags;

    let title = non_empty(meta.map(|m| m.title.as_str()))
        .or(non_empty(Some(defaults.default_title.as_str())))
        .unwrap_or_default()
        .to_string();
    let description = non_empty(meta.and_then(|m| m.description.as_deref()))
        .or(non_empty(Some(defaults.default_description.as_str())))
        .unwrap_or_default()
        .to_string();
    let layout = non_empty(meta.and_then(|m| m.layout.as_deref()))
        .unwrap_or(DEFAULT_LAYOUT)
        .to_string();

    let robots = match meta.and_then(|m| m.seo.as_ref()).and_then(|s| s.robots.as_ref()) {
        Some(flag) => flag.directive(),
        None => defaults.robots.clone().unwrap_or_default(),
    };

    macro_rules! field {
        ($name:ident) => {
            pick(route_tags.and_then(|t| t.$name.as_ref()), brand_tags.$name.as_ref())
        };
    }
    macro_rules! list {
        ($name:ident) => {
            pick_list(route_tags.and_then(|t| t.$name.as_ref()), brand_tags.$name.as_ref())
        };
    }
    macro_rules! number {
        ($name:ident) => {
            route_tags
                .and_then(|t| t.$name)
                .or(brand_tags.$name)
                .map(|n| n.to_string())
                .unwrap_or_default()
        };
    }

    let canonical = field!(canonical_url).unwrap_or_default();
    let og_title = non_empty(field!(og_title)).unwrap_or(title.as_str());
    let og_description = non_empty(field!(og_description)).unwrap_or(description.as_str());
    let og_url = non_empty(field!(og_url)).unwrap_or(canonical);
    let twitter_title = non_empty(field!(twitter_title)).unwrap_or(title.as_str());
    let twitter_description = non_empty(field!(twitter_description)).unwrap_or(description.as_str());
    let twitter_url = non_empty(field!(twitter_url)).unwrap_or(canonical);

    let mut tags = vec![
        MetaTag::name("description", description.as_str()),
        MetaTag::name("keywords", list!(keywords).join(",")),
        MetaTag::name("robots", robots),
        MetaTag::property("og:title", og_title),
        MetaTag::property("og:description", og_description),
        MetaTag::property("og:image", field!(og_image).unwrap_or_default()),
        MetaTag::property("og:type", field!(og_type).unwrap_or_default()),
        MetaTag::property("og:url", og_url),
        MetaTag::property("og:site_name", field!(og_site_name).unwrap_or_default()),
        MetaTag::property("og:locale", field!(og_locale).unwrap_or_default()),
    ];
    tags.extend(
        list!(og_locale_alternate)
            .iter()
            .map(|locale| MetaTag::property("og:locale:alternate", locale.as_str())),
    );
    tags.extend([
        MetaTag::property("og:image:width", number!(og_image_width)),
        MetaTag::property("og:image:height", number!(og_image_height)),
        MetaTag::name("twitter:card", field!(twitter_card).unwrap_or_default()),
        MetaTag::name("twitter:title", twitter_title),
        MetaTag::name("twitter:description", twitter_description),
        MetaTag::name("twitter:image", field!(twitter_image).unwrap_or_default()),
        MetaTag::name("twitter:url", twitter_url),
        MetaTag::name("twitter:site", field!(twitter_site).unwrap_or_default()),
        MetaTag::name("twitter:creator", field!(twitter_creator).unwrap_or_default()),
        MetaTag::name("twitter:creator:id", field!(twitter_creator_id).unwrap_or_default()),
        MetaTag::name(
            "google-site-verification",
            field!(google_site_verification).unwrap_or_default(),
        ),
    ]);
    tags.retain(|tag| !tag.content.is_empty());

    let mut links = Vec::new();
    if !canonical.is_empty() {
        links.push(LinkTag {
            rel: "canonical".to_string(),
            href: canonical.to_string(),
            hreflang: None,
        });
        links.extend(list!(alternate_locales).iter().map(|locale| LinkTag {
            rel: "alternate".to_string(),
            href: canonical.to_string(),
            hreflang: Some(locale.clone()),
        }));
    }

    PageMetadata {
        title,
        description,
        layout,
        meta: tags,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{HeadTags, RobotsFlag, RouteSeo};

    fn brand_seo() -> BrandSeo {
        BrandSeo {
            default_title: "Crazy Clown".into(),
            default_description: "Fallback".into(),
            robots: Some("index, follow".into()),
            tags: HeadTags {
                keywords: Some(vec!["PUBG".into(), "CRCL".into()]),
                canonical_url: Some("https://crazyclown.online".into()),
                alternate_locales: Some(vec!["zh-TW".into(), "en-US".into()]),
                og_image: Some("https://crazyclown.online/og.png".into()),
                og_image_width: Some(600),
                twitter_card: Some("summary_large_image".into()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn given_route_without_description_when_projecting_then_uses_brand_default() {
        let route = RouteDefinition::new("/about", "about").with_title("About");
        let page = project(Some(&route), &brand_seo());
        assert_eq!(page.title, "About");
        assert_eq!(page.description, "Fallback");
        assert_eq!(page.layout, "default");
        assert_eq!(page.content("description"), Some("Fallback"));
    }

    #[test]
    fn given_no_match_when_projecting_then_brand_defaults_apply() {
        let page = project(None, &brand_seo());
        assert_eq!(page.title, "Crazy Clown");
        assert_eq!(page.content("og:title"), Some("Crazy Clown"));
        assert_eq!(page.content("twitter:description"), Some("Fallback"));
        assert_eq!(page.content("og:url"), Some("https://crazyclown.online"));
        assert_eq!(page.content("keywords"), Some("PUBG,CRCL"));
        assert_eq!(page.content("og:image:width"), Some("600"));
    }

    #[test]
    fn given_empty_defaults_when_projecting_then_emits_no_empty_tags() {
        let page = project(None, &BrandSeo::default());
        assert_eq!(page.title, "");
        assert!(page.meta.is_empty(), "unexpected tags: {:?}", page.meta);
        assert!(page.links.is_empty());
    }

    #[test]
    fn given_explicit_false_robots_when_projecting_then_route_wins() {
        let mut route = RouteDefinition::new("/secret", "secret").with_title("Secret");
        route.meta.seo = Some(RouteSeo {
            robots: Some(RobotsFlag::Allow(false)),
            ..Default::default()
        });
        let page = project(Some(&route), &brand_seo());
        assert_eq!(page.content("robots"), Some("noindex, nofollow"));
    }

    #[test]
    fn given_explicit_empty_robots_when_projecting_then_tag_is_omitted() {
        let mut route = RouteDefinition::new("/x", "x");
        route.meta.seo = Some(RouteSeo {
            robots: Some(RobotsFlag::Directive(String::new())),
            ..Default::default()
        });
        let page = project(Some(&route), &brand_seo());
        assert_eq!(page.content("robots"), None);
    }

    #[test]
    fn given_route_head_override_when_projecting_then_route_value_wins() {
        let mut route = RouteDefinition::new("/news", "news").with_title("News");
        route.meta.head.og_image = Some("https://crazyclown.online/news.png".into());
        route.meta.head.og_title = Some("Latest".into());
        let page = project(Some(&route), &brand_seo());
        assert_eq!(page.content("og:image"), Some("https://crazyclown.online/news.png"));
        assert_eq!(page.content("og:title"), Some("Latest"));
        assert_eq!(page.content("twitter:title"), Some("News"));
    }

    #[test]
    fn given_canonical_and_locales_when_projecting_then_emits_links_in_order() {
        let page = project(None, &brand_seo());
        let rels: Vec<(&str, Option<&str>)> = page
            .links
            .iter()
            .map(|l| (l.rel.as_str(), l.hreflang.as_deref()))
            .collect();
        assert_eq!(
            rels,
            vec![("canonical", None), ("alternate", Some("zh-TW")), ("alternate", Some("en-US"))]
        );
    }

    #[test]
    fn given_og_tags_when_projecting_then_uses_property_attribute() {
        let page = project(None, &brand_seo());
        let og = page.meta.iter().find(|m| m.key() == "og:title").unwrap();
        assert!(og.property.is_some() && og.name.is_none());
        let tw = page.meta.iter().find(|m| m.key() == "twitter:card").unwrap();
        assert!(tw.name.is_some() && tw.property.is_none());
    }
}
