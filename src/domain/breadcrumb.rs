//! Breadcrumb trail for the current path

use crate::domain::entities::{BreadcrumbEntry, RouteDefinition};
use crate::domain::path::BrandScope;
use crate::domain::walker::find_route;

/// Home entry followed by one entry per segment of the brand-relative path.
///
/// Each cumulative prefix is resolved through the route forest; its title
/// labels the crumb, the raw segment is used when nothing matches.
pub fn build_breadcrumbs(
    forest: &[RouteDefinition],
    scope: &BrandScope,
    current_path: &str,
    home_label: &str,
) -> Vec<BreadcrumbEntry> {
    let relative = scope.relativize(current_path);
    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();

    let mut crumbs = vec![BreadcrumbEntry {
        name: home_label.to_string(),
        path: scope.homepage_url(),
        is_active: segments.is_empty(),
    }];

    let mut prefix = String::new();
    for (i, segment) in segments.iter().copied().enumerate() {
        prefix.push('/');
        prefix.push_str(segment);

        let name = find_route(forest, &prefix)
            .map(|m| m.route.meta.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(segment)
            .to_string();

        crumbs.push(BreadcrumbEntry {
            name,
            path: scope.absolute(&prefix),
            is_active: i == segments.len() - 1,
        });
    }

    crumbs
}
