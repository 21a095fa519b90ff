//! Navigation links of a brand

use crate::domain::entities::{NavbarLink, RouteDefinition};
use crate::domain::path::{join_paths, BrandScope};

/// Navbar links for every route flagged `ui.navbar = true`, recursively.
///
/// Siblings are ordered by `navbar_order` (missing = 999), ties keep
/// declaration order. A link is active when the current brand-relative path
/// starts with the link's path (the root link only on the root itself), so
/// `/new` is also active under `/news`.
pub fn build_navbar(
    forest: &[RouteDefinition],
    scope: &BrandScope,
    current_path: &str,
) -> Vec<NavbarLink> {
    let current = scope.relativize(current_path);
    build_level(forest, scope, None, &current)
}

/// `parent` is `(full path, brand-relative path)` of the enclosing link.
fn build_level(
    routes: &[RouteDefinition],
    scope: &BrandScope,
    parent: Option<(&str, &str)>,
    current: &str,
) -> Vec<NavbarLink> {
    let mut links: Vec<(u32, NavbarLink)> = routes
        .iter()
        .filter(|route| route.shows_in_navbar())
        .map(|route| {
            let (path, relative) = match parent {
                None => (scope.absolute(&route.path), join_paths("", &route.path)),
                Some((parent_full, parent_relative)) => (
                    join_paths(parent_full, &route.path),
                    join_paths(parent_relative, &route.path),
                ),
            };
            let is_active = if relative == "/" {
                current == "/"
            } else {
                current.starts_with(&relative)
            };
            let children = build_level(
                &route.children,
                scope,
                Some((path.as_str(), relative.as_str())),
                current,
            );
            let link = NavbarLink {
                path,
                name: route.name.clone(),
                title: route.meta.title.clone(),
                is_active,
                children,
            };
            (route.navbar_order(), link)
        })
        .collect();

    links.sort_by_key(|(order, _)| *order);
    links.into_iter().map(|(_, link)| link).collect()
}
