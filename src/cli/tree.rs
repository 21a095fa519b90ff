//! termtree views of route forests and navbars

use termtree::Tree;

use crate::cli::output::marked;
use crate::domain::path::join_paths;
use crate::domain::{BrandConfig, NavbarLink, RouteDefinition};

/// Brand root with one node per route, labelled `pattern name "title"`.
pub fn route_tree(brand: &BrandConfig, is_main: bool) -> Tree<String> {
    let root = if is_main {
        format!("{} (main)", brand.key())
    } else {
        brand.key().to_string()
    };
    Tree::new(root).with_leaves(route_leaves(&brand.routes, ""))
}

fn route_leaves(routes: &[RouteDefinition], parent: &str) -> Vec<Tree<String>> {
    routes
        .iter()
        .map(|route| {
            let pattern = join_paths(parent, &route.path);
            let mut label = format!("{pattern}  {}", route.name);
            if !route.meta.title.is_empty() {
                label.push_str(&format!("  \"{}\"", route.meta.title));
            }
            if route.shows_in_navbar() {
                label.push_str(&format!("  [navbar {}]", route.navbar_order()));
            }
            Tree::new(label).with_leaves(route_leaves(&route.children, &pattern))
        })
        .collect()
}

/// Navbar links under a brand root; active links highlighted.
pub fn navbar_tree(root: String, links: &[NavbarLink]) -> Tree<String> {
    Tree::new(root).with_leaves(navbar_leaves(links))
}

fn navbar_leaves(links: &[NavbarLink]) -> Vec<Tree<String>> {
    links
        .iter()
        .map(|link| {
            let label = marked(link.is_active, &format!("{}  {}", link.title, link.path));
            Tree::new(label).with_leaves(navbar_leaves(&link.children))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_routes_when_rendering_tree_then_shows_effective_patterns() {
        let brand = BrandConfig::new(
            "chuanlife",
            vec![RouteDefinition::new("/news", "news")
                .with_title("News")
                .with_children(vec![RouteDefinition::new(":id", "news-detail")])],
        );
        let rendered = route_tree(&brand, false).to_string();
        assert!(rendered.starts_with("chuanlife\n"));
        assert!(rendered.contains("/news  news  \"News\""));
        assert!(rendered.contains("/news/:id  news-detail"));
    }
}
