//! Depth-first route lookup over a brand's route forest

use crate::domain::entities::{Params, RouteDefinition};
use crate::domain::path::join_paths;
use crate::domain::pattern::capture;

/// A route found for a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch<'a> {
    pub route: &'a RouteDefinition,
    /// Effective pattern including all ancestor paths
    pub pattern: String,
    pub params: Params,
}

/// First route (declaration order, depth-first) whose effective pattern
/// matches the brand-relative `target`.
///
/// A route is tested before its children, and its children before its
/// next sibling. Earlier routes win: a later sibling that matches the same
/// paths is unreachable.
pub fn find_route<'a>(forest: &'a [RouteDefinition], target: &str) -> Option<ResolvedMatch<'a>> {
    find_in(forest, "", target)
}

fn find_in<'a>(
    routes: &'a [RouteDefinition],
    parent: &str,
    target: &str,
) -> Option<ResolvedMatch<'a>> {
    for route in routes {
        let pattern = join_paths(parent, &route.path);
        if let Some(params) = capture(&pattern, target) {
            return Some(ResolvedMatch {
                route,
                pattern,
                params,
            });
        }
        if let Some(found) = find_in(&route.children, &pattern, target) {
            return Some(found);
        }
    }
    None
}

/// A route visited by [`effective_routes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<'a> {
    pub route: &'a RouteDefinition,
    pub pattern: String,
    pub depth: usize,
}

/// All routes in lookup order (pre-order) with their effective patterns.
pub fn effective_routes(forest: &[RouteDefinition]) -> Vec<RouteEntry<'_>> {
    let mut entries = Vec::new();
    collect(forest, "", 0, &mut entries);
    entries
}

fn collect<'a>(
    routes: &'a [RouteDefinition],
    parent: &str,
    depth: usize,
    entries: &mut Vec<RouteEntry<'a>>,
) {
    for route in routes {
        let pattern = join_paths(parent, &route.path);
        entries.push(RouteEntry {
            route,
            pattern: pattern.clone(),
            depth,
        });
        collect(&route.children, &pattern, depth + 1, entries);
    }
}
