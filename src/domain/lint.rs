//! Route configuration lint
//!
//! Resolution never rejects a configuration; authoring mistakes such as
//! shadowed routes or colliding navbar positions are reported here instead.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use regex::Regex;

use crate::domain::entities::{BrandConfig, RouteDefinition, Site};
use crate::domain::pattern::{covers, dynamic_segments};
use crate::domain::walker::effective_routes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintFinding {
    /// An earlier route (in lookup order) matches every path this one does.
    Unreachable {
        brand: String,
        route: String,
        pattern: String,
        shadowed_by: String,
    },
    DuplicateName {
        brand: String,
        name: String,
        count: usize,
    },
    DuplicateNavbarOrder {
        brand: String,
        order: u32,
        routes: Vec<String>,
    },
    InvalidDynamicSegment {
        brand: String,
        route: String,
        segment: String,
    },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::Unreachable {
                brand,
                route,
                pattern,
                shadowed_by,
            } => write!(
                f,
                "[{brand}] route {route} ({pattern}) is unreachable, shadowed by {shadowed_by}"
            ),
            LintFinding::DuplicateName { brand, name, count } => {
                write!(f, "[{brand}] route name {name} used {count} times")
            }
            LintFinding::DuplicateNavbarOrder {
                brand,
                order,
                routes,
            } => write!(
                f,
                "[{brand}] navbar_order {order} shared by {}",
                routes.join(", ")
            ),
            LintFinding::InvalidDynamicSegment {
                brand,
                route,
                segment,
            } => write!(f, "[{brand}] route {route} has malformed dynamic segment {segment:?}"),
        }
    }
}

/// Checks route forests for authoring mistakes.
pub struct RouteLinter {
    segment_regex: Regex,
}

impl Default for RouteLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteLinter {
    pub fn new() -> Self {
        Self {
            segment_regex: Regex::new(r"^:[A-Za-z_][A-Za-z0-9_-]*$").expect("valid segment regex"),
        }
    }

    pub fn lint_site(&self, site: &Site) -> Vec<LintFinding> {
        site.brands()
            .iter()
            .flat_map(|brand| self.lint_brand(brand))
            .collect()
    }

    pub fn lint_brand(&self, brand: &BrandConfig) -> Vec<LintFinding> {
        let key = brand.key();
        let mut findings = Vec::new();
        let entries = effective_routes(&brand.routes);

        for (i, entry) in entries.iter().enumerate() {
            for segment in dynamic_segments(&entry.pattern) {
                if !self.segment_regex.is_match(segment) {
                    findings.push(LintFinding::InvalidDynamicSegment {
                        brand: key.to_string(),
                        route: entry.route.name.clone(),
                        segment: segment.to_string(),
                    });
                }
            }
            if let Some(earlier) = entries[..i].iter().find(|e| covers(&e.pattern, &entry.pattern)) {
                findings.push(LintFinding::Unreachable {
                    brand: key.to_string(),
                    route: entry.route.name.clone(),
                    pattern: entry.pattern.clone(),
                    shadowed_by: earlier.route.name.clone(),
                });
            }
        }

        let counts = entries.iter().map(|e| e.route.name.as_str()).counts();
        for name in entries.iter().map(|e| e.route.name.as_str()).unique() {
            let count = counts[name];
            if count > 1 {
                findings.push(LintFinding::DuplicateName {
                    brand: key.to_string(),
                    name: name.to_string(),
                    count,
                });
            }
        }

        self.check_navbar_orders(key, &brand.routes, &mut findings);
        findings
    }

    fn check_navbar_orders(&self, brand: &str, siblings: &[RouteDefinition], findings: &mut Vec<LintFinding>) {
        let mut by_order: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for route in siblings.iter().filter(|r| r.shows_in_navbar()) {
            if let Some(order) = route.meta.ui.as_ref().and_then(|ui| ui.navbar_order) {
                by_order.entry(order).or_default().push(route.name.clone());
            }
        }
        for (order, routes) in by_order {
            if routes.len() > 1 {
                findings.push(LintFinding::DuplicateNavbarOrder {
                    brand: brand.to_string(),
                    order,
                    routes,
                });
            }
        }
        for route in siblings {
            self.check_navbar_orders(brand, &route.children, findings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_shadowed_sibling_when_linting_then_reports_unreachable() {
        let brand = BrandConfig::new(
            "b",
            vec![
                RouteDefinition::new("/:x", "catch"),
                RouteDefinition::new("/about", "about"),
            ],
        );
        let findings = RouteLinter::new().lint_brand(&brand);
        assert_eq!(
            findings,
            vec![LintFinding::Unreachable {
                brand: "b".into(),
                route: "about".into(),
                pattern: "/about".into(),
                shadowed_by: "catch".into(),
            }]
        );
    }

    #[test]
    fn given_static_before_dynamic_when_linting_then_no_findings() {
        let brand = BrandConfig::new(
            "b",
            vec![
                RouteDefinition::new("/news", "news").with_children(vec![RouteDefinition::new(":id", "detail")]),
                RouteDefinition::new("/:x", "catch"),
            ],
        );
        assert!(RouteLinter::new().lint_brand(&brand).is_empty());
    }

    #[test]
    fn given_colliding_navbar_orders_when_linting_then_reports_group() {
        let brand = BrandConfig::new(
            "b",
            vec![
                RouteDefinition::new("/a", "a").in_navbar(Some(1)),
                RouteDefinition::new("/b", "b").in_navbar(Some(1)),
                RouteDefinition::new("/c", "c").in_navbar(None),
                RouteDefinition::new("/d", "d").in_navbar(None),
            ],
        );
        let findings = RouteLinter::new().lint_brand(&brand);
        assert_eq!(
            findings,
            vec![LintFinding::DuplicateNavbarOrder {
                brand: "b".into(),
                order: 1,
                routes: vec!["a".into(), "b".into()],
            }]
        );
    }

    #[test]
    fn given_duplicate_names_and_bad_segment_when_linting_then_reports_both() {
        let brand = BrandConfig::new(
            "b",
            vec![
                RouteDefinition::new("/a", "same"),
                RouteDefinition::new("/b/:", "same"),
            ],
        );
        let findings = RouteLinter::new().lint_brand(&brand);
        assert!(findings.contains(&LintFinding::DuplicateName {
            brand: "b".into(),
            name: "same".into(),
            count: 2,
        }));
        assert!(findings
            .iter()
            .any(|f| matches!(f, LintFinding::InvalidDynamicSegment { segment, .. } if segment == ":")));
    }

    #[test]
    fn given_finding_when_displaying_then_names_brand_and_route() {
        let finding = LintFinding::DuplicateName {
            brand: "b".into(),
            name: "x".into(),
            count: 3,
        };
        assert_eq!(finding.to_string(), "[b] route name x used 3 times");
    }
}
