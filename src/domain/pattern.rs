//! Segment-wise matching of route patterns against concrete paths
//!
//! Strict arity: a pattern only matches paths with the same number of
//! `/`-separated segments. `:name` segments match any non-empty segment.

use crate::domain::entities::Params;

fn segment_matches(pattern: &str, concrete: &str) -> bool {
    if pattern.starts_with(':') {
        !concrete.is_empty()
    } else {
        pattern == concrete
    }
}

/// Does `pattern` match `concrete`?
pub fn matches(pattern: &str, concrete: &str) -> bool {
    let pattern_parts = pattern.split('/');
    let concrete_parts = concrete.split('/');
    if pattern_parts.clone().count() != concrete_parts.clone().count() {
        return false;
    }
    pattern_parts
        .zip(concrete_parts)
        .all(|(p, c)| segment_matches(p, c))
}

/// Like [`matches`], returning the values bound to the dynamic segments.
pub fn capture(pattern: &str, concrete: &str) -> Option<Params> {
    if !matches(pattern, concrete) {
        return None;
    }
    let params = pattern
        .split('/')
        .zip(concrete.split('/'))
        .filter_map(|(p, c)| p.strip_prefix(':').map(|name| (name.to_string(), c.to_string())))
        .collect();
    Some(params)
}

pub fn is_dynamic(pattern: &str) -> bool {
    pattern.split('/').any(|s| s.starts_with(':'))
}

/// Dynamic segments of a pattern, including the leading `:`.
pub fn dynamic_segments(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split('/').filter(|s| s.starts_with(':'))
}

/// True when every concrete path matched by `later` is also matched by `earlier`.
pub fn covers(earlier: &str, later: &str) -> bool {
    let earlier_parts: Vec<&str> = earlier.split('/').collect();
    let later_parts: Vec<&str> = later.split('/').collect();
    if earlier_parts.len() != later_parts.len() {
        return false;
    }
    earlier_parts.iter().zip(&later_parts).all(|(e, l)| {
        if e.starts_with(':') {
            !l.is_empty()
        } else {
            !l.starts_with(':') && e == l
        }
    })
}
