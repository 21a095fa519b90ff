//! Path normalization and brand scoping
//!
//! Every other component works on brand-relative paths produced here.

use serde::Serialize;

/// Collapse every run of `/` into a single `/`.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

/// Drop a single trailing `/`, keeping the root path intact.
pub fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Effective path of a child route: parent + child, absolute, slashes collapsed.
///
/// ```
/// use brandroute::domain::path::join_paths;
///
/// assert_eq!(join_paths("/news", ":id"), "/news/:id");
/// assert_eq!(join_paths("", "/"), "/");
/// assert_eq!(join_paths("/a/", "/b"), "/a/b");
/// ```
pub fn join_paths(parent: &str, child: &str) -> String {
    let mut full = parent.replace('\\', "/");
    if !full.ends_with('/') {
        full.push('/');
    }
    full.push_str(child.strip_prefix('/').unwrap_or(child));
    if !full.starts_with('/') {
        full.insert(0, '/');
    }
    collapse_slashes(&full)
}

/// Strip `/{brand_key}` from `path` when it is followed by `/` or the end.
fn strip_brand_prefix<'a>(path: &'a str, brand_key: &str) -> Option<&'a str> {
    let rest = path.strip_prefix('/')?.strip_prefix(brand_key)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

/// Brand-relative form of an absolute path.
///
/// Paths of another brand context come back unchanged (collapsed).
pub fn normalize(path: &str, brand_key: &str, is_main_brand: bool) -> String {
    let collapsed = collapse_slashes(path);
    if is_main_brand {
        return collapsed;
    }
    match strip_brand_prefix(&collapsed, brand_key) {
        Some("") => "/".to_string(),
        Some(rest) => rest.to_string(),
        None => collapsed,
    }
}

/// Identity of the active brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandScope {
    key: String,
    is_main: bool,
}

impl BrandScope {
    pub fn new(key: impl Into<String>, is_main: bool) -> Self {
        Self {
            key: key.into(),
            is_main,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    /// `/` for the main brand, `/{key}` otherwise.
    pub fn homepage_url(&self) -> String {
        if self.is_main {
            "/".to_string()
        } else {
            format!("/{}", self.key)
        }
    }

    /// `""` for the main brand, `/{key}` otherwise.
    pub fn prefix(&self) -> String {
        if self.is_main {
            String::new()
        } else {
            format!("/{}", self.key)
        }
    }

    pub fn relativize(&self, path: &str) -> String {
        normalize(path, &self.key, self.is_main)
    }

    /// Absolute URL path of a brand-relative path, without trailing slash.
    pub fn absolute(&self, relative: &str) -> String {
        trim_trailing_slash(&join_paths(&self.prefix(), relative)).to_string()
    }
}

/// Derived facts about the current location within a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteContext {
    pub scope: BrandScope,
    pub path: String,
    pub relative_path: String,
    pub segments: Vec<String>,
}

impl RouteContext {
    pub fn new(scope: BrandScope, path: &str) -> Self {
        let relative_path = scope.relativize(path);
        let segments = relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            path: collapse_slashes(path),
            relative_path,
            segments,
            scope,
        }
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_home(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_brand_home(&self) -> bool {
        self.path == self.scope.homepage_url()
    }

    pub fn is_nested(&self) -> bool {
        self.depth() > 1
    }

    /// Absolute path one level up; the brand homepage at depth 0 and 1.
    pub fn parent_path(&self) -> String {
        if self.depth() <= 1 {
            return self.scope.homepage_url();
        }
        let parent = self.segments[..self.depth() - 1].join("/");
        self.scope.absolute(&parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/chuanlife/news", "chuanlife", false, "/news")]
    #[case("/chuanlife", "chuanlife", false, "/")]
    #[case("/chuanlife/", "chuanlife", false, "/")]
    #[case("/news", "crazyclown", true, "/news")]
    #[case("//news//42", "crazyclown", true, "/news/42")]
    #[case("/other/news", "chuanlife", false, "/other/news")]
    #[case("/chuanlifex/news", "chuanlife", false, "/chuanlifex/news")]
    #[case("//chuanlife//news", "chuanlife", false, "/news")]
    fn test_normalize(
        #[case] path: &str,
        #[case] brand: &str,
        #[case] is_main: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(normalize(path, brand, is_main), expected);
    }

    #[rstest]
    #[case("/news", ":id", "/news/:id")]
    #[case("/news/", "/:id", "/news/:id")]
    #[case("", "about", "/about")]
    #[case("/", "/", "/")]
    #[case("/a", "b//c", "/a/b/c")]
    fn test_join_paths(#[case] parent: &str, #[case] child: &str, #[case] expected: &str) {
        assert_eq!(join_paths(parent, child), expected);
    }

    #[test]
    fn given_non_main_brand_when_building_urls_then_prefixes_key() {
        let scope = BrandScope::new("chuanlife", false);
        assert_eq!(scope.homepage_url(), "/chuanlife");
        assert_eq!(scope.prefix(), "/chuanlife");
        assert_eq!(scope.absolute("/"), "/chuanlife");
        assert_eq!(scope.absolute("/news/42"), "/chuanlife/news/42");
    }

    #[test]
    fn given_main_brand_when_building_urls_then_no_prefix() {
        let scope = BrandScope::new("crazyclown", true);
        assert_eq!(scope.homepage_url(), "/");
        assert_eq!(scope.prefix(), "");
        assert_eq!(scope.absolute("/"), "/");
        assert_eq!(scope.absolute("/about/"), "/about");
    }

    #[test]
    fn given_nested_path_when_building_context_then_derives_parent_and_depth() {
        let ctx = RouteContext::new(BrandScope::new("chuanlife", false), "/chuanlife/news/42");
        assert_eq!(ctx.relative_path, "/news/42");
        assert_eq!(ctx.segments, vec!["news", "42"]);
        assert!(ctx.is_nested());
        assert!(!ctx.is_home());
        assert_eq!(ctx.parent_path(), "/chuanlife/news");
    }

    #[test]
    fn given_brand_root_when_building_context_then_is_home() {
        let ctx = RouteContext::new(BrandScope::new("chuanlife", false), "/chuanlife");
        assert!(ctx.is_home());
        assert!(ctx.is_brand_home());
        assert_eq!(ctx.parent_path(), "/chuanlife");
    }
}
