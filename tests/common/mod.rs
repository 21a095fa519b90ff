//! Shared fixtures: a three-brand site on disk

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

pub const CRAZYCLOWN: &str = r#"
[brand]
key = "crazyclown"
display_name = "Crazy Clown"
main = true

[seo]
default_title = "Crazy Clown"
default_description = "Fallback"
robots = "index, follow"
og_site_name = "Crazy Clown"
canonical_url = "https://crazyclown.example"

[[routes]]
path = "/"
name = "home"
meta = { title = "Home", seo = { sitemap = true, sitemap_xml = true }, ui = { navbar = true, navbar_order = 1 } }

[[routes]]
path = "/about"
name = "about"
meta = { title = "About", description = "Who we are", seo = { sitemap = true, sitemap_xml = true, robots = false }, ui = { navbar = true, navbar_order = 2 } }

[[routes]]
path = "/news"
name = "news"
meta = { seo = { sitemap_xml = true }, ui = { navbar = true } }

[[routes.children]]
path = ":id"
name = "news-detail"
meta = { title = "Detail", layout = "article" }
"#;

pub const CHUANLIFE: &str = r#"
[brand]
key = "chuanlife"
display_name = "Chuan Life"

[seo]
default_title = "Chuan Life"
default_description = "Sichuan living"
keywords = ["sichuan", "life"]

[[routes]]
path = "/"
name = "chuanlife-home"
meta = { title = "Chuan Life Home", ui = { navbar = true, navbar_order = 1 } }

[[routes]]
path = "/news"
name = "chuanlife-news"
meta = { title = "News", ui = { navbar = true, navbar_order = 2 } }

[[routes.children]]
path = ":id"
name = "chuanlife-news-detail"

[routes.children.meta]
title = "Article"

[routes.children.meta.head]
og_type = "article"
alternate_locales = ["en", "zh"]
canonical_url = "https://chuanlife.example/news"
"#;

pub const YUANPINXIANG: &str = r#"
[brand]
key = "yuanpinxiang"

[[routes]]
path = "/product"
name = "product"
meta = { title = "Products", ui = { navbar = true, navbar_order = 1 } }

[[routes.children]]
path = "list"
name = "product-list"
meta = { title = "All products", ui = { navbar = true, navbar_order = 2 } }

[[routes.children]]
path = "certification"
name = "product-certification"
meta = { title = "Certification", ui = { navbar = true, navbar_order = 1 } }
"#;

/// Site directory with the three brands above.
pub fn site_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "crazyclown.toml", CRAZYCLOWN);
    write(tmp.path(), "chuanlife.toml", CHUANLIFE);
    write(tmp.path(), "yuanpinxiang.toml", YUANPINXIANG);
    tmp
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}
