//! Site loading service
//!
//! Reads one brand file per `*.toml` in the site directory and assembles
//! the immutable [`Site`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{BrandConfig, DomainError, Site};
use crate::infrastructure::traits::FileSystem;

/// Loads brand route configuration from a site directory.
pub struct SiteLoader {
    fs: Arc<dyn FileSystem>,
}

impl SiteLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Brand files of a site directory, sorted by file name.
    ///
    /// Dot-files (e.g. the local `.brandroute.toml`) and non-TOML files are skipped.
    pub fn brand_files(&self, site_dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        if !self.fs.is_dir(site_dir) {
            return Err(ApplicationError::SiteNotFound(site_dir.to_path_buf()));
        }
        let files = self
            .fs
            .list_files(site_dir)
            .with_path_context("list site directory", site_dir)?;
        Ok(files
            .into_iter()
            .filter(|path| {
                let hidden = path
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(true);
                !hidden && path.extension().is_some_and(|ext| ext == "toml")
            })
            .collect())
    }

    /// Parse one brand file.
    pub fn parse_brand(&self, path: &Path) -> ApplicationResult<BrandConfig> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read brand file", path)?;
        toml::from_str(&content).map_err(|e| {
            DomainError::InvalidSiteFile {
                path: path.to_path_buf(),
                message: format!("{}: {}", path.display(), e.message()),
            }
            .into()
        })
    }

    /// Load every brand of `site_dir`.
    ///
    /// `main_brand` overrides the `main = true` flag of the brand files.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, site_dir: &Path, main_brand: Option<&str>) -> ApplicationResult<Site> {
        let files = self.brand_files(site_dir)?;
        if files.is_empty() {
            return Err(ApplicationError::EmptySite(site_dir.to_path_buf()));
        }

        let brands = files
            .iter()
            .map(|path| {
                debug!("Loading brand file: {}", path.display());
                self.parse_brand(path)
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        let site = Site::new(brands, main_brand)?;
        debug!(
            brands = site.brands().len(),
            main = site.main_brand(),
            "site loaded"
        );
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io;
    use std::sync::Mutex;

    /// In-memory filesystem holding a single flat directory.
    #[derive(Default)]
    struct MemoryFs {
        dir: PathBuf,
        files: Mutex<BTreeMap<PathBuf, String>>,
    }

    impl MemoryFs {
        fn with_files(dir: &str, files: &[(&str, &str)]) -> Self {
            let dir = PathBuf::from(dir);
            let files = files
                .iter()
                .map(|(name, content)| (dir.join(name), content.to_string()))
                .collect();
            Self {
                dir,
                files: Mutex::new(files),
            }
        }
    }

    impl FileSystem for MemoryFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write(&self, path: &Path, content: &str) -> io::Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            path == self.dir || self.files.lock().unwrap().contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            path == self.dir
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }

        fn list_files(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
            Ok(self.files.lock().unwrap().keys().cloned().collect())
        }
    }

    const MAIN: &str = r#"
[brand]
key = "crazyclown"
main = true

[seo]
default_title = "Crazy Clown"

[[routes]]
path = "/"
name = "home"
"#;

    const OTHER: &str = r#"
[brand]
key = "chuanlife"

[[routes]]
path = "/news"
name = "news"
meta = { title = "News" }

[[routes.children]]
path = ":id"
name = "news-detail"
"#;

    fn loader(files: &[(&str, &str)]) -> SiteLoader {
        SiteLoader::new(Arc::new(MemoryFs::with_files("/site", files)))
    }

    #[test]
    fn given_brand_files_when_loading_then_builds_site() {
        let loader = loader(&[
            ("crazyclown.toml", MAIN),
            ("chuanlife.toml", OTHER),
            (".brandroute.toml", "home_label = \"x\""),
            ("README.md", "# site"),
        ]);
        let site = loader.load(Path::new("/site"), None).unwrap();

        assert_eq!(site.main_brand(), "crazyclown");
        let keys: Vec<&str> = site.brands().iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["chuanlife", "crazyclown"]);
        assert_eq!(site.routes("chuanlife")[0].children[0].name, "news-detail");
    }

    #[test]
    fn given_main_brand_override_when_loading_then_override_wins() {
        let loader = loader(&[("crazyclown.toml", MAIN), ("chuanlife.toml", OTHER)]);
        let site = loader.load(Path::new("/site"), Some("chuanlife")).unwrap();
        assert_eq!(site.main_brand(), "chuanlife");
    }

    #[test]
    fn given_two_main_brands_when_loading_then_domain_error() {
        let second = MAIN.replace("crazyclown", "other");
        let loader = loader(&[("crazyclown.toml", MAIN), ("other.toml", &second)]);
        let err = loader.load(Path::new("/site"), None).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MultipleMainBrands(_))
        ));
    }

    #[test]
    fn given_malformed_file_when_loading_then_invalid_site_file() {
        let loader = loader(&[("broken.toml", "[brand\nkey=")]);
        let err = loader.load(Path::new("/site"), None).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidSiteFile { .. })
        ));
    }

    #[test]
    fn given_missing_directory_when_loading_then_site_not_found() {
        let loader = loader(&[]);
        let err = loader.load(Path::new("/elsewhere"), None).unwrap_err();
        assert!(matches!(err, ApplicationError::SiteNotFound(_)));
    }

    #[test]
    fn given_empty_directory_when_loading_then_empty_site() {
        let loader = loader(&[("notes.txt", "")]);
        let err = loader.load(Path::new("/site"), None).unwrap_err();
        assert!(matches!(err, ApplicationError::EmptySite(_)));
    }
}
