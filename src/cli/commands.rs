//! Command dispatch and execution

use std::io;
use std::path::Path;

use chrono::Utc;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{NavigationState, Resolution};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::tree::{navbar_tree, route_tree};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{BrandScope, PageMetadata, RouteContext, RouteLinter, Site};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::InfraError;

/// Run the parsed command line.
pub fn execute(cli: Cli) -> CliResult<()> {
    let Some(command) = cli.command else {
        return Err(CliError::Usage(
            "no command given, see `brandroute --help`".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        print_completions(shell);
        return Ok(());
    }

    let settings = Settings::load(cli.site_dir.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Resolve { path, brand, toml } => cmd_resolve(&container, &path, brand, toml),
        Commands::Head { path, brand } => cmd_head(&container, &path, brand),
        Commands::Breadcrumbs { path, brand } => cmd_breadcrumbs(&container, &path, brand),
        Commands::Navbar { brand, current } => cmd_navbar(&container, brand, current),
        Commands::Routes { brand } => cmd_routes(&container, brand.as_deref()),
        Commands::Sitemap { page, output } => cmd_sitemap(&container, page, output.as_deref()),
        Commands::Lint => cmd_lint(&container),
        Commands::Brands => cmd_brands(&container),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn navigation(path: &str, brand: Option<String>) -> NavigationState {
    let state = NavigationState::new(path);
    match brand {
        Some(brand) => state.with_brand(brand),
        None => state,
    }
}

fn warn_unknown_brand(site: &Site, brand: Option<&str>) {
    if let Some(brand) = brand {
        if site.brand(brand).is_none() {
            output::warning(&format!(
                "unknown brand {brand}: resolving against an empty route forest"
            ));
        }
    }
}

fn resolve(container: &ServiceContainer, path: &str, brand: Option<String>) -> CliResult<Resolution> {
    let resolver = container.resolver()?;
    warn_unknown_brand(&resolver.site(), brand.as_deref());
    let resolution = resolver.resolve(&navigation(path, brand));
    Ok(resolution.as_ref().clone())
}

#[instrument(skip(container))]
fn cmd_resolve(
    container: &ServiceContainer,
    path: &str,
    brand: Option<String>,
    as_toml: bool,
) -> CliResult<()> {
    let res = resolve(container, path, brand)?;

    if as_toml {
        let text = toml::to_string_pretty(&res).map_err(|e| {
            CliError::from(crate::application::ApplicationError::OperationFailed {
                context: "serialize resolution".into(),
                source: Box::new(e),
            })
        })?;
        output::info(&text);
        return Ok(());
    }

    let brand_label = if res.is_main_brand {
        format!("{} (main)", res.brand)
    } else {
        res.brand.clone()
    };
    output::header(&format!("{} {}", brand_label, res.path));
    output::field("relative", &res.relative_path);
    let context = RouteContext::new(BrandScope::new(res.brand.as_str(), res.is_main_brand), &res.path);
    output::field("depth", &context.depth());
    if !context.is_home() {
        output::field("parent", &context.parent_path());
    }
    match &res.matched {
        Some(m) => {
            output::field("route", &format!("{} ({})", m.name, m.pattern));
            for (name, value) in &m.params {
                output::field(&format!(":{name}"), value);
            }
        }
        None => output::field("route", &"<no match>"),
    }
    output::field("title", &res.metadata.title);
    output::field("description", &res.metadata.description);
    output::field("layout", &res.metadata.layout);
    output::field("meta tags", &res.metadata.meta.len());

    let trail: Vec<String> = res
        .breadcrumbs
        .iter()
        .map(|c| output::marked(c.is_active, &c.name))
        .collect();
    output::field("breadcrumbs", &trail.join(" > "));

    if !res.navbar.is_empty() {
        output::info(&navbar_tree("navbar".into(), &res.navbar));
    }
    Ok(())
}

/// `<title>`, `<meta>` and `<link>` lines of the document head.
pub fn head_markup(meta: &PageMetadata) -> Vec<String> {
    let mut lines = vec![format!("<title>{}</title>", output::escape_html(&meta.title))];
    for tag in &meta.meta {
        let (attr, key) = match (&tag.name, &tag.property) {
            (Some(name), _) => ("name", name),
            (None, Some(property)) => ("property", property),
            (None, None) => continue,
        };
        lines.push(format!(
            "<meta {attr}=\"{}\" content=\"{}\">",
            output::escape_html(key),
            output::escape_html(&tag.content)
        ));
    }
    for link in &meta.links {
        let hreflang = link
            .hreflang
            .as_ref()
            .map(|l| format!(" hreflang=\"{}\"", output::escape_html(l)))
            .unwrap_or_default();
        lines.push(format!(
            "<link rel=\"{}\"{} href=\"{}\">",
            output::escape_html(&link.rel),
            hreflang,
            output::escape_html(&link.href)
        ));
    }
    lines
}

#[instrument(skip(container))]
fn cmd_head(container: &ServiceContainer, path: &str, brand: Option<String>) -> CliResult<()> {
    let res = resolve(container, path, brand)?;
    for line in head_markup(&res.metadata) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_breadcrumbs(container: &ServiceContainer, path: &str, brand: Option<String>) -> CliResult<()> {
    let res = resolve(container, path, brand)?;
    for crumb in &res.breadcrumbs {
        output::info(&format!(
            "{}  {}",
            output::marked(crumb.is_active, &crumb.name),
            crumb.path
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_navbar(container: &ServiceContainer, brand: Option<String>, current: Option<String>) -> CliResult<()> {
    let resolver = container.resolver()?;
    let site = resolver.site();
    warn_unknown_brand(&site, brand.as_deref());
    let key = brand.unwrap_or_else(|| site.main_brand().to_string());
    let scope = site.scope(&key);
    let current = current.unwrap_or_else(|| scope.homepage_url());
    debug!(brand = %key, current = %current, "building navbar");

    let links = crate::domain::build_navbar(site.routes(&key), &scope, &current);
    if links.is_empty() {
        output::warning(&format!("brand {key} has no navbar routes"));
        return Ok(());
    }
    output::info(&navbar_tree(key, &links));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_routes(container: &ServiceContainer, brand: Option<&str>) -> CliResult<()> {
    let resolver = container.resolver()?;
    let site = resolver.site();
    let brands: Vec<_> = site
        .brands()
        .iter()
        .filter(|b| brand.map_or(true, |key| b.key() == key))
        .collect();
    if brands.is_empty() {
        return Err(CliError::InvalidArgs(format!(
            "unknown brand: {}",
            brand.unwrap_or_default()
        )));
    }
    for b in brands {
        output::info(&route_tree(b, site.is_main(b.key())));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_sitemap(container: &ServiceContainer, page: bool, out: Option<&Path>) -> CliResult<()> {
    let resolver = container.resolver()?;
    let site = resolver.site();
    let service = container.sitemap();

    let text = if page {
        service
            .page_listing(&site)
            .iter()
            .map(|e| format!("{}{}  {}", "  ".repeat(e.depth), e.title, e.path))
            .collect::<Vec<_>>()
            .join("\n")
            + "\n"
    } else {
        service.render_xml(&site, Utc::now())
    };

    match out {
        Some(path) => {
            write_file(container.fs.as_ref(), path, &text)?;
            output::action("Written", &path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_lint(container: &ServiceContainer) -> CliResult<()> {
    let resolver = container.resolver()?;
    let findings = RouteLinter::new().lint_site(&resolver.site());
    if findings.is_empty() {
        output::success("no problems found");
        return Ok(());
    }
    for finding in &findings {
        output::failure(finding);
    }
    Err(CliError::LintFailed(findings.len()))
}

#[instrument(skip(container))]
fn cmd_brands(container: &ServiceContainer) -> CliResult<()> {
    let resolver = container.resolver()?;
    let site = resolver.site();
    for brand in site.brands() {
        let scope = site.scope(brand.key());
        let marker = if scope.is_main() { " (main)" } else { "" };
        output::header(&format!("{}{}", brand.key(), marker));
        output::field("name", &brand.brand.display_name);
        output::field("homepage", &scope.homepage_url());
        output::field("routes", &crate::domain::effective_routes(&brand.routes).len());
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: ConfigCommands) -> CliResult<()> {
    let settings = &container.settings;
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::field("global", &exists_marker(container, &path)),
                None => output::field("global", &"<no config directory>"),
            }
            output::field("local", &exists_marker(container, &local_config_path(&settings.site_dir)));
        }
        ConfigCommands::Init { global } => {
            let path = if global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine global config directory".into()))?
            } else {
                local_config_path(&settings.site_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            write_file(container.fs.as_ref(), &path, &Settings::template())?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

/// Write `content` to `path`, creating missing parent directories.
fn write_file(fs: &dyn FileSystem, path: &Path, content: &str) -> CliResult<()> {
    fs.ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create directory for {}", path.display()), e))?;
    fs.write(path, content)
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}

fn exists_marker(container: &ServiceContainer, path: &Path) -> String {
    if container.fs.exists(path) {
        path.display().to_string()
    } else {
        format!("{} (missing)", path.display())
    }
}
