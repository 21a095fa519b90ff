//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Brand-scoped route resolution: page metadata, breadcrumbs, navigation links and sitemaps
#[derive(Parser, Debug)]
#[command(name = "brandroute")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Site directory with one <brand>.toml per brand (default: from config)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub site_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a path: matched route, metadata, breadcrumbs and navbar
    Resolve {
        /// Concrete URL path, e.g. /chuanlife/news/42
        path: String,
        /// Active brand (default: main brand)
        #[arg(short, long)]
        brand: Option<String>,
        /// Print the resolution as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Print the document head tags for a path
    Head {
        path: String,
        /// Active brand (default: main brand)
        #[arg(short, long)]
        brand: Option<String>,
    },

    /// Print the breadcrumb trail for a path
    Breadcrumbs {
        path: String,
        /// Active brand (default: main brand)
        #[arg(short, long)]
        brand: Option<String>,
    },

    /// Print the navigation links of a brand
    Navbar {
        /// Active brand (default: main brand)
        #[arg(short, long)]
        brand: Option<String>,
        /// Current path for active markers (default: brand homepage)
        #[arg(long)]
        current: Option<String>,
    },

    /// Show route forests as trees
    Routes {
        /// Only this brand
        #[arg(short, long)]
        brand: Option<String>,
    },

    /// Generate sitemap.xml (or the sitemap page listing)
    Sitemap {
        /// List routes flagged for the sitemap page instead of XML
        #[arg(long)]
        page: bool,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Check route configuration for unreachable routes and duplicates
    Lint,

    /// List configured brands
    Brands,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config instead of <site_dir>/.brandroute.toml
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
