//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent site configuration violations.
///
/// Resolution itself never fails; these only surface while a site is assembled.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("duplicate brand: {0}")]
    DuplicateBrand(String),

    #[error("no main brand configured (set `main = true` on one brand or configure main_brand)")]
    MissingMainBrand,

    #[error("multiple main brands: {}", .0.join(", "))]
    MultipleMainBrands(Vec<String>),

    #[error("configured main brand not found: {0}")]
    UnknownMainBrand(String),

    #[error("invalid brand key {key:?}: {reason}")]
    InvalidBrandKey { key: String, reason: String },

    #[error("route without name in brand {brand}: {path}")]
    EmptyRouteName { brand: String, path: String },

    #[error("invalid site file format: {message}")]
    InvalidSiteFile { path: PathBuf, message: String },
}
