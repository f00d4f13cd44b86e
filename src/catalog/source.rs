use super::list::Catalog;
use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const BUILTIN_DOMAINS: &str = include_str!("../../assets/domains.txt");

/// The catalog compiled into the binary.
pub fn builtin_catalog() -> Catalog {
    Catalog::parse(BUILTIN_DOMAINS)
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog = Catalog::parse(&content);

    if catalog.is_empty() {
        warn!(path = %path.display(), "Catalog file contains no domains");
    }

    Ok(catalog)
}

/// Pick the catalog for this run: an explicit path wins over the config
/// file, and the built-in list is used when neither names one.
pub fn resolve_catalog(override_path: Option<&Path>, config: &Config) -> Result<Catalog> {
    let catalog = match override_path.or(config.catalog_path.as_deref()) {
        Some(path) => load_catalog_file(path)?,
        None => builtin_catalog(),
    };

    info!(count = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
