use crate::catalog::{builtin_catalog, load_catalog_file, scan_ability_dir};
use anyhow::Context;
use gloomdeck_core::{AbilityCatalog, TableConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_ENV: &str = "GLOOMDECK_CONFIG";
pub const SEED_ENV: &str = "GLOOMDECK_SEED";
const DEFAULT_CONFIG_FILE: &str = "gloomdeck.json";

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

/// `GLOOMDECK_CONFIG` if set, else `gloomdeck.json` when it exists.
pub fn config_path_from_env() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

/// Load a config file (any shape that embeds the table settings) or fall
/// back to defaults when no path is given.
pub fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> anyhow::Result<T> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            load_json(path)
        }
        None => Ok(T::default()),
    }
}

pub fn apply_env_overrides(config: &mut TableConfig) -> anyhow::Result<()> {
    if let Some(value) = std::env::var_os(SEED_ENV) {
        let value = value.to_string_lossy();
        let seed = value
            .parse::<u64>()
            .with_context(|| format!("parse {SEED_ENV}={value}"))?;
        config.seed = Some(seed);
    }
    Ok(())
}

/// Built-in sets, overlaid by the configured JSON file and then by a scan
/// of the configured image directory.
pub fn load_catalog(config: &TableConfig) -> anyhow::Result<AbilityCatalog> {
    let mut catalog = builtin_catalog(&config.ability_url_prefix);
    if let Some(path) = config.catalog.as_deref() {
        let extra = load_catalog_file(path)
            .with_context(|| format!("load ability catalog {}", path.display()))?;
        catalog.merge(extra);
    }
    if let Some(dir) = config.ability_dir.as_deref() {
        let scanned = scan_ability_dir(dir, &config.ability_url_prefix)
            .with_context(|| format!("scan ability cards in {}", dir.display()))?;
        catalog.merge(scanned);
    }
    info!(sets = catalog.len(), "ability catalog ready");
    Ok(catalog)
}
