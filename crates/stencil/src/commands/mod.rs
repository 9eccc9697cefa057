//! CLI command implementations

pub mod completions;
pub mod config;
pub mod create;
pub mod inspect;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8Path;
use stencil_core::{ConfigLoader, StencilConfig};

/// Resolve the loader for `--config`, or the default user config file
pub(crate) fn config_loader(config: Option<&Utf8Path>) -> Result<ConfigLoader> {
    match config {
        Some(path) => Ok(ConfigLoader::with_file(path)),
        None => ConfigLoader::new().context("Failed to locate the user config file"),
    }
}

/// Load configuration through [`config_loader`]
pub(crate) fn load_config(config: Option<&Utf8Path>) -> Result<StencilConfig> {
    let loader = config_loader(config)?;
    loader
        .load()
        .with_context(|| format!("Failed to load configuration from {}", loader.config_file()))
}
