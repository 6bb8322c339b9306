//! `qudom-config`: qudom runtime configuration.
//!
//! Provides:
//! - Typed config schema (builder, render, logging, server)
//! - YAML or TOML loading by file extension
//! - `QUDOM_*` environment overrides
//! - Default value application
//! - Validation with field paths

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with, InvalidEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config, ConfigFormat};
pub use schema::QudomConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// A config that passed validation, plus the warnings validation raised.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: QudomConfig,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load, apply env overrides and defaults, then validate a config file.
///
/// This is the main entry point for loading a config at runtime. It runs
/// before logging is set up, so warnings are returned for the caller to
/// report and the first validation error becomes the returned error.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    load_and_prepare_with(path, &std::env::vars().collect()).await
}

/// [`load_and_prepare`] with an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<PreparedConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides_with(config, env)
        .context("Failed to apply environment overrides")?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    if let Some(first) = report.errors.into_iter().next() {
        bail!(first);
    }

    Ok(PreparedConfig {
        config,
        warnings: report.warnings,
    })
}
