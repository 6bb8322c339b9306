//! Environment variable overrides for config values.
//!
//! | variable            | field                |
//! |---------------------|----------------------|
//! | `QUDOM_DEFAULT_TAG` | `builder.defaultTag` |
//! | `QUDOM_STRICT`      | `builder.strict`     |
//! | `QUDOM_MAX_DEPTH`   | `builder.maxDepth`   |
//! | `QUDOM_INDENT`      | `render.indent`      |
//! | `QUDOM_LOG_LEVEL`   | `logging.level`      |
//! | `QUDOM_LOG_FORMAT`  | `logging.format`     |
//! | `QUDOM_LOG_DIR`     | `logging.dir`        |
//! | `QUDOM_PORT`        | `server.port`        |
//!
//! Empty values are ignored.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::schema::{BuilderConfig, LoggingConfig, QudomConfig, RenderConfig, ServerConfig};

/// An override variable whose value does not parse.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for env var \"{var_name}\": expected {expected}")]
pub struct InvalidEnvVarError {
    pub var_name: String,
    pub value: String,
    pub expected: &'static str,
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: QudomConfig) -> Result<QudomConfig, InvalidEnvVarError> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: QudomConfig,
    env: &HashMap<String, String>,
) -> Result<QudomConfig, InvalidEnvVarError> {
    let lookup = |name: &str| env.get(name).filter(|v| !v.is_empty()).cloned();

    if let Some(tag) = lookup("QUDOM_DEFAULT_TAG") {
        config.builder.get_or_insert_with(BuilderConfig::default).default_tag = Some(tag);
    }
    if let Some(raw) = lookup("QUDOM_STRICT") {
        config.builder.get_or_insert_with(BuilderConfig::default).strict =
            Some(parse_bool("QUDOM_STRICT", &raw)?);
    }
    if let Some(raw) = lookup("QUDOM_MAX_DEPTH") {
        config.builder.get_or_insert_with(BuilderConfig::default).max_depth =
            Some(parse_number("QUDOM_MAX_DEPTH", &raw)?);
    }
    if let Some(raw) = lookup("QUDOM_INDENT") {
        config.render.get_or_insert_with(RenderConfig::default).indent =
            Some(parse_number("QUDOM_INDENT", &raw)?);
    }
    if let Some(level) = lookup("QUDOM_LOG_LEVEL") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    if let Some(format) = lookup("QUDOM_LOG_FORMAT") {
        config.logging.get_or_insert_with(LoggingConfig::default).format = Some(format);
    }
    if let Some(dir) = lookup("QUDOM_LOG_DIR") {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(PathBuf::from(dir));
    }
    if let Some(raw) = lookup("QUDOM_PORT") {
        config.server.get_or_insert_with(ServerConfig::default).port =
            Some(parse_number("QUDOM_PORT", &raw)?);
    }

    Ok(config)
}

fn parse_bool(var_name: &str, raw: &str) -> Result<bool, InvalidEnvVarError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InvalidEnvVarError {
            var_name: var_name.to_string(),
            value: raw.to_string(),
            expected: "a boolean",
        }),
    }
}

fn parse_number<T: FromStr>(var_name: &str, raw: &str) -> Result<T, InvalidEnvVarError> {
    raw.trim().parse().map_err(|_| InvalidEnvVarError {
        var_name: var_name.to_string(),
        value: raw.to_string(),
        expected: "a non-negative integer",
    })
}
