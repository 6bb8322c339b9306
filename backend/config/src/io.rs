//! Config file discovery and loading.

use crate::schema::QudomConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the qudom config directory.
/// Priority: `QUDOM_CONFIG_DIR` env > `~/.qudom/` > `./.qudom/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QUDOM_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".qudom");
    }
    PathBuf::from(".qudom")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Config file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` is TOML; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Parse config text in the given format.
pub fn parse_config(raw: &str, format: ConfigFormat) -> Result<QudomConfig> {
    match format {
        ConfigFormat::Yaml => {
            // An empty YAML document is null, not a mapping.
            if raw.trim().is_empty() {
                return Ok(QudomConfig::default());
            }
            serde_yaml::from_str(raw).context("Failed to parse config YAML")
        }
        ConfigFormat::Toml => toml::from_str(raw).context("Failed to parse config TOML"),
    }
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<QudomConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(QudomConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&raw, ConfigFormat::from_path(path))
        .with_context(|| format!("Invalid config at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("qudom-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Yaml);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(parse_config("  \n", ConfigFormat::Yaml).unwrap(), QudomConfig::default());
    }

    #[tokio::test]
    async fn missing_file_is_default() {
        let config = load_config(&temp_path("missing.yaml")).await.unwrap();
        assert_eq!(config, QudomConfig::default());
    }

    #[tokio::test]
    async fn loads_yaml_and_toml_files() {
        let yaml = temp_path("load.yaml");
        std::fs::write(&yaml, "builder:\n  strict: true\n").unwrap();
        let config = load_config(&yaml).await.unwrap();
        assert!(config.build_options().strict);
        std::fs::remove_file(&yaml).unwrap();

        let toml_path = temp_path("load.toml");
        std::fs::write(&toml_path, "[render]\nindent = 2\n").unwrap();
        let config = load_config(&toml_path).await.unwrap();
        assert_eq!(config.indent(), 2);
        std::fs::remove_file(&toml_path).unwrap();
    }

    #[tokio::test]
    async fn invalid_file_reports_path() {
        let path = temp_path("bad.yaml");
        std::fs::write(&path, "builder: [1, 2").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("bad.yaml"));
        std::fs::remove_file(&path).unwrap();
    }
}
