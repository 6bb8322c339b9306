//! qudom configuration schema.
//!
//! Every section and field is optional so partial files deserialize; see
//! [`crate::defaults`] for the values filled in afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use qudom_core::BuildOptions;

use crate::defaults::{DEFAULT_INDENT, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QudomConfig {
    /// Identifier parsing and tree building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderConfig>,

    /// HTML output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderConfig>,

    /// Log level, format and file output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Preview server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Spaces per nesting level; 0 renders compact single-line HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,
    /// Drop empty attributes (`class=""`, `style=""`, `id=""`) from output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_empty_attributes: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// `pretty` or `json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Directory for daily-rolling NDJSON logs; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Tree spec file served at `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved views
// ---------------------------------------------------------------------------

impl QudomConfig {
    /// Builder options, falling back to library defaults for unset fields.
    pub fn build_options(&self) -> BuildOptions {
        let mut options = BuildOptions::default();
        if let Some(builder) = &self.builder {
            if let Some(tag) = &builder.default_tag {
                options.default_tag = tag.clone();
            }
            if let Some(strict) = builder.strict {
                options.strict = strict;
            }
            if let Some(max_depth) = builder.max_depth {
                options.max_depth = max_depth;
            }
        }
        options
    }

    pub fn indent(&self) -> usize {
        self.render
            .as_ref()
            .and_then(|r| r.indent)
            .unwrap_or(DEFAULT_INDENT)
    }

    pub fn omit_empty_attributes(&self) -> bool {
        self.render
            .as_ref()
            .and_then(|r| r.omit_empty_attributes)
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or(DEFAULT_LOG_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = "builder:\n  defaultTag: section\n  maxDepth: 12\nrender:\n  indent: 4\n";
        let config: QudomConfig = serde_yaml::from_str(yaml).unwrap();
        let options = config.build_options();
        assert_eq!(options.default_tag, "section");
        assert_eq!(options.max_depth, 12);
        assert!(!options.strict);
        assert_eq!(config.indent(), 4);
        assert!(!config.omit_empty_attributes());
    }

    #[test]
    fn parses_toml() {
        let src = "[builder]\nstrict = true\n\n[render]\nomitEmptyAttributes = true\n\n[server]\nport = 9000\n";
        let config: QudomConfig = toml::from_str(src).unwrap();
        assert!(config.build_options().strict);
        assert!(config.omit_empty_attributes());
        assert_eq!(config.server.unwrap().port, Some(9000));
    }

    #[test]
    fn empty_config_uses_library_defaults() {
        let config = QudomConfig::default();
        assert_eq!(config.build_options(), BuildOptions::default());
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.log_format(), "pretty");
    }
}
