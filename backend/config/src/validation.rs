//! Config validation with field paths and user-friendly messages.

use crate::schema::QudomConfig;
use qudom_core::validation::is_valid_tag_name;
use thiserror::Error;

/// Depth above which a warning is issued; deep recursion risks the stack.
pub const MAX_DEPTH_WARNING: usize = 4096;

const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &QudomConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_builder(config, &mut report);
    validate_render(config, &mut report);
    validate_logging(config, &mut report);
    validate_server(config, &mut report);
    report
}

fn validate_builder(config: &QudomConfig, report: &mut ValidationReport) {
    let Some(builder) = &config.builder else { return };
    if let Some(tag) = &builder.default_tag {
        if !is_valid_tag_name(tag) {
            report.error("builder.defaultTag", format!("{tag:?} is not a valid tag name"));
        }
    }
    match builder.max_depth {
        Some(0) => report.error("builder.maxDepth", "maxDepth must be > 0"),
        Some(depth) if depth > MAX_DEPTH_WARNING => report.warn(
            "builder.maxDepth",
            format!("maxDepth {depth} may overflow the stack on deeply nested input"),
        ),
        _ => {}
    }
}

fn validate_render(config: &QudomConfig, report: &mut ValidationReport) {
    let Some(render) = &config.render else { return };
    if let Some(indent) = render.indent {
        if indent > 16 {
            report.warn("render.indent", format!("indent of {indent} spaces is unusually wide"));
        }
    }
}

fn validate_logging(config: &QudomConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(format) = &logging.format {
        if !LOG_FORMATS.contains(&format.as_str()) {
            report.error(
                "logging.format",
                format!("unknown log format {format:?}; expected one of {LOG_FORMATS:?}"),
            );
        }
    }
    if let Some(level) = &logging.level {
        if level.trim().is_empty() {
            report.error("logging.level", "log level cannot be empty");
        }
    }
}

fn validate_server(config: &QudomConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "port must be > 0");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{BuilderConfig, LoggingConfig, ServerConfig};

    #[test]
    fn defaults_are_valid() {
        let report = validate(&apply_all_defaults(QudomConfig::default()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rejects_bad_default_tag_and_zero_depth() {
        let config = QudomConfig {
            builder: Some(BuilderConfig {
                default_tag: Some("di v".into()),
                max_depth: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["builder.defaultTag", "builder.maxDepth"]);
    }

    #[test]
    fn warns_on_huge_depth() {
        let config = QudomConfig {
            builder: Some(BuilderConfig {
                max_depth: Some(100_000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let config = QudomConfig {
            logging: Some(LoggingConfig {
                format: Some("xml".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
        assert!(report.errors[0].to_string().contains("logging.format"));
    }

    #[test]
    fn warns_on_privileged_port() {
        let config = QudomConfig {
            server: Some(ServerConfig {
                port: Some(81),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "server.port");
    }
}
