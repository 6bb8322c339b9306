//! Config defaults: fills unset fields of a parsed config.

use qudom_core::{DEFAULT_MAX_DEPTH, DEFAULT_TAG};

use crate::schema::{BuilderConfig, LoggingConfig, QudomConfig, RenderConfig, ServerConfig};

/// Compact output.
pub const DEFAULT_INDENT: usize = 0;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_FORMAT: &str = "pretty";

pub const DEFAULT_BIND: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 8080;

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: QudomConfig) -> QudomConfig {
    let config = apply_builder_defaults(config);
    let config = apply_render_defaults(config);
    let config = apply_logging_defaults(config);
    apply_server_defaults(config)
}

fn apply_builder_defaults(mut config: QudomConfig) -> QudomConfig {
    let builder = config.builder.get_or_insert_with(BuilderConfig::default);
    builder.default_tag.get_or_insert_with(|| DEFAULT_TAG.to_string());
    builder.strict.get_or_insert(false);
    builder.max_depth.get_or_insert(DEFAULT_MAX_DEPTH);
    config
}

fn apply_render_defaults(mut config: QudomConfig) -> QudomConfig {
    let render = config.render.get_or_insert_with(RenderConfig::default);
    render.indent.get_or_insert(DEFAULT_INDENT);
    render.omit_empty_attributes.get_or_insert(false);
    config
}

fn apply_logging_defaults(mut config: QudomConfig) -> QudomConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.format.get_or_insert_with(|| DEFAULT_LOG_FORMAT.to_string());
    config
}

fn apply_server_defaults(mut config: QudomConfig) -> QudomConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(QudomConfig::default());
        let builder = cfg.builder.unwrap();
        assert_eq!(builder.default_tag.as_deref(), Some("div"));
        assert_eq!(builder.strict, Some(false));
        assert_eq!(builder.max_depth, Some(DEFAULT_MAX_DEPTH));
        let render = cfg.render.unwrap();
        assert_eq!(render.indent, Some(0));
        assert_eq!(render.omit_empty_attributes, Some(false));
        assert_eq!(cfg.logging.unwrap().format.as_deref(), Some("pretty"));
        let server = cfg.server.unwrap();
        assert_eq!(server.bind.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));
    }

    #[test]
    fn does_not_override_user_values() {
        let cfg = QudomConfig {
            builder: Some(BuilderConfig {
                default_tag: Some("span".into()),
                max_depth: Some(8),
                ..Default::default()
            }),
            ..Default::default()
        };
        let builder = apply_all_defaults(cfg).builder.unwrap();
        assert_eq!(builder.default_tag.as_deref(), Some("span"));
        assert_eq!(builder.max_depth, Some(8));
        assert_eq!(builder.strict, Some(false));
    }
}
