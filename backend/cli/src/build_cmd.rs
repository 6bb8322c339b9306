//! `qudom build`: tree spec (JSON or YAML) to HTML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use qudom_core::{BuildError, BuildOptions, BuildWarning, TreeBuilder, TreeSpec};
use qudom_dom::{Document, HtmlRenderer};
use qudom_logging::{BuildEvent, EventLogger};

use crate::terminal_output::note_warn;

/// HTML for one built tree plus anything the builder complained about.
#[derive(Debug, Serialize)]
pub struct Rendered {
    pub html: String,
    pub warnings: Vec<BuildWarning>,
}

/// Read a file, or stdin when no path is given.
pub async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// `.json` files are JSON and other extensions YAML. Without a path the
/// first character decides.
pub fn parse_tree_spec(raw: &str, path: Option<&Path>) -> Result<TreeSpec> {
    let is_json = match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("json"),
        None => matches!(raw.trim_start().chars().next(), Some('{' | '"')),
    };

    if is_json {
        serde_json::from_str(raw).context("Invalid JSON tree spec")
    } else {
        serde_yaml::from_str(raw).context("Invalid YAML tree spec")
    }
}

/// Compact output for `indent == 0`, one element per line otherwise.
pub fn renderer(indent: usize, omit_empty_attributes: bool) -> HtmlRenderer {
    let renderer = if indent == 0 {
        HtmlRenderer::new()
    } else {
        HtmlRenderer::pretty(indent)
    };
    renderer.omit_empty_attributes(omit_empty_attributes)
}

/// Build `spec` into a fresh document and render its root.
///
/// `source` tags the emitted build events (`cli`, `server`).
pub fn render_spec(
    spec: &TreeSpec,
    options: &BuildOptions,
    renderer: &HtmlRenderer,
    source: &str,
) -> Result<Rendered, BuildError> {
    let mut doc = Document::new();
    let mut builder = TreeBuilder::with_options(&mut doc, options.clone());
    let result = builder.build(spec);
    let warnings = builder.take_warnings();

    for warning in &warnings {
        EventLogger::log_event(
            source,
            BuildEvent::Warning {
                message: warning.to_string(),
            },
        );
    }

    let root = match result {
        Ok(root) => root,
        Err(e) => {
            EventLogger::log_event(source, BuildEvent::Failed { error: e.to_string() });
            return Err(e);
        }
    };
    let body = doc.body();
    doc.append(body, root);

    EventLogger::log_event(
        source,
        BuildEvent::TreeBuilt {
            root: spec.root().map(|(id, _)| id.to_string()).unwrap_or_default(),
            nodes: spec.node_count(),
            depth: spec.depth(),
        },
    );

    Ok(Rendered {
        html: renderer.render(&doc, root),
        warnings,
    })
}

pub async fn run(
    file: Option<PathBuf>,
    options: &BuildOptions,
    renderer: &HtmlRenderer,
) -> Result<()> {
    let raw = read_input(file.as_deref()).await?;
    let spec = parse_tree_spec(&raw, file.as_deref())?;
    let rendered = render_spec(&spec, options, renderer, "cli")?;

    for warning in &rendered.warnings {
        note_warn(&warning.to_string());
    }
    println!("{}", rendered.html.trim_end());
    Ok(())
}
