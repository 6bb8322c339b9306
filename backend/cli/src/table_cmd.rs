//! `qudom table`: `{ "header": [...], "rows": [[...]] }` to an HTML table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use qudom_dom::{table, Document, HtmlRenderer};

use crate::build_cmd::read_input;

#[derive(Debug, Deserialize)]
pub struct TableInput {
    #[serde(default)]
    pub header: Option<Vec<Value>>,
    pub rows: Vec<Vec<Value>>,
}

/// Strings as-is, everything else as its JSON text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn render_table_html(input: &TableInput, renderer: &HtmlRenderer) -> String {
    let header: Option<Vec<String>> = input
        .header
        .as_ref()
        .map(|cells| cells.iter().map(cell_text).collect());
    let rows: Vec<Vec<String>> = input
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let mut doc = Document::new();
    let root = table(&mut doc, header.as_deref(), &rows);
    let body = doc.body();
    doc.append(body, root);
    renderer.render(&doc, root)
}

pub async fn run(file: Option<PathBuf>, renderer: &HtmlRenderer) -> Result<()> {
    let raw = read_input(file.as_deref()).await?;
    let input: TableInput = serde_json::from_str(&raw).context("Invalid table JSON")?;
    println!("{}", render_table_html(&input, renderer).trim_end());
    Ok(())
}
