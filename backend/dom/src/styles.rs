//! Inline style helpers over the `style` attribute.

use indexmap::IndexMap;

use crate::document::{Document, NodeId};

/// Join style entries as `key:value` pairs separated by `;`.
pub fn stylize<K, V>(styles: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    styles
        .into_iter()
        .map(|(key, value)| format!("{}:{}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Parse a `style` attribute value. Empty parts are skipped; each part splits
/// on its first colon, and a part without one maps to an empty value.
pub fn parse_style(style: &str) -> IndexMap<String, String> {
    style
        .split(';')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(':') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}

/// Current inline styles of `node`.
pub fn get_styles(doc: &Document, node: NodeId) -> IndexMap<String, String> {
    doc.attribute(node, "style").map(parse_style).unwrap_or_default()
}

/// Merge `styles` into the node's inline styles and rewrite the attribute.
/// Existing keys keep their position.
pub fn set_styles<K, V>(doc: &mut Document, node: NodeId, styles: impl IntoIterator<Item = (K, V)>)
where
    K: Into<String>,
    V: Into<String>,
{
    let mut merged = get_styles(doc, node);
    for (key, value) in styles {
        merged.insert(key.into(), value.into());
    }
    doc.set_attr(node, "style", stylize(&merged));
}
