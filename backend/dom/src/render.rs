//! Renderers for documents
//!
//! Serializes a subtree to HTML markup or to its plain text.

use qudom_core::validation::is_valid_attribute_name;
use tracing::warn;

use crate::document::{Document, Namespace, NodeId};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Escape text for use between tags.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Drop `<...>` markup from raw content.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    indent: Option<usize>,
    omit_empty_attributes: bool,
}

impl HtmlRenderer {
    /// Compact output on a single line.
    pub fn new() -> Self {
        Self::default()
    }

    /// One element per line, children indented by `width` spaces.
    pub fn pretty(width: usize) -> Self {
        Self {
            indent: Some(width),
            ..Self::default()
        }
    }

    /// Leave out attributes whose value is empty (`class=""` and the like).
    pub fn omit_empty_attributes(mut self, omit: bool) -> Self {
        self.omit_empty_attributes = omit;
        self
    }

    /// Render `node` and its subtree to HTML.
    pub fn render(&self, doc: &Document, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(doc, node, 0, &mut out);
        out
    }

    fn write_node(&self, doc: &Document, node: NodeId, depth: usize, out: &mut String) {
        let element = doc.element(node);
        self.write_indent(depth, out);

        out.push('<');
        out.push_str(&element.tag);
        if element.namespace == Namespace::Svg
            && element.tag == "svg"
            && !element.attributes.contains_key("xmlns")
        {
            out.push_str(&format!(" xmlns=\"{}\"", Namespace::Svg.uri()));
        }
        for (name, value) in &element.attributes {
            if self.omit_empty_attributes && value.is_empty() {
                continue;
            }
            if !is_valid_attribute_name(name) {
                warn!(tag = %element.tag, name = %name, "Skipping attribute with unwritable name");
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
        }
        out.push('>');

        let childless = element.content.is_empty() && element.children.is_empty();
        if childless && is_void_element(&element.tag) {
            self.write_newline(out);
            return;
        }

        out.push_str(&element.content);
        if !element.children.is_empty() {
            self.write_newline(out);
            for &child in &element.children {
                self.write_node(doc, child, depth + 1, out);
            }
            self.write_indent(depth, out);
        }

        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
        self.write_newline(out);
    }

    fn write_indent(&self, depth: usize, out: &mut String) {
        if let Some(width) = self.indent {
            out.push_str(&" ".repeat(width * depth));
        }
    }

    fn write_newline(&self, out: &mut String) {
        if self.indent.is_some() {
            out.push('\n');
        }
    }

    /// Text content of `node`: inner content with markup removed, followed by
    /// the children's text.
    pub fn text(doc: &Document, node: NodeId) -> String {
        let element = doc.element(node);
        let mut output = unescape(&strip_tags(&element.content));
        for &child in &element.children {
            output.push_str(&Self::text(doc, child));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qudom_core::{build_tree, TreeSpec};

    fn build(doc: &mut Document, json: &str) -> NodeId {
        let spec: TreeSpec = serde_json::from_str(json).unwrap();
        build_tree(&spec, doc).unwrap()
    }

    #[test]
    fn renders_compact_html() {
        let mut doc = Document::new();
        let root = build(&mut doc, r#"{"ul#menu.nav": ["li!One", "li.active!Two"]}"#);
        assert_eq!(
            HtmlRenderer::new().render(&doc, root),
            concat!(
                r#"<ul class="nav" style="" id="menu">"#,
                r#"<li class="" style="" id="">One</li>"#,
                r#"<li class="active" style="" id="">Two</li></ul>"#,
            )
        );
    }

    #[test]
    fn omits_empty_attributes_on_request() {
        let mut doc = Document::new();
        let root = build(&mut doc, r#"{"ul#menu.nav": ["li!One", "li.active!Two"]}"#);
        assert_eq!(
            HtmlRenderer::new().omit_empty_attributes(true).render(&doc, root),
            r#"<ul class="nav" id="menu"><li>One</li><li class="active">Two</li></ul>"#
        );
    }

    #[test]
    fn renders_pretty_html() {
        let mut doc = Document::new();
        let root = build(&mut doc, r#"{"div": [{"p": ["b!x"]}, "br"]}"#);
        let expected = "<div>\n  <p>\n    <b>x</b>\n  </p>\n  <br>\n</div>\n";
        let renderer = HtmlRenderer::pretty(2).omit_empty_attributes(true);
        assert_eq!(renderer.render(&doc, root), expected);
    }

    #[test]
    fn content_is_raw_and_attributes_are_escaped() {
        let mut doc = Document::new();
        let root = build(&mut doc, r#""p@title:a\"b!<em>hi</em>""#);
        assert_eq!(
            HtmlRenderer::new().render(&doc, root),
            r#"<p title="a&quot;b" class="" style="" id=""><em>hi</em></p>"#
        );
    }

    #[test]
    fn unwritable_attribute_names_are_skipped() {
        let mut doc = Document::new();
        let injected = build_tree(&"p@x\"><script>alert(1)</script><i y".into(), &mut doc).unwrap();
        let bare = build_tree(&"p@".into(), &mut doc).unwrap();
        let renderer = HtmlRenderer::new().omit_empty_attributes(true);
        assert_eq!(renderer.render(&doc, injected), "<p></p>");
        assert_eq!(renderer.render(&doc, bare), "<p></p>");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut doc = Document::new();
        let root = build(&mut doc, r#""img@src:cat""#);
        assert_eq!(
            HtmlRenderer::new().omit_empty_attributes(true).render(&doc, root),
            r#"<img src="cat">"#
        );
        assert!(is_void_element("BR"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn svg_root_gets_namespace() {
        let mut doc = Document::new();
        let svg = doc.create_svg("svg", [("width", "10")]);
        let rect = doc.create_svg("rect", Vec::<(String, String)>::new());
        doc.append(svg, rect);
        assert_eq!(
            HtmlRenderer::new().render(&doc, svg),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10"><rect></rect></svg>"#
        );
    }

    #[test]
    fn text_strips_markup() {
        let mut doc = Document::new();
        let root = build(&mut doc, r#"{"div!<b>Hello</b> &amp; ": ["span!world"]}"#);
        assert_eq!(HtmlRenderer::text(&doc, root), "Hello & world");
    }

    #[test]
    fn escapes() {
        assert_eq!(escape_text("<a & b>"), "&lt;a &amp; b&gt;");
        assert_eq!(escape_attribute("\"x\""), "&quot;x&quot;");
    }
}
