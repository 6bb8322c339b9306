//! Class list helpers over the `class` attribute.

use crate::document::{Document, NodeId};

/// Classes of `node` in order. A missing attribute is an empty list.
pub fn class_list(doc: &Document, node: NodeId) -> Vec<String> {
    doc.attribute(node, "class")
        .map(|list| list.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn has_class(doc: &Document, node: NodeId, class: &str) -> bool {
    class_list(doc, node).iter().any(|c| c == class)
}

/// Append `class` unless already present.
pub fn add_class(doc: &mut Document, node: NodeId, class: &str) {
    let mut classes = class_list(doc, node);
    if !classes.iter().any(|c| c == class) {
        classes.push(class.to_string());
    }
    doc.set_attr(node, "class", classes.join(" "));
}

/// Remove the first occurrence of `class`, if any.
pub fn remove_class(doc: &mut Document, node: NodeId, class: &str) {
    let mut classes = class_list(doc, node);
    if let Some(pos) = classes.iter().position(|c| c == class) {
        classes.remove(pos);
    }
    doc.set_attr(node, "class", classes.join(" "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use qudom_core::build_tree;

    #[test]
    fn add_class_appends_once() {
        let mut doc = Document::new();
        let node = build_tree(&"div.a".into(), &mut doc).unwrap();
        add_class(&mut doc, node, "b");
        add_class(&mut doc, node, "a");
        assert_eq!(doc.attribute(node, "class"), Some("a b"));
        assert!(has_class(&doc, node, "b"));
    }

    #[test]
    fn add_class_to_unclassed_node() {
        let mut doc = Document::new();
        let node = build_tree(&"div".into(), &mut doc).unwrap();
        add_class(&mut doc, node, "fresh");
        assert_eq!(doc.attribute(node, "class"), Some("fresh"));
    }

    #[test]
    fn remove_class_keeps_others() {
        let mut doc = Document::new();
        let node = build_tree(&"div.a.b.c".into(), &mut doc).unwrap();
        remove_class(&mut doc, node, "b");
        remove_class(&mut doc, node, "missing");
        assert_eq!(class_list(&doc, node), vec!["a", "c"]);
    }
}
