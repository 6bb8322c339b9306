//! Arena-backed element document.
//!
//! Nodes live in a flat `Vec` and are addressed by [`NodeId`]. A document owns
//! a `body` root; created nodes stay detached until appended somewhere below
//! it, and only attached nodes are found by the lookup methods.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{trace, warn};

use qudom_core::{AttrValue, NodeFactory};

use crate::render::escape_text;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Handle to a node in one [`Document`]. Ids from another document are not
/// meaningful and make accessors panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Html,
    Svg,
}

impl Namespace {
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Html => HTML_NAMESPACE,
            Namespace::Svg => SVG_NAMESPACE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub namespace: Namespace,
    pub attributes: IndexMap<String, String>,
    /// Raw inner markup, rendered before the children.
    pub content: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str, namespace: Namespace) -> Self {
        Self {
            tag: tag.to_string(),
            namespace,
            attributes: IndexMap::new(),
            content: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Serializable copy of a subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub tag: String,
    pub namespace: Namespace,
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body", Namespace::Html)],
            body: NodeId(0),
        }
    }

    /// The root every attached node hangs from.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created, including the body.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn create_element_ns(&mut self, tag: &str, namespace: Namespace) -> NodeId {
        self.nodes.push(Element::new(tag, namespace));
        let id = NodeId(self.nodes.len() - 1);
        trace!(tag, node = id.0, "Created element");
        id
    }

    /// Create an HTML element with attributes and inner markup.
    pub fn create<K, V>(
        &mut self,
        tag: &str,
        attributes: impl IntoIterator<Item = (K, V)>,
        html: &str,
    ) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let id = self.create_element_ns(tag, Namespace::Html);
        self.set_inner_html(id, html);
        for (name, value) in attributes {
            self.set_attr(id, name, value);
        }
        id
    }

    /// Create an element in the SVG namespace.
    pub fn create_svg<K, V>(&mut self, tag: &str, attributes: impl IntoIterator<Item = (K, V)>) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let id = self.create_element_ns(tag, Namespace::Svg);
        for (name, value) in attributes {
            self.set_attr(id, name, value);
        }
        id
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.element(id).tag
    }

    pub fn namespace(&self, id: NodeId) -> Namespace {
        self.element(id).namespace
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self, id: NodeId) -> &IndexMap<String, String> {
        &self.element(id).attributes
    }

    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.element_mut(id).attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).attributes.shift_remove(name)
    }

    pub fn content(&self, id: NodeId) -> &str {
        &self.element(id).content
    }

    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        self.element_mut(id).content = html.to_string();
    }

    /// Replace inner content with escaped text.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.element_mut(id).content = escape_text(text);
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.element(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).parent
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` and changes nothing when `child` is `parent` or one of
    /// its ancestors, since the tree would become a cycle.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.is_ancestor_or_self(child, parent) {
            warn!(
                parent = parent.index(),
                child = child.index(),
                "Refusing to append a node under itself"
            );
            return false;
        }
        self.detach(child);
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
        true
    }

    /// Whether `ancestor` is `node` or sits on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove `id` from its parent's children. The node itself stays valid.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.element_mut(id).parent.take() {
            self.element_mut(parent).children.retain(|&c| c != id);
        }
    }

    /// Detach every child of `id`.
    pub fn clear(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.element_mut(id).children);
        for child in children {
            self.element_mut(child).parent = None;
        }
    }

    /// `root` and its descendants in tree order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|&id| self.attribute(id, "id") == Some(element_id))
    }

    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|&id| {
                self.attribute(id, "class")
                    .is_some_and(|list| list.split_whitespace().any(|c| c == class))
            })
            .collect()
    }

    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|&id| self.tag(id).eq_ignore_ascii_case(tag))
            .collect()
    }

    /// Lookup by a one-sigil query: `#id`, `.class`, or a tag name.
    pub fn get(&self, query: &str) -> Vec<NodeId> {
        if let Some(element_id) = query.strip_prefix('#') {
            self.get_element_by_id(element_id).into_iter().collect()
        } else if let Some(class) = query.strip_prefix('.') {
            self.get_elements_by_class_name(class)
        } else {
            self.get_elements_by_tag_name(query)
        }
    }

    pub fn snapshot(&self, id: NodeId) -> NodeSnapshot {
        let element = self.element(id);
        NodeSnapshot {
            tag: element.tag.clone(),
            namespace: element.namespace,
            attributes: element.attributes.clone(),
            content: element.content.clone(),
            children: element.children.iter().map(|&c| self.snapshot(c)).collect(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFactory for Document {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns(tag, Namespace::Html)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &AttrValue) {
        self.set_attr(*node, name, value.as_str());
    }

    fn set_content(&mut self, node: &NodeId, html: &str) {
        self.set_inner_html(*node, html);
    }

    fn append_child(&mut self, parent: &NodeId, child: NodeId) {
        let _ = self.append(*parent, child);
    }
}
