use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tag used when an identifier does not name one.
pub const DEFAULT_TAG: &str = "div";

/// Value of an attribute or style entry: either explicit text or a bare flag.
///
/// Flags serialize as JSON `true`. `false` has no meaning in the shorthand and
/// is rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAttrValue", into = "RawAttrValue")]
pub enum AttrValue {
    Text(String),
    Flag,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAttrValue {
    Flag(bool),
    Text(String),
}

impl TryFrom<RawAttrValue> for AttrValue {
    type Error = String;

    fn try_from(raw: RawAttrValue) -> Result<Self, Self::Error> {
        match raw {
            RawAttrValue::Flag(true) => Ok(AttrValue::Flag),
            RawAttrValue::Flag(false) => Err("flag values must be `true`".to_string()),
            RawAttrValue::Text(text) => Ok(AttrValue::Text(text)),
        }
    }
}

impl From<AttrValue> for RawAttrValue {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Text(text) => RawAttrValue::Text(text),
            AttrValue::Flag => RawAttrValue::Flag(true),
        }
    }
}

impl AttrValue {
    pub fn is_flag(&self) -> bool {
        matches!(self, AttrValue::Flag)
    }

    /// String form handed to node factories. Flags become `"true"`.
    pub fn as_str(&self) -> &str {
        match self {
            AttrValue::Text(text) => text,
            AttrValue::Flag => "true",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

/// Structured form of one shorthand identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub tag: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttrValue>,
    #[serde(default)]
    pub styles: IndexMap<String, AttrValue>,
    #[serde(default)]
    pub content: String,
}

impl Descriptor {
    /// An otherwise empty descriptor for `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: String::new(),
            classes: Vec::new(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            content: String::new(),
        }
    }

    /// Classes joined by single spaces, as written to a `class` attribute.
    pub fn class_list(&self) -> String {
        self.classes.join(" ")
    }

    /// Styles as `key:value` pairs joined by `;`, as written to a `style` attribute.
    pub fn style_text(&self) -> String {
        self.styles
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Default for Descriptor {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

/// Declarative description of an element tree.
///
/// A bare string is a leaf. A mapping names its node with the (first) key and
/// lists the children as the value. Mapping order follows the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeSpec {
    Leaf(String),
    Branch(IndexMap<String, Vec<TreeSpec>>),
}

impl TreeSpec {
    pub fn leaf(identifier: impl Into<String>) -> Self {
        TreeSpec::Leaf(identifier.into())
    }

    pub fn branch(identifier: impl Into<String>, children: Vec<TreeSpec>) -> Self {
        let mut map = IndexMap::with_capacity(1);
        map.insert(identifier.into(), children);
        TreeSpec::Branch(map)
    }

    /// The entry a builder uses: the leaf itself or the first mapping entry.
    pub fn root(&self) -> Option<(&str, &[TreeSpec])> {
        match self {
            TreeSpec::Leaf(identifier) => Some((identifier.as_str(), &[])),
            TreeSpec::Branch(map) => map
                .first()
                .map(|(identifier, children)| (identifier.as_str(), children.as_slice())),
        }
    }

    /// Number of nodes a build would create, ignoring extra root entries.
    pub fn node_count(&self) -> usize {
        match self.root() {
            Some((_, children)) => 1 + children.iter().map(TreeSpec::node_count).sum::<usize>(),
            None => 0,
        }
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self.root() {
            Some((_, children)) => 1 + children.iter().map(TreeSpec::depth).max().unwrap_or(0),
            None => 0,
        }
    }
}

impl From<&str> for TreeSpec {
    fn from(identifier: &str) -> Self {
        TreeSpec::leaf(identifier)
    }
}

impl From<String> for TreeSpec {
    fn from(identifier: String) -> Self {
        TreeSpec::Leaf(identifier)
    }
}
