use tracing::trace;

use crate::types::{AttrValue, Descriptor};

/// The target environment that turns descriptors into live nodes.
///
/// The builder only ever calls these four operations, so any element tree
/// (an in-memory document, a UI toolkit, a test recorder) can sit behind it.
pub trait NodeFactory {
    /// Handle to a created node.
    type Node;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Set or overwrite an attribute. The factory decides how flags are represented.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &AttrValue);

    /// Replace the node's inner content with raw markup.
    fn set_content(&mut self, node: &Self::Node, html: &str);

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: Self::Node);

    /// Create one node with everything the descriptor names already applied.
    ///
    /// Content is set first, then the explicit attributes in order, then the
    /// generated `class`, `style` and `id` attributes. The generated three are
    /// always set, empty or not, and replace explicit ones of the same name.
    fn materialize(&mut self, descriptor: &Descriptor) -> Self::Node {
        let node = self.create_element(&descriptor.tag);

        if !descriptor.content.is_empty() {
            self.set_content(&node, &descriptor.content);
        }

        let mut attributes = descriptor.attributes.clone();
        attributes.insert("class".into(), AttrValue::Text(descriptor.class_list()));
        attributes.insert("style".into(), AttrValue::Text(descriptor.style_text()));
        attributes.insert("id".into(), AttrValue::Text(descriptor.id.clone()));

        for (name, value) in &attributes {
            self.set_attribute(&node, name, value);
        }

        trace!(tag = %descriptor.tag, attributes = attributes.len(), "Materialized node");
        node
    }
}
