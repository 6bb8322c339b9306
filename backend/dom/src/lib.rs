//! In-memory element documents for qudom trees
//!
//! A [`Document`] implements [`qudom_core::NodeFactory`], so any tree
//! specification can be built into it and then rendered to HTML or inspected
//! with the style, class and lookup helpers.

pub mod classes;
pub mod document;
pub mod render;
pub mod styles;
pub mod table;

pub use classes::{add_class, class_list, has_class, remove_class};
pub use document::{Document, Element, Namespace, NodeId, NodeSnapshot};
pub use render::{escape_attribute, escape_text, HtmlRenderer};
pub use styles::{get_styles, parse_style, set_styles, stylize};
pub use table::table;
