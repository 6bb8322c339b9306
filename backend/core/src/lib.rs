//! `qudom-core`: shorthand identifiers to element trees.
//!
//! Provides:
//! - [`Parser`]: identifier string to [`Descriptor`], lenient or strict
//! - [`Segments`]: the underlying sigil-driven segment scanner
//! - [`NodeFactory`]: the capability a target environment implements
//! - [`TreeBuilder`]: [`TreeSpec`] to a tree of factory nodes

pub mod builder;
pub mod error;
pub mod parser;
pub mod traits;
pub mod types;
pub mod validation;

pub use builder::{build_tree, BuildOptions, BuildWarning, TreeBuilder, DEFAULT_MAX_DEPTH};
pub use error::{BuildError, ParseError};
pub use parser::{
    parse_identifier, parse_identifier_strict, Parser, Segment, SegmentKind, Segments, SIGILS,
};
pub use traits::NodeFactory;
pub use types::{AttrValue, Descriptor, TreeSpec, DEFAULT_TAG};
pub use validation::diagnose;
