use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::BuildError;
use crate::parser::Parser;
use crate::traits::NodeFactory;
use crate::types::{TreeSpec, DEFAULT_TAG};

/// Default nesting limit for tree specifications.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for [`TreeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Tag for identifiers that do not name one.
    pub default_tag: String,
    /// Reject ambiguous identifiers instead of parsing them leniently.
    pub strict: bool,
    /// Deepest nesting accepted; the root is depth 1.
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recoverable problems noticed while building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A mapping had more than one entry; only `used` was built.
    MultipleRootEntries { used: String, ignored: Vec<String> },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleRootEntries { used, ignored } => write!(
                f,
                "multiple root entries; only the first is used ({used:?}, ignored {})",
                ignored.len()
            ),
        }
    }
}

/// Recursive builder from [`TreeSpec`] to factory nodes.
///
/// Every call to [`build`](Self::build) creates fresh nodes. Warnings are
/// logged as they happen and kept until taken.
pub struct TreeBuilder<'f, F: NodeFactory> {
    factory: &'f mut F,
    parser: Parser,
    strict: bool,
    max_depth: usize,
    warnings: Vec<BuildWarning>,
}

impl<'f, F: NodeFactory> TreeBuilder<'f, F> {
    pub fn new(factory: &'f mut F) -> Self {
        Self::with_options(factory, BuildOptions::default())
    }

    pub fn with_options(factory: &'f mut F, options: BuildOptions) -> Self {
        Self {
            factory,
            parser: Parser::new().with_default_tag(options.default_tag),
            strict: options.strict,
            max_depth: options.max_depth,
            warnings: Vec::new(),
        }
    }

    /// Build `spec` and return its root node.
    pub fn build(&mut self, spec: &TreeSpec) -> Result<F::Node, BuildError> {
        self.build_at(spec, 1)
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<BuildWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn build_at(&mut self, spec: &TreeSpec, depth: usize) -> Result<F::Node, BuildError> {
        if depth > self.max_depth {
            return Err(BuildError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match spec {
            TreeSpec::Leaf(identifier) => self.materialize(identifier),
            TreeSpec::Branch(map) => {
                let mut entries = map.iter();
                let (identifier, children) = entries.next().ok_or(BuildError::EmptyMapping)?;

                let ignored: Vec<String> = entries.map(|(key, _)| key.clone()).collect();
                if !ignored.is_empty() {
                    warn!(
                        used = %identifier,
                        ignored = ?ignored,
                        "multiple root entries; only the first is used"
                    );
                    self.warnings.push(BuildWarning::MultipleRootEntries {
                        used: identifier.clone(),
                        ignored,
                    });
                }

                let parent = self.materialize(identifier)?;
                for child in children {
                    let node = self.build_at(child, depth + 1)?;
                    self.factory.append_child(&parent, node);
                }
                Ok(parent)
            }
        }
    }

    fn materialize(&mut self, identifier: &str) -> Result<F::Node, BuildError> {
        let descriptor = if self.strict {
            self.parser
                .parse_strict(identifier)
                .map_err(|source| BuildError::Parse {
                    identifier: identifier.to_string(),
                    source,
                })?
        } else {
            self.parser.parse(identifier)
        };
        debug!(identifier, tag = %descriptor.tag, "Building node");
        Ok(self.factory.materialize(&descriptor))
    }
}

/// Build `spec` with default options.
pub fn build_tree<F: NodeFactory>(spec: &TreeSpec, factory: &mut F) -> Result<F::Node, BuildError> {
    TreeBuilder::new(factory).build(spec)
}
