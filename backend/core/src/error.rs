use thiserror::Error;

use crate::parser::SegmentKind;

/// Problems reported by strict identifier parsing. Offsets are byte offsets
/// into the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty {kind} segment at offset {offset}")]
    EmptySegment { kind: SegmentKind, offset: usize },

    #[error("invalid tag name {name:?} at offset {offset}")]
    InvalidTagName { name: String, offset: usize },

    #[error("invalid {kind} name {name:?} at offset {offset}")]
    InvalidName {
        kind: SegmentKind,
        name: String,
        offset: usize,
    },

    #[error("{kind} with empty name at offset {offset}")]
    EmptyKey { kind: SegmentKind, offset: usize },

    #[error("{kind} {key:?} has an empty value at offset {offset}")]
    EmptyValue {
        kind: SegmentKind,
        key: String,
        offset: usize,
    },

    #[error("id given more than once (again at offset {offset})")]
    DuplicateId { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            Self::EmptySegment { offset, .. }
            | Self::InvalidTagName { offset, .. }
            | Self::InvalidName { offset, .. }
            | Self::EmptyKey { offset, .. }
            | Self::EmptyValue { offset, .. }
            | Self::DuplicateId { offset } => *offset,
        }
    }
}

/// Failures of the tree builder.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("tree mapping has no entries")]
    EmptyMapping,

    #[error("tree nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("invalid identifier {identifier:?}: {source}")]
    Parse {
        identifier: String,
        #[source]
        source: ParseError,
    },
}
