use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

/// Failures reported by a host tree.
///
/// The renderer never recovers from these; they are handed back to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("{kind} node cannot contain children")]
    NotAContainer { kind: String },

    #[error("Operation requires an element node, found a {kind} node")]
    NotAnElement { kind: String },

    #[error("Offset {offset} is out of bounds for a container with {len} children")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Range start {start} is after its end {end}")]
    InvertedRange { start: usize, end: usize },

    #[error("Cannot insert a node into itself or one of its descendants")]
    HierarchyRequest,
}

impl HostError {
    pub fn not_a_container(kind: impl Into<String>) -> Self {
        Self::NotAContainer { kind: kind.into() }
    }

    pub fn not_an_element(kind: impl Into<String>) -> Self {
        Self::NotAnElement { kind: kind.into() }
    }

    pub fn out_of_bounds(offset: usize, len: usize) -> Self {
        Self::OffsetOutOfBounds { offset, len }
    }
}
