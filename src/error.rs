use thiserror::Error;

/// Errors returned by the mutating operations of an [`OrderedTree`](crate::OrderedTree)
///
/// A failed operation never modifies the tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// An equal value was already stored in the tree
    #[error("item already in the tree")]
    DuplicateKey,

    /// No equal value was stored in the tree
    #[error("item not in the tree")]
    KeyNotFound,
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
