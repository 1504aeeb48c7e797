//! Error types for variable tree operations.

use crate::arena::NodeId;

/// Errors produced by arena access, tree edits, and deserialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariableError {
    /// The id points at a slot that was released (or never allocated).
    #[error("stale variable node: {0}")]
    StaleNode(NodeId),

    /// A child lookup was made on a primitive variable.
    #[error("variable {0} is not a collection")]
    NotACollection(NodeId),

    /// A positional lookup past the end of an array.
    #[error("index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    /// Serialized input did not match the variable format.
    #[error("malformed serialized variable: {reason}")]
    Malformed { reason: String },
}

impl VariableError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed { reason: reason.into() }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VariableError>;
