//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input handed to the pure view-model core.
/// They signal caller bugs, not recoverable runtime conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed color {input:?}: {reason}")]
    MalformedColor { input: String, reason: String },

    #[error("category is cyclic or shared between parents: {id}")]
    CyclicOrSharedNode { id: String },
}

impl DomainError {
    /// Parse errors come from malformed scalar input (colors).
    pub fn is_parse_error(&self) -> bool {
        matches!(self, DomainError::MalformedColor { .. })
    }

    /// Structural errors come from a forest that is not a forest.
    pub fn is_structural_error(&self) -> bool {
        matches!(self, DomainError::CyclicOrSharedNode { .. })
    }

    pub(crate) fn malformed_color(input: &str, reason: impl Into<String>) -> Self {
        DomainError::MalformedColor {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn cyclic(id: impl Into<String>) -> Self {
        DomainError::CyclicOrSharedNode { id: id.into() }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
