//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Expected business conditions (a request that is no longer pending, an
/// empty ownership scope) are plain return values, not errors. This enum is
/// reserved for refusals and genuine failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An access or ownership check failed. Always a hard stop.
    #[error("you are not allowed to do this")]
    PermissionDenied,

    /// The target entity does not exist. Rendered to callers exactly like
    /// `PermissionDenied` so that denials never leak record existence.
    #[error("you are not allowed to do this")]
    NotFound,

    /// A value failed validation and no safe default applies.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backing store rejected a write. The operation is aborted.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A conflicting concurrent update was detected.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// True for the variants that surface to the user as a generic refusal.
    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_like_permission_denied() {
        assert_eq!(
            DomainError::NotFound.to_string(),
            DomainError::PermissionDenied.to_string()
        );
    }

    #[test]
    fn refusal_classification() {
        assert!(DomainError::PermissionDenied.is_refusal());
        assert!(DomainError::NotFound.is_refusal());
        assert!(!DomainError::validation("bad").is_refusal());
    }
}
