//! Unified error handling for crudgen-core.
//!
//! Wraps domain and application errors behind one type with categories and
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for crudgen-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CrudgenError {
    /// Errors from the domain layer (bad entries, collection invariants, catalog defects).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CrudgenError {
    /// What the user can do about it, one line per hint.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Try: crudgen config list".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in crudgen".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether a session can report this error and carry on with the next
    /// entry (bind, validation, unknown kind and collection invariant errors).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_recoverable(),
            Self::Application(e) => matches!(
                e,
                ApplicationError::InvalidEntryLine { .. } | ApplicationError::UnknownArtifact { .. }
            ),
            Self::Configuration { .. } | Self::Internal { .. } => false,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CrudgenResult<T> = Result<T, CrudgenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BindError;

    #[test]
    fn entry_errors_are_recoverable() {
        let bind: CrudgenError = DomainError::from(BindError::MissingRequiredArgument {
            argument: "column".into(),
        })
        .into();
        assert!(bind.is_recoverable());
        assert_eq!(bind.category(), ErrorCategory::Validation);

        let conflict: CrudgenError = DomainError::ColumnConflict {
            name: "belongsTo:User".into(),
            columns: vec!["user_id".into()],
        }
        .into();
        assert!(conflict.is_recoverable());
        assert_eq!(conflict.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn catalog_defects_are_not_recoverable() {
        let err: CrudgenError = DomainError::DuplicateKind {
            kind: "string".into(),
        }
        .into();
        assert!(!err.is_recoverable());
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn messages_pass_through_transparently() {
        let err: CrudgenError = DomainError::UnknownKind { kind: "strng".into() }.into();
        assert_eq!(err.to_string(), "unknown entry kind 'strng'");
        assert!(err.suggestions().iter().any(|s| s.contains("crudgen kinds")));
    }
}
