//! Errors raised while binding, validating and collecting entries, and while
//! assembling a catalog.

use crate::domain::{
    signature::{BindError, GrammarError},
    validation::RuleViolation,
};
use thiserror::Error;

/// Everything the domain layer can reject. `Clone` so an interactive session
/// can report a rejected line and carry on with the same collection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ── One entry line ──────────────────────────────────────────────────
    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("invalid '{kind}' entry: {}", join_violations(.violations))]
    Validation {
        kind: String,
        violations: Vec<RuleViolation>,
    },

    #[error("unknown entry kind '{kind}'")]
    UnknownKind { kind: String },

    // ── Collection (left unchanged on error) ────────────────────────────
    #[error("{}", duplicate_message(.name, .index))]
    DuplicateName { name: String, index: bool },

    #[error("index '{index}' references unknown column '{column}'")]
    UnknownColumn { index: String, column: String },

    #[error("'{name}' conflicts with existing column(s): {}", .columns.join(", "))]
    ColumnConflict { name: String, columns: Vec<String> },

    // ── Catalog definitions ─────────────────────────────────────────────
    #[error("kind '{kind}' has an invalid signature: {source}")]
    InvalidSignature {
        kind: String,
        #[source]
        source: GrammarError,
    },

    #[error("invalid validation rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("entry kind '{kind}' is defined more than once")]
    DuplicateKind { kind: String },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

fn join_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn duplicate_message(name: &str, index: &bool) -> String {
    if *index {
        format!("an index on the same columns already exists ({name})")
    } else {
        format!("a field named '{name}' already exists")
    }
}

impl DomainError {
    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Bind(BindError::UnknownOption { option }) => vec![
                format!("'{option}' is not an option of this kind"),
                "Try: crudgen kinds  (to see each kind's signature)".into(),
            ],
            Self::Bind(BindError::UnterminatedQuote) => {
                vec!["Close the quote, or escape it with a backslash inside double quotes".into()]
            }
            Self::Bind(_) => vec!["Check the entry against its signature: crudgen kinds".into()],
            Self::Validation { violations, .. } => violations
                .iter()
                .map(|v| format!("Fix: {v}"))
                .collect(),
            Self::UnknownKind { kind } => vec![
                format!("'{kind}' is not in the catalog"),
                "Try: crudgen kinds".into(),
            ],
            Self::DuplicateName { index: true, .. } => {
                vec!["Each column set can only be indexed once".into()]
            }
            Self::DuplicateName { name, .. } => {
                vec![format!("Pick a different name than '{name}'")]
            }
            Self::UnknownColumn { column, .. } => vec![
                format!("Add the '{column}' column before indexing it"),
                "Indexes may only reference columns declared earlier (or 'id')".into(),
            ],
            Self::ColumnConflict { columns, .. } => vec![
                format!("Already taken: {}", columns.join(", ")),
                "Relations accept --foreign=<column> to pick another key".into(),
            ],
            Self::InvalidSignature { .. } | Self::InvalidRule { .. } => {
                vec!["Fix the kind definition in your catalog manifest".into()]
            }
            Self::DuplicateKind { kind } => {
                vec![format!("Remove one of the '{kind}' definitions")]
            }
            Self::InvalidCatalog(_) => vec!["See documentation for more details".into()],
        }
    }

    /// Decides the exit code and log level in the binary.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Bind(_) | Self::Validation { .. } => ErrorCategory::Validation,
            Self::DuplicateName { .. } | Self::UnknownColumn { .. } | Self::ColumnConflict { .. } => {
                ErrorCategory::Conflict
            }
            Self::UnknownKind { .. } => ErrorCategory::NotFound,
            Self::InvalidSignature { .. }
            | Self::InvalidRule { .. }
            | Self::DuplicateKind { .. }
            | Self::InvalidCatalog(_) => ErrorCategory::Internal,
        }
    }

    /// Whether the caller can report this error and retry the same entry.
    ///
    /// Catalog errors are defects in configuration and are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Internal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_distinguishes_index() {
        let field = DomainError::DuplicateName {
            name: "email".into(),
            index: false,
        };
        let index = DomainError::DuplicateName {
            name: "index:a,b".into(),
            index: true,
        };
        assert!(field.to_string().contains("field named 'email'"));
        assert!(index.to_string().contains("index on the same columns"));
    }

    #[test]
    fn validation_message_lists_every_violation() {
        let err = DomainError::Validation {
            kind: "string".into(),
            violations: vec![
                RuleViolation {
                    field: "column".into(),
                    message: "is bad".into(),
                },
                RuleViolation {
                    field: "length".into(),
                    message: "is worse".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid 'string' entry: column is bad; length is worse"
        );
        assert_eq!(err.suggestions().len(), 2);
    }

    #[test]
    fn recoverability_follows_category() {
        assert!(
            DomainError::UnknownKind {
                kind: "blob".into()
            }
            .is_recoverable()
        );
        assert!(
            !DomainError::DuplicateKind {
                kind: "string".into()
            }
            .is_recoverable()
        );
        assert_eq!(
            DomainError::from(BindError::UnterminatedQuote).category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn broken_signature_names_its_kind() {
        let err = DomainError::InvalidSignature {
            kind: "broken".into(),
            source: GrammarError::RequiredAfterOptional { name: "b".into() },
        };
        assert_eq!(
            err.to_string(),
            "kind 'broken' has an invalid signature: required argument 'b' follows an optional argument"
        );
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.is_recoverable());
        assert!(err.suggestions()[0].contains("catalog manifest"));
    }
}
