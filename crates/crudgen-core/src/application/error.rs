//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while setting up or driving a generation session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A catalog source could not produce a catalog.
    #[error("catalog '{source_name}' is unavailable: {reason}")]
    CatalogUnavailable { source_name: String, reason: String },

    /// An entry line had no kind token.
    #[error("invalid entry line '{line}': expected '<kind> [arguments]'")]
    InvalidEntryLine { line: String },

    /// An artifact name that no compiler answers to.
    #[error("unknown artifact '{name}'")]
    UnknownArtifact { name: String },

    /// The resource model name is not a capitalised word. `suggestion` is
    /// the singular StudlyCase form of what was typed, when there is one.
    #[error("invalid model name '{model}'")]
    InvalidModelName {
        model: String,
        suggestion: Option<String>,
    },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CatalogUnavailable { source_name, .. } => vec![
                format!("Check the catalog manifests under '{source_name}'"),
                "Run without --catalog to use the built-in kinds only".into(),
            ],
            Self::InvalidEntryLine { .. } => vec![
                "Start each entry with its kind, e.g. 'string email --n'".into(),
                "Try: crudgen kinds".into(),
            ],
            Self::UnknownArtifact { .. } => vec![format!(
                "Available artifacts: {}",
                crate::application::Artifact::ALL
                    .iter()
                    .map(|a| a.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )],
            Self::InvalidModelName { suggestion, .. } => {
                let mut hints = Vec::new();
                if let Some(model) = suggestion {
                    hints.push(format!("Did you mean '{model}'?"));
                }
                hints.push(
                    "Model names are singular StudlyCase words, e.g. 'Post' or 'BlogPost'".into(),
                );
                hints
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogUnavailable { .. } => ErrorCategory::Configuration,
            Self::InvalidEntryLine { .. } | Self::InvalidModelName { .. } => {
                ErrorCategory::Validation
            }
            Self::UnknownArtifact { .. } => ErrorCategory::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_artifact_lists_alternatives() {
        let err = ApplicationError::UnknownArtifact {
            name: "controller".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions()[0].contains("migration"));
    }

    #[test]
    fn catalog_unavailable_is_configuration() {
        let err = ApplicationError::CatalogUnavailable {
            source_name: "./kinds".into(),
            reason: "boom".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.to_string(), "catalog './kinds' is unavailable: boom");
    }

    #[test]
    fn model_name_hint_leads_with_suggestion() {
        let err = ApplicationError::InvalidModelName {
            model: "blog_posts".into(),
            suggestion: Some("BlogPost".into()),
        };
        assert_eq!(err.suggestions()[0], "Did you mean 'BlogPost'?");

        let bare = ApplicationError::InvalidModelName {
            model: "9".into(),
            suggestion: None,
        };
        assert_eq!(bare.suggestions().len(), 1);
    }
}
