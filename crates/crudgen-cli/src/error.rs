//! `CliError`: everything a command can fail with, the hints shown under it,
//! and the process exit code it maps to.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use crudgen_core::error::{CrudgenError, ErrorCategory as CoreCategory};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected line, unknown kind, bad catalog, ... Anything the core reports.
    #[error(transparent)]
    Core(#[from] CrudgenError),

    #[error("Invalid entries file '{}': {message}", .path.display())]
    InvalidEntriesFile { path: PathBuf, message: String },

    /// Config file unreadable or unknown `config get` key.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The interactive prompt could not read from the terminal.
    #[error("Prompt failed: {message}")]
    Prompt {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Ctrl-C at an interactive prompt.
    #[error("Cancelled")]
    Cancelled,

    #[error("This build of crudgen has no '{feature}' support")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::InvalidEntriesFile { path, .. } => vec![
                format!("Check the TOML syntax of {}", path.display()),
                "Expected: entries = [\"string title\", \"text body --n\"]".into(),
            ],
            Self::Config { .. } => vec![
                format!(
                    "Config files read: {} and ./{}",
                    crate::config::AppConfig::config_path().display(),
                    crate::config::LOCAL_CONFIG
                ),
                "Valid keys: crudgen config list".into(),
                "Start over with: crudgen init --force".into(),
            ],
            Self::Io { .. } => vec!["Check that the path exists and is readable".into()],
            Self::Prompt { .. } => {
                vec!["Use 'crudgen generate -e ...' when no terminal is attached".into()]
            }
            Self::Cancelled => Vec::new(),
            Self::FeatureNotAvailable { feature } => vec![format!(
                "Reinstall with it enabled: cargo install crudgen-cli --features {feature}"
            )],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::InvalidEntriesFile { .. } | Self::Prompt { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::Config { .. } | Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// The message block printed to stderr: the error, its source chain
    /// when `verbose`, then the suggestions.
    pub fn render(&self, verbose: bool, colored: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if colored { style(text) } else { text.to_owned() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("\u{2717} Error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let cause = format!("caused by: {err}");
                out.push_str(&format!("  {}\n", paint(&cause, |t| t.dimmed().to_string())));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            ));
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", |t| t.dimmed().to_string())
            ));
        }

        out
    }

    /// Mirror the error into the log at a level matching its category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "command failed");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "command failed");
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "caused by");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad entry line, entries file or prompt input.
    UserError,
    /// Unknown kind or artifact.
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
        }
    }
}

// ── IntoCli ───────────────────────────────────────────────────────────────────

/// Attach a message to an I/O failure at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Io {
            message: f().into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen_core::{
        application::ApplicationError,
        domain::{DomainError, RuleViolation},
    };
    use std::io;

    fn core(err: impl Into<CrudgenError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err = core(ApplicationError::UnknownArtifact {
            name: "routes".into(),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("migration")));
    }

    #[test]
    fn entries_file_suggestion_shows_format() {
        let err = CliError::InvalidEntriesFile {
            path: PathBuf::from("post.toml"),
            message: "expected `=`".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("entries = [")));
    }

    #[test]
    fn rejected_entries_exit_with_2() {
        let validation = core(DomainError::Validation {
            kind: "string".into(),
            violations: vec![RuleViolation {
                field: "column".into(),
                message: "must be an identifier".into(),
            }],
        });
        let conflict = core(DomainError::DuplicateName {
            name: "title".into(),
            index: false,
        });
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(conflict.exit_code(), 2);
        assert_eq!(CliError::Cancelled.exit_code(), 2);
    }

    #[test]
    fn unknown_kind_exits_with_3() {
        let err = core(DomainError::UnknownKind {
            kind: "blob".into(),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn catalog_and_config_problems_exit_with_4() {
        let config = CliError::Config {
            message: "x".into(),
            source: None,
        };
        let catalog = core(ApplicationError::CatalogUnavailable {
            source_name: "kinds".into(),
            reason: "missing".into(),
        });
        assert_eq!(config.exit_code(), 4);
        assert_eq!(catalog.exit_code(), 4);
        assert_eq!(CliError::FeatureNotAvailable { feature: "interactive" }.exit_code(), 4);
    }

    #[test]
    fn io_failures_exit_with_1() {
        let err: CliError = io::Error::other("disk on fire").into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn plain_render_has_message_and_suggestions() {
        let err = core(DomainError::UnknownKind {
            kind: "blob".into(),
        });
        let s = err.render(false, false);
        assert!(s.contains("Error: unknown entry kind 'blob'"));
        assert!(s.contains("Suggestions:\n  'blob' is not in the catalog"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_lists_causes_and_drops_hint() {
        let err = CliError::Io {
            message: "Failed to read entries".into(),
            source: io::Error::other("permission denied"),
        };
        let s = err.render(true, false);
        assert!(s.contains("caused by: permission denied"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn context_wraps_io_errors() {
        let result: Result<(), io::Error> = Err(io::ErrorKind::NotFound.into());
        match result.with_cli_context(|| "reading post.toml") {
            Err(CliError::Io { message, .. }) => assert_eq!(message, "reading post.toml"),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
