//! Filesystem-based catalog manifests.
//!
//! Discovers `*.toml` manifests under a directory tree and merges the kinds
//! and modifiers they declare over a base catalog (normally the built-ins).
//! A manifest kind with the same name as an existing kind replaces it in
//! place, so the catalog order stays stable.
//!
//! # Manifest format
//!
//! ```toml
//! [[kinds]]
//! kind      = "money"
//! group     = "column"                    # column | relation | index
//! signature = "{column} {--n|nullable}"
//! columns   = "argument"                  # argument | morphs | foreign-key | none | ["a", "b"]
//! role      = "plain"                     # optional: plain | timestamps | soft-deletes
//! statement = "$table->decimal(%column, 12, 2)"
//! rule      = "numeric"
//! faker     = "fake()->randomFloat(2, 0, 100)"
//! cast      = "decimal:2"
//! php_type  = "string"
//! widget    = "number"
//!
//! [kinds.rules]
//! column = "identifier"
//!
//! [modifiers]
//! after = "->after(%value)"
//! ```
//!
//! Manifests are applied in path order. A manifest that cannot be read,
//! parsed or turned into valid kinds is skipped as a whole with a `WARN` log.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crudgen_core::{
    application::{ApplicationError, CatalogSource},
    domain::{
        ColumnShape, DomainError, EntryKindCatalog, EntryKindDefinition, KindGroup, KindRole,
        KindTemplates,
    },
};

use crate::builtin_catalog::builtin_catalog;

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one catalog manifest.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default)]
    pub kinds: Vec<KindEntry>,
    /// Option name → modifier template appended by the migration compiler.
    #[serde(default)]
    pub modifiers: BTreeMap<String, String>,
}

/// One `[[kinds]]` table.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct KindEntry {
    pub kind: String,
    pub group: String,
    #[serde(default)]
    pub signature: String,
    pub role: Option<String>,
    pub columns: Option<ColumnsEntry>,
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    pub statement: Option<String>,
    pub rule: Option<String>,
    pub faker: Option<String>,
    pub cast: Option<String>,
    pub php_type: Option<String>,
    pub widget: Option<String>,
}

/// `columns = "morphs"` or `columns = ["created_at", "updated_at"]`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ColumnsEntry {
    Shape(String),
    Fixed(Vec<String>),
}

impl KindEntry {
    /// Validate the entry and build its definition.
    pub fn into_definition(self) -> Result<EntryKindDefinition, DomainError> {
        let group: KindGroup = self.group.parse()?;
        let mut builder = EntryKindDefinition::builder(self.kind, group).signature(self.signature);

        if let Some(role) = self.role {
            builder = builder.role(role.parse::<KindRole>()?);
        }
        match self.columns {
            Some(ColumnsEntry::Shape(shape)) => builder = builder.shape(shape.parse::<ColumnShape>()?),
            Some(ColumnsEntry::Fixed(columns)) => builder = builder.shape(ColumnShape::Fixed(columns)),
            None => {}
        }
        for (field, rule) in self.rules {
            builder = builder.rule(field, rule);
        }

        builder
            .templates(KindTemplates {
                statement: self.statement,
                rule: self.rule,
                faker: self.faker,
                cast: self.cast,
                php_type: self.php_type,
                widget: self.widget,
            })
            .build()
    }
}

/// The validated content of one manifest.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub definitions: Vec<EntryKindDefinition>,
    pub modifiers: BTreeMap<String, String>,
}

/// Why a single manifest was skipped.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid kind in '{}': {source}", .path.display())]
    Kind {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

/// Read, parse and validate one manifest. All of its kinds must be valid.
pub fn load_manifest(path: &Path) -> Result<LoadedManifest, ManifestError> {
    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: CatalogManifest = toml::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let definitions = manifest
        .kinds
        .into_iter()
        .map(KindEntry::into_definition)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ManifestError::Kind {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(LoadedManifest {
        path: path.to_path_buf(),
        definitions,
        modifiers: manifest.modifiers,
    })
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads catalog manifests from a directory tree.
///
/// # Example
///
/// ```no_run
/// use crudgen_adapters::{CatalogLoader, builtin_catalog};
///
/// let catalog = CatalogLoader::new("./kinds").load_into(builtin_catalog()?)?;
/// println!("{} kinds", catalog.len());
/// # Ok::<(), crudgen_core::domain::DomainError>(())
/// ```
pub struct CatalogLoader {
    dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every `*.toml` file under the directory, sorted by path.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidCatalog`] if the directory is missing or cannot
    /// be walked.
    pub fn manifest_paths(&self) -> Result<Vec<PathBuf>, DomainError> {
        if !self.dir.is_dir() {
            return Err(DomainError::InvalidCatalog(format!(
                "catalog directory not found: {}",
                self.dir.display()
            )));
        }

        let mut paths = Vec::new();
        for walk_entry in WalkDir::new(&self.dir).min_depth(1) {
            let walk_entry = walk_entry
                .map_err(|e| DomainError::InvalidCatalog(format!("directory walk error: {e}")))?;
            let path = walk_entry.path();
            if walk_entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == "toml")
            {
                paths.push(path.to_path_buf());
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Merge every valid manifest over `base`.
    #[instrument(skip(self, base), fields(dir = %self.dir.display()))]
    pub fn load_into(&self, base: EntryKindCatalog) -> Result<EntryKindCatalog, DomainError> {
        let mut builder = base.into_builder();
        let mut applied = 0usize;

        for path in self.manifest_paths()? {
            match load_manifest(&path) {
                Ok(manifest) => {
                    debug!(
                        path = %manifest.path.display(),
                        kinds = manifest.definitions.len(),
                        modifiers = manifest.modifiers.len(),
                        "applying catalog manifest"
                    );
                    for definition in manifest.definitions {
                        builder = builder.replace(definition);
                    }
                    for (option, template) in manifest.modifiers {
                        builder = builder.modifier(option, template);
                    }
                    applied += 1;
                }
                Err(e) => {
                    warn!(error = %e, "skipping catalog manifest");
                }
            }
        }

        debug!(manifests = applied, "finished loading catalog manifests");
        Ok(builder.build())
    }
}

/// [`CatalogSource`] for the built-in catalog extended by a manifest directory.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CatalogSource for DirectoryCatalog {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn load(&self) -> Result<EntryKindCatalog, ApplicationError> {
        builtin_catalog()
            .and_then(|base| CatalogLoader::new(&self.dir).load_into(base))
            .map_err(|e| ApplicationError::CatalogUnavailable {
                source_name: self.describe(),
                reason: e.to_string(),
            })
    }
}
