//! Generation service - the use case driving one resource from entry lines
//! to artifact bodies.
//!
//! 1. Resolve the catalog (once per service)
//! 2. Accept entries one at a time; a rejected entry leaves the session as it was
//! 3. Reorder the collection and run each requested compiler

use heck::ToUpperCamelCase;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, Artifact, GeneratedArtifact, GeneratedArtifacts,
        ports::{CatalogSource, Inflector},
    },
    domain::{
        CompileContext, Entry, EntryCollection, EntryKindCatalog, ResourceNames, is_model_name,
    },
    error::{CrudgenError, CrudgenResult},
};

/// Split `"string email --n"` into its kind and the raw argument string.
pub fn split_entry_line(line: &str) -> Result<(&str, &str), ApplicationError> {
    let trimmed = line.trim();
    let (kind, raw) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(kind, raw)| (kind, raw.trim_start()));

    if kind.is_empty() || kind.starts_with('-') {
        return Err(ApplicationError::InvalidEntryLine {
            line: line.to_string(),
        });
    }
    Ok((kind, raw))
}

/// Holds the catalog and the naming service shared by every session.
pub struct GenerationService {
    catalog: EntryKindCatalog,
    inflector: Box<dyn Inflector>,
}

impl GenerationService {
    pub fn new(catalog: EntryKindCatalog, inflector: Box<dyn Inflector>) -> Self {
        Self { catalog, inflector }
    }

    /// Load the catalog from a source and build the service around it.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn from_source(
        source: &dyn CatalogSource,
        inflector: Box<dyn Inflector>,
    ) -> CrudgenResult<Self> {
        let catalog = source.load()?;
        info!(kinds = catalog.len(), "Catalog loaded");
        Ok(Self::new(catalog, inflector))
    }

    pub fn catalog(&self) -> &EntryKindCatalog {
        &self.catalog
    }

    pub fn inflector(&self) -> &dyn Inflector {
        self.inflector.as_ref()
    }

    /// Start a session for one model.
    #[instrument(skip(self))]
    pub fn session(&self, model: &str) -> CrudgenResult<GenerationSession<'_>> {
        if !is_model_name(model) {
            let suggestion = self.inflector.singular(model).to_upper_camel_case();
            return Err(ApplicationError::InvalidModelName {
                model: model.to_string(),
                suggestion: is_model_name(&suggestion).then_some(suggestion),
            }
            .into());
        }

        let names = ResourceNames::new(model, self.inflector.as_ref());
        debug!(table = %names.table, "Session started");
        Ok(GenerationSession {
            service: self,
            names,
            entries: EntryCollection::new(),
        })
    }

    /// Parse one entry line without adding it anywhere.
    pub fn check(&self, line: &str) -> CrudgenResult<Entry> {
        let (kind, raw) = split_entry_line(line)?;
        Ok(Entry::create(kind, raw, &self.catalog)?)
    }
}

/// Entries accumulated for one model.
pub struct GenerationSession<'s> {
    service: &'s GenerationService,
    names: ResourceNames,
    entries: EntryCollection,
}

impl GenerationSession<'_> {
    pub fn names(&self) -> &ResourceNames {
        &self.names
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    /// Create an entry and add it to the collection.
    #[instrument(skip(self), fields(model = %self.names.model))]
    pub fn add(&mut self, kind: &str, raw: &str) -> CrudgenResult<&Entry> {
        let entry = Entry::create(kind, raw, &self.service.catalog)?;
        let name = entry.name().to_string();
        self.entries.add(entry)?;
        debug!(entry = %name, total = self.entries.len(), "Entry accepted");

        self.entries
            .entries()
            .last()
            .ok_or_else(|| CrudgenError::Internal {
                message: format!("entry '{name}' vanished after being added"),
            })
    }

    /// Like [`add`](Self::add), with the kind taken from the first word of `line`.
    pub fn add_line(&mut self, line: &str) -> CrudgenResult<&Entry> {
        let (kind, raw) = split_entry_line(line)?;
        self.add(kind, raw)
    }

    /// Reorder the collection and compile the requested artifacts.
    ///
    /// Artifacts with no output get `placeholder` as their body.
    #[instrument(
        skip_all,
        fields(model = %self.names.model, entries = self.entries.len(), artifacts = artifacts.len())
    )]
    pub fn finish(mut self, artifacts: &[Artifact], placeholder: &str) -> GeneratedArtifacts {
        self.entries.reorder();

        let ctx = CompileContext::new(
            &self.service.catalog,
            self.service.inflector.as_ref(),
            &self.names,
        );
        let artifacts: Vec<GeneratedArtifact> = artifacts
            .iter()
            .map(|&artifact| GeneratedArtifact {
                artifact,
                body: artifact.compiler(ctx).compile_all(&self.entries, placeholder),
            })
            .collect();

        info!("Generation completed");
        GeneratedArtifacts {
            model: self.names.model.clone(),
            table: self.names.table.clone(),
            columns: self.entries.columns(),
            artifacts,
        }
    }
}
