//! Command handlers. Each translates arguments into core calls and prints
//! the result; none of them contain generation logic.

pub mod check;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod interactive;
pub mod kinds;

use tracing::debug;

use crudgen_adapters::{BuiltinCatalog, DirectoryCatalog, EnglishInflector};
use crudgen_core::{
    application::{Artifact, GeneratedArtifacts, GenerationService},
    error::CrudgenError,
};

use crate::{
    cli::CatalogArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Build the generation service over `--catalog`, else `catalog.dir` from
/// the config, else the built-in kinds alone.
pub(crate) fn load_service(args: &CatalogArgs, config: &AppConfig) -> CliResult<GenerationService> {
    let inflector = Box::new(EnglishInflector);
    let service = match args.catalog.as_ref().or(config.catalog.dir.as_ref()) {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using catalog directory");
            GenerationService::from_source(&DirectoryCatalog::new(dir), inflector)?
        }
        None => GenerationService::from_source(&BuiltinCatalog, inflector)?,
    };
    Ok(service)
}

/// Parse artifact names, falling back to `generate.artifacts`. Duplicates
/// are dropped, first occurrence wins.
pub(crate) fn resolve_artifacts(names: &[String], config: &AppConfig) -> CliResult<Vec<Artifact>> {
    let names: &[String] = if names.is_empty() {
        &config.generate.artifacts
    } else {
        names
    };

    let mut artifacts = Vec::with_capacity(names.len());
    for name in names {
        let artifact = name
            .parse::<Artifact>()
            .map_err(|e| CliError::Core(CrudgenError::from(e)))?;
        if !artifacts.contains(&artifact) {
            artifacts.push(artifact);
        }
    }
    Ok(artifacts)
}

/// Print generated artifacts as titled sections, or one JSON document.
pub(crate) fn print_artifacts(
    output: &OutputManager,
    generated: &GeneratedArtifacts,
) -> CliResult<()> {
    if output.is_json() {
        output.json(generated)?;
        return Ok(());
    }

    output.header(&format!("{} ({})", generated.model, generated.table))?;
    output.print(&output.dim(&format!("columns: {}", generated.columns.join(", "))))?;

    for section in generated.iter() {
        output.print("")?;
        output.header(&format!(
            "── {} {}",
            section.artifact,
            output.dim(section.artifact.description())
        ))?;
        output.content(&section.body)?;
    }
    Ok(())
}
