//! Artifact selection and generated output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::compilers::{
    CompileContext, Compiler, factory::factory_compiler, migration::migration_compiler,
    model::{casts_compiler, fillable_compiler, properties_compiler, relations_compiler},
    request::request_compiler,
    view::{form_fields_compiler, table_cells_compiler, table_headers_compiler},
};

/// One target artifact body a session can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    Migration,
    Rules,
    Factory,
    Fillable,
    Casts,
    Properties,
    Relations,
    FormFields,
    TableHeaders,
    TableCells,
}

impl Artifact {
    pub const ALL: [Self; 10] = [
        Self::Migration,
        Self::Rules,
        Self::Factory,
        Self::Fillable,
        Self::Casts,
        Self::Properties,
        Self::Relations,
        Self::FormFields,
        Self::TableHeaders,
        Self::TableCells,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Migration => "migration",
            Self::Rules => "rules",
            Self::Factory => "factory",
            Self::Fillable => "fillable",
            Self::Casts => "casts",
            Self::Properties => "properties",
            Self::Relations => "relations",
            Self::FormFields => "form_fields",
            Self::TableHeaders => "table_headers",
            Self::TableCells => "table_cells",
        }
    }

    /// Where the body goes in the generated sources.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Migration => "Schema::create closure body",
            Self::Rules => "form request rules() array",
            Self::Factory => "factory definition() array",
            Self::Fillable => "model $fillable array",
            Self::Casts => "model casts() array",
            Self::Properties => "model @property doc block",
            Self::Relations => "model relation methods",
            Self::FormFields => "create/edit form fields",
            Self::TableHeaders => "index table header cells",
            Self::TableCells => "index table row cells",
        }
    }

    /// Build the compiler producing this artifact.
    pub fn compiler<'a>(self, ctx: CompileContext<'a>) -> Compiler<'a> {
        match self {
            Self::Migration => migration_compiler(ctx),
            Self::Rules => request_compiler(ctx),
            Self::Factory => factory_compiler(ctx),
            Self::Fillable => fillable_compiler(ctx),
            Self::Casts => casts_compiler(ctx),
            Self::Properties => properties_compiler(ctx),
            Self::Relations => relations_compiler(ctx),
            Self::FormFields => form_fields_compiler(ctx),
            Self::TableHeaders => table_headers_compiler(ctx),
            Self::TableCells => table_cells_compiler(ctx),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Artifact {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| ApplicationError::UnknownArtifact { name: s.to_string() })
    }
}

/// One compiled artifact body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub artifact: Artifact,
    pub body: String,
}

/// The result of a finished session, in the order artifacts were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifacts {
    pub model: String,
    pub table: String,
    pub columns: Vec<String>,
    pub artifacts: Vec<GeneratedArtifact>,
}

impl GeneratedArtifacts {
    pub fn get(&self, artifact: Artifact) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|g| g.artifact == artifact)
            .map(|g| g.body.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_kebab_aliases() {
        assert_eq!("migration".parse::<Artifact>().unwrap(), Artifact::Migration);
        assert_eq!("form-fields".parse::<Artifact>().unwrap(), Artifact::FormFields);
        assert_eq!("TABLE_CELLS".parse::<Artifact>().unwrap(), Artifact::TableCells);
        assert!(matches!(
            "controller".parse::<Artifact>(),
            Err(ApplicationError::UnknownArtifact { name }) if name == "controller"
        ));
    }

    #[test]
    fn every_artifact_round_trips_through_its_name() {
        for artifact in Artifact::ALL {
            assert_eq!(artifact.to_string().parse::<Artifact>().unwrap(), artifact);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Artifact::TableHeaders).unwrap();
        assert_eq!(json, "\"table_headers\"");
    }
}
