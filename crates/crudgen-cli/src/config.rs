//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `CRUDGEN_*` environment variables, `__` between sections
//!    (`CRUDGEN_GENERATE__PLACEHOLDER`, `CRUDGEN_CATALOG__DIR`)
//! 3. `--config FILE`, or else the platform config file and `.crudgen.toml`
//!    in the current directory (the local file wins)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crudgen_core::application::Artifact;

/// File name of the per-project configuration.
pub const LOCAL_CONFIG: &str = ".crudgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where extra entry kinds come from.
    pub catalog: CatalogConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Generation defaults.
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory of catalog manifests merged over the built-in kinds.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Body of an artifact that no entry contributes to.
    pub placeholder: String,
    /// Artifacts printed when `--artifact` is not given.
    pub artifacts: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            placeholder: "// TODO".into(),
            artifacts: Artifact::ALL.iter().map(|a| a.as_str().to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to encode default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG)).required(false)),
        };

        let settings = builder
            .add_source(
                Environment::with_prefix("CRUDGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("generate.artifacts"),
            )
            .build()
            .context("failed to read configuration")?;

        settings
            .try_deserialize()
            .context("configuration has an invalid shape")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.crudgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "crudgen", "crudgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_selects_every_artifact() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.generate.artifacts.len(), Artifact::ALL.len());
        assert_eq!(cfg.generate.placeholder, "// TODO");
        assert!(cfg.catalog.dir.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("crudgen.toml");
        fs::write(
            &path,
            "[generate]\nplaceholder = \"# nothing\"\nartifacts = [\"migration\"]\n\n[catalog]\ndir = \"kinds\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.generate.placeholder, "# nothing");
        assert_eq!(cfg.generate.artifacts, ["migration"]);
        assert_eq!(cfg.catalog.dir, Some(PathBuf::from("kinds")));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here/crudgen.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
