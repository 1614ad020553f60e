//! Implementation of the `crudgen generate` command.
//!
//! Collects entry lines from `--from` and `-e`, feeds them to a generation
//! session and prints the selected artifacts. A rejected line is reported and
//! skipped, like a re-prompt in interactive mode; `--strict` turns the first
//! rejection into the command's error.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    cli::GenerateArgs,
    commands::{load_service, print_artifacts, resolve_artifacts},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Content of a `--from` file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntriesFile {
    #[serde(default)]
    entries: Vec<String>,
}

#[instrument(skip_all, fields(model = %args.model))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let artifacts = resolve_artifacts(&args.artifacts, &config)?;
    let service = load_service(&args.catalog, &config)?;

    let mut lines = match &args.from {
        Some(path) => read_entries_file(path)?,
        None => Vec::new(),
    };
    lines.extend(args.entries);

    let mut session = service.session(&args.model)?;
    let mut skipped = 0usize;
    for line in &lines {
        match session.add_line(line) {
            Ok(_) => {}
            Err(e) if e.is_recoverable() && !args.strict => {
                warn!(line = %line, error = %e, "Entry rejected");
                output.warning(&format!("skipped '{line}': {e}"))?;
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        accepted = session.entries().len(),
        skipped,
        "Entries collected"
    );

    let placeholder = args
        .placeholder
        .as_deref()
        .unwrap_or(&config.generate.placeholder);
    let generated = session.finish(&artifacts, placeholder);
    print_artifacts(&output, &generated)
}

/// Read the `entries` array of a TOML file. Blank lines are dropped.
fn read_entries_file(path: &Path) -> CliResult<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read entries from '{}'", path.display()))?;
    parse_entries(&raw).map_err(|message| CliError::InvalidEntriesFile {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_entries(raw: &str) -> Result<Vec<String>, String> {
    let file: EntriesFile = toml::from_str(raw).map_err(|e| e.message().to_string())?;
    Ok(file
        .entries
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn entries_are_trimmed_and_blank_lines_dropped() {
        let entries = parse_entries("entries = [\" string title \", \"\", \"timestamps\"]").unwrap();
        assert_eq!(entries, ["string title", "timestamps"]);
    }

    #[test]
    fn missing_entries_key_is_empty() {
        assert!(parse_entries("").unwrap().is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_entries("fields = [\"string title\"]").is_err());
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(matches!(
            read_entries_file(&missing),
            Err(CliError::Io { .. })
        ));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("post.toml");
        fs::write(&path, "entries = [").unwrap();
        match read_entries_file(&path) {
            Err(CliError::InvalidEntriesFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected InvalidEntriesFile, got {other:?}"),
        }
    }
}
